use log::LevelFilter;

/// Initialize env_logger at the level picked on the command line.
///
/// `RUST_LOG` directives are still parsed first, so the environment can
/// override the CLI default per invocation.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
