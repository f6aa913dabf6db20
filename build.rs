/// Capture a git value at compile time, "unknown" outside a checkout.
fn git_output(args: &[&str]) -> String {
    std::process::Command::new("git")
        .args(args)
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn main() {
    // Embedded as env vars for the startup banner
    println!(
        "cargo:rustc-env=GIT_HASH={}",
        git_output(&["rev-parse", "--short", "HEAD"])
    );
    println!(
        "cargo:rustc-env=GIT_DATE={}",
        git_output(&["log", "-1", "--format=%ci"])
    );
}
