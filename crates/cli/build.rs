use std::env;
use std::process::Command;

// Version metadata for `--version`: short commit hash, target triple, profile.
fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/heads");

    let commit = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "unknown".into());

    let env_or_unknown = |key: &str| env::var(key).unwrap_or_else(|_| "unknown".into());

    println!("cargo:rustc-env=MAILMERGE_COMMIT={commit}");
    println!("cargo:rustc-env=MAILMERGE_TARGET={}", env_or_unknown("TARGET"));
    println!("cargo:rustc-env=MAILMERGE_PROFILE={}", env_or_unknown("PROFILE"));
}
