//! Embeds the commit and build time shown by `--version`

use std::env;
use std::process::Command;

use chrono::Utc;

fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    // Release pipelines build from tarballs without a .git directory
    let git_hash = env::var("TEMPLATE_RUNNER_GIT_HASH")
        .ok()
        .filter(|hash| !hash.is_empty())
        .or_else(git_commit)
        .unwrap_or_else(|| "unknown".to_string());
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIME={}", build_time);
    println!("cargo:rerun-if-env-changed=TEMPLATE_RUNNER_GIT_HASH");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
