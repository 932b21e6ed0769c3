use std::env;
use std::process::Command;

const REVISION_ENV: &str = "MOCK_INTERVIEW_REVISION";

fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!revision.is_empty()).then_some(revision)
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed={REVISION_ENV}");

    let package = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    // Release builds outside a checkout pass the revision in explicitly.
    let revision = env::var(REVISION_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(git_revision);

    let version = match revision {
        Some(revision) => format!("{package}+{revision}"),
        None => package,
    };
    println!("cargo:rustc-env=MOCK_INTERVIEW_VERSION={version}");
}
