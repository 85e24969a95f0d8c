use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use xshell::{cmd, Shell};

const TAURI_MANIFEST: &str = "src-tauri/Cargo.toml";

#[derive(Parser)]
#[command(name = "cargo-xtask", version, about = "Project automation tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format the workspace and the Tauri shell
    Fmt,
    /// Run formatting and clippy checks
    Check,
    /// Run the library test suite
    Test,
    /// Build the release bundle of the toolbar
    Package,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_root = project_root()?;
    let shell = Shell::new()?;
    shell.change_dir(project_root);

    match cli.command {
        Command::Fmt => run_fmt(&shell),
        Command::Check => run_check(&shell),
        Command::Test => run_test(&shell),
        Command::Package => run_package(&shell),
    }
}

fn run_fmt(shell: &Shell) -> Result<()> {
    cmd!(shell, "cargo fmt --all")
        .run()
        .context("failed to run cargo fmt")?;
    cmd!(shell, "cargo fmt --manifest-path {TAURI_MANIFEST}")
        .run()
        .context("failed to format the Tauri shell")?;
    Ok(())
}

fn run_check(shell: &Shell) -> Result<()> {
    cmd!(shell, "cargo fmt --all -- --check")
        .run()
        .context("cargo fmt --check failed")?;
    cmd!(shell, "cargo fmt --manifest-path {TAURI_MANIFEST} -- --check")
        .run()
        .context("cargo fmt --check failed for the Tauri shell")?;
    cmd!(
        shell,
        "cargo clippy --workspace --all-targets --all-features -- -D warnings"
    )
    .run()
    .context("cargo clippy failed")?;
    cmd!(
        shell,
        "cargo clippy --manifest-path {TAURI_MANIFEST} --all-targets -- -D warnings"
    )
    .run()
    .context("cargo clippy failed for the Tauri shell")?;
    Ok(())
}

fn run_test(shell: &Shell) -> Result<()> {
    cmd!(shell, "cargo test --workspace")
        .run()
        .context("cargo test failed")?;
    Ok(())
}

fn run_package(shell: &Shell) -> Result<()> {
    let _dir = shell.push_dir("src-tauri");
    cmd!(shell, "cargo tauri build")
        .run()
        .context("tauri build failed (is tauri-cli installed?)")?;
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(PathBuf::from)
        .context("xtask must live inside the repository")
}
