use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for fogline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy and tests, stopping at the first failure
    Ci,
    /// Check formatting
    Fmt,
    /// Run clippy with warnings denied
    Clippy,
    /// Run all tests, or one crate's with --package
    Test {
        #[arg(short, long)]
        package: Option<String>,
    },
    /// Run the fog sweep benchmark in release mode
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => {
            cargo("fmt", &["fmt", "--all", "--", "--check"])?;
            cargo("clippy", &clippy_args())?;
            cargo("test", &["test", "--workspace"])?;
        }
        Commands::Fmt => cargo("fmt", &["fmt", "--all", "--", "--check"])?,
        Commands::Clippy => cargo("clippy", &clippy_args())?,
        Commands::Test { package } => match package {
            Some(p) => cargo("test", &["test", "-p", &p])?,
            None => cargo("test", &["test", "--workspace"])?,
        },
        Commands::Bench => cargo(
            "bench",
            &["bench", "-p", "fogline-terrain", "--bench", "bench_fog_sweep"],
        )?,
    }

    Ok(())
}

fn clippy_args() -> [&'static str; 6] {
    ["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]
}

/// Run `cargo` with `args`, failing if it exits unsuccessfully.
fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {step} failed");
    }
    Ok(())
}
