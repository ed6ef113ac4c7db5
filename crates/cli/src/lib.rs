#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Command line interface for the `gdts` binary.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod build;
mod check;
mod common;
mod generate;
mod map_type;

/// Crates whose logs `GDTS_LOG=<level>` turns on.
const LOG_TARGETS: [&str; 3] = ["gdts_cli", "gdts_core", "gdts_common"];

#[derive(Parser)]
#[command(
    name = "gdts",
    version,
    about = "\x1b[36mgdts\x1b[0m generates TypeScript declarations for the Godot scripting API"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 🛠️  Generate declarations from extension_api.json
    Generate(generate::GenerateArgs),
    /// 🔍 Check that generated declarations are up to date
    Check(check::CheckArgs),
    /// 📦 Promote a snapshot to current and update the package version
    Build(build::BuildArgs),
    /// 🔤 Print the TypeScript annotation for Godot type descriptors
    #[command(name = "map-type")]
    MapType(map_type::MapTypeArgs),
}

/// Parse `args` (program name first) and run the selected command.
/// Returns the process exit code.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => generate::run(args),
            Some(Commands::Check(args)) => check::run(args),
            Some(Commands::Build(args)) => build::run(args),
            Some(Commands::MapType(args)) => map_type::run(&args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

pub fn init_tracing() {
    // GDTS_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "gdts_core=debug,gdts_cli=warn"
    let filter = match std::env::var("GDTS_LOG") {
        Ok(level) if is_plain_level(&level) => scoped_filter(&level),
        Ok(spec) => spec,
        Err(_) => scoped_filter("info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn scoped_filter(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}
