use clap::Args;
use console::style;
use gdts_core::{DriftKind, FileDrift, check_declarations};

use crate::common::run_cli_sync;
use crate::generate::GenerateArgs;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub generate: GenerateArgs,
    #[arg(long = "quiet", short = 'q', help = "Only list drifted files, without diffs")]
    pub quiet: bool,
}

pub fn run(args: CheckArgs) -> i32 {
    run_cli_sync(|| run_inner(&args))
}

fn run_inner(args: &CheckArgs) -> Result<(), String> {
    let (_, opts) = args.generate.options()?;
    let drifts = check_declarations(&opts).map_err(|err| err.to_string())?;

    if drifts.is_empty() {
        println!("✅ Declarations are up to date");
        return Ok(());
    }

    for drift in &drifts {
        print!("{}", render_drift(drift, args.quiet));
    }

    Err(format!(
        "{} declaration file(s) out of date. Run `gdts generate` to update them.",
        drifts.len()
    ))
}

fn render_drift(drift: &FileDrift, quiet: bool) -> String {
    match &drift.kind {
        DriftKind::Missing => format!("{} {}\n", style("missing ").yellow(), drift.path),
        DriftKind::Stale => format!("{} {}\n", style("stale   ").yellow(), drift.path),
        DriftKind::Modified { diff } => {
            let mut output = format!("{} {}\n", style("modified").yellow(), drift.path);
            if !quiet {
                output.push_str(&colorize_diff(diff));
            }
            output
        }
    }
}

fn colorize_diff(diff: &str) -> String {
    let mut output = String::with_capacity(diff.len());
    for line in diff.lines() {
        let styled = if line.starts_with("+++") || line.starts_with("---") {
            style(line).bold().to_string()
        } else if line.starts_with('+') {
            style(line).green().to_string()
        } else if line.starts_with('-') {
            style(line).red().to_string()
        } else if line.starts_with("@@") {
            style(line).cyan().to_string()
        } else {
            line.to_string()
        };
        output.push_str(&styled);
        output.push('\n');
    }
    output
}
