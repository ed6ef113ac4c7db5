use clap::Args;
use gdts_common::validate_snapshot_name;
use gdts_core::{GenerateOptions, generate_declarations};
use tracing::debug;

use crate::common::{Project, ProjectArgs, Timer, display_path, run_cli_sync, run_with_spinner};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
    #[arg(
        long = "snapshot",
        value_name = "NAME",
        help = "Snapshot directory to write into, under the types root"
    )]
    pub snapshot: Option<String>,
}

impl GenerateArgs {
    /// Resolve the generator options for this invocation.
    pub fn options(&self) -> Result<(Project, GenerateOptions), String> {
        let project = self.project.resolve()?;
        let snapshot = self
            .snapshot
            .clone()
            .unwrap_or_else(|| project.config.snapshot.clone());
        validate_snapshot_name(&snapshot)?;

        let opts = GenerateOptions {
            api_path: project.api_path(),
            output_dir: project.types_root().join(&snapshot),
        };
        Ok((project, opts))
    }
}

pub fn run(args: GenerateArgs) -> i32 {
    run_cli_sync(|| run_inner(&args))
}

fn run_inner(args: &GenerateArgs) -> Result<(), String> {
    let timer = Timer::start("generate");
    let (project, opts) = args.options()?;
    debug!(
        api_path = %opts.api_path.display(),
        output_dir = %opts.output_dir.display(),
        "Generating declarations."
    );

    let (report, elapsed) = run_with_spinner("Generating declarations...", || {
        generate_declarations(&opts).map_err(|err| err.to_string())
    })?;
    timer.lap("Declaration generation");

    println!(
        "✅ Declarations written to {} ({elapsed})",
        display_path(&project.root, &opts.output_dir)
    );
    println!(
        "   {} written, {} unchanged, {} removed",
        report.written.len(),
        report.unchanged,
        report.removed.len()
    );
    for removed in &report.removed {
        println!("   - {removed}");
    }

    Ok(())
}
