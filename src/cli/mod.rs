use clap::{ Args, Parser, Subcommand };
use std::path::PathBuf;

use cbmc_proof_runner::{ RestrictMode, RunOverrides };

pub mod commands;
pub mod ui;

const EPILOG: &str = "\
Runs `make _report` in every CBMC proof directory in parallel, adding each
proof's jobs to a Litani build, then asks Litani to run the build.

This is roughly equivalent to:

        litani init --project \"my-cool-project\"
        find . -name cbmc-proof.txt | while read -r proof; do
            (cd \"$(dirname \"$proof\")\" && make _report)
        done
        litani run-build

The project name is taken from PROJECT_NAME in Makefile-project-defines.

With --no-standalone only the proofs are configured: run `litani init`
yourself first, add any further jobs afterwards, then run
`litani run-build`.";

#[derive(Parser)]
#[command(
    name = "run-cbmc-proofs",
    about = "Configure and run all CBMC proofs in parallel",
    version,
    author,
    after_help = EPILOG,
    args_conflicts_with_subcommands = true
)]
pub struct RunnerCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Arguments for `run` when no subcommand is given
    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure every proof and run the Litani build (the default)
    Run(RunArgs),

    /// Print Markdown tables summarizing a Litani run
    Summarize(SummarizeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Run at most N proof jobs in parallel
    #[arg(short = 'j', long, value_name = "N")]
    pub parallel_jobs: Option<usize>,

    /// Configure at most N proofs at a time (default: CPU count less two)
    #[arg(long, value_name = "N")]
    pub configure_jobs: Option<usize>,

    /// Only configure proofs: do not initialize nor run
    #[arg(long)]
    pub no_standalone: bool,

    /// Only run proof in directory DIR (can pass more than one)
    #[arg(short, long, value_name = "DIR", num_args = 1..)]
    pub proofs: Vec<String>,

    /// Project name for report (default: PROJECT_NAME from the Makefiles)
    #[arg(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// Name of file that marks proof directories [default: cbmc-proof.txt]
    #[arg(long, value_name = "FILE")]
    pub proof_marker: Option<String>,

    /// Limit parallelism of expensive jobs [default: auto]
    #[arg(long, value_name = "yes|no|auto", value_enum)]
    pub restrict_expensive_jobs: Option<RestrictMode>,

    /// How many proof jobs marked EXPENSIVE to run in parallel [default: 1]
    #[arg(long, value_name = "N")]
    pub expensive_jobs_parallelism: Option<usize>,

    /// Directory holding the proofs and Makefile.common [default: .]
    #[arg(long, value_name = "DIR")]
    pub proof_root: Option<PathBuf>,

    /// Path to the Litani executable (default: asked from Makefile.common)
    #[arg(long, value_name = "PATH")]
    pub litani: Option<PathBuf>,
}

impl RunArgs {
    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            proof_root: self.proof_root.clone(),
            proof_marker: self.proof_marker.clone(),
            proofs: if self.proofs.is_empty() { None } else { Some(self.proofs.clone()) },
            no_standalone: self.no_standalone,
            project_name: self.project_name.clone(),
            restrict_expensive_jobs: self.restrict_expensive_jobs,
            expensive_jobs_parallelism: self.expensive_jobs_parallelism,
            configure_jobs: self.configure_jobs,
            parallel_jobs: self.parallel_jobs,
            litani: self.litani.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Path to the Litani run.json file
    #[arg(long, value_name = "FILE")]
    pub run_file: PathBuf,

    /// CloudFront domain serving the uploaded reports, e.g. d111111abcdef8.cloudfront.net
    #[arg(long, requires = "s3_uri")]
    pub cloudfront_domain: Option<String>,

    /// S3 key of the directory holding the report, e.g. BuildArtifacts/abcdef/final
    #[arg(long, requires = "cloudfront_domain")]
    pub s3_uri: Option<String>,
}
