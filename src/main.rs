use std::io::Write;

use clap::Parser;
use log::debug;

mod cli;
use cli::{ Commands, RunnerCli };

#[tokio::main]
async fn main() {
    // Parse the command line arguments
    let cli = RunnerCli::parse();

    // Setup logging
    setup_logging(&cli.log_level, cli.verbose);

    let config = cli.config.as_deref();
    let result = match &cli.command {
        None => cli::commands::run::execute(&cli.run, config).await,
        Some(Commands::Run(args)) => cli::commands::run::execute(args, config).await,
        Some(Commands::Summarize(args)) => cli::commands::summarize::execute(args),
    };

    if let Err(e) = result {
        cli::ui::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn setup_logging(log_level: &str, verbose: bool) {
    // Set up the logger based on the log level
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        match log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Warn,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "run-cbmc-proofs: {}", record.args()))
        .init();

    debug!("Logger initialized with level: {}", level);
}
