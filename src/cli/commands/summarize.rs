use anyhow::Result;

use cbmc_proof_runner::implementations::summary::{ load_run, render_summary, ReportLocation };

use crate::cli::SummarizeArgs;

/// Print a Markdown summary of a Litani run
pub fn execute(args: &SummarizeArgs) -> Result<()> {
    let location = match (&args.cloudfront_domain, &args.s3_uri) {
        (Some(domain), Some(uri)) =>
            Some(ReportLocation {
                cloudfront_domain: domain.clone(),
                s3_uri: uri.clone(),
            }),
        _ => None,
    };

    let run = load_run(&args.run_file)?;

    print!("{}", render_summary(&run, location.as_ref()));
    Ok(())
}
