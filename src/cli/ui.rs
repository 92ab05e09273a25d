use colored::*;
use indicatif::{ ProgressBar, ProgressDrawTarget, ProgressStyle };

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    eprintln!("{} {}", "INFO:".blue().bold(), message);
}

/// Progress line for proof configuration, drawn on stderr.
///
/// The scheduler supplies the whole line as the message.
pub fn configure_progress() -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    pb.set_style(ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_bar()));
    pb
}
