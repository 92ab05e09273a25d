use log::{debug, warn};

use crate::models::capability::{CapabilitySet, RestrictMode, POOLS_CAPABILITY};
use crate::traits::build_tool::BuildTool;

/// Decide whether expensive jobs go into a restricted pool.
///
/// `yes` degrades to disabled with a warning when the tool is too old.
pub fn should_enable_pools(caps: &CapabilitySet, mode: RestrictMode, tool: &str) -> bool {
    match mode {
        RestrictMode::No => false,
        RestrictMode::Yes => {
            if caps.contains(POOLS_CAPABILITY) {
                true
            } else {
                warn!(
                    "`--restrict-expensive-jobs yes` was passed on the command line, but {} is not new enough to support this feature",
                    tool
                );
                false
            }
        }
        RestrictMode::Auto => caps.contains(POOLS_CAPABILITY),
    }
}

/// Query the build tool once and apply `should_enable_pools`
pub async fn detect_pools<B: BuildTool + ?Sized>(tool: &B, mode: RestrictMode) -> bool {
    if mode == RestrictMode::No {
        return false;
    }
    let caps = tool.capabilities().await;
    if caps.is_empty() {
        debug!("{} reports no capabilities", tool.describe());
    }
    debug!("Capabilities of {} (restrict expensive jobs: {}): {:?}", tool.describe(), mode, caps);
    should_enable_pools(&caps, mode, &tool.describe())
}
