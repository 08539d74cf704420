//! Exit codes for the CLI

use relnote_core::RelnoteError;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Fragment store or fragment parsing error
pub const FRAGMENT_ERROR: i32 = 3;

/// Hosting API error
pub const HOSTING_ERROR: i32 = 4;

/// Template rendering error
pub const RENDER_ERROR: i32 = 5;

/// Map a command failure to the process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RelnoteError>() {
        Some(RelnoteError::Config(_)) => CONFIG_ERROR,
        Some(RelnoteError::Fragment(_)) => FRAGMENT_ERROR,
        Some(RelnoteError::Hosting(_)) => HOSTING_ERROR,
        Some(RelnoteError::Render(_)) => RENDER_ERROR,
        _ => ERROR,
    }
}
