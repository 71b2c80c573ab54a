pub mod auth;
pub mod directory;
pub mod likes;

use anyhow::Result;
use likeboard_core::LikeboardError;
use std::process::ExitCode;

/// Exit status for an error the components already showed to the user.
///
/// Session errors were only turned into navigation, so they are escalated
/// for `main` to print.
pub(crate) fn reported(error: LikeboardError) -> Result<ExitCode> {
    if error.is_session_error() {
        Err(error.into())
    } else {
        Ok(ExitCode::FAILURE)
    }
}
