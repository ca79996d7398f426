//! Request handlers, one module per resource
//!
//! Every handler opens its own store session from [`crate::AppState`], so
//! staged changes never outlive the request.

pub mod category;
pub mod country;
pub mod health;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;

use crate::error::ApiError;

/// Turns a repository's `false` into a 500 naming the failed action
pub(crate) fn ensure_saved(saved: bool, action: &str) -> Result<(), ApiError> {
    if saved {
        Ok(())
    } else {
        Err(ApiError::not_saved(action))
    }
}
