//! HTTP handler functions, grouped by surface area.
//!
//! Handlers stay thin: they load rows through `canvass_db` repositories,
//! delegate every decision to `canvass_core`, and map the outcome through
//! [`crate::error::AppError`].

pub mod approval;
pub mod campaign;
pub mod finalize;
pub mod pricing;
pub mod redemption;
pub mod status;
