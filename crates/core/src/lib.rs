//! Canvass domain core.
//!
//! Pure pricing, fee-composition, and campaign-lifecycle logic shared by the
//! persistence and API layers. Nothing in this crate performs I/O; every
//! function takes plain values and returns plain values or [`error::CoreError`].

pub mod approval;
pub mod error;
pub mod fees;
pub mod lifecycle;
pub mod pricing;
pub mod question;
pub mod types;
pub mod wizard;
