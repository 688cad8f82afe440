//! Itemforge Upload Layer
//!
//! Takes a finished draft item and reconciles it with the remote store:
//! decide which record to target (a new one, a known existing one, or
//! the fixed sandbox record), then replay the draft's labels,
//! descriptions and statements onto it through the session.
//!
//! Replay is best-effort, not atomic: a failed statement write is
//! reported and the remaining statements are still attempted, so one
//! bad claim never loses the rest of a row.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod reconciler;

pub use config::UploadConfig;
pub use error::UploadError;
pub use reconciler::{ReconcileState, UploadReconciler, UploadReport, WriteFailure};
