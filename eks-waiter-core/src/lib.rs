//! Generic state waiter for eventually-consistent control-plane resources.
//!
//! A mutation request against a control plane returns before the resource has
//! settled. This crate polls a caller-supplied status probe until the resource
//! reaches a target state, disappears (for delete-style waits), reports an
//! unexpected state, times out, or the caller cancels:
//!
//! - [`wait`] runs the polling loop for one [`WaitRequest`]
//! - [`OutcomeClassifier`] turns failure terminal states into an [`AggregatedFailure`]
//!
//! ```no_run
//! use eks_waiter_core::{wait, PollResult, ProbeResult, WaitRequest};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), eks_waiter_core::WaitError> {
//! let request = WaitRequest::new("demo cluster", || async {
//!     ProbeResult::Ok(PollResult::new("snapshot", "ACTIVE"))
//! })
//! .pending(["CREATING"])
//! .target(["ACTIVE"])
//! .timeout(Duration::from_secs(600));
//!
//! let settled = wait(request, &CancellationToken::new()).await?;
//! assert_eq!(settled.state(), Some("ACTIVE"));
//! # Ok(())
//! # }
//! ```

mod classifier;
mod engine;
mod error;
mod poll;
mod request;

pub use classifier::{
    AggregatedFailure, ClassifiedOutcome, FailureDetails, Operation, OutcomeClassifier, SubError,
    WaitFailure,
};
pub use engine::{wait, Settled, WaitOutcome};
pub use error::{ProbeError, WaitError, WaitResult};
pub use poll::{PollResult, PollSettings, ProbeResult};
pub use request::{WaitRequest, DEFAULT_WAIT_TIMEOUT};
