//! Waiter engine implementation
//!
//! Drives a single status probe until the observed state settles, the
//! deadline passes, or the caller cancels. One loop serves every resource
//! kind; the differences live entirely in the [`WaitRequest`] values.

use log::{debug, info, trace, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, timeout_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::{WaitError, WaitResult};
use crate::poll::{PollResult, ProbeResult};
use crate::request::WaitRequest;

/// How a wait ended successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T> {
    /// The probe reported a settled state; `object` is the last snapshot.
    Reached { state: String, object: T },
    /// The resource no longer exists (delete-style waits only).
    Disappeared,
    /// Success where the snapshot was deliberately dropped.
    Succeeded { state: String },
}

impl<T> Settled<T> {
    pub fn state(&self) -> Option<&str> {
        match self {
            Self::Reached { state, .. } | Self::Succeeded { state } => Some(state),
            Self::Disappeared => None,
        }
    }

    pub fn object(&self) -> Option<&T> {
        match self {
            Self::Reached { object, .. } => Some(object),
            Self::Disappeared | Self::Succeeded { .. } => None,
        }
    }

    pub fn into_object(self) -> Option<T> {
        match self {
            Self::Reached { object, .. } => Some(object),
            Self::Disappeared | Self::Succeeded { .. } => None,
        }
    }
}

/// Result of a completed wait.
pub type WaitOutcome<T> = WaitResult<Settled<T>>;

/// Poll `request`'s probe until its state settles.
///
/// Each cycle calls the probe once and looks at the returned state:
/// - a target state ends the wait with the snapshot;
/// - a pending state sleeps (with backoff) and polls again;
/// - any other state fails with [`WaitError::UnexpectedState`], except for
///   delete-style waits (empty target set) where it counts as settled.
///
/// A [`ProbeError::NotFound`](crate::ProbeError::NotFound) ends a delete-style
/// wait with [`Settled::Disappeared`]; every other probe error is returned
/// as-is. Both the in-flight probe and the sleep between probes are raced
/// against the deadline and against `cancel`.
pub async fn wait<T, P, Fut>(request: WaitRequest<P>, cancel: &CancellationToken) -> WaitOutcome<T>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = ProbeResult<T>>,
{
    request.validate()?;
    let expected = request.expected();
    let WaitRequest {
        description,
        pending,
        target,
        timeout,
        settings,
        mut probe,
    } = request;

    let deadline = Instant::now().checked_add(timeout).unwrap_or_else(far_future);
    let mut last_state: Option<String> = None;
    let mut delays = settings.backoff();
    let mut attempt: u32 = 0;

    debug!(
        "Waiting up to {:?} for {} (pending: {:?}, target: {:?})",
        timeout, description, pending, target
    );

    if !settings.initial_delay.is_zero() {
        pause(settings.initial_delay, deadline, cancel)
            .await
            .map_err(|()| WaitError::Cancelled {
                last_state: last_state.clone(),
            })?;
    }

    loop {
        if cancel.is_cancelled() {
            debug!("Wait for {} cancelled before attempt {}", description, attempt + 1);
            return Err(WaitError::Cancelled { last_state });
        }
        if Instant::now() >= deadline {
            warn!("Timed out after {:?} waiting for {}", timeout, description);
            return Err(WaitError::Timeout {
                last_state,
                timeout,
            });
        }

        attempt += 1;
        trace!("Polling {} (attempt {})", description, attempt);

        let polled = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Wait for {} cancelled during attempt {}", description, attempt);
                return Err(WaitError::Cancelled { last_state });
            }
            polled = timeout_at(deadline, probe()) => polled,
        };

        let Ok(result) = polled else {
            warn!("Timed out after {:?} waiting for {}", timeout, description);
            return Err(WaitError::Timeout {
                last_state,
                timeout,
            });
        };

        let PollResult { object, state } = match result {
            Ok(observed) => observed,
            Err(e) if e.is_not_found() && target.is_empty() => {
                info!("{} no longer exists", description);
                return Ok(Settled::Disappeared);
            }
            Err(e) => {
                warn!("Status probe for {} failed: {}", description, e);
                return Err(WaitError::Probe(e));
            }
        };

        if target.contains(&state) || (target.is_empty() && !pending.contains(&state)) {
            info!(
                "{} reached state {} after {} attempt(s)",
                description, state, attempt
            );
            return Ok(Settled::Reached { state, object });
        }

        if !pending.contains(&state) {
            warn!("{} entered unexpected state {}", description, state);
            return Err(WaitError::UnexpectedState { state, expected });
        }

        if last_state.as_deref() != Some(state.as_str()) {
            debug!("{} is {}", description, state);
        }
        last_state = Some(state);

        let delay = delays.next().unwrap_or(settings.max_interval);
        trace!("Sleeping {:?} before polling {} again", delay, description);
        if pause(delay, deadline, cancel).await.is_err() {
            debug!("Wait for {} cancelled while sleeping", description);
            return Err(WaitError::Cancelled { last_state });
        }
    }
}

/// Sleep for `delay`, never past `deadline`. `Err` means `cancel` fired first.
async fn pause(
    delay: Duration,
    deadline: Instant,
    cancel: &CancellationToken,
) -> Result<(), ()> {
    let wake = Instant::now()
        .checked_add(delay)
        .map_or(deadline, |wake| wake.min(deadline));
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(()),
        () = sleep_until(wake) => Ok(()),
    }
}

/// Stand-in deadline for timeouts too large to add to the current instant.
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86_400 * 365 * 30)
}
