//! Outcome classification for terminal states.
//!
//! Waits that target both success and failure states return as soon as any
//! of them is reached. The classifier then decides which of those outcomes
//! is really a failure and turns the sub-errors embedded in the snapshot
//! into one [`AggregatedFailure`].

use std::collections::BTreeSet;
use std::fmt;

use crate::engine::Settled;
use crate::error::WaitError;

/// One error entry carried by a resource payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubError {
    pub code: String,
    pub message: String,
}

impl SubError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Snapshots that can explain why they ended in a failure state.
pub trait FailureDetails {
    /// Sub-errors in the order the payload lists them.
    fn failure_details(&self) -> Vec<SubError>;
}

/// The mutation whose outcome is being classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Creation,
    Update { id: String },
}

/// A terminal failure state together with every sub-error the payload reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedFailure {
    pub kind: String,
    pub name: String,
    pub operation: Operation,
    pub status: String,
    pub errors: Vec<SubError>,
}

impl fmt::Display for AggregatedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) ", self.kind, self.name)?;
        match &self.operation {
            Operation::Creation => write!(f, "creation")?,
            Operation::Update { id } => write!(f, "update ({id})")?,
        }
        write!(f, " not successful ({}): Errors:", self.status)?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(
                f,
                "\nError {}: Code: {} / Message: {}",
                i + 1,
                error.code,
                error.message
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregatedFailure {}

/// Per-resource-kind policy applied to a finished wait.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    kind: String,
    name: String,
    operation: Operation,
    success_state: Option<String>,
    failure_states: BTreeSet<String>,
    discard_on_success: bool,
}

impl OutcomeClassifier {
    /// `kind` and `name` only feed the rendered failure message,
    /// e.g. `"EKS add-on"` and `"my-cluster:vpc-cni"`.
    pub fn new(kind: impl Into<String>, name: impl Into<String>, operation: Operation) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            operation,
            success_state: None,
            failure_states: BTreeSet::new(),
            discard_on_success: false,
        }
    }

    pub fn success(mut self, state: impl Into<String>) -> Self {
        self.success_state = Some(state.into());
        self
    }

    pub fn failures<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failure_states = states.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the snapshot with [`Settled::Succeeded`] when the success state is reached.
    pub fn discard_on_success(mut self) -> Self {
        self.discard_on_success = true;
        self
    }

    /// Interpret a finished wait.
    ///
    /// Failure states become [`WaitError::Failed`] and keep the snapshot that
    /// reported them; everything else passes through, minus the snapshot when
    /// configured to discard it. Accepts both raw engine outcomes and already
    /// classified ones, and applying it twice gives the same result as once.
    pub fn classify<T, E>(&self, outcome: Result<Settled<T>, E>) -> ClassifiedOutcome<T>
    where
        T: FailureDetails,
        E: Into<WaitFailure<T>>,
    {
        match outcome {
            Ok(Settled::Reached { state, object }) if self.failure_states.contains(&state) => {
                let failure = AggregatedFailure {
                    kind: self.kind.clone(),
                    name: self.name.clone(),
                    operation: self.operation.clone(),
                    errors: object.failure_details(),
                    status: state,
                };
                Err(WaitFailure {
                    object: Some(object),
                    error: WaitError::Failed(failure),
                })
            }
            Ok(Settled::Reached { state, .. })
                if self.discard_on_success && self.success_state.as_ref() == Some(&state) =>
            {
                Ok(Settled::Succeeded { state })
            }
            Ok(settled) => Ok(settled),
            Err(e) => Err(e.into()),
        }
    }
}

/// A wait error together with the snapshot that produced it, when there is one.
///
/// Only classified failures carry a snapshot; timeouts, cancellations and
/// probe failures arrive here from [`WaitError`] with `object: None`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitFailure<T> {
    pub object: Option<T>,
    pub error: WaitError,
}

impl<T> WaitFailure<T> {
    pub fn into_parts(self) -> (Option<T>, WaitError) {
        (self.object, self.error)
    }
}

impl<T> From<WaitError> for WaitFailure<T> {
    fn from(error: WaitError) -> Self {
        Self {
            object: None,
            error,
        }
    }
}

impl<T> fmt::Display for WaitFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T: fmt::Debug> std::error::Error for WaitFailure<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Outcome of a classified wait.
pub type ClassifiedOutcome<T> = Result<Settled<T>, WaitFailure<T>>;
