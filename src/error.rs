//! Error types for agents.
//!
//! Two families live here: [`AgentError`] is what a caller gets back from an
//! [`AgentRef`](crate::AgentRef) operation, [`Failure`] is what the processing
//! loop hands to an [`ErrorHandler`](crate::ErrorHandler) when a submitted
//! function goes wrong.

use std::any::Any;
use std::time::Duration;
use thiserror::Error;

/// Boxed error returned by fallible update and read functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned to callers of an agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The agent's loop has exited, the message was not accepted.
    #[error("agent has stopped")]
    Stopped,

    /// The read was accepted but no snapshot was delivered, either because
    /// the agent stopped first or because producing the snapshot failed.
    #[error("read abandoned before a snapshot was delivered")]
    Abandoned,

    /// A read with a deadline did not complete in time.
    #[error("read timed out after {0:?}")]
    Timeout(Duration),

    /// The caller-side timer for a blocking read could not be created.
    #[error("failed to build read timer: {0}")]
    Timer(String),
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// What went wrong inside a submitted function.
#[derive(Error, Debug)]
pub enum Cause {
    /// The function panicked.
    #[error("panicked: {0}")]
    Panic(String),

    /// The function returned an error.
    #[error("{0}")]
    Error(BoxError),
}

impl Cause {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Cause::Panic(message)
    }

    /// Returns true if the function panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, Cause::Panic(_))
    }
}

/// A failure raised while the agent processed a message.
#[derive(Error, Debug)]
pub enum Failure {
    /// An update function failed, the state was left unchanged.
    #[error("update failed: {0}")]
    Update(Cause),

    /// A read callback (or the copy strategy feeding it) failed. The state is never
    /// touched by a read.
    #[error("consume failed: {0}")]
    Consume(Cause),
}

impl Failure {
    /// The underlying cause.
    pub fn cause(&self) -> &Cause {
        match self {
            Failure::Update(cause) | Failure::Consume(cause) => cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AgentError::Stopped.to_string(), "agent has stopped");
        assert_eq!(
            AgentError::Timeout(Duration::from_millis(5)).to_string(),
            "read timed out after 5ms"
        );

        let failure = Failure::Update(Cause::Panic("boom".into()));
        assert_eq!(failure.to_string(), "update failed: panicked: boom");

        let failure = Failure::Consume(Cause::Error("bad snapshot".into()));
        assert_eq!(failure.to_string(), "consume failed: bad snapshot");
    }

    #[test]
    fn test_cause_from_panic_payload() {
        let cause = Cause::from_panic(Box::new("static message"));
        assert!(matches!(&cause, Cause::Panic(m) if m == "static message"));

        let cause = Cause::from_panic(Box::new(String::from("owned message")));
        assert!(matches!(&cause, Cause::Panic(m) if m == "owned message"));

        let cause = Cause::from_panic(Box::new(42_u32));
        assert!(cause.is_panic());
    }
}
