use thiserror::Error;

use crate::service::ServiceError;

/// Failure classes a pipeline operation can surface. All propagate
/// synchronously to the operation's caller; nothing is retried inside the
/// core, and conformance that could not be verified is never reported as
/// success.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transport or credential failure from the generative service,
    /// surfaced verbatim.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A generate or refine response carried no image payload. Always
    /// fatal, never silently retried.
    #[error("generation returned no image payload")]
    MissingImage,

    /// The rationalizer's response did not parse under the declared plan
    /// schema. Fatal for rationalization; audit-side schema violations
    /// instead degrade to an empty report and a Violation verdict.
    #[error("rationalization returned a malformed plan: {0}")]
    MalformedPlan(#[from] serde_json::Error),

    /// A refinement was requested for a result the studio does not hold.
    #[error("unknown render result {0}")]
    UnknownResult(uuid::Uuid),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
