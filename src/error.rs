// Play call errors
//
// Malformed position or grid payloads are the only failure a play call can
// have. Both abort the call before any decision is emitted.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayError {
    #[error("malformed position payload: {0}")]
    MalformedPosition(#[source] serde_json::Error),
    #[error("malformed grid payload: {0}")]
    MalformedGrid(#[source] serde_json::Error),
}
