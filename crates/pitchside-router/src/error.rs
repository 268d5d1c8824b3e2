//! Error types for routing.

/// Errors that can occur while resolving a path.
///
/// Access denial is not an error; it's a [`GuardDecision`](crate::GuardDecision).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No view is mounted at this path.
    #[error("no route for path {0:?}")]
    UnknownPath(String),
}
