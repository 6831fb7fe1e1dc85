//! Execution context handed to a bind by the job executor.
//!
//! Carries only what the authentication exchange needs: a cancellation
//! token and an optional execution-scoped tracing span.

use tokio_util::sync::CancellationToken;
use tracing::Span;

/// Narrow per-step context passed to [`Binding::bind`](crate::core::binding::Binding::bind).
#[derive(Debug, Clone)]
pub struct BindContext {
    cancellation: CancellationToken,
    span: Span,
}

impl BindContext {
    /// Create a context with a fresh cancellation token and no span.
    pub fn new() -> Self {
        Self {
            cancellation: CancellationToken::new(),
            span: Span::none(),
        }
    }

    /// Use the executor's cancellation token.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Record bind events under the executor's span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Check whether the executor has cancelled this step.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Cancel this step (and any child contexts).
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Derive a context for one binding of a multi-binding job.
    ///
    /// The child is cancelled together with its parent, not the other way round.
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            span: self.span.clone(),
        }
    }
}

impl Default for BindContext {
    fn default() -> Self {
        Self::new()
    }
}
