//! Explicit per-call analysis context.
//!
//! Entry points receive the caller's context instead of reaching for a
//! global logger: it names the client and owns the span every log line of
//! the call is recorded under.

use tracing::Span;

#[derive(Debug, Clone)]
pub struct AnalysisContext {
    client_id: String,
    span: Span,
}

impl AnalysisContext {
    /// Create a context with an `info`-level `cadence.analysis` span.
    pub fn new(client_id: impl Into<String>) -> Self {
        let client_id = client_id.into();
        let span = tracing::info_span!("cadence.analysis", client_id = %client_id);
        Self { client_id, span }
    }

    /// Create a context recorded under a caller-supplied span.
    pub fn with_span(client_id: impl Into<String>, span: Span) -> Self {
        Self {
            client_id: client_id.into(),
            span,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Child span for one entry point, e.g. `ctx.operation_span("correlations")`.
    pub fn operation_span(&self, operation: &'static str) -> Span {
        tracing::info_span!(parent: &self.span, "cadence.operation", operation)
    }
}
