//! Injectable logger handle.
//!
//! Components never reach for a process-wide logging override. Each one is
//! handed a [`Logger`] at construction and emits its events with
//! `parent: logger.span()`, so every line carries the component path that
//! produced it and tests can hand in [`Logger::disabled`].

use tracing::Span;

/// A cheap, cloneable handle scoping log events to one component.
#[derive(Debug, Clone)]
pub struct Logger {
    component: &'static str,
    span: Span,
}

impl Logger {
    /// Root logger for a top-level component.
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            span: tracing::info_span!("component", name = component),
        }
    }

    /// Logger for a sub-component, nested under this one.
    #[must_use]
    pub fn child(&self, component: &'static str) -> Self {
        Self {
            component,
            span: tracing::info_span!(parent: &self.span, "component", name = component),
        }
    }

    /// Logger whose events go nowhere.
    pub fn disabled() -> Self {
        Self {
            component: "disabled",
            span: Span::none(),
        }
    }

    /// Span to use as `parent:` for events.
    pub const fn span(&self) -> &Span {
        &self.span
    }

    /// Component name this logger was created for.
    pub const fn component(&self) -> &'static str {
        self.component
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}
