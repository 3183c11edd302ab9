// crates/geotz-core/src/diagnostics.rs

//! Collected findings of a pipeline run.
//!
//! The source tables are maintained by hand, so one run has to surface every
//! defect at once. Nothing here aborts; stages push into a [`Report`] and the
//! operator reads it at the end.

use std::fmt;

/// What kind of defect a diagnostic describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Malformed row, missing or mistyped field. The row is skipped.
    Structural,
    /// Broken cross reference between tables.
    Referential,
    /// Suspicious but harmless; never blocks assembly.
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::Advisory => Severity::Warning,
            DiagnosticKind::Structural | DiagnosticKind::Referential => Severity::Error,
        }
    }
}

/// A single finding, with enough context to locate the offending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Where: a file name, `"Country / City"`, an ISO code ...
    pub context: String,
    pub message: String,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            DiagnosticKind::Structural => "structural error",
            DiagnosticKind::Referential => "referential error",
            DiagnosticKind::Advisory => "warning",
        };
        write!(f, "{label} [{}]: {}", self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, context: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            kind,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn structural(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticKind::Structural, context, message);
    }

    pub fn referential(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticKind::Referential, context, message);
    }

    pub fn advisory(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticKind::Advisory, context, message);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Logs every diagnostic through `tracing`, errors at `error`, the rest at `warn`.
    pub fn emit(&self) {
        for d in &self.diagnostics {
            match d.severity() {
                Severity::Error => tracing::error!(kind = ?d.kind, context = %d.context, "{}", d.message),
                Severity::Warning => tracing::warn!(kind = ?d.kind, context = %d.context, "{}", d.message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_findings_are_warnings_only() {
        let mut report = Report::new();
        report.advisory("Curaçao", "country name has non-ASCII characters");
        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 1);

        report.referential("Japan / Kyoto", "unknown timezone");
        assert!(report.has_errors());
        assert_eq!(report.error_count(), 1);
        assert_eq!(
            report.errors().next().map(ToString::to_string).as_deref(),
            Some("referential error [Japan / Kyoto]: unknown timezone")
        );
    }
}
