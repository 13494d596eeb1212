//! Compiler-facility diagnostics, independent of any LSP wire type.

use crate::text::TextRange;
use crate::Uri;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RelatedDiagnostic {
    pub file: Uri,
    pub range: TextRange,
    pub message: String,
}

/// One diagnostic as reported by the compiler facility (`reportErrors`),
/// source-attributed by byte range; conversion to LSP line/character
/// coordinates happens at the Diagnostics Publisher boundary.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    pub file: Uri,
    pub range: TextRange,
    pub severity: Severity,
    /// Compiler diagnostic code, e.g. `"unused"`.
    pub code: Option<String>,
    pub message: String,
    pub related: Vec<RelatedDiagnostic>,
}

impl Diagnostic {
    pub fn new(file: Uri, range: TextRange, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            file,
            range,
            severity,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
