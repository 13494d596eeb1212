//! Shared, dependency-light types used across the Java analysis core.
//!
//! Kept deliberately small: every other crate in the workspace depends on
//! this one, so additions here should be primitives with no opinions about
//! LSP wire shapes or the compiler facility.

mod diagnostic;
mod ptr;
mod text;
mod uri;

pub use diagnostic::{Diagnostic, RelatedDiagnostic, Severity};
pub use ptr::Ptr;
pub use text::{LineCol, LineIndex, Position, Range, TextEdit, TextRange, TextSize};
pub use uri::Uri;
