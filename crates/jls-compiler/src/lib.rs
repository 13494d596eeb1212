//! The compiler-facility contract (§6) and its deterministic scanning
//! implementation.
//!
//! "The underlying Java parsing and type-resolution engine" is declared out
//! of scope (§1) as an external collaborator reached only through
//! [`CompilerFacility`]. [`scan::ScanningFacility`] is this workspace's own
//! stand-in for that engine: a lexical scanner, not a real compiler, just
//! capable enough to drive every other crate's tests deterministically.

mod error;
mod facility;
mod scan;
mod types;

pub use error::CompilerError;
pub use facility::{CompilerFacility, DocFacility, DocFirstSentence, ReferenceSite};
pub use scan::{classify_completion_context, find_word_occurrences, ScanningFacility};
pub use types::{
    Batch, Completion, CompletionContext, CompletionResult, DeclPath, Element, ElementKind,
    Focus, FoldingKind, FoldingRange, FullFileCompilation, ImportFixups, ImportLine,
    MethodInvocation, MethodOverload, ParseResult, SortRank, MAX_COMPLETION_ITEMS,
};
