//! The compiler-facility contract (§6): the seam between the analysis core
//! and "the underlying Java parsing and type-resolution engine", which is
//! an out-of-scope external collaborator (§1). Everything in this module is
//! an interface; `crate::scan::ScanningFacility` is this crate's own
//! deterministic implementation, used to exercise the rest of the
//! workspace in tests.

use std::collections::BTreeSet;

use jls_core::{Diagnostic, Ptr, TextRange, Uri};

use crate::error::CompilerError;
use crate::types::{Batch, DeclPath, Element, Focus, FullFileCompilation, ParseResult};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReferenceSite {
    pub uri: Uri,
    pub range: TextRange,
}

/// A single sentence of Markdown extracted from a Javadoc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFirstSentence(pub String);

/// `docs()` facility (§6): finding and reading Javadoc for a `Ptr`.
pub trait DocFacility {
    fn find(&self, ptr: &Ptr) -> Option<Uri>;
    fn first_sentence(&self, ptr: &Ptr) -> Option<DocFirstSentence>;
    /// Declared parameter names from the doc comment, if the doc comment's
    /// `@param` tags cover every parameter; used to recover real names when
    /// the element itself only has the generic `argN` pattern.
    fn param_names(&self, ptr: &Ptr) -> Option<Vec<String>>;
    fn param_doc(&self, ptr: &Ptr, param: &str) -> Option<String>;
}

/// The compiler facility contract (§6).
pub trait CompilerFacility {
    fn parse_file(&self, uri: &Uri) -> Result<ParseResult, CompilerError>;
    fn compile_file(&self, uri: &Uri) -> Result<FullFileCompilation, CompilerError>;
    fn compile_focus(&self, uri: &Uri, line: u32, col: u32) -> Result<Focus, CompilerError>;
    fn compile_batch(&self, files: &[(Uri, String)]) -> Result<Batch, CompilerError>;

    /// A superset of URIs that might define `el` (§6, "potential
    /// references" sibling).
    fn potential_definitions(&self, el: &Ptr) -> BTreeSet<Uri>;
    /// A superset of URIs that might reference `el`.
    fn potential_references(&self, el: &Ptr) -> BTreeSet<Uri>;

    /// Matches are returned as full [`DeclPath`]s, not bare [`Element`]s,
    /// so a `workspace/symbol` response can carry a real `Location`.
    fn find_symbols(&self, query: &str, limit: usize) -> Vec<DeclPath>;

    fn report_errors(&self, files: &BTreeSet<Uri>) -> Vec<Diagnostic>;

    fn docs(&self) -> &dyn DocFacility;

    fn class_name(&self, ptr: &Ptr) -> String {
        if ptr.package().is_empty() {
            ptr.simple_name().to_string()
        } else {
            format!("{}.{}", ptr.package(), ptr.simple_name())
        }
    }

    fn member_name(&self, ptr: &Ptr) -> String {
        ptr.simple_name().to_string()
    }
}
