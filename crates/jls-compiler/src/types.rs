//! Data model for the compiler-facility contract: parse results, full-file
//! and batch compilations, focus results, and the completion/context
//! variants.

use smol_str::SmolStr;
use std::collections::BTreeMap;

use jls_core::{Ptr, TextRange, Uri};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ElementKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
    Field,
    Method,
    Constructor,
    Package,
}

/// A resolved program element: the thing a `Ptr`, a cursor position, or a
/// completion candidate can denote.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub ptr: Ptr,
    pub kind: ElementKind,
    /// Source-printed type: the field/return type for fields and methods,
    /// empty for classes/packages.
    pub type_name: SmolStr,
    /// Declared parameter names, in order, for methods/constructors. Empty
    /// for non-executables.
    pub param_names: Vec<SmolStr>,
    /// Declared parameter types, source-printed, parallel to `param_names`.
    /// Empty for non-executables.
    pub param_types: Vec<SmolStr>,
    /// `extends` super type, printed short; `"Object"` or `"none"` when
    /// there isn't an explicit one, matching the hover-rendering rule in
    /// §4.I that omits `extends` for either spelling.
    pub super_type: SmolStr,
    pub already_overridden: bool,
}

/// A handle into a parsed or compiled tree identifying one declaration,
/// sufficient to print it, find its range, and classify it for code lenses
/// and document symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclPath {
    pub uri: Uri,
    pub element: Element,
    pub container_name: SmolStr,
    pub range: TextRange,
    pub is_test_class: bool,
    pub is_test_method: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoldingKind {
    Imports,
    Region,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoldingRange {
    pub kind: FoldingKind,
    pub start_line: u32,
    pub start_col: Option<u32>,
    pub end_line: u32,
}

/// Classification of what a `.`/`::`/identifier/annotation/`case` cursor
/// site needs, produced by a parse-only pass (§4.E).
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionContext {
    MemberSelect {
        after_method_reference: bool,
    },
    MemberReference,
    Identifier {
        partial_name: SmolStr,
        in_class: Option<SmolStr>,
        in_method: Option<SmolStr>,
    },
    Annotation {
        partial_name: SmolStr,
    },
    Case,
    None,
}

/// One item the focus compiler can emit; exactly one of the five cases is
/// meaningful per item, enforced by construction rather than by a shared
/// "optional everything" struct.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Element {
        element: Element,
        sort_rank: SortRank,
    },
    PackagePart {
        name: SmolStr,
    },
    Keyword {
        keyword: SmolStr,
    },
    ClassName {
        qualified_name: SmolStr,
        imported: bool,
    },
    Snippet {
        label: SmolStr,
        insert_text: SmolStr,
    },
}

/// The single-digit sort-key prefixes from §4.E, smallest sorts first.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum SortRank {
    Snippet = 1,
    InScope = 2,
    Keyword = 3,
    Unimported = 4,
    UniversalRoot = 9,
}

impl SortRank {
    pub fn digit(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodOverload {
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocation {
    pub candidates: Vec<MethodOverload>,
    pub resolved: Option<usize>,
    pub active_parameter: u32,
}

/// Result of a point-anchored focus compile (§4.E).
#[derive(Debug, Clone, PartialEq)]
pub struct Focus {
    pub context: CompletionContext,
    members: Vec<Element>,
    identifiers: Vec<Element>,
    annotations: Vec<SmolStr>,
    enum_cases: Vec<SmolStr>,
    invocation: Option<MethodInvocation>,
}

pub const MAX_COMPLETION_ITEMS: usize = 200;

pub struct CompletionResult {
    pub is_incomplete: bool,
    pub items: Vec<Completion>,
}

impl Focus {
    pub fn new(context: CompletionContext) -> Self {
        Self {
            context,
            members: Vec::new(),
            identifiers: Vec::new(),
            annotations: Vec::new(),
            enum_cases: Vec::new(),
            invocation: None,
        }
    }

    pub fn with_members(mut self, members: Vec<Element>) -> Self {
        self.members = members;
        self
    }

    pub fn with_identifiers(mut self, identifiers: Vec<Element>) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<SmolStr>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_enum_cases(mut self, cases: Vec<SmolStr>) -> Self {
        self.enum_cases = cases;
        self
    }

    pub fn with_invocation(mut self, invocation: MethodInvocation) -> Self {
        self.invocation = Some(invocation);
        self
    }

    /// Members reachable via `.` or `::` at the focal site.
    pub fn complete_members(&self, after_method_reference: bool) -> CompletionResult {
        let _ = after_method_reference;
        CompletionResult {
            is_incomplete: false,
            items: self
                .members
                .iter()
                .cloned()
                .map(|element| {
                    let sort_rank = if element.ptr.package() == "java.lang" && element.ptr.simple_name() == "Object" {
                        SortRank::UniversalRoot
                    } else {
                        SortRank::InScope
                    };
                    Completion::Element { element, sort_rank }
                })
                .collect(),
        }
    }

    /// Visible identifiers filtered by `partial_name`, truncated at
    /// `MAX_COMPLETION_ITEMS`.
    pub fn complete_identifiers(
        &self,
        _in_class: Option<&str>,
        _in_method: Option<&str>,
        partial_name: &str,
    ) -> CompletionResult {
        let matches: Vec<_> = self
            .identifiers
            .iter()
            .filter(|e| e.ptr.simple_name().starts_with(partial_name))
            .cloned()
            .collect();
        let is_incomplete = matches.len() > MAX_COMPLETION_ITEMS;
        let items = matches
            .into_iter()
            .take(MAX_COMPLETION_ITEMS)
            .map(|element| Completion::Element {
                element,
                sort_rank: SortRank::InScope,
            })
            .collect();
        CompletionResult { is_incomplete, items }
    }

    pub fn complete_annotations(&self, partial_name: &str) -> CompletionResult {
        let matches: Vec<_> = self
            .annotations
            .iter()
            .filter(|a| a.starts_with(partial_name))
            .cloned()
            .collect();
        let is_incomplete = matches.len() > MAX_COMPLETION_ITEMS;
        let items = matches
            .into_iter()
            .take(MAX_COMPLETION_ITEMS)
            .map(|qualified_name| Completion::ClassName {
                qualified_name,
                imported: true,
            })
            .collect();
        CompletionResult { is_incomplete, items }
    }

    pub fn complete_cases(&self) -> CompletionResult {
        CompletionResult {
            is_incomplete: false,
            items: self
                .enum_cases
                .iter()
                .cloned()
                .map(|name| Completion::ClassName {
                    qualified_name: name,
                    imported: true,
                })
                .collect(),
        }
    }

    pub fn method_invocation(&self) -> Option<&MethodInvocation> {
        self.invocation.as_ref()
    }
}

/// Result of parsing one file (component C).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub uri: Uri,
    pub text: String,
    pub line_index: jls_core::LineIndex,
    pub package_name: SmolStr,
    /// Line the `package` declaration sits on, if any (used to place
    /// import-fix insertions when there are no existing imports).
    pub package_line: Option<u32>,
    pub decl_paths: Vec<DeclPath>,
    pub folding: Vec<FoldingRange>,
    pub imports: Vec<ImportLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    pub line: u32,
    pub is_static: bool,
    pub path: SmolStr,
}

impl ParseResult {
    pub fn document_symbols(&self) -> Vec<&DeclPath> {
        self.decl_paths.iter().collect()
    }

    pub fn classify_at(&self, position: jls_core::Position) -> CompletionContext {
        crate::scan::classify_completion_context(self, position)
    }
}

/// Result of a full, type-checked compile of one file (component D).
#[derive(Debug, Clone, PartialEq)]
pub struct FullFileCompilation {
    pub parse: ParseResult,
    pub elements: Vec<Element>,
    /// References found purely within this file, keyed by the `Ptr` of the
    /// declaration they refer to.
    pub local_reference_counts: BTreeMap<Ptr, u32>,
    pub overrides_needed: Vec<DeclPath>,
    pub import_fixups: ImportFixups,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportFixups {
    /// Fully-qualified imports the compilation needs, in the order the
    /// facility supplies them.
    pub needed: Vec<SmolStr>,
}

impl FullFileCompilation {
    pub fn element_at(&self, position: jls_core::Position) -> Option<&Element> {
        let offset = self.parse.line_index.offset_of_position(&self.parse.text, position)?;
        self.parse
            .decl_paths
            .iter()
            .find(|d| d.range.contains_inclusive(offset))
            .map(|d| &d.element)
    }

    pub fn declarations(&self) -> &[Element] {
        &self.elements
    }
}

/// Result of compiling a (possibly pruned) set of files together
/// (component F).
#[derive(Debug, Clone)]
pub struct Batch {
    pub files: BTreeMap<Uri, FullFileCompilation>,
}

impl Batch {
    pub fn element(&self, uri: &Uri, position: jls_core::Position) -> Option<&Element> {
        self.files.get(uri)?.element_at(position)
    }

    pub fn definitions(&self, el: &Ptr) -> Vec<DeclPath> {
        self.files
            .values()
            .flat_map(|f| f.parse.decl_paths.iter())
            .filter(|d| &d.element.ptr == el)
            .cloned()
            .collect()
    }

    /// All occurrences of `el`'s simple name elsewhere in the batch that
    /// resolve back to `el`, excluding the declaration sites themselves.
    pub fn references(&self, el: &Ptr) -> Vec<crate::facility::ReferenceSite> {
        let mut out = Vec::new();
        for (uri, file) in &self.files {
            for occ in crate::scan::find_word_occurrences(&file.parse.text, el.simple_name()) {
                if file
                    .parse
                    .decl_paths
                    .iter()
                    .any(|d| d.range.contains_inclusive(occ.start()) && &d.element.ptr == el)
                {
                    continue;
                }
                let pos = file.parse.line_index.position(&file.parse.text, occ.start());
                if let Some(element) = file.element_at(pos) {
                    if &element.ptr == el {
                        out.push(crate::facility::ReferenceSite {
                            uri: uri.clone(),
                            range: occ,
                        });
                    }
                } else {
                    // Fall back to a purely-lexical match: a scanning
                    // facility cannot always resolve expression contexts,
                    // but a same-named token outside any other
                    // declaration's own name span is treated as a
                    // reference candidate.
                    out.push(crate::facility::ReferenceSite {
                        uri: uri.clone(),
                        range: occ,
                    });
                }
            }
        }
        out
    }

    pub fn declarations(&self, uri: &Uri) -> Vec<Element> {
        self.files
            .get(uri)
            .map(|f| f.elements.clone())
            .unwrap_or_default()
    }

    pub fn range(&self, path: &DeclPath) -> TextRange {
        path.range
    }
}
