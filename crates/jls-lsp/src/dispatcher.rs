//! Component I: the Query Dispatcher.
//!
//! Owns every cache and index in the workspace plus the compiler facility
//! and the file store adapter, and is the only thing that knows how to
//! drive them together to answer one LSP query. Nothing downstream of here
//! (jls-cache, jls-index, jls-focus, jls-batch) talks to anything else
//! downstream; the dispatcher is where those pieces meet.

use std::collections::{BTreeMap, BTreeSet};

use smol_str::SmolStr;

use jls_cache::{ActiveFileCache, Epoch, ParseCache};
use jls_compiler::{
    Batch, CompilerFacility, Completion, DeclPath, DocFacility, Element, ElementKind, FoldingRange,
    FullFileCompilation, ImportLine, MethodOverload, ScanningFacility,
};
use jls_core::{Position, Ptr, Range, TextEdit, TextRange, Uri};
use jls_index::{ReferenceIndex, ReferenceIndexCache};
use jls_vfs::{DidChangeParams, DidCloseParams, DidOpenParams, FileStore, VfsAdapter};

use crate::completion_cache::CompletionCache;
use crate::config::JavaConfig;
use crate::diagnostics::{self, PublishDiagnosticsParams};
use crate::error::DispatchError;

/// One resolved hover: a printed declaration plus the doc's first sentence,
/// when the compiler facility's doc lookup has one (§4.I).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    pub declaration: String,
    pub doc_first_sentence: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureHelpResult {
    pub candidates: Vec<MethodOverload>,
    pub active_index: Option<usize>,
    pub active_parameter: u32,
}

/// One code-lens site, already classified as one of the three kinds §4.I
/// describes; unresolved reference-count lenses carry just enough (`uri`,
/// `position`) to be resolved later via [`Dispatcher::resolve_reference_count_lens`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLensItem {
    RunAllTests {
        range: TextRange,
        class_name: SmolStr,
    },
    RunTest {
        range: TextRange,
        class_name: SmolStr,
        method_name: SmolStr,
    },
    ReferenceCount {
        range: TextRange,
        position: Position,
    },
}

/// The Query Dispatcher. Generic over the file store so the binary can wire
/// a real editor-backed store while tests use [`jls_vfs::InMemoryFileStore`].
pub struct Dispatcher<S> {
    vfs: VfsAdapter<S>,
    facility: ScanningFacility,
    epoch: Epoch,
    config: JavaConfig,
    parse_cache: ParseCache,
    active_cache: ActiveFileCache,
    reference_cache: ReferenceIndexCache,
    completion_cache: CompletionCache,
    /// URIs opened since the last save-triggered lint, flushed into the
    /// next lint pass and at reference-count lens resolution (§5).
    recently_opened: BTreeSet<Uri>,
}

impl<S: FileStore> Dispatcher<S> {
    pub fn new(store: S) -> Self {
        Self {
            vfs: VfsAdapter::new(store),
            facility: ScanningFacility::new(),
            epoch: Epoch(0),
            config: JavaConfig::default(),
            parse_cache: ParseCache::new(),
            active_cache: ActiveFileCache::new(),
            reference_cache: ReferenceIndexCache::new(),
            completion_cache: CompletionCache::new(),
            recently_opened: BTreeSet::new(),
        }
    }

    pub fn vfs(&self) -> &VfsAdapter<S> {
        &self.vfs
    }

    fn sync_content(&mut self, uri: &Uri) {
        if let Some(text) = self.vfs.store().contents(uri) {
            self.facility.set_file(uri.clone(), text);
        }
    }

    fn version_of(&self, uri: &Uri) -> i32 {
        self.vfs.store().version(uri).unwrap_or(0)
    }

    fn flush_recently_opened(&mut self) -> BTreeSet<Uri> {
        std::mem::take(&mut self.recently_opened)
    }

    // -- Document lifecycle (§4.B, §5) ----------------------------------

    pub fn did_open(&mut self, uri: Uri, text: String) {
        self.vfs.store_mut().open(DidOpenParams { uri: uri.clone(), text });
        self.sync_content(&uri);
        self.recently_opened.insert(uri);
    }

    pub fn did_change(&mut self, uri: Uri, text: String) {
        self.vfs.store_mut().change(DidChangeParams { uri: uri.clone(), text });
        self.sync_content(&uri);
    }

    /// Returns one explicit empty-diagnostics publish for the closed URI,
    /// clearing whatever markers the editor was showing for it.
    pub fn did_close(&mut self, uri: Uri) -> PublishDiagnosticsParams {
        self.vfs.store_mut().close(DidCloseParams { uri: uri.clone() });
        self.vfs.forget(&uri);
        PublishDiagnosticsParams {
            uri,
            diagnostics: Vec::new(),
        }
    }

    /// Relints every open document, folding in any just-opened files,
    /// flushing `recentlyOpened` (§5).
    pub fn did_save(&mut self) -> Vec<PublishDiagnosticsParams> {
        let mut lint_set: BTreeSet<Uri> = self.vfs.active_documents().into_iter().collect();
        lint_set.extend(self.flush_recently_opened());
        let diagnostics = self.facility.report_errors(&lint_set);
        diagnostics::publish(&self.vfs.active_documents(), diagnostics)
    }

    /// Applies new `java.*` settings, rebuilding the compiler facility (and
    /// bumping the facility epoch) only when `hasClasspath()` toggles
    /// between empty and non-empty (§5, §9 open question (a): changing the
    /// *contents* of an already-non-empty classpath is deliberately a
    /// no-op here, matching the documented behavior).
    pub fn set_config(&mut self, new_config: JavaConfig) {
        let was_empty = !self.config.has_classpath();
        let now_empty = !new_config.has_classpath();
        if was_empty != now_empty {
            tracing::info!(was_empty, now_empty, "classpath toggled empty/non-empty: rebuilding facility");
            self.epoch = Epoch(self.epoch.0 + 1);
            self.facility = ScanningFacility::new();
            for uri in self.vfs.active_documents() {
                self.sync_content(&uri);
            }
        }
        self.config = new_config;
    }

    // -- Completion (§4.E) ------------------------------------------------

    pub fn completion(
        &mut self,
        uri: &Uri,
        position: Position,
    ) -> Result<(bool, Vec<Completion>, Vec<String>), DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok((false, Vec::new(), Vec::new()));
        }
        let focus = self.facility.compile_focus(uri, position.line, position.character)?;
        let result = jls_focus::complete(&focus);
        let ids = self.completion_cache.replace(result.items.clone());
        Ok((result.is_incomplete, result.items, ids))
    }

    /// `None` means "protocol misuse" (§7 item 1): the caller logs a
    /// warning and returns the request's own item unchanged.
    pub fn resolve_completion_item(&self, id: &str) -> Option<Completion> {
        self.completion_cache.get(id).cloned()
    }

    /// Declared parameter names from `ptr`'s Javadoc `@param` tags, when the
    /// doc comment covers every parameter (§4.I resolveCompletionItem: doc
    /// names take precedence over the element's own `param_names`).
    pub fn doc_param_names(&self, ptr: &Ptr) -> Option<Vec<String>> {
        self.facility.docs().param_names(ptr)
    }

    // -- Hover / signature help (§4.D, §4.E) -----------------------------

    pub fn hover(&mut self, uri: &Uri, position: Position) -> Result<Option<HoverResult>, DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok(None);
        }
        let version = self.version_of(uri);
        let active = self.active_cache.update(&self.facility, uri, version, self.epoch)?;
        self.vfs.mark_compiled(uri, version);

        let element = match active.element_at(position) {
            Some(e) => e.clone(),
            None => {
                tracing::info!(%uri, "hover: no element resolved at position");
                return Ok(None);
            }
        };
        let doc_first_sentence = self.facility.docs().first_sentence(&element.ptr).map(|s| s.0);
        let declaration = render_declaration(&active, &element);
        Ok(Some(HoverResult {
            declaration,
            doc_first_sentence,
        }))
    }

    pub fn signature_help(
        &mut self,
        uri: &Uri,
        position: Position,
    ) -> Result<Option<SignatureHelpResult>, DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok(None);
        }
        let focus = self.facility.compile_focus(uri, position.line, position.character)?;
        let invocation = match focus.method_invocation() {
            Some(inv) => inv,
            None => return Ok(None),
        };
        Ok(Some(SignatureHelpResult {
            candidates: invocation.candidates.clone(),
            active_index: invocation.resolved,
            active_parameter: invocation.active_parameter,
        }))
    }

    // -- Go to definition / find references (§4.F, §4.H) -----------------

    pub fn goto_definition(
        &mut self,
        uri: &Uri,
        position: Position,
    ) -> Result<Vec<(Uri, Range)>, DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok(Vec::new());
        }
        let version = self.version_of(uri);
        let active = self.active_cache.update(&self.facility, uri, version, self.epoch)?;
        self.vfs.mark_compiled(uri, version);

        let ptr = match active.element_at(position) {
            Some(e) => e.ptr.clone(),
            None => {
                tracing::info!(%uri, "goto-definition: no element resolved at position");
                return Ok(Vec::new());
            }
        };

        let mut candidates = self.facility.potential_definitions(&ptr);
        candidates.remove(uri);
        let batch = jls_batch::compile_pruned_batch(&self.facility, self.vfs.store(), &candidates, uri, &ptr)?;
        Ok(batch
            .definitions(&ptr)
            .into_iter()
            .filter_map(|d| to_lsp_location(&batch, &d.uri, d.range))
            .collect())
    }

    pub fn find_references(
        &mut self,
        uri: &Uri,
        position: Position,
    ) -> Result<Vec<(Uri, Range)>, DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok(Vec::new());
        }
        let version = self.version_of(uri);
        let active = self.active_cache.update(&self.facility, uri, version, self.epoch)?;
        self.vfs.mark_compiled(uri, version);

        let ptr = match active.element_at(position) {
            Some(e) => e.ptr.clone(),
            None => {
                tracing::info!(%uri, "find-references: no element resolved at position");
                return Ok(Vec::new());
            }
        };

        let mut candidates = self.facility.potential_references(&ptr);
        candidates.remove(uri);
        let batch = jls_batch::compile_pruned_batch(&self.facility, self.vfs.store(), &candidates, uri, &ptr)?;
        Ok(batch
            .references(&ptr)
            .into_iter()
            .filter_map(|site| to_lsp_location(&batch, &site.uri, site.range))
            .collect())
    }

    // -- Symbols (§4.C, §4.G) ---------------------------------------------

    pub const WORKSPACE_SYMBOL_LIMIT: usize = 50;

    pub fn workspace_symbols(&self, query: &str) -> Vec<DeclPath> {
        self.facility.find_symbols(query, Self::WORKSPACE_SYMBOL_LIMIT)
    }

    pub fn document_symbols(&mut self, uri: &Uri) -> Result<Vec<DeclPath>, DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok(Vec::new());
        }
        let version = self.version_of(uri);
        let parse = self.parse_cache.get(&self.facility, uri, version, self.epoch)?;
        self.vfs.mark_parsed(uri, version);
        Ok(parse.document_symbols().into_iter().cloned().collect())
    }

    // -- Code lens (§4.H, §4.I) -------------------------------------------

    pub fn code_lens(&mut self, uri: &Uri) -> Result<Vec<CodeLensItem>, DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok(Vec::new());
        }
        let version = self.version_of(uri);
        let parse = self.parse_cache.get(&self.facility, uri, version, self.epoch)?;
        self.vfs.mark_parsed(uri, version);

        let mut out = Vec::with_capacity(parse.decl_paths.len());
        for decl in &parse.decl_paths {
            if decl.is_test_class {
                out.push(CodeLensItem::RunAllTests {
                    range: decl.range,
                    class_name: SmolStr::new(decl.element.ptr.simple_name()),
                });
            } else if decl.is_test_method {
                out.push(CodeLensItem::RunTest {
                    range: decl.range,
                    class_name: decl.container_name.clone(),
                    method_name: SmolStr::new(decl.element.ptr.simple_name()),
                });
            } else {
                let position = parse.line_index.position(&parse.text, decl.range.start());
                out.push(CodeLensItem::ReferenceCount {
                    range: decl.range,
                    position,
                });
            }
        }
        Ok(out)
    }

    /// The reference-count lens resolve procedure (§4.I): retarget the
    /// cross-file cache, resolve the element under the lens, recompute its
    /// per-source indices only if stale or missing, then sum.
    pub fn resolve_reference_count_lens(
        &mut self,
        uri: &Uri,
        position: Position,
    ) -> Result<String, DispatchError> {
        self.reference_cache.retarget(uri);

        let version = self.version_of(uri);
        let active = self.active_cache.update(&self.facility, uri, version, self.epoch)?;
        self.vfs.mark_compiled(uri, version);

        let ptr = match active.element_at(position) {
            Some(e) => e.ptr.clone(),
            None => {
                tracing::info!(%uri, "reference-count lens: no element resolved at position");
                return Ok(jls_index::reference_count_label(0));
            }
        };

        let current_signature: BTreeSet<Ptr> = active.declarations().iter().map(|e| e.ptr.clone()).collect();

        let mut candidates = self.facility.potential_references(&ptr);
        candidates.remove(uri);

        // Candidate versions are checked against the cache regardless of
        // which target is asked about, so an edit to any source file -- not
        // just a retarget -- is enough to force a fresh batch compile (§3
        // validity invariant (a)).
        let candidate_versions: BTreeMap<Uri, i32> = candidates
            .iter()
            .map(|candidate_uri| (candidate_uri.clone(), self.version_of(candidate_uri)))
            .collect();

        if self
            .reference_cache
            .needs_recompute(&ptr, &current_signature, &candidate_versions)
        {
            if candidates.len() > jls_index::CANDIDATE_CEILING {
                self.reference_cache.mark_too_expensive(ptr.clone());
            } else {
                let batch =
                    jls_batch::compile_pruned_batch(&self.facility, self.vfs.store(), &candidates, uri, &ptr)?;
                let error_uris: BTreeSet<Uri> = self
                    .facility
                    .report_errors(&candidates)
                    .into_iter()
                    .filter(|d| d.severity == jls_core::Severity::Error)
                    .map(|d| d.file)
                    .collect();
                let mut counts_by_uri: BTreeMap<Uri, u32> = BTreeMap::new();
                for site in batch.references(&ptr) {
                    *counts_by_uri.entry(site.uri).or_insert(0) += 1;
                }
                let mut per_source = BTreeMap::new();
                for candidate_uri in &candidates {
                    let mut counts = BTreeMap::new();
                    counts.insert(ptr.clone(), counts_by_uri.get(candidate_uri).copied().unwrap_or(0));
                    per_source.insert(
                        candidate_uri.clone(),
                        ReferenceIndex::new(counts, error_uris.contains(candidate_uri), current_signature.clone()),
                    );
                }
                self.reference_cache
                    .store_computed(ptr.clone(), per_source, candidate_versions.clone());
            }
        }

        let active_index = ReferenceIndex::from_counts(active.local_reference_counts.clone());
        let count = self.reference_cache.sum_count(&ptr, &active_index);
        Ok(jls_index::reference_count_label(count))
    }

    // -- Formatting (§4.D) -------------------------------------------------

    pub fn formatting(&mut self, uri: &Uri) -> Result<Vec<TextEdit>, DispatchError> {
        if !self.vfs.is_java_file(uri) {
            return Ok(Vec::new());
        }
        let version = self.version_of(uri);
        let active = self.active_cache.update(&self.facility, uri, version, self.epoch)?;
        self.vfs.mark_compiled(uri, version);

        let mut edits = import_fix_edits(&active);
        edits.extend(override_insertion_edits(&active));
        Ok(edits)
    }

    // -- Folding ranges (§4.C, §7 item 6) -----------------------------------

    /// Reads straight through the compiler facility, bypassing the parse
    /// cache entirely, and panics on missing content — the one deliberate
    /// `.expect()` in the dispatcher (§7 item 6).
    pub fn folding_ranges(&self, uri: &Uri) -> Vec<FoldingRange> {
        if !self.vfs.is_java_file(uri) {
            return Vec::new();
        }
        let parse = self
            .facility
            .parse_file(uri)
            .expect("source content available for folding ranges");
        parse.folding
    }

    // -- Unimplemented (§7 item 7) ------------------------------------------

    pub fn prepare_rename(&self, _uri: &Uri, _position: Position) -> Result<(), DispatchError> {
        Err(DispatchError::Unimplemented { method: "prepareRename" })
    }

    pub fn rename(&self, _uri: &Uri, _position: Position, _new_name: &str) -> Result<(), DispatchError> {
        Err(DispatchError::Unimplemented { method: "rename" })
    }
}

/// Converts a byte range inside one of a batch's compiled files to an
/// LSP-position range, using that file's own line index. `None` only if
/// `uri` somehow isn't part of the batch (it always is, in practice:
/// `compile_pruned_batch` always includes every site's own source file).
fn to_lsp_location(batch: &Batch, uri: &Uri, range: TextRange) -> Option<(Uri, Range)> {
    let file = batch.files.get(uri)?;
    Some((uri.clone(), file.parse.line_index.range(&file.parse.text, range)))
}

/// Renders a declaration's hover text: for a type, the header plus one line
/// per direct member; for anything else, just its own one-line signature
/// (§4.I hover rendering rule).
fn render_declaration(file: &FullFileCompilation, element: &Element) -> String {
    match element.kind {
        ElementKind::Class | ElementKind::Interface | ElementKind::Enum | ElementKind::AnnotationType => {
            let keyword = match element.kind {
                ElementKind::Interface => "interface",
                ElementKind::Enum => "enum",
                ElementKind::AnnotationType => "@interface",
                _ => "class",
            };
            let mut out = format!("{keyword} {}", element.ptr.simple_name());
            let omit_extends = matches!(element.super_type.as_str(), "Object" | "none" | "");
            if !omit_extends {
                out.push_str(" extends ");
                out.push_str(&element.super_type);
            }
            out.push_str(" {\n");
            for member in members_of(file, element.ptr.simple_name()) {
                out.push_str("  ");
                out.push_str(&render_member_line(member));
                out.push('\n');
            }
            out.push('}');
            out
        }
        _ => render_member_line(element),
    }
}

fn members_of<'a>(file: &'a FullFileCompilation, owner_simple_name: &str) -> Vec<&'a Element> {
    file.parse
        .decl_paths
        .iter()
        .filter(|d| d.container_name.as_str() == owner_simple_name)
        .map(|d| &d.element)
        .collect()
}

fn render_member_line(element: &Element) -> String {
    match element.kind {
        ElementKind::Method => format!(
            "{} {}({})",
            element.type_name,
            element.ptr.simple_name(),
            element.param_names.join(", ")
        ),
        ElementKind::Constructor => format!("{}({})", element.ptr.simple_name(), element.param_names.join(", ")),
        ElementKind::Field => format!("{} {}", element.type_name, element.ptr.simple_name()),
        ElementKind::Class | ElementKind::Interface | ElementKind::Enum | ElementKind::AnnotationType => {
            format!("{} {{ /* removed */ }}", element.ptr.simple_name())
        }
        ElementKind::Package => element.ptr.simple_name().to_string(),
    }
}

/// Deletes every existing non-static import line and inserts the needed
/// ones as one block: before the first existing non-static import if there
/// is one, otherwise right after the `package` line, otherwise at the top
/// of the file (§4.D).
fn import_fix_edits(active: &FullFileCompilation) -> Vec<TextEdit> {
    if active.import_fixups.needed.is_empty() {
        return Vec::new();
    }
    let parse = &active.parse;
    let non_static: Vec<&ImportLine> = parse.imports.iter().filter(|i| !i.is_static).collect();

    let mut edits = Vec::new();
    for imp in &non_static {
        let Some(start) = parse.line_index.line_start(imp.line) else {
            continue;
        };
        let end = parse.line_index.line_start(imp.line + 1).unwrap_or_else(|| parse.line_index.text_len());
        let range = parse.line_index.range(&parse.text, TextRange::new(start, end));
        edits.push(TextEdit::new(range, String::new()));
    }

    let insertion_pos = if let Some(first) = non_static.first() {
        parse.line_index.position(&parse.text, parse.line_index.line_start(first.line).unwrap_or_default())
    } else if let Some(package_line) = parse.package_line {
        let offset = parse.line_index.line_start(package_line + 1).unwrap_or_default();
        parse.line_index.position(&parse.text, offset)
    } else {
        Position::new(0, 0)
    };

    let mut insert_text = String::new();
    for name in &active.import_fixups.needed {
        insert_text.push_str("import ");
        insert_text.push_str(name);
        insert_text.push_str(";\n");
    }
    edits.push(TextEdit::new(Range::point(insertion_pos), insert_text));
    edits
}

/// Inserts `@Override`, indented to the method's own column, on the line
/// above each method the compiler facility flagged as needing it (§4.D).
fn override_insertion_edits(active: &FullFileCompilation) -> Vec<TextEdit> {
    let parse = &active.parse;
    active
        .overrides_needed
        .iter()
        .map(|decl| {
            let line_col = parse.line_index.line_col(decl.range.start());
            let indent = " ".repeat(line_col.col as usize);
            let insert_text = format!("{indent}@Override\n");
            TextEdit::new(Range::point(Position::new(line_col.line, 0)), insert_text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jls_vfs::InMemoryFileStore;

    fn uri(s: &str) -> Uri {
        Uri::new(s)
    }

    fn new_dispatcher() -> Dispatcher<InMemoryFileStore> {
        Dispatcher::new(InMemoryFileStore::new())
    }

    #[test]
    fn completion_on_empty_context_returns_top_level_keywords() {
        let mut dispatcher = new_dispatcher();
        let a = uri("file:///A.java");
        dispatcher.did_open(a.clone(), "class A {\n\n}\n".to_string());

        let (incomplete, items, ids) = dispatcher.completion(&a, Position::new(1, 0)).unwrap();
        assert!(!incomplete);
        assert_eq!(items.len(), ids.len());
        assert!(items
            .iter()
            .any(|c| matches!(c, Completion::Keyword { keyword } if keyword == "class")));
    }

    #[test]
    fn completion_on_non_java_file_is_empty_without_error() {
        let mut dispatcher = new_dispatcher();
        let a = uri("file:///A.txt");
        dispatcher.did_open(a.clone(), "hello".to_string());
        let (incomplete, items, ids) = dispatcher.completion(&a, Position::new(0, 0)).unwrap();
        assert!(!incomplete);
        assert!(items.is_empty());
        assert!(ids.is_empty());
    }

    #[test]
    fn resolve_completion_item_round_trips_through_cache() {
        let mut dispatcher = new_dispatcher();
        let a = uri("file:///A.java");
        dispatcher.did_open(a.clone(), "class A {\n\n}\n".to_string());
        let (_, _, ids) = dispatcher.completion(&a, Position::new(1, 0)).unwrap();
        assert!(dispatcher.resolve_completion_item(&ids[0]).is_some());
    }

    #[test]
    fn hover_on_class_renders_members() {
        let mut dispatcher = new_dispatcher();
        let a = uri("file:///A.java");
        dispatcher.did_open(a.clone(), "class A {\n  void run() {}\n}\n".to_string());
        let hover = dispatcher.hover(&a, Position::new(0, 7)).unwrap().unwrap();
        assert!(hover.declaration.starts_with("class A"));
        assert!(hover.declaration.contains("run("));
    }

    #[test]
    fn goto_definition_finds_the_declaring_class() {
        let mut dispatcher = new_dispatcher();
        let a = uri("file:///A.java");
        let text = "class A {\n  void widget() {\n    A other;\n  }\n}\n";
        dispatcher.did_open(a.clone(), text.to_string());

        // position on "A" inside the body (line 2, the local variable type)
        let defs = dispatcher.goto_definition(&a, Position::new(2, 4)).unwrap();
        assert!(defs.iter().any(|(uri, _)| uri == &a));
    }

    #[test]
    fn reference_count_lens_over_candidate_ceiling_returns_sentinel() {
        let mut dispatcher = new_dispatcher();
        let target = uri("file:///Widget.java");
        dispatcher.did_open(target.clone(), "class Widget {\n}\n".to_string());
        for i in 0..(jls_index::CANDIDATE_CEILING + 1) {
            let caller = uri(&format!("file:///Caller{i}.java"));
            dispatcher.did_open(caller, format!("class Caller{i} {{ Widget w; }}\n"));
        }

        let label = dispatcher
            .resolve_reference_count_lens(&target, Position::new(0, 6))
            .unwrap();
        assert_eq!(label, "Find references");
    }

    #[test]
    fn config_toggle_bumps_epoch_only_on_empty_nonempty_transition() {
        let mut dispatcher = new_dispatcher();
        let before = dispatcher.epoch;
        dispatcher.set_config(JavaConfig {
            external_dependencies: vec!["com.acme:widget:1.0".to_string()],
            class_path: Vec::new(),
        });
        assert_ne!(before, dispatcher.epoch);

        let after_first = dispatcher.epoch;
        dispatcher.set_config(JavaConfig {
            external_dependencies: vec!["com.acme:widget:2.0".to_string()],
            class_path: Vec::new(),
        });
        assert_eq!(after_first, dispatcher.epoch);
    }

    #[test]
    fn did_close_publishes_one_empty_diagnostics_message() {
        let mut dispatcher = new_dispatcher();
        let a = uri("file:///A.java");
        dispatcher.did_open(a.clone(), "class A {}".to_string());
        let message = dispatcher.did_close(a.clone());
        assert_eq!(message.uri, a);
        assert!(message.diagnostics.is_empty());
    }

    #[test]
    fn formatting_inserts_override_above_method() {
        let mut dispatcher = new_dispatcher();
        let a = uri("file:///A.java");
        dispatcher.did_open(
            a.clone(),
            "class A extends java.lang.Thread {\n  void run() {}\n}\n".to_string(),
        );
        let edits = dispatcher.formatting(&a).unwrap();
        assert!(edits.iter().any(|e| e.new_text.contains("@Override")));
    }
}
