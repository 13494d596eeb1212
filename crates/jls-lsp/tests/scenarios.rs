//! End-to-end scenarios driven straight through [`Dispatcher`], the same
//! boundary `server.rs` calls into once a wire request has been decoded.
//! Each test exercises one of the walkthroughs the analysis core's query
//! surface is meant to satisfy.

use pretty_assertions::assert_eq;

use jls_compiler::{Completion, ElementKind};
use jls_core::Position;
use jls_lsp::Dispatcher;
use jls_vfs::InMemoryFileStore;

fn uri(s: &str) -> jls_core::Uri {
    jls_core::Uri::new(s)
}

fn new_dispatcher() -> Dispatcher<InMemoryFileStore> {
    Dispatcher::new(InMemoryFileStore::new())
}

/// Scenario 1: an empty member-declaration position offers the fixed
/// top-level keyword list, each one a `Keyword` completion.
#[test]
fn empty_context_offers_top_level_keywords() {
    let mut dispatcher = new_dispatcher();
    let a = uri("file:///A.java");
    dispatcher.did_open(a.clone(), "class A {\n\n}\n".to_string());

    let (incomplete, items, ids) = dispatcher.completion(&a, Position::new(1, 0)).unwrap();
    assert!(!incomplete);
    assert_eq!(items.len(), ids.len());
    assert!(!items.is_empty());
    assert!(items
        .iter()
        .all(|c| matches!(c, Completion::Keyword { .. })));
    assert!(items
        .iter()
        .any(|c| matches!(c, Completion::Keyword { keyword } if keyword == "class")));
}

/// Scenario 2: `this.` inside a method body offers the enclosing file's
/// own members, including a field completion with its declared type as
/// `detail` and an `InScope` sort rank.
#[test]
fn member_select_after_this_dot_offers_the_field() {
    let mut dispatcher = new_dispatcher();
    let b = uri("file:///B.java");
    dispatcher.did_open(
        b.clone(),
        "class B {\n  int x;\n  void m() {\n    this.\n  }\n}\n".to_string(),
    );

    // Cursor right after "this." on line 3.
    let (_incomplete, items, _ids) = dispatcher.completion(&b, Position::new(3, 9)).unwrap();

    let field = items
        .iter()
        .find(|c| matches!(c, Completion::Element { element, .. } if element.kind == ElementKind::Field))
        .expect("expected a field completion for x");

    match field {
        Completion::Element { element, sort_rank } => {
            assert_eq!(element.ptr.simple_name(), "x");
            assert_eq!(element.type_name.as_str(), "int");
            assert_eq!(sort_rank.digit(), 2);
        }
        _ => unreachable!(),
    }
}

/// Scenario 3: a method whose enclosing class extends a non-`Object`
/// super type, and that isn't already annotated, gets exactly one
/// `@Override` insertion indented to the method's own column.
#[test]
fn formatting_inserts_override_above_undeclared_method() {
    let mut dispatcher = new_dispatcher();
    let a = uri("file:///Runner.java");
    dispatcher.did_open(
        a.clone(),
        "class Runner extends java.lang.Thread {\n  void run() {\n  }\n}\n".to_string(),
    );

    let edits = dispatcher.formatting(&a).unwrap();
    let overrides: Vec<_> = edits.iter().filter(|e| e.new_text.contains("@Override")).collect();
    assert_eq!(overrides.len(), 1, "expected exactly one override insertion; got {edits:#?}");
    assert_eq!(overrides[0].new_text, "  @Override\n");
}

/// Scenario 4: an unused non-static import is deleted and a missing one
/// (for a type actually used in the file) is inserted at the first
/// existing import line.
#[test]
fn formatting_fixes_imports_delete_unused_insert_missing() {
    let mut dispatcher = new_dispatcher();
    let a = uri("file:///A.java");
    dispatcher.did_open(
        a.clone(),
        "package com.acme;\n\nimport java.util.Map;\n\nclass A {\n  List items;\n}\n".to_string(),
    );

    let edits = dispatcher.formatting(&a).unwrap();

    let deletion = edits
        .iter()
        .find(|e| e.new_text.is_empty())
        .expect("expected a deletion edit for the unused import");
    assert_eq!(deletion.range.start.line, 2);
    assert_eq!(deletion.range.end.line, 3);

    let insertion = edits
        .iter()
        .find(|e| e.new_text.contains("import java.util.List;"))
        .expect("expected an insertion edit for the missing import");
    assert_eq!(insertion.new_text, "import java.util.List;\n");
    assert_eq!(insertion.range.start.line, 2);
}

/// Scenario 5: the reference-count lens sums call sites across files and
/// recomputes once an already-indexed caller file's content changes, even
/// with no intervening retarget to a different lens.
#[test]
fn reference_count_lens_sums_and_recomputes_after_source_edit() {
    let mut dispatcher = new_dispatcher();
    let widget = uri("file:///Widget.java");
    let caller = uri("file:///Caller.java");

    dispatcher.did_open(widget.clone(), "class Widget {\n}\n".to_string());
    dispatcher.did_open(
        caller.clone(),
        "class Caller {\n  void m() {\n    Widget a;\n    Widget b;\n  }\n}\n".to_string(),
    );

    let first = dispatcher
        .resolve_reference_count_lens(&widget, Position::new(0, 6))
        .unwrap();
    assert_eq!(first, "2 references");

    // Editor narrows the caller down to a single use.
    dispatcher.did_change(
        caller.clone(),
        "class Caller {\n  void m() {\n    Widget a;\n  }\n}\n".to_string(),
    );

    // Resolving Widget's own lens again, with no intervening retarget,
    // must still notice the caller's content changed and recompute.
    let second = dispatcher
        .resolve_reference_count_lens(&widget, Position::new(0, 6))
        .unwrap();
    assert_eq!(second, "1 reference");
}

/// Scenario 6: once the candidate file set exceeds the ceiling, the lens
/// reports the sentinel title instead of batch-compiling every candidate.
#[test]
fn reference_count_lens_over_ceiling_reports_find_references() {
    let mut dispatcher = new_dispatcher();
    let widget = uri("file:///Widget.java");
    dispatcher.did_open(widget.clone(), "class Widget {\n}\n".to_string());

    for i in 0..(jls_index::CANDIDATE_CEILING + 1) {
        let caller = uri(&format!("file:///Caller{i}.java"));
        dispatcher.did_open(caller, format!("class Caller{i} {{ Widget w; }}\n"));
    }

    let label = dispatcher
        .resolve_reference_count_lens(&widget, Position::new(0, 6))
        .unwrap();
    assert_eq!(label, "Find references");
}
