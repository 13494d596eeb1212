//! Component E wrapper: turns a classified [`CompletionContext`] into a
//! concrete [`CompletionResult`] by picking the one `Focus` method the
//! context calls for, plus the fixed top-level keyword fallback for
//! `CompletionContext::None`.

use smol_str::SmolStr;

use jls_compiler::{Completion, CompletionContext, CompletionResult, Focus, MethodInvocation, MethodOverload};

/// The keywords offered when the cursor sits at a member-declaration
/// position rather than inside any expression (§4.E, `None` context).
const TOP_LEVEL_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "static", "final", "abstract", "class", "interface", "enum",
    "void", "int", "boolean", "long", "double", "float", "char", "byte", "short",
];

/// Logs at `error!` before panicking: the dedicated fatal-signal helper
/// for a completion-context shape that should be structurally impossible
/// (§4.E addition, §7 item 5).
pub fn unreachable_kind(kind: &str) -> ! {
    tracing::error!(kind, "completion reached an impossible branch");
    unreachable!("impossible completion state: {kind}");
}

/// The overload `resolved` points at. Panics via [`unreachable_kind`] if
/// the index is out of range — the facility contract guarantees `resolved`
/// is either `None` or a valid index into `candidates`.
pub fn active_overload(invocation: &MethodInvocation) -> Option<&MethodOverload> {
    match invocation.resolved {
        None => None,
        Some(idx) => match invocation.candidates.get(idx) {
            Some(overload) => Some(overload),
            None => unreachable_kind("methodInvocation.resolved index out of range"),
        },
    }
}

/// Runs the focus compiler's own sub-query matching `focus.context`,
/// falling back to the fixed keyword set when the context is `None`.
pub fn complete(focus: &Focus) -> CompletionResult {
    match &focus.context {
        CompletionContext::None => top_level_keywords(),
        CompletionContext::MemberSelect { after_method_reference } => {
            focus.complete_members(*after_method_reference)
        }
        CompletionContext::MemberReference => focus.complete_members(true),
        CompletionContext::Identifier {
            partial_name,
            in_class,
            in_method,
        } => focus.complete_identifiers(in_class.as_deref(), in_method.as_deref(), partial_name),
        CompletionContext::Annotation { partial_name } => focus.complete_annotations(partial_name),
        CompletionContext::Case => focus.complete_cases(),
    }
}

fn top_level_keywords() -> CompletionResult {
    CompletionResult {
        is_incomplete: false,
        items: TOP_LEVEL_KEYWORDS
            .iter()
            .map(|kw| Completion::Keyword {
                keyword: SmolStr::new(*kw),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jls_compiler::{Element, ElementKind};
    use jls_core::Ptr;

    fn dummy_element(name: &str) -> Element {
        Element {
            ptr: Ptr::for_class("com.acme", [] as [&str; 0], name),
            kind: ElementKind::Class,
            type_name: SmolStr::default(),
            param_names: Vec::new(),
            param_types: Vec::new(),
            super_type: SmolStr::new("Object"),
            already_overridden: false,
        }
    }

    #[test]
    fn none_context_returns_fixed_keywords() {
        let focus = Focus::new(CompletionContext::None);
        let result = complete(&focus);
        assert!(!result.is_incomplete);
        assert!(result
            .items
            .iter()
            .any(|c| matches!(c, Completion::Keyword { keyword } if keyword == "class")));
    }

    #[test]
    fn member_select_dispatches_to_members() {
        let focus = Focus::new(CompletionContext::MemberSelect {
            after_method_reference: false,
        })
        .with_members(vec![dummy_element("Bar")]);
        let result = complete(&focus);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn identifier_filters_by_partial_name() {
        let focus = Focus::new(CompletionContext::Identifier {
            partial_name: SmolStr::new("Ba"),
            in_class: Some(SmolStr::new("Foo")),
            in_method: Some(SmolStr::new("run")),
        })
        .with_identifiers(vec![dummy_element("Bar"), dummy_element("Quux")]);
        let result = complete(&focus);
        assert_eq!(result.items.len(), 1);
    }

    #[test]
    fn active_overload_resolves_valid_index() {
        let invocation = MethodInvocation {
            candidates: vec![MethodOverload {
                element: dummy_element("run"),
            }],
            resolved: Some(0),
            active_parameter: 0,
        };
        assert!(active_overload(&invocation).is_some());
    }

    #[test]
    fn active_overload_is_none_when_unresolved() {
        let invocation = MethodInvocation {
            candidates: vec![MethodOverload {
                element: dummy_element("run"),
            }],
            resolved: None,
            active_parameter: 0,
        };
        assert!(active_overload(&invocation).is_none());
    }
}
