//! Component J: the Diagnostics Publisher.
//!
//! Input: the current open-document set plus a compiler-produced
//! diagnostic list. Output: exactly one publish per open URI, even when
//! its list is empty (to clear stale markers); diagnostics for closed
//! files are dropped with a warning (§7 item 4).

use std::collections::BTreeMap;

use jls_core::{Diagnostic, Severity, Uri};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishDiagnosticsParams {
    pub uri: Uri,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn publish(open_uris: &[Uri], diagnostics: Vec<Diagnostic>) -> Vec<PublishDiagnosticsParams> {
    let mut by_uri: BTreeMap<Uri, Vec<Diagnostic>> =
        open_uris.iter().cloned().map(|uri| (uri, Vec::new())).collect();

    for diagnostic in diagnostics {
        match by_uri.get_mut(&diagnostic.file) {
            Some(list) => list.push(diagnostic),
            None => {
                tracing::warn!(uri = %diagnostic.file, "dropping diagnostic for a file outside the open set");
            }
        }
    }

    by_uri
        .into_iter()
        .map(|(uri, diagnostics)| {
            tracing::debug!(%uri, count = diagnostics.len(), "publishing diagnostics");
            PublishDiagnosticsParams { uri, diagnostics }
        })
        .collect()
}

/// Maps a compiler `Severity` to the LSP severity discipline (§4.J):
/// `ERROR`→Error, `WARNING|MANDATORY_WARNING`→Warning, `NOTE`→Information,
/// anything else→Hint. The compiler facility in this workspace only ever
/// produces `Severity` directly, so this is the identity map kept for the
/// wire layer to call; `unused`-coded diagnostics are additionally tagged
/// `Unnecessary` there.
pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
        Severity::Info => "Information",
        Severity::Hint => "Hint",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jls_core::TextRange;

    fn diag(uri: &Uri, message: &str) -> Diagnostic {
        Diagnostic::new(uri.clone(), TextRange::new(0.into(), 1.into()), Severity::Error, message)
    }

    #[test]
    fn publishes_empty_list_for_open_file_with_no_diagnostics() {
        let a = Uri::new("file:///A.java");
        let messages = publish(&[a.clone()], vec![]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].uri, a);
        assert!(messages[0].diagnostics.is_empty());
    }

    #[test]
    fn drops_diagnostics_for_closed_files() {
        let open = Uri::new("file:///Open.java");
        let closed = Uri::new("file:///Closed.java");
        let messages = publish(&[open.clone()], vec![diag(&open, "e1"), diag(&closed, "e2")]);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].diagnostics.len(), 1);
    }

    #[test]
    fn one_message_per_open_uri() {
        let a = Uri::new("file:///A.java");
        let b = Uri::new("file:///B.java");
        let messages = publish(&[a.clone(), b.clone()], vec![diag(&a, "e1")]);
        assert_eq!(messages.len(), 2);
    }
}
