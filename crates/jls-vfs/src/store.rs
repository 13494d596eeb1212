//! `FileStore`: the editor's virtual-buffer contract.
//!
//! Out of scope per the analysis core's charter (§1, external collaborator):
//! this trait is the seam, not a production implementation. `InMemoryFileStore`
//! is the deterministic double the rest of this workspace tests against.

use std::collections::BTreeMap;

use jls_core::Uri;

pub struct DidOpenParams {
    pub uri: Uri,
    pub text: String,
}

pub struct DidChangeParams {
    pub uri: Uri,
    /// Full replacement text. Incremental deltas are an editor-transport
    /// concern (out of scope, §1); the analysis core only ever needs the
    /// resulting full content and a bumped version.
    pub text: String,
}

pub struct DidCloseParams {
    pub uri: Uri,
}

/// The external file store contract consumed by the File Store adapter.
pub trait FileStore {
    fn open(&mut self, params: DidOpenParams);
    fn change(&mut self, params: DidChangeParams);
    fn close(&mut self, params: DidCloseParams);

    fn external_create(&mut self, uri: Uri, text: String);
    fn external_change(&mut self, uri: Uri, text: String);
    fn external_delete(&mut self, uri: &Uri);

    fn contents(&self, uri: &Uri) -> Option<String>;
    fn version(&self, uri: &Uri) -> Option<i32>;
    fn is_open(&self, uri: &Uri) -> bool;
    fn active_documents(&self) -> Vec<Uri>;
    fn is_java_file(&self, uri: &Uri) -> bool {
        uri.is_java_file()
    }
    fn set_workspace_roots(&mut self, roots: Vec<String>);
}

#[derive(Clone, Debug)]
struct Record {
    content: String,
    version: i32,
    open: bool,
}

/// Deterministic in-memory `FileStore`, standing in for the editor's
/// real virtual-buffer store in this crate's own tests and in the binary's
/// default wiring.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: BTreeMap<Uri, Record>,
    workspace_roots: Vec<String>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileStore for InMemoryFileStore {
    fn open(&mut self, params: DidOpenParams) {
        let entry = self.files.entry(params.uri).or_insert_with(|| Record {
            content: String::new(),
            version: 0,
            open: false,
        });
        entry.content = params.text;
        entry.open = true;
    }

    fn change(&mut self, params: DidChangeParams) {
        let entry = self.files.entry(params.uri).or_insert_with(|| Record {
            content: String::new(),
            version: 0,
            open: true,
        });
        entry.content = params.text;
        entry.version += 1;
    }

    fn close(&mut self, params: DidCloseParams) {
        if let Some(entry) = self.files.get_mut(&params.uri) {
            entry.open = false;
        }
    }

    fn external_create(&mut self, uri: Uri, text: String) {
        self.files.insert(
            uri,
            Record {
                content: text,
                version: 0,
                open: false,
            },
        );
    }

    fn external_change(&mut self, uri: Uri, text: String) {
        let entry = self.files.entry(uri).or_insert_with(|| Record {
            content: String::new(),
            version: 0,
            open: false,
        });
        entry.content = text;
        entry.version += 1;
    }

    fn external_delete(&mut self, uri: &Uri) {
        self.files.remove(uri);
    }

    fn contents(&self, uri: &Uri) -> Option<String> {
        self.files.get(uri).map(|r| r.content.clone())
    }

    fn version(&self, uri: &Uri) -> Option<i32> {
        self.files.get(uri).map(|r| r.version)
    }

    fn is_open(&self, uri: &Uri) -> bool {
        self.files.get(uri).map(|r| r.open).unwrap_or(false)
    }

    fn active_documents(&self) -> Vec<Uri> {
        self.files
            .iter()
            .filter(|(_, r)| r.open)
            .map(|(uri, _)| uri.clone())
            .collect()
    }

    fn set_workspace_roots(&mut self, roots: Vec<String>) {
        self.workspace_roots = roots;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_bumps_version_monotonically() {
        let mut store = InMemoryFileStore::new();
        let uri = Uri::new("file:///A.java");
        store.open(DidOpenParams {
            uri: uri.clone(),
            text: "class A {}".into(),
        });
        assert_eq!(store.version(&uri), Some(0));
        store.change(DidChangeParams {
            uri: uri.clone(),
            text: "class A { int x; }".into(),
        });
        assert_eq!(store.version(&uri), Some(1));
        store.change(DidChangeParams {
            uri: uri.clone(),
            text: "class A { int x; int y; }".into(),
        });
        assert_eq!(store.version(&uri), Some(2));
    }

    #[test]
    fn close_preserves_content_but_clears_openness() {
        let mut store = InMemoryFileStore::new();
        let uri = Uri::new("file:///A.java");
        store.open(DidOpenParams {
            uri: uri.clone(),
            text: "class A {}".into(),
        });
        store.close(DidCloseParams { uri: uri.clone() });
        assert!(!store.is_open(&uri));
        assert_eq!(store.contents(&uri), Some("class A {}".to_string()));
        assert_eq!(store.active_documents(), Vec::new());
    }
}
