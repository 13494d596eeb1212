//! Component B: the File Store adapter.
//!
//! Sits between the dispatcher and the external `FileStore`, tracking the
//! last content/version observed by the parse and active-file caches so
//! they can decide "is my cached artifact for this version still current"
//! without re-deriving it from scratch.

use std::collections::HashMap;

use jls_core::Uri;

use crate::store::FileStore;

/// A snapshot of one file's state as known to the dispatcher.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub uri: Uri,
    pub content: String,
    pub version: i32,
    pub open: bool,
    pub last_parsed_version: Option<i32>,
    pub last_compiled_version: Option<i32>,
}

#[derive(Default)]
struct Observed {
    last_parsed_version: Option<i32>,
    last_compiled_version: Option<i32>,
}

/// Adapter over a `FileStore` that additionally remembers, per URI, the
/// version last seen by the parse cache and the active-file cache.
pub struct VfsAdapter<S> {
    store: S,
    observed: HashMap<Uri, Observed>,
}

impl<S: FileStore> VfsAdapter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            observed: HashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Current snapshot for `uri`, or `None` if the store has no record of
    /// it (never opened / created).
    pub fn entry(&self, uri: &Uri) -> Option<FileEntry> {
        let content = self.store.contents(uri)?;
        let version = self.store.version(uri)?;
        let observed = self.observed.get(uri);
        Some(FileEntry {
            uri: uri.clone(),
            content,
            version,
            open: self.store.is_open(uri),
            last_parsed_version: observed.and_then(|o| o.last_parsed_version),
            last_compiled_version: observed.and_then(|o| o.last_compiled_version),
        })
    }

    pub fn mark_parsed(&mut self, uri: &Uri, version: i32) {
        self.observed.entry(uri.clone()).or_default().last_parsed_version = Some(version);
    }

    pub fn mark_compiled(&mut self, uri: &Uri, version: i32) {
        self.observed.entry(uri.clone()).or_default().last_compiled_version = Some(version);
    }

    pub fn active_documents(&self) -> Vec<Uri> {
        self.store.active_documents()
    }

    pub fn is_java_file(&self, uri: &Uri) -> bool {
        self.store.is_java_file(uri)
    }

    /// Forget all version bookkeeping for `uri`. Called when the file is
    /// deleted out from under an open editor.
    pub fn forget(&mut self, uri: &Uri) {
        self.observed.remove(uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DidChangeParams, DidOpenParams, InMemoryFileStore};

    #[test]
    fn entry_reflects_latest_store_version() {
        let mut vfs = VfsAdapter::new(InMemoryFileStore::new());
        let uri = Uri::new("file:///A.java");
        vfs.store_mut().open(DidOpenParams {
            uri: uri.clone(),
            text: "class A {}".into(),
        });
        let e = vfs.entry(&uri).unwrap();
        assert_eq!(e.version, 0);
        assert_eq!(e.last_parsed_version, None);

        vfs.mark_parsed(&uri, 0);
        vfs.store_mut().change(DidChangeParams {
            uri: uri.clone(),
            text: "class A { int x; }".into(),
        });
        let e = vfs.entry(&uri).unwrap();
        assert_eq!(e.version, 1);
        assert_eq!(e.last_parsed_version, Some(0));
        assert_ne!(e.last_parsed_version, Some(e.version));
    }
}
