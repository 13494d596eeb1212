//! Component F: the batch-compiler wrapper (go-to-definition, find-
//! references, and the reference-count lens all build on this).

use std::collections::BTreeSet;

use jls_compiler::{Batch, CompilerError, CompilerFacility};
use jls_core::{Ptr, Uri};
use jls_vfs::FileStore;

use crate::pruner::prune;

/// Prunes every candidate file (plus `source_uri`, always included) down
/// to the lines touching `target`'s simple name, then batch-compiles the
/// result.
///
/// Constructors need no special case here: a `Ptr`'s `simple_name()` is
/// already the owning class's name for a constructor (`Ptr::for_constructor`
/// reuses it), so "prune by simple name, or by enclosing class name for
/// constructors" collapses to one rule.
pub fn compile_pruned_batch(
    facility: &dyn CompilerFacility,
    store: &dyn FileStore,
    candidate_uris: &BTreeSet<Uri>,
    source_uri: &Uri,
    target: &Ptr,
) -> Result<Batch, CompilerError> {
    let mut uris = candidate_uris.clone();
    uris.insert(source_uri.clone());

    let mut files = Vec::with_capacity(uris.len());
    for uri in &uris {
        let content = store.contents(uri).unwrap_or_default();
        let pruned = prune(&content, target.simple_name());
        files.push((uri.clone(), pruned));
    }
    facility.compile_batch(&files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jls_compiler::ScanningFacility;
    use jls_vfs::InMemoryFileStore;

    #[test]
    fn includes_source_uri_even_when_not_a_candidate() {
        let facility = ScanningFacility::new();
        let mut store = InMemoryFileStore::new();

        let a = Uri::new("file:///A.java");
        let b = Uri::new("file:///B.java");
        store.external_create(a.clone(), "class A { void widget() {} }".to_string());
        store.external_create(b.clone(), "class B { void other() {} }".to_string());
        facility.set_file(a.clone(), store.contents(&a).unwrap());
        facility.set_file(b.clone(), store.contents(&b).unwrap());

        let target = Ptr::for_method(&Ptr::for_class("", [] as [&str; 0], "A"), "widget", [] as [&str; 0]);
        let candidates = BTreeSet::new();
        let batch = compile_pruned_batch(&facility, &store, &candidates, &a, &target).unwrap();

        assert!(batch.files.contains_key(&a));
    }
}
