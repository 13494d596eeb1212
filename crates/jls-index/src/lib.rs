//! Component H: the Reference Index and the Reference Index Cache.
//!
//! A `ReferenceIndex` is a per-source-file fact: how many times does this
//! file mention each `Ptr` it was built against? The cache layers a
//! "reference-count lens" procedure on top (§4.I): a two-map structure
//! keyed by the *target* declaration on one side and the *source file* on
//! the other, plus the `TOO_EXPENSIVE` short-circuit for targets whose
//! candidate file set is too large to batch-compile on every lens resolve.

use std::collections::{BTreeMap, BTreeSet};

use jls_core::{Ptr, Uri};

/// Above this many candidate files, the reference-count lens gives up and
/// reports the sentinel rather than batch-compiling the candidate set.
pub const CANDIDATE_CEILING: usize = 10;

/// The "too expensive to compute" reference count (§4.I), rendered by the
/// dispatcher as the `"Find references"` lens title.
pub const TOO_EXPENSIVE_SENTINEL: u32 = 100;

/// Per-source-file reference counts, built by scanning one compiled file
/// (or batch member) against a known set of targets (§3: "a mapping
/// `Ptr -> non-negative count`, a `hasErrors` flag, and a `signature`
/// snapshot").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    counts: BTreeMap<Ptr, u32>,
    has_errors: bool,
    signature: BTreeSet<Ptr>,
}

impl ReferenceIndex {
    /// `signature` is the target file's declared-`Ptr` set as it stood when
    /// this index was built; `has_errors` is whether compiling the source
    /// this index was built from reported any error-severity diagnostic.
    pub fn new(counts: BTreeMap<Ptr, u32>, has_errors: bool, signature: BTreeSet<Ptr>) -> Self {
        Self {
            counts,
            has_errors,
            signature,
        }
    }

    /// Builds an index with no recorded target signature and no errors;
    /// `needs_update` falls back to comparing the counted `Ptr`s directly
    /// against `current_signature`.
    pub fn from_counts(counts: BTreeMap<Ptr, u32>) -> Self {
        Self {
            counts,
            has_errors: false,
            signature: BTreeSet::new(),
        }
    }

    #[cfg(test)]
    pub fn seed(pairs: impl IntoIterator<Item = (Ptr, u32)>) -> Self {
        Self::from_counts(pairs.into_iter().collect())
    }

    pub fn count(&self, ptr: &Ptr) -> u32 {
        self.counts.get(ptr).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// `true` iff the validity invariant (§3) no longer holds against
    /// `current_signature`: the source this index was built from reported
    /// errors, or a `Ptr` it recorded against has disappeared from the
    /// target's current signature. Falls back to comparing the counted
    /// `Ptr`s directly when no `signature` snapshot was stored.
    pub fn needs_update(&self, current_signature: &BTreeSet<Ptr>) -> bool {
        if self.has_errors {
            return true;
        }
        if self.signature.is_empty() {
            self.counts.keys().any(|ptr| !current_signature.contains(ptr))
        } else {
            self.signature.iter().any(|ptr| !current_signature.contains(ptr))
        }
    }
}

/// A target's cached lens state: either the candidate set was small enough
/// to index, or it was declared too expensive outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetEntry {
    TooExpensive,
    Computed {
        /// The subset of candidate source URIs whose index totals were > 0
        /// when last computed (§4.I step 4); used for summation.
        source_uris: BTreeSet<Uri>,
        /// Every candidate source URI considered, nonzero or not; used to
        /// check staleness so a source going from zero to nonzero
        /// references is still noticed (§3 validity invariant (a)).
        candidate_uris: BTreeSet<Uri>,
    },
}

/// The cross-file Reference Index Cache (§4.H, §4.I "Reference-count
/// procedure"): `references_by_target` maps a target `Ptr` to the sources
/// that actually reference it; `index_by_source` holds the per-source
/// indices those sources were built from, shared across targets;
/// `version_by_source` records each source's file version as of that
/// build, so an edit to the source's content — not just a change to the
/// target's own signature — is enough to invalidate it (§3 validity
/// invariant (a): "its file has not changed since build").
#[derive(Debug, Default)]
pub struct ReferenceIndexCache {
    cached_target_uri: Option<Uri>,
    references_by_target: BTreeMap<Ptr, TargetEntry>,
    index_by_source: BTreeMap<Uri, ReferenceIndex>,
    version_by_source: BTreeMap<Uri, i32>,
}

impl ReferenceIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step 1 of the reference-count procedure: if `target_uri` differs
    /// from the last one this cache was consulted for, clear both maps.
    /// Returns `true` if a clear happened.
    pub fn retarget(&mut self, target_uri: &Uri) -> bool {
        if self.cached_target_uri.as_ref() == Some(target_uri) {
            return false;
        }
        tracing::debug!(
            old = ?self.cached_target_uri,
            new = %target_uri,
            "reference index cache retarget: clearing"
        );
        self.references_by_target.clear();
        self.index_by_source.clear();
        self.version_by_source.clear();
        self.cached_target_uri = Some(target_uri.clone());
        true
    }

    pub fn entry_for(&self, ptr: &Ptr) -> Option<&TargetEntry> {
        self.references_by_target.get(ptr)
    }

    /// Step 4's recompute condition: the entry is missing, or any
    /// candidate source file backing it has gone stale — either its
    /// content changed since it was indexed (`current_versions` disagrees
    /// with what was recorded in `store_computed`) or `current_signature`
    /// no longer satisfies the invariant the stored index was built under.
    pub fn needs_recompute(
        &self,
        ptr: &Ptr,
        current_signature: &BTreeSet<Ptr>,
        current_versions: &BTreeMap<Uri, i32>,
    ) -> bool {
        match self.entry_for(ptr) {
            None => true,
            Some(TargetEntry::TooExpensive) => false,
            Some(TargetEntry::Computed { candidate_uris, .. }) => candidate_uris.iter().any(|uri| {
                let version_changed = current_versions.get(uri) != self.version_by_source.get(uri);
                version_changed
                    || self
                        .index_by_source
                        .get(uri)
                        .map(|idx| idx.needs_update(current_signature))
                        .unwrap_or(true)
            }),
        }
    }

    pub fn mark_too_expensive(&mut self, ptr: Ptr) {
        tracing::debug!(target = %ptr, "reference index: candidate set too large, marking TOO_EXPENSIVE");
        self.references_by_target.insert(ptr, TargetEntry::TooExpensive);
    }

    /// Stores freshly-built per-source indices, the file version each
    /// source was read at, and records under `ptr` both the subset of
    /// sources whose totals are nonzero (for summation) and the full
    /// candidate set considered (for staleness checks).
    pub fn store_computed(
        &mut self,
        ptr: Ptr,
        per_source: BTreeMap<Uri, ReferenceIndex>,
        versions: BTreeMap<Uri, i32>,
    ) {
        let mut source_uris = BTreeSet::new();
        let mut candidate_uris = BTreeSet::new();
        for (uri, idx) in per_source {
            candidate_uris.insert(uri.clone());
            if idx.total() > 0 {
                source_uris.insert(uri.clone());
            }
            self.index_by_source.insert(uri.clone(), idx);
            if let Some(version) = versions.get(&uri) {
                self.version_by_source.insert(uri, *version);
            }
        }
        self.references_by_target.insert(
            ptr,
            TargetEntry::Computed {
                source_uris,
                candidate_uris,
            },
        );
    }

    /// Step 5: sum `count(ptr)` over the active-file index plus every
    /// stored per-source index recorded against `ptr`. Returns the
    /// sentinel directly when the target was marked too expensive.
    pub fn sum_count(&self, ptr: &Ptr, active_file_index: &ReferenceIndex) -> u32 {
        match self.entry_for(ptr) {
            Some(TargetEntry::TooExpensive) => return TOO_EXPENSIVE_SENTINEL,
            Some(TargetEntry::Computed { source_uris, .. }) => {
                let mut total = active_file_index.count(ptr);
                for uri in source_uris {
                    if let Some(idx) = self.index_by_source.get(uri) {
                        total += idx.count(ptr);
                    }
                }
                total
            }
            None => active_file_index.count(ptr),
        }
    }
}

/// The lens title format from §4.I: exactly one of the four literal
/// strings, chosen by the resolved count.
pub fn reference_count_label(count: u32) -> String {
    match count {
        0 => "? references".to_string(),
        1 => "1 reference".to_string(),
        n if n >= TOO_EXPENSIVE_SENTINEL => "Find references".to_string(),
        n => format!("{n} references"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ptr(name: &str) -> Ptr {
        Ptr::for_class("com.acme", [] as [&str; 0], name)
    }

    fn uri(s: &str) -> Uri {
        Uri::new(s)
    }

    #[test]
    fn needs_update_when_target_identity_vanishes() {
        let idx = ReferenceIndex::seed([(ptr("Foo"), 3)]);
        let mut sig = BTreeSet::new();
        sig.insert(ptr("Foo"));
        assert!(!idx.needs_update(&sig));

        sig.clear();
        assert!(idx.needs_update(&sig));
    }

    #[test]
    fn needs_update_when_source_had_errors() {
        let mut sig = BTreeSet::new();
        sig.insert(ptr("Foo"));
        let mut signature = BTreeSet::new();
        signature.insert(ptr("Foo"));

        let idx = ReferenceIndex::new(BTreeMap::from([(ptr("Foo"), 1)]), true, signature);
        assert!(idx.needs_update(&sig));
    }

    #[test]
    fn retarget_clears_once_per_new_target() {
        let mut cache = ReferenceIndexCache::new();
        let a = uri("file:///A.java");
        let b = uri("file:///B.java");

        assert!(cache.retarget(&a));
        assert!(!cache.retarget(&a));
        assert!(cache.retarget(&b));
    }

    #[test]
    fn too_expensive_short_circuits_sum() {
        let mut cache = ReferenceIndexCache::new();
        let target = ptr("Widget");
        cache.mark_too_expensive(target.clone());

        let active = ReferenceIndex::seed([(target.clone(), 2)]);
        assert_eq!(cache.sum_count(&target, &active), TOO_EXPENSIVE_SENTINEL);
        assert_eq!(reference_count_label(TOO_EXPENSIVE_SENTINEL), "Find references");
    }

    #[test]
    fn computed_entry_sums_active_plus_sources() {
        let mut cache = ReferenceIndexCache::new();
        let target = ptr("Widget");
        let source = uri("file:///Caller.java");

        let mut per_source = BTreeMap::new();
        per_source.insert(source.clone(), ReferenceIndex::seed([(target.clone(), 4)]));
        let mut versions = BTreeMap::new();
        versions.insert(source, 1);
        cache.store_computed(target.clone(), per_source, versions);

        let active = ReferenceIndex::seed([(target.clone(), 1)]);
        assert_eq!(cache.sum_count(&target, &active), 5);
        assert_eq!(reference_count_label(5), "5 references");
    }

    #[test]
    fn recompute_needed_when_source_index_goes_stale() {
        let mut cache = ReferenceIndexCache::new();
        let target = ptr("Widget");
        let source = uri("file:///Caller.java");

        let mut per_source = BTreeMap::new();
        per_source.insert(source.clone(), ReferenceIndex::seed([(target.clone(), 1)]));
        let mut versions = BTreeMap::new();
        versions.insert(source.clone(), 1);
        cache.store_computed(target.clone(), per_source, versions.clone());

        let mut sig = BTreeSet::new();
        sig.insert(target.clone());
        assert!(!cache.needs_recompute(&target, &sig, &versions));

        sig.clear();
        assert!(cache.needs_recompute(&target, &sig, &versions));
    }

    #[test]
    fn recompute_needed_when_source_file_content_changes() {
        let mut cache = ReferenceIndexCache::new();
        let target = ptr("Widget");
        let source = uri("file:///Caller.java");

        let mut per_source = BTreeMap::new();
        per_source.insert(source.clone(), ReferenceIndex::seed([(target.clone(), 1)]));
        let mut versions = BTreeMap::new();
        versions.insert(source.clone(), 1);
        cache.store_computed(target.clone(), per_source, versions.clone());

        let mut sig = BTreeSet::new();
        sig.insert(target.clone());
        assert!(!cache.needs_recompute(&target, &sig, &versions));

        // The source file changed since this index was built: even though
        // the target's own signature is untouched, the cache must recompute.
        versions.insert(source, 2);
        assert!(cache.needs_recompute(&target, &sig, &versions));
    }

    #[test]
    fn zero_count_label_is_question_mark() {
        assert_eq!(reference_count_label(0), "? references");
        assert_eq!(reference_count_label(1), "1 reference");
    }
}
