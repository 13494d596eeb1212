//! Components C and D: the Parse Cache and the Active-File Cache.
//!
//! Both hold exactly one entry. A query against a different URI, a
//! different document version, or a stale facility epoch is a miss that
//! replaces the entry; there is no LRU, no per-file map, nothing beyond
//! "is this the one thing we last computed".

mod entry;

pub use entry::Epoch;

use jls_compiler::{CompilerError, CompilerFacility, FullFileCompilation, ParseResult};
use jls_core::Uri;

use entry::SingleEntry;

/// Component C.
#[derive(Default)]
pub struct ParseCache {
    entry: SingleEntry<ParseResult>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached parse for `(uri, version)` at `epoch`, reparsing
    /// through `facility` on any miss.
    pub fn get(
        &mut self,
        facility: &dyn CompilerFacility,
        uri: &Uri,
        version: i32,
        epoch: Epoch,
    ) -> Result<ParseResult, CompilerError> {
        if let Some(hit) = self.entry.hit(uri, version, epoch) {
            tracing::trace!(%uri, version, "parse cache hit");
            return Ok(hit.clone());
        }
        let parsed = facility.parse_file(uri)?;
        self.entry.replace(uri.clone(), version, epoch, parsed.clone());
        Ok(parsed)
    }

    pub fn peek(&self) -> Option<&ParseResult> {
        self.entry.peek()
    }
}

/// Component D. Strictly more expensive per-entry than the Parse Cache, so
/// it is never populated implicitly by a parse-only operation.
#[derive(Default)]
pub struct ActiveFileCache {
    entry: SingleEntry<FullFileCompilation>,
}

impl ActiveFileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Implements `updateActiveFile(uri)` (§4.D): every operation that
    /// needs element resolution at a cursor position calls this first.
    pub fn update(
        &mut self,
        facility: &dyn CompilerFacility,
        uri: &Uri,
        version: i32,
        epoch: Epoch,
    ) -> Result<FullFileCompilation, CompilerError> {
        if let Some(hit) = self.entry.hit(uri, version, epoch) {
            tracing::trace!(%uri, version, "active-file cache hit");
            return Ok(hit.clone());
        }
        let compiled = facility.compile_file(uri)?;
        self.entry.replace(uri.clone(), version, epoch, compiled.clone());
        Ok(compiled)
    }

    pub fn peek(&self) -> Option<&FullFileCompilation> {
        self.entry.peek()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jls_compiler::ScanningFacility;

    fn uri(s: &str) -> Uri {
        Uri::new(s)
    }

    #[test]
    fn parse_cache_hits_same_uri_and_version() {
        let facility = ScanningFacility::new();
        let u = uri("file:///A.java");
        facility.set_file(u.clone(), "class A {}".to_string());
        let mut cache = ParseCache::new();

        let first = cache.get(&facility, &u, 1, Epoch(0)).unwrap();
        facility.set_file(u.clone(), "class A { int x; }".to_string());
        let second = cache.get(&facility, &u, 1, Epoch(0)).unwrap();

        assert_eq!(first.decl_paths.len(), second.decl_paths.len());
    }

    #[test]
    fn parse_cache_misses_on_version_bump() {
        let facility = ScanningFacility::new();
        let u = uri("file:///A.java");
        facility.set_file(u.clone(), "class A {}".to_string());
        let mut cache = ParseCache::new();

        cache.get(&facility, &u, 1, Epoch(0)).unwrap();
        facility.set_file(u.clone(), "class A { int x; }".to_string());
        let second = cache.get(&facility, &u, 2, Epoch(0)).unwrap();

        assert_eq!(second.decl_paths.len(), 1);
    }

    #[test]
    fn parse_cache_misses_on_stale_epoch() {
        let facility = ScanningFacility::new();
        let u = uri("file:///A.java");
        facility.set_file(u.clone(), "class A {}".to_string());
        let mut cache = ParseCache::new();

        cache.get(&facility, &u, 1, Epoch(0)).unwrap();
        facility.set_file(u.clone(), "class A { int x; }".to_string());
        let second = cache.get(&facility, &u, 1, Epoch(1)).unwrap();

        assert_eq!(second.decl_paths.len(), 1);
    }

    #[test]
    fn active_file_cache_is_independent_of_parse_cache() {
        let facility = ScanningFacility::new();
        let u = uri("file:///A.java");
        facility.set_file(u.clone(), "class A { void m() {} }".to_string());
        let mut parse_cache = ParseCache::new();
        let mut active = ActiveFileCache::new();

        parse_cache.get(&facility, &u, 1, Epoch(0)).unwrap();
        let compiled = active.update(&facility, &u, 1, Epoch(0)).unwrap();

        assert_eq!(compiled.elements.len(), 2);
    }
}
