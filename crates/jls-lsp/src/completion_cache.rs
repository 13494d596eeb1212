//! The Completion Cache (§3 data model): opaque per-item identifiers
//! minted by `completion` and consulted by `resolveCompletionItem`.
//!
//! Scoped to "the most recent completion request" (§8): every call to
//! [`CompletionCache::replace`] discards whatever the previous completion
//! reply stored, matching the testable property that a resolve request
//! only ever needs to see the latest reply's cache.

use std::collections::HashMap;

use jls_compiler::Completion;

#[derive(Default)]
pub struct CompletionCache {
    entries: HashMap<String, Completion>,
}

impl CompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole cache with `items`, returning a freshly-minted
    /// identifier per item, in order.
    pub fn replace(&mut self, items: Vec<Completion>) -> Vec<String> {
        self.entries.clear();
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let id = uuid::Uuid::new_v4().to_string();
            self.entries.insert(id.clone(), item);
            ids.push(id);
        }
        ids
    }

    /// `None` means "protocol misuse" (§7 item 1): the caller logs a
    /// warning and returns the request input unchanged.
    pub fn get(&self, id: &str) -> Option<&Completion> {
        self.entries.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jls_compiler::ElementKind;
    use jls_core::Ptr;
    use smol_str::SmolStr;

    #[test]
    fn resolve_round_trips_every_minted_id() {
        let mut cache = CompletionCache::new();
        let items = vec![
            Completion::Keyword {
                keyword: SmolStr::new("class"),
            },
            Completion::Element {
                element: jls_compiler::Element {
                    ptr: Ptr::for_class("", [] as [&str; 0], "Foo"),
                    kind: ElementKind::Class,
                    type_name: SmolStr::default(),
                    param_names: Vec::new(),
                    param_types: Vec::new(),
                    super_type: SmolStr::new("Object"),
                    already_overridden: false,
                },
                sort_rank: jls_compiler::SortRank::InScope,
            },
        ];
        let ids = cache.replace(items);
        assert_eq!(ids.len(), 2);
        for id in &ids {
            assert!(cache.get(id).is_some());
        }
    }

    #[test]
    fn replace_discards_the_previous_reply() {
        let mut cache = CompletionCache::new();
        let first_ids = cache.replace(vec![Completion::Keyword {
            keyword: SmolStr::new("class"),
        }]);
        cache.replace(vec![Completion::Keyword {
            keyword: SmolStr::new("void"),
        }]);
        assert!(cache.get(&first_ids[0]).is_none());
    }
}
