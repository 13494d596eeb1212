use jls_core::Uri;

/// Monotonic facility generation (§4.I, §9): bumped by the dispatcher every
/// time the compiler facility is rebuilt (e.g. a classpath toggle). Cache
/// entries are tagged with the epoch active when they were created; a
/// lookup under a newer epoch is always a miss.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Epoch(pub u64);

struct Key {
    uri: Uri,
    version: i32,
    epoch: Epoch,
}

/// The single-entry discipline shared by the Parse Cache and the
/// Active-File Cache: one `(uri, version, epoch) -> value` pair, replaced
/// wholesale on any mismatch.
pub struct SingleEntry<T> {
    slot: Option<(Key, T)>,
}

impl<T> Default for SingleEntry<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T: Clone> SingleEntry<T> {
    pub fn hit(&self, uri: &Uri, version: i32, epoch: Epoch) -> Option<&T> {
        self.slot.as_ref().and_then(|(key, value)| {
            if &key.uri == uri && key.version == version && key.epoch == epoch {
                Some(value)
            } else {
                None
            }
        })
    }

    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref().map(|(_, value)| value)
    }

    pub fn replace(&mut self, uri: Uri, version: i32, epoch: Epoch, value: T) {
        let old = self.slot.as_ref().map(|(key, _)| (key.uri.clone(), key.version));
        tracing::debug!(
            old = ?old,
            new_uri = %uri,
            new_version = version,
            epoch = epoch.0,
            "single-entry cache replace"
        );
        self.slot = Some((Key { uri, version, epoch }, value));
    }
}
