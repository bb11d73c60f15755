use ahash::AHashMap;
use parking_lot::RwLock;

use crate::term::NodeId;

/// Maps term ids to store document ids for the duration of one sync call.
#[derive(Default)]
pub struct DocRefCache {
    inner: RwLock<AHashMap<NodeId, String>>,
}

impl DocRefCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AHashMap::new()),
        }
    }

    pub fn get(&self, id: &str) -> Option<String> {
        self.inner.read().get(id).cloned()
    }

    pub fn insert(&self, id: NodeId, doc_id: String) {
        self.inner.write().insert(id, doc_id);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the cached document id or resolves and remembers it.
    pub fn get_or_resolve<E, F>(&self, id: &NodeId, resolve: F) -> Result<String, E>
    where
        F: FnOnce() -> Result<String, E>,
    {
        if let Some(found) = self.get(id.as_str()) {
            return Ok(found);
        }
        let doc_id = resolve()?;
        self.insert(id.clone(), doc_id.clone());
        Ok(doc_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_once_per_id() {
        let cache = DocRefCache::new();
        let mut lookups = 0;
        for _ in 0..3 {
            let doc = cache
                .get_or_resolve::<(), _>(&NodeId::from("A"), || {
                    lookups += 1;
                    Ok("cvterm/1".to_string())
                })
                .unwrap();
            assert_eq!(doc, "cvterm/1");
        }
        assert_eq!(lookups, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_resolution_is_not_cached() {
        let cache = DocRefCache::new();
        let err = cache.get_or_resolve(&NodeId::from("B"), || Err("missing"));
        assert_eq!(err, Err("missing"));
        assert!(cache.is_empty());
    }
}
