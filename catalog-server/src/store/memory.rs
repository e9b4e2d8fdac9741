//! In-memory collection engine
//!
//! Documents live in insertion order behind a `parking_lot::RwLock`. Every
//! write that touches a unique key re-checks the index under the write lock,
//! so the index stays the final arbiter even when two requests race past the
//! service-level pre-check.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{
    Collection, Document, FindOptions, Mutation, Predicate, StoreError, StoreResult, UniqueKey,
};

/// In-memory implementation of [`Collection`]
pub struct MemoryCollection<D: Document> {
    docs: RwLock<Vec<D>>,
}

impl<D: Document> MemoryCollection<D> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    fn duplicate(key: &UniqueKey) -> StoreError {
        StoreError::Duplicate {
            collection: D::COLLECTION,
            key: match &key.scope {
                Some(scope) => format!("{}/{}", scope, key.name),
                None => key.name.clone(),
            },
        }
    }

    /// Fails if any document other than `except_id` holds `key`
    fn check_unique(docs: &[D], key: &UniqueKey, except_id: Option<&str>) -> StoreResult<()> {
        let clash = docs.iter().any(|doc| {
            Some(doc.id()) != except_id && doc.unique_key().as_ref() == Some(key)
        });
        if clash {
            return Err(Self::duplicate(key));
        }
        Ok(())
    }
}

impl<D: Document> Default for MemoryCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<D: Document> Collection<D> for MemoryCollection<D> {
    async fn find(&self, filter: &D::Filter, options: FindOptions) -> StoreResult<Vec<D>> {
        let mut matched: Vec<D> = self
            .docs
            .read()
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect();

        let sort = options.sort;
        matched.sort_by(|a, b| {
            let ord = a.compare_by(b, sort.field);
            if sort.descending { ord.reverse() } else { ord }
        });

        let page = matched.into_iter().skip(options.skip);
        Ok(match options.limit {
            Some(limit) => page.take(limit).collect(),
            None => page.collect(),
        })
    }

    async fn find_one(&self, filter: &D::Filter) -> StoreResult<Option<D>> {
        Ok(self
            .docs
            .read()
            .iter()
            .find(|doc| filter.matches(doc))
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<D>> {
        Ok(self.docs.read().iter().find(|doc| doc.id() == id).cloned())
    }

    async fn count(&self, filter: &D::Filter) -> StoreResult<u64> {
        Ok(self
            .docs
            .read()
            .iter()
            .filter(|doc| filter.matches(doc))
            .count() as u64)
    }

    async fn create(&self, doc: D) -> StoreResult<D> {
        let mut docs = self.docs.write();
        if docs.iter().any(|d| d.id() == doc.id()) {
            return Err(StoreError::Duplicate {
                collection: D::COLLECTION,
                key: doc.id().to_string(),
            });
        }
        if let Some(key) = doc.unique_key() {
            Self::check_unique(&docs, &key, None)?;
        }
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn update(&self, doc: D) -> StoreResult<D> {
        let mut docs = self.docs.write();
        let Some(pos) = docs.iter().position(|d| d.id() == doc.id()) else {
            return Err(StoreError::NotFound {
                collection: D::COLLECTION,
                id: doc.id().to_string(),
            });
        };
        if let Some(key) = doc.unique_key() {
            Self::check_unique(&docs, &key, Some(doc.id()))?;
        }
        docs[pos] = doc.clone();
        Ok(doc)
    }

    async fn update_many(&self, filter: &D::Filter, mutation: &Mutation<D>) -> StoreResult<u64> {
        let mut docs = self.docs.write();
        let mut touched = 0u64;
        for doc in docs.iter_mut().filter(|doc| filter.matches(doc)) {
            mutation(doc);
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<D>> {
        let mut docs = self.docs.write();
        Ok(docs
            .iter()
            .position(|d| d.id() == id)
            .map(|pos| docs.remove(pos)))
    }
}
