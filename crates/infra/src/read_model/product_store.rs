use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use productd_core::ProductId;
use productd_products::ProductDetails;

/// Key/value store for product-details records.
///
/// Implementations must hand out copies: no caller ever holds a reference into
/// the underlying map.
pub trait ProductStore: Send + Sync {
    fn get(&self, id: ProductId) -> Option<ProductDetails>;
    /// Insert or wholly replace the record at `id`. The key is authoritative
    /// over whatever `product_id` the record carries.
    fn put(&self, id: ProductId, details: ProductDetails);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn get(&self, id: ProductId) -> Option<ProductDetails> {
        (**self).get(id)
    }

    fn put(&self, id: ProductId, details: ProductDetails) {
        (**self).put(id, details)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Volatile in-process store. Contents are lost when the process exits.
///
/// Readers share the lock; a writer holds it exclusively for a single map insert.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, ProductDetails>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

// Every critical section is one map call, so a panic elsewhere cannot leave the
// map half-updated; poisoned guards are taken over rather than dropping requests.
impl ProductStore for InMemoryProductStore {
    fn get(&self, id: ProductId) -> Option<ProductDetails> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&id).cloned()
    }

    fn put(&self, id: ProductId, details: ProductDetails) {
        let details = details.with_product_id(id);
        debug_assert_eq!(details.id(), Some(id));
        let replaced = {
            let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            map.insert(id, details).is_some()
        };
        tracing::trace!(product_id = %id, replaced, "product record stored");
    }

    fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
