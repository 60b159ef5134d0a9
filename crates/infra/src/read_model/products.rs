use std::sync::RwLock;

use prodgate_core::{Outcome, ProductId, Resource};
use prodgate_products::{NewProduct, Product};

use crate::BackendError;

/// In-memory product store for tests/dev.
///
/// Owned by whoever builds it (the API wraps it in an `Arc`); all access goes
/// through the lock.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given products already stored.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            inner: RwLock::new(products),
        }
    }

    pub fn get(&self, id: &ProductId) -> Result<Outcome<Product>, BackendError> {
        let products = self.inner.read().map_err(|_| BackendError::StorePoisoned)?;
        Ok(match products.iter().find(|p| p.id == *id) {
            Some(p) => Outcome::success(p.clone()),
            None => Outcome::not_found(Product::NAME),
        })
    }

    pub fn list(&self) -> Result<Outcome<Vec<Product>>, BackendError> {
        let products = self.inner.read().map_err(|_| BackendError::StorePoisoned)?;
        Ok(Outcome::success(products.clone()))
    }

    /// Store a new product under a freshly generated id.
    pub fn create(&self, new: NewProduct) -> Result<Outcome<Product>, BackendError> {
        let mut products = self.inner.write().map_err(|_| BackendError::StorePoisoned)?;

        let mut product = Product::create(new);
        while products.iter().any(|p| p.id == product.id) {
            product.id = ProductId::new();
        }

        products.push(product.clone());
        tracing::info!(product_id = %product.id, "product created in memory store");
        Ok(Outcome::success(product))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            price: 29.99,
            stock: 100,
        }
    }

    #[test]
    fn create_then_get() {
        let store = InMemoryProductStore::new();
        let created = store.create(widget()).unwrap().into_value().unwrap();

        let fetched = store.get(&created.id).unwrap();
        assert!(fetched.is_success());
        assert_eq!(fetched.value(), Some(&created));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = InMemoryProductStore::new();
        let outcome = store.get(&ProductId::new()).unwrap();
        assert_eq!(outcome.status_code(), 404);
        assert_eq!(outcome.error_message(), "Product not found");
    }

    #[test]
    fn creates_get_unseen_ids() {
        let store = InMemoryProductStore::new();
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let p = store.create(widget()).unwrap().into_value().unwrap();
            assert!(seen.insert(p.id));
        }
        assert_eq!(store.list().unwrap().value().unwrap().len(), 50);
    }

    #[test]
    fn seeded_products_are_listed() {
        let seed = Product::create(widget());
        let store = InMemoryProductStore::with_products(vec![seed.clone()]);
        assert_eq!(store.list().unwrap().into_value(), Some(vec![seed]));
    }

    #[test]
    fn poisoned_lock_is_a_backend_error() {
        let store = Arc::new(InMemoryProductStore::new());
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(store.list(), Err(BackendError::StorePoisoned)));
        assert!(matches!(store.create(widget()), Err(BackendError::StorePoisoned)));
    }
}
