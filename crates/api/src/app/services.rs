//! Product backend wiring: one variant per place products can live.

use std::sync::Arc;

use prodgate_core::{Outcome, ProductId};
use prodgate_infra::{BackendError, HttpProductService, InMemoryProductStore};
use prodgate_products::{NewProduct, Product};

use crate::config::BackendConfig;

#[derive(Debug, Clone)]
pub enum AppServices {
    InMemory { store: Arc<InMemoryProductStore> },
    Downstream { client: HttpProductService },
}

impl AppServices {
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        Ok(match config {
            BackendConfig::InMemory => Self::in_memory(InMemoryProductStore::new()),
            BackendConfig::Downstream { base_url, timeout } => Self::Downstream {
                client: HttpProductService::new(base_url, *timeout)?,
            },
        })
    }

    pub fn in_memory(store: InMemoryProductStore) -> Self {
        Self::InMemory {
            store: Arc::new(store),
        }
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Outcome<Product>, BackendError> {
        match self {
            AppServices::InMemory { store } => store.get(id),
            AppServices::Downstream { client } => Ok(client.get_product(id).await),
        }
    }

    pub async fn list_products(&self) -> Result<Outcome<Vec<Product>>, BackendError> {
        match self {
            AppServices::InMemory { store } => store.list(),
            AppServices::Downstream { client } => Ok(client.list_products().await),
        }
    }

    pub async fn create_product(&self, new: NewProduct) -> Result<Outcome<Product>, BackendError> {
        match self {
            AppServices::InMemory { store } => store.create(new),
            AppServices::Downstream { client } => Ok(client.create_product(&new).await),
        }
    }
}
