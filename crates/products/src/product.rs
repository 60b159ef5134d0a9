use serde::{Deserialize, Serialize};

use prodgate_core::{DomainResult, FieldErrors, ProductId, Resource};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A product as owned by the downstream store.
///
/// The gateway never mutates a product; it only relays what the store returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

impl Resource for Product {
    const NAME: &'static str = "Product";
}

impl Product {
    /// Materialize a validated create request under a freshly generated id.
    pub fn create(new: NewProduct) -> Self {
        Self::with_id(ProductId::new(), new)
    }

    pub fn with_id(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            stock: new.stock,
        }
    }
}

/// Create payload: `{name, description?, price, stock}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

impl NewProduct {
    /// Check every field and report all violations together.
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.add("name", "must not be empty");
        } else if self.name.chars().count() > MAX_NAME_LEN {
            errors.add("name", format!("must be at most {MAX_NAME_LEN} characters"));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                errors.add(
                    "description",
                    format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
                );
            }
        }

        if !(self.price.is_finite() && self.price > 0.0) {
            errors.add("price", "must be greater than 0");
        }

        if self.stock < 0 {
            errors.add("stock", "must not be negative");
        }

        errors.into_result()
    }
}
