use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Pagination, Product, ProductSearchQuery, ProductSortField, SortDirection};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn create(&self, product: &Product) -> ProductResult<Product>;

    /// Persist the new state of an existing product
    async fn update(&self, product: &Product) -> ProductResult<Product>;

    /// Fetch a product by ID
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Delete a product by ID. Deleting an absent ID is a success.
    async fn delete_by_id(&self, id: Uuid) -> ProductResult<()>;

    /// Search, sort, and paginate products
    async fn find_all(&self, query: &ProductSearchQuery) -> ProductResult<Pagination<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn matches_terms(product: &Product, terms: &str) -> bool {
    let needle = terms.to_lowercase();
    product
        .description
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .contains(&needle)
        || product.supplier_code.to_lowercase().contains(&needle)
        || product
            .supplier_description
            .to_lowercase()
            .contains(&needle)
        || product.supplier_cnpj.to_lowercase().contains(&needle)
}

fn compare(a: &Product, b: &Product, field: ProductSortField) -> std::cmp::Ordering {
    match field {
        ProductSortField::Description => a.description.cmp(&b.description),
        ProductSortField::SupplierCode => a.supplier_code.cmp(&b.supplier_code),
        ProductSortField::SupplierDescription => {
            a.supplier_description.cmp(&b.supplier_description)
        }
        ProductSortField::SupplierCnpj => a.supplier_cnpj.cmp(&b.supplier_cnpj),
        ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ProductSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> ProductResult<()> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(())
    }

    async fn find_all(&self, query: &ProductSearchQuery) -> ProductResult<Pagination<Product>> {
        let products = self.products.read().await;
        let terms = query.terms.trim();

        let mut matched: Vec<Product> = products
            .values()
            .filter(|p| terms.is_empty() || matches_terms(p, terms))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort);
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = matched.len() as u64;
        let items: Vec<Product> = matched
            .into_iter()
            .skip((query.page * query.per_page) as usize)
            .take(query.per_page as usize)
            .collect();

        Ok(Pagination {
            current_page: query.page,
            per_page: query.per_page,
            total,
            items,
        })
    }
}
