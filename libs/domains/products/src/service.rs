use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, Pagination, Product, ProductListItem, ProductSearchQuery, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product.
    ///
    /// The repository is not touched when validation fails; every violation
    /// is reported at once, in rule order.
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Uuid> {
        let product = Product::create(input);

        let notification = product.validate();
        if notification.has_errors() {
            return Err(ProductError::Validation(notification.into_messages()));
        }

        let created = self.repository.create(&product).await?;
        Ok(created.id)
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Update an existing product.
    ///
    /// Looks up the current state, applies the replacement as a pure value,
    /// and persists only when the result is valid.
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Uuid> {
        let current = self.get_product(id).await?;
        let updated = current.update(input);

        let notification = updated.validate();
        if notification.has_errors() {
            return Err(ProductError::Validation(notification.into_messages()));
        }

        let persisted = self.repository.update(&updated).await?;
        Ok(persisted.id)
    }

    /// Delete a product. Deleting an absent ID is a success.
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete_by_id(id).await
    }

    /// List products with search, sort, and pagination
    pub async fn list_products(
        &self,
        query: ProductSearchQuery,
    ) -> ProductResult<Pagination<ProductListItem>> {
        let page = self.repository.find_all(&query).await?;
        Ok(page.map(ProductListItem::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::{Duration, Utc};

    fn valid_input() -> CreateProduct {
        CreateProduct {
            description: Some("A cleaning detergent".to_string()),
            fabricated_at: Some(Utc::now()),
            expired_at: Some(Utc::now() + Duration::days(50)),
            supplier_code: "SUP-001".to_string(),
            supplier_description: "Acme Supplies".to_string(),
            supplier_cnpj: "59456277000176".to_string(),
            active: true,
        }
    }

    fn update_input(active: bool) -> UpdateProduct {
        let input = valid_input();
        UpdateProduct {
            description: input.description,
            fabricated_at: input.fabricated_at,
            expired_at: input.expired_at,
            supplier_code: input.supplier_code,
            supplier_description: input.supplier_description,
            supplier_cnpj: input.supplier_cnpj,
            active,
        }
    }

    #[tokio::test]
    async fn test_create_product_returns_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|p| Ok(p.clone()));

        let service = ProductService::new(mock_repo);
        let id = service.create_product(valid_input()).await.unwrap();
        assert!(!id.is_nil());
    }

    #[tokio::test]
    async fn test_create_invalid_product_never_touches_repository() {
        // No expectations: any repository call fails the test
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let mut input = valid_input();
        input.description = None;

        let err = service.create_product(input).await.unwrap_err();
        match err {
            ProductError::Validation(messages) => {
                assert_eq!(messages, vec!["'description' should not be null"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_accumulates_all_violations() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let now = Utc::now();
        let input = CreateProduct {
            description: None,
            fabricated_at: Some(now),
            expired_at: Some(now - Duration::days(1)),
            supplier_code: String::new(),
            supplier_description: String::new(),
            supplier_cnpj: "123".to_string(),
            active: true,
        };

        let err = service.create_product(input).await.unwrap_err();
        match err {
            ProductError::Validation(messages) => {
                assert_eq!(
                    messages,
                    vec![
                        "'description' should not be null",
                        "'expiredAt' should not be before the fabricatedAt",
                        "'CNPJ' should be 14 characters",
                    ]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_missing_product_reports_id() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_find_by_id()
            .with(mockall::predicate::eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product(id).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Product with ID {} was not found", id)
        );
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.update_product(id, update_input(true)).await.unwrap_err();

        assert!(matches!(err, ProductError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_update_with_inverted_dates_reports_exactly_one_error() {
        let existing = Product::create(valid_input());
        let id = existing.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        // update() must not be called for an invalid replacement

        let service = ProductService::new(mock_repo);

        let now = Utc::now();
        let mut input = update_input(true);
        input.fabricated_at = Some(now + Duration::days(50));
        input.expired_at = Some(now);

        let err = service.update_product(id, input).await.unwrap_err();
        match err {
            ProductError::Validation(messages) => {
                assert_eq!(
                    messages,
                    vec!["'expiredAt' should not be before the fabricatedAt"]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_persists_and_returns_id() {
        let existing = Product::create(valid_input());
        let id = existing.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_update()
            .times(1)
            .returning(|p| Ok(p.clone()));

        let service = ProductService::new(mock_repo);
        let returned = service.update_product(id, update_input(false)).await.unwrap();
        assert_eq!(returned, id);
    }

    #[tokio::test]
    async fn test_delete_absent_product_succeeds() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete_by_id().returning(|_| Ok(()));

        let service = ProductService::new(mock_repo);
        assert!(service.delete_product(Uuid::now_v7()).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_maps_to_summary_items() {
        let product = Product::create(valid_input());
        let expected_id = product.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(move |q| {
            Ok(Pagination {
                current_page: q.page,
                per_page: q.per_page,
                total: 1,
                items: vec![product.clone()],
            })
        });

        let service = ProductService::new(mock_repo);
        let page = service
            .list_products(ProductSearchQuery::default())
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, expected_id);
    }
}
