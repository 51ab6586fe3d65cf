use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::{Condition, Expr, extension::postgres::PgExpr};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Pagination, Product, ProductSearchQuery, ProductSortField, SortDirection},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn internal(e: impl std::fmt::Display) -> ProductError {
    ProductError::Internal(format!("Database error: {}", e))
}

fn sort_column(field: ProductSortField) -> entity::Column {
    match field {
        ProductSortField::Description => entity::Column::Description,
        ProductSortField::SupplierCode => entity::Column::SupplierCode,
        ProductSortField::SupplierDescription => entity::Column::SupplierDescription,
        ProductSortField::SupplierCnpj => entity::Column::SupplierCnpj,
        ProductSortField::CreatedAt => entity::Column::CreatedAt,
        ProductSortField::UpdatedAt => entity::Column::UpdatedAt,
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &Product) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = product.into();

        let model = self.base.insert(active_model).await.map_err(internal)?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: &Product) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = product.into();

        let model = self.base.update(active_model).await.map_err(internal)?;

        tracing::info!(product_id = %model.id, "Updated product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await.map_err(internal)?;
        Ok(model.map(|m| m.into()))
    }

    async fn delete_by_id(&self, id: Uuid) -> ProductResult<()> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(internal)?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(())
    }

    async fn find_all(&self, query: &ProductSearchQuery) -> ProductResult<Pagination<Product>> {
        let mut select = entity::Entity::find();

        let terms = query.terms.trim();
        if !terms.is_empty() {
            let pattern = format!("%{}%", terms);
            select = select.filter(
                Condition::any()
                    .add(Expr::col(entity::Column::Description).ilike(&pattern))
                    .add(Expr::col(entity::Column::SupplierCode).ilike(&pattern))
                    .add(Expr::col(entity::Column::SupplierDescription).ilike(&pattern))
                    .add(Expr::col(entity::Column::SupplierCnpj).ilike(&pattern)),
            );
        }

        let column = sort_column(query.sort);
        select = match query.direction {
            SortDirection::Asc => select.order_by_asc(column),
            SortDirection::Desc => select.order_by_desc(column),
        };

        let paginator = select.paginate(self.base.db(), query.per_page);
        let total = paginator.num_items().await.map_err(internal)?;
        let models = paginator.fetch_page(query.page).await.map_err(internal)?;

        Ok(Pagination {
            current_page: query.page,
            per_page: query.per_page,
            total,
            items: models.into_iter().map(|m| m.into()).collect(),
        })
    }
}
