use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub fabricated_at: Option<DateTimeWithTimeZone>,
    pub expired_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "Text")]
    pub supplier_code: String,
    #[sea_orm(column_type = "Text")]
    pub supplier_description: String,
    #[sea_orm(column_type = "Text")]
    pub supplier_cnpj: String,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Product
impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            fabricated_at: model.fabricated_at.map(Into::into),
            expired_at: model.expired_at.map(Into::into),
            supplier_code: model.supplier_code,
            supplier_description: model.supplier_description,
            supplier_cnpj: model.supplier_cnpj,
            active: model.active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

// Conversion from domain Product to Sea-ORM ActiveModel, all fields set
impl From<&crate::models::Product> for ActiveModel {
    fn from(product: &crate::models::Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            description: Set(product.description.clone()),
            fabricated_at: Set(product.fabricated_at.map(Into::into)),
            expired_at: Set(product.expired_at.map(Into::into)),
            supplier_code: Set(product.supplier_code.clone()),
            supplier_description: Set(product.supplier_description.clone()),
            supplier_cnpj: Set(product.supplier_cnpj.clone()),
            active: Set(product.active),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
            deleted_at: Set(product.deleted_at.map(Into::into)),
        }
    }
}
