use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Product aggregate - a catalog entry sourced from a supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Product description (required by validation, representable as absent)
    pub description: Option<String>,
    /// Fabrication date, if known
    pub fabricated_at: Option<DateTime<Utc>>,
    /// Expiry date, if known
    pub expired_at: Option<DateTime<Utc>>,
    /// Supplier's internal product code
    pub supplier_code: String,
    /// Supplier name
    pub supplier_description: String,
    /// Supplier CNPJ (Brazilian company registration, 14 digits)
    pub supplier_cnpj: String,
    /// Whether the product is active in the catalog
    pub active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, strictly increasing across updates
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp, set while the product is inactive
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub description: Option<String>,
    pub fabricated_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub supplier_code: String,
    #[serde(default)]
    pub supplier_description: String,
    #[serde(default)]
    pub supplier_cnpj: String,
    /// Defaults to true when absent from the request
    #[serde(default = "default_active")]
    pub active: bool,
}

/// DTO for updating an existing product (full replacement of mutable fields)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub description: Option<String>,
    pub fabricated_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub supplier_code: String,
    #[serde(default)]
    pub supplier_description: String,
    #[serde(default)]
    pub supplier_cnpj: String,
    /// Defaults to true when absent from the request
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Sortable product fields
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductSortField {
    #[default]
    Description,
    SupplierCode,
    SupplierDescription,
    SupplierCnpj,
    CreatedAt,
    UpdatedAt,
}

/// Sort direction for listings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductSearchQuery {
    /// Zero-indexed page number
    #[serde(default)]
    pub page: u64,
    /// Page size
    #[serde(default = "default_per_page", alias = "perPage")]
    pub per_page: u64,
    /// Case-insensitive terms matched against description and supplier fields
    #[serde(default, alias = "search")]
    pub terms: String,
    /// Field to sort by
    #[serde(default)]
    pub sort: ProductSortField,
    /// Sort direction
    #[serde(default, alias = "dir")]
    pub direction: SortDirection,
}

fn default_per_page() -> u64 {
    10
}

impl Default for ProductSearchQuery {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: default_per_page(),
            terms: String::new(),
            sort: ProductSortField::default(),
            direction: SortDirection::default(),
        }
    }
}

/// A page of results with its position in the full result set
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Pagination<T> {
    /// Zero-indexed page number
    pub current_page: u64,
    /// Requested page size
    pub per_page: u64,
    /// Total number of matching items across all pages
    pub total: u64,
    /// Items on this page
    pub items: Vec<T>,
}

impl<T> Pagination<T> {
    /// Map the items to another type, preserving page metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Pagination<U> {
        Pagination {
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Summary projection used in listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub supplier_code: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Product> for ProductListItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            description: product.description,
            supplier_code: product.supplier_code,
            active: product.active,
            created_at: product.created_at,
            deleted_at: product.deleted_at,
        }
    }
}

/// Response payload carrying a product identifier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductIdResponse {
    pub id: Uuid,
}

impl Product {
    /// Create a new product from the CreateProduct DTO.
    ///
    /// An inactive product is born soft-deleted: `deleted_at` is stamped
    /// alongside `created_at`.
    pub fn create(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            description: input.description,
            fabricated_at: input.fabricated_at,
            expired_at: input.expired_at,
            supplier_code: input.supplier_code,
            supplier_description: input.supplier_description,
            supplier_cnpj: input.supplier_cnpj,
            active: input.active,
            created_at: now,
            updated_at: now,
            deleted_at: if input.active { None } else { Some(now) },
        }
    }

    /// Produce an updated copy with all mutable fields replaced.
    ///
    /// The `active` flag drives the soft-delete state: activating clears
    /// `deleted_at`, deactivating an already-inactive product preserves its
    /// original `deleted_at`.
    pub fn update(&self, input: UpdateProduct) -> Self {
        let updated_at = self.next_updated_at();
        let deleted_at = if input.active {
            None
        } else {
            self.deleted_at.or(Some(updated_at))
        };

        Self {
            id: self.id,
            description: input.description,
            fabricated_at: input.fabricated_at,
            expired_at: input.expired_at,
            supplier_code: input.supplier_code,
            supplier_description: input.supplier_description,
            supplier_cnpj: input.supplier_cnpj,
            active: input.active,
            created_at: self.created_at,
            updated_at,
            deleted_at,
        }
    }

    /// Reactivate the product, clearing the soft-delete marker.
    pub fn activate(&self) -> Self {
        Self {
            active: true,
            deleted_at: None,
            updated_at: self.next_updated_at(),
            ..self.clone()
        }
    }

    /// Deactivate the product. The original `deleted_at` is kept when the
    /// product is already inactive.
    pub fn deactivate(&self) -> Self {
        let updated_at = self.next_updated_at();
        Self {
            active: false,
            deleted_at: self.deleted_at.or(Some(updated_at)),
            updated_at,
            ..self.clone()
        }
    }

    /// Next `updated_at` stamp, strictly greater than the current one even
    /// when the wall clock has not advanced.
    fn next_updated_at(&self) -> DateTime<Utc> {
        let now = Utc::now();
        if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        }
    }
}
