//! Domain validation for the Product aggregate.
//!
//! Rules run in a fixed order and report exact, client-facing messages.
//! Two handler strategies exist behind one trait: `Notification` accumulates
//! every error, `FailFast` aborts the pass at the first one.

use crate::models::Product;

/// Expected length of a CNPJ (digits only)
const CNPJ_LENGTH: usize = 14;

/// A single validation error with its client-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Strategy for collecting validation errors.
///
/// `append` decides whether the validation pass continues: returning `Err`
/// aborts it, returning `Ok` lets the next rule run.
pub trait ValidationHandler {
    fn append(&mut self, error: ValidationError) -> Result<(), ValidationError>;
}

/// Accumulates every validation error without aborting the pass
#[derive(Debug, Default, Clone)]
pub struct Notification {
    errors: Vec<ValidationError>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// The accumulated messages, in rule order
    pub fn into_messages(self) -> Vec<String> {
        self.errors.into_iter().map(|e| e.message).collect()
    }
}

impl ValidationHandler for Notification {
    fn append(&mut self, error: ValidationError) -> Result<(), ValidationError> {
        self.errors.push(error);
        Ok(())
    }
}

/// Aborts the validation pass at the first error
#[derive(Debug, Default)]
pub struct FailFast;

impl ValidationHandler for FailFast {
    fn append(&mut self, error: ValidationError) -> Result<(), ValidationError> {
        Err(error)
    }
}

/// Run every validation rule against the product, in order.
///
/// The expiry rule only fires when both timestamps are present: a product may
/// legitimately lack fabrication or expiry dates.
pub fn run(product: &Product, handler: &mut impl ValidationHandler) -> Result<(), ValidationError> {
    if product.description.is_none() {
        handler.append(ValidationError::new("'description' should not be null"))?;
    }

    if let (Some(fabricated_at), Some(expired_at)) = (product.fabricated_at, product.expired_at)
        && expired_at < fabricated_at
    {
        handler.append(ValidationError::new(
            "'expiredAt' should not be before the fabricatedAt",
        ))?;
    }

    if !product.supplier_cnpj.is_empty() && product.supplier_cnpj.len() != CNPJ_LENGTH {
        handler.append(ValidationError::new("'CNPJ' should be 14 characters"))?;
    }

    Ok(())
}

impl Product {
    /// Validate with the accumulating handler, returning every violation.
    pub fn validate(&self) -> Notification {
        let mut notification = Notification::new();
        // Notification never aborts the pass
        let _ = run(self, &mut notification);
        notification
    }

    /// Validate with the fail-fast handler, returning the first violation.
    pub fn validate_fail_fast(&self) -> Result<(), ValidationError> {
        run(self, &mut FailFast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use chrono::{Duration, Utc};

    fn valid_product() -> Product {
        Product::create(CreateProduct {
            description: Some("A cleaning detergent".to_string()),
            fabricated_at: Some(Utc::now()),
            expired_at: Some(Utc::now() + Duration::days(365)),
            supplier_code: "SUP-001".to_string(),
            supplier_description: "Acme Supplies".to_string(),
            supplier_cnpj: "59456277000176".to_string(),
            active: true,
        })
    }

    #[test]
    fn test_valid_product_passes() {
        let notification = valid_product().validate();
        assert!(!notification.has_errors());
    }

    #[test]
    fn test_missing_description_message() {
        let mut product = valid_product();
        product.description = None;

        let notification = product.validate();
        assert_eq!(
            notification.into_messages(),
            vec!["'description' should not be null"]
        );
    }

    #[test]
    fn test_expiry_before_fabrication_message() {
        let mut product = valid_product();
        let now = Utc::now();
        product.fabricated_at = Some(now);
        product.expired_at = Some(now - Duration::days(1));

        let notification = product.validate();
        assert_eq!(
            notification.into_messages(),
            vec!["'expiredAt' should not be before the fabricatedAt"]
        );
    }

    #[test]
    fn test_missing_timestamps_skip_expiry_rule() {
        let mut product = valid_product();
        product.fabricated_at = None;
        product.expired_at = None;

        assert!(!product.validate().has_errors());

        product.fabricated_at = Some(Utc::now());
        assert!(!product.validate().has_errors());
    }

    #[test]
    fn test_cnpj_length_message() {
        let mut product = valid_product();
        product.supplier_cnpj = "12345".to_string();

        let notification = product.validate();
        assert_eq!(
            notification.into_messages(),
            vec!["'CNPJ' should be 14 characters"]
        );
    }

    #[test]
    fn test_empty_cnpj_is_not_an_error() {
        let mut product = valid_product();
        product.supplier_cnpj = String::new();

        assert!(!product.validate().has_errors());
    }

    #[test]
    fn test_notification_accumulates_in_rule_order() {
        let mut product = valid_product();
        product.description = None;
        let now = Utc::now();
        product.fabricated_at = Some(now);
        product.expired_at = Some(now - Duration::days(1));
        product.supplier_cnpj = "123".to_string();

        let notification = product.validate();
        assert_eq!(
            notification.into_messages(),
            vec![
                "'description' should not be null",
                "'expiredAt' should not be before the fabricatedAt",
                "'CNPJ' should be 14 characters",
            ]
        );
    }

    #[test]
    fn test_fail_fast_returns_first_error() {
        let mut product = valid_product();
        product.description = None;
        product.supplier_cnpj = "123".to_string();

        let err = product.validate_fail_fast().unwrap_err();
        assert_eq!(err.message, "'description' should not be null");
    }
}
