//! Payload contract for the product edit page.
//!
//! Wire keys mirror the presenter's edit props. Renaming a key on the
//! presenter side is a breaking change and must be mirrored here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{FieldType, PayloadSchema};

/// Page identifier of the product edit page.
pub const PRODUCTS_EDIT: &str = "Products/Edit";

/// Schema unit for the custom domain verification status.
pub fn custom_domain_verification_status_schema() -> PayloadSchema {
    PayloadSchema::new("CustomDomainVerificationStatus")
        .field("success", FieldType::Bool)
        .field("message", FieldType::String)
}

/// Schema for the `Products/Edit` page payload.
pub fn product_edit_schema() -> PayloadSchema {
    let objects = || FieldType::sequence_of(FieldType::Object);

    PayloadSchema::new(PRODUCTS_EDIT)
        .field("product", FieldType::Object)
        .field("id", FieldType::String)
        .field("unique_permalink", FieldType::String)
        .field("thumbnail", FieldType::Object.nullable())
        .field("refund_policies", objects())
        .field("currency_type", FieldType::String)
        .field("is_tiered_membership", FieldType::Bool)
        .field("is_listed_on_discover", FieldType::Bool)
        .field("is_physical", FieldType::Bool)
        .field("profile_sections", objects())
        .field("taxonomies", objects())
        .field("earliest_membership_price_change_date", FieldType::IsoDate)
        .field(
            "custom_domain_verification_status",
            FieldType::nested(custom_domain_verification_status_schema()).nullable(),
        )
        .field("sales_count_for_inventory", FieldType::Count)
        .field("successful_sales_count", FieldType::Count)
        .field("ratings", FieldType::Object)
        .field("seller", FieldType::Object)
        .field("existing_files", objects())
        .field("aws_key", FieldType::String)
        .field("s3_url", FieldType::String)
        .field("available_countries", objects())
        .field("google_client_id", FieldType::String)
        .field("google_calendar_enabled", FieldType::Bool)
        .field("seller_refund_policy_enabled", FieldType::Bool)
        .field("seller_refund_policy", FieldType::Object)
        .field("cancellation_discounts_enabled", FieldType::Bool)
}

/// Result of verifying a seller's custom domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDomainVerificationStatus {
    pub success: bool,
    pub message: String,
}

/// Typed view of a validated `Products/Edit` payload.
///
/// Opaque presenter objects stay as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEditProps {
    pub product: Map<String, Value>,
    #[serde(rename = "id")]
    pub identifier: String,
    #[serde(rename = "unique_permalink")]
    pub permalink: String,
    pub thumbnail: Option<Map<String, Value>>,
    pub refund_policies: Vec<Map<String, Value>>,
    pub currency_type: String,
    pub is_tiered_membership: bool,
    pub is_listed_on_discover: bool,
    pub is_physical: bool,
    pub profile_sections: Vec<Map<String, Value>>,
    pub taxonomies: Vec<Map<String, Value>>,
    pub earliest_membership_price_change_date: String,
    pub custom_domain_verification_status: Option<CustomDomainVerificationStatus>,
    pub sales_count_for_inventory: u64,
    pub successful_sales_count: u64,
    pub ratings: Map<String, Value>,
    pub seller: Map<String, Value>,
    pub existing_files: Vec<Map<String, Value>>,
    pub aws_key: String,
    pub s3_url: String,
    pub available_countries: Vec<Map<String, Value>>,
    pub google_client_id: String,
    pub google_calendar_enabled: bool,
    pub seller_refund_policy_enabled: bool,
    pub seller_refund_policy: Map<String, Value>,
    pub cancellation_discounts_enabled: bool,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::error::SchemaError;
    use serde_json::json;

    #[test]
    fn test_valid_payload_accepted() {
        let payload = product_edit_schema()
            .validate_value(product_edit_payload())
            .unwrap();

        assert_eq!(payload.schema(), PRODUCTS_EDIT);
        assert_eq!(payload.to_value(), product_edit_payload());
    }

    #[test]
    fn test_every_declared_field_is_required() {
        let schema = product_edit_schema();
        for spec in schema.fields() {
            let err = schema.validate_value(without(&spec.name)).unwrap_err();
            assert_eq!(
                err,
                SchemaError::MissingField {
                    field: spec.name.clone()
                }
            );
        }
    }

    #[test]
    fn test_missing_permalink_rejected() {
        let err = product_edit_schema()
            .validate_value(without("unique_permalink"))
            .unwrap_err();
        assert_eq!(err.field(), Some("unique_permalink"));
    }

    #[test]
    fn test_negative_sales_count_rejected() {
        let err = product_edit_schema()
            .validate_value(with("sales_count_for_inventory", json!(-1)))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::NegativeCount {
                field: "sales_count_for_inventory".to_string(),
                value: -1,
            }
        );
    }

    #[test]
    fn test_custom_domain_status_variants() {
        let schema = product_edit_schema();
        let field = "custom_domain_verification_status";

        assert!(schema.validate_value(with(field, json!(null))).is_ok());
        assert!(schema
            .validate_value(with(field, json!({ "success": true, "message": "ok" })))
            .is_ok());

        let err = schema
            .validate_value(with(field, json!({ "success": "yes" })))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::WrongType {
                field: "custom_domain_verification_status.success".to_string(),
                expected: "boolean",
                found: "string",
            }
        );
    }

    #[test]
    fn test_status_unit_standalone() {
        let schema = custom_domain_verification_status_schema();
        assert!(schema
            .validate_value(json!({ "success": false, "message": "DNS not found" }))
            .is_ok());
        assert!(schema.validate_value(json!({ "success": false })).is_err());
    }

    #[test]
    fn test_thumbnail_object_or_null() {
        let schema = product_edit_schema();
        assert!(schema
            .validate_value(with("thumbnail", json!({ "url": "https://cdn/x.png" })))
            .is_ok());
        assert!(schema.validate_value(with("thumbnail", json!("x.png"))).is_err());
    }

    #[test]
    fn test_non_nullable_field_rejects_null() {
        let err = product_edit_schema()
            .validate_value(with("seller", json!(null)))
            .unwrap_err();
        assert!(matches!(err, SchemaError::WrongType { found: "null", .. }));
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = product_edit_schema()
            .validate_value(with("earliest_membership_price_change_date", json!("soon")))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDate { .. }));
    }

    #[test]
    fn test_sequence_item_must_be_object() {
        let err = product_edit_schema()
            .validate_value(with("existing_files", json!([{ "id": "f" }, "g"])))
            .unwrap_err();
        assert_eq!(err.field(), Some("existing_files[1]"));
    }

    #[test]
    fn test_decode_typed_props() {
        let payload = product_edit_schema()
            .validate_value(with(
                "custom_domain_verification_status",
                json!({ "success": true, "message": "ok" }),
            ))
            .unwrap();

        let props: ProductEditProps = payload.decode().unwrap();
        assert_eq!(props.identifier, "prod_8f3a");
        assert_eq!(props.permalink, "field-notes");
        assert_eq!(props.successful_sales_count, 14);
        assert!(props.thumbnail.is_none());
        assert_eq!(
            props.custom_domain_verification_status,
            Some(CustomDomainVerificationStatus {
                success: true,
                message: "ok".to_string(),
            })
        );
    }
}
