//! Typed page-payload schemas for TurboCommerce pages.
//!
//! A presenter on the server computes a bag of props for a page and the
//! transport delivers it to the client runtime. This crate declares what
//! that bag must look like for each page and checks it before anything is
//! rendered:
//!
//! - `PayloadSchema` - Declared fields, nullability and shapes
//! - `FieldType` - Per-field predicates, including nested schema units
//! - `PagePayload` - An immutable payload that passed its schema
//! - `product_edit` - The `Products/Edit` contract
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_props::prelude::*;
//!
//! let payload = product_edit_schema().validate_value(props_json)?;
//! let props: ProductEditProps = payload.decode()?;
//! println!("Editing {}", props.permalink);
//! ```

mod error;
mod payload;
mod schema;

pub mod product_edit;

pub use error::SchemaError;
pub use payload::PagePayload;
pub use schema::{json_kind, FieldSpec, FieldType, PayloadSchema};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::product_edit::{
        custom_domain_verification_status_schema, product_edit_schema,
        CustomDomainVerificationStatus, ProductEditProps, PRODUCTS_EDIT,
    };
    pub use crate::{FieldSpec, FieldType, PagePayload, PayloadSchema, SchemaError};
}
