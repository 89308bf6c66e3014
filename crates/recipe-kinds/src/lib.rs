//! recipe-kinds
//!
//! Recipe kind definitions. Pure data, no storage dependency.
//! Each kind declares the exact shape of its `content` payload; the
//! validator checks any JSON value against those declarations without
//! knowing which kind it is looking at.

pub mod error;
pub mod kinds;
pub mod registry;
pub mod schema;
pub mod validate;

pub use error::ContentError;
pub use registry::{all_kinds, get_kind, is_known_kind, schema_for, RecipeKind};
pub use schema::{ContentSchema, FieldSpec, FieldType};
pub use validate::{validate, validate_against, validate_fields};

/// Trait implemented by each recipe kind.
pub trait Kind: Send + Sync {
    /// Wire identifier for this kind (e.g., "memo", "web_link").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Memo", "Web Link").
    fn name(&self) -> &str;

    /// The content shape every recipe of this kind must have.
    fn schema(&self) -> &ContentSchema;
}
