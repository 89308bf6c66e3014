//! recipe-storage
//!
//! Persistence for recipes. A [`store::RecipeStore`] is the document-level
//! seam (one record per id, atomic per-id writes); the
//! [`repository::RecipeRepository`] layers id checks and entity validation
//! on top of whichever store the process was started with.

pub mod client;
pub mod error;
pub mod json;
pub mod memory;
pub mod objects;
pub mod repository;
pub mod s3;
pub mod store;

pub use error::{RepoError, StorageError};
pub use memory::MemoryRecipeStore;
pub use repository::RecipeRepository;
pub use s3::S3RecipeStore;
pub use store::RecipeStore;
