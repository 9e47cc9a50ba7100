//! Data models for catalog records.

/// Denormalized category snapshot.
pub mod category;
/// Product record model.
pub mod product;


pub use category::Category;
pub use product::{ProductId, ProductRecord};
