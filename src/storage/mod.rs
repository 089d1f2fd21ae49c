pub mod json_backend;
pub mod memory;

use crate::{
    domain::{Category, CategoryColorMap},
    errors::Result,
};

/// Persistence port for user-defined categories and their colors.
///
/// Implementations are plain read-modify-write stores; callers own any
/// ordering guarantees.
pub trait CategoryStore: Send + Sync {
    fn load_custom_categories(&self) -> Result<Vec<Category>>;
    /// Replaces the whole custom category list.
    fn save_custom_categories(&self, categories: &[Category]) -> Result<()>;
    /// Appends one category to the persisted list.
    fn add_custom_category(&self, category: &Category) -> Result<()>;
    fn load_custom_category_colors(&self) -> Result<CategoryColorMap>;
    fn save_custom_category_color(&self, label: &str, color: &str) -> Result<()>;
}

pub use json_backend::JsonCategoryStore;
pub use memory::{InMemoryCategoryStore, StoreWrite};
