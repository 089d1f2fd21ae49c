pub mod services;
pub mod utils;

pub use utils::normalize_category_value;
