pub mod category;
pub mod common;
pub mod transaction;

pub use category::{
    default_categories, is_default_key, merged_color_map, Category, CategoryColorMap,
    CATEGORY_COLORS, DEFAULT_CATEGORIES, PALETTE,
};
pub use common::labels_match;
pub use transaction::{Attachment, PendingAttachment, TransactionKind, TransactionPayload};
