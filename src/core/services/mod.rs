pub mod category_catalog;
pub mod category_resolver;
pub mod transaction_form;
pub mod transaction_service;

pub use category_catalog::CategoryCatalog;
pub use category_resolver::{CategoryEvent, CategoryResolver, CommitOutcome};
pub use transaction_form::{FieldErrors, FormField, TransactionForm};
pub use transaction_service::{
    AttachmentEncoder, SubmitOutcome, TransactionEvent, TransactionNotifier, TransactionService,
};
