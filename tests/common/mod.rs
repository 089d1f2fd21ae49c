#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::mpsc;
use transaction_entry::{
    core::services::{AttachmentEncoder, CategoryResolver, TransactionEvent, TransactionService},
    domain::{Category, PendingAttachment},
    errors::{EntryError, Result},
    storage::InMemoryCategoryStore,
};

/// Resolver over a fresh in-memory store; the store handle is kept for inspection.
pub fn resolver_with(categories: Vec<Category>) -> (CategoryResolver, Arc<InMemoryCategoryStore>) {
    let store = Arc::new(InMemoryCategoryStore::with_categories(categories));
    (CategoryResolver::new(store.clone()), store)
}

/// Encoder producing `data:<mime>;name=<file>` without touching the bytes.
pub struct StubEncoder {
    pub calls: AtomicUsize,
}

impl StubEncoder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AttachmentEncoder for StubEncoder {
    async fn encode(&self, attachment: &PendingAttachment) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(format!(
            "data:{};name={};len={}",
            attachment.mime_type,
            attachment.file_name,
            attachment.bytes.len()
        ))
    }
}

pub struct FailingEncoder;

#[async_trait]
impl AttachmentEncoder for FailingEncoder {
    async fn encode(&self, _attachment: &PendingAttachment) -> Result<String> {
        Err(EntryError::Attachment("unreadable file".into()))
    }
}

pub struct Harness {
    pub service: TransactionService,
    pub store: Arc<InMemoryCategoryStore>,
    pub events: mpsc::UnboundedReceiver<TransactionEvent>,
}

pub fn harness(encoder: Arc<dyn AttachmentEncoder>) -> Harness {
    let (resolver, store) = resolver_with(Vec::new());
    let (tx, events) = mpsc::unbounded_channel();
    let service = TransactionService::new(resolver, encoder, Arc::new(tx));
    Harness {
        service,
        store,
        events,
    }
}
