use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{
    domain::{Attachment, PendingAttachment, TransactionPayload},
    errors::Result,
};

use super::{
    category_resolver::{CategoryResolver, CommitOutcome},
    transaction_form::{FieldErrors, TransactionForm},
};

pub const OPEN_DRAWER_EVENT: &str = "@FIAP/OPEN_TRANSACTION_DRAWER";
pub const CLOSE_DRAWER_EVENT: &str = "@FIAP/CLOSE_TRANSACTION_DRAWER";
pub const TRANSACTION_CREATED_EVENT: &str = "@FIAP/TRANSACTION_CREATED";
pub const TRANSACTION_UPDATED_EVENT: &str = "@FIAP/TRANSACTION_UPDATED";

/// Converts a picked file into the embeddable string stored on the transaction.
#[async_trait]
pub trait AttachmentEncoder: Send + Sync {
    async fn encode(&self, attachment: &PendingAttachment) -> Result<String>;
}

/// Fire-and-forget sink for events addressed to the host application.
pub trait TransactionNotifier: Send + Sync {
    fn notify(&self, event: TransactionEvent);
}

impl TransactionNotifier for mpsc::UnboundedSender<TransactionEvent> {
    fn notify(&self, event: TransactionEvent) {
        let name = event.event_name();
        if self.send(event).is_err() {
            tracing::warn!(event = name, "host listener dropped, event discarded");
        }
    }
}

/// Events emitted toward the host.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionEvent {
    Created(TransactionPayload),
    Updated(TransactionPayload),
    DrawerClosed,
}

impl TransactionEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            TransactionEvent::Created(_) => TRANSACTION_CREATED_EVENT,
            TransactionEvent::Updated(_) => TRANSACTION_UPDATED_EVENT,
            TransactionEvent::DrawerClosed => CLOSE_DRAWER_EVENT,
        }
    }

    pub fn payload(&self) -> Option<&TransactionPayload> {
        match self {
            TransactionEvent::Created(payload) | TransactionEvent::Updated(payload) => {
                Some(payload)
            }
            TransactionEvent::DrawerClosed => None,
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Invalid(FieldErrors),
    Dispatched(TransactionEvent),
}

/// Drives the form through validation, category persistence and dispatch.
pub struct TransactionService {
    resolver: CategoryResolver,
    encoder: Arc<dyn AttachmentEncoder>,
    notifier: Arc<dyn TransactionNotifier>,
}

impl TransactionService {
    pub fn new(
        resolver: CategoryResolver,
        encoder: Arc<dyn AttachmentEncoder>,
        notifier: Arc<dyn TransactionNotifier>,
    ) -> Self {
        Self {
            resolver,
            encoder,
            notifier,
        }
    }

    pub fn resolver(&self) -> &CategoryResolver {
        &self.resolver
    }

    /// Handles the host's open request; `detail` is the transaction to edit, if any.
    pub fn open(
        &self,
        form: &mut TransactionForm,
        detail: Option<&TransactionPayload>,
    ) -> Result<()> {
        form.open(detail, &self.resolver)
    }

    /// Routes an incoming host event; returns `false` for events this form ignores.
    pub fn handle_host_event(
        &self,
        form: &mut TransactionForm,
        event_name: &str,
        detail: Option<&TransactionPayload>,
    ) -> Result<bool> {
        if event_name != OPEN_DRAWER_EVENT {
            return Ok(false);
        }
        self.open(form, detail)?;
        Ok(true)
    }

    pub fn select_categories(&self, form: &mut TransactionForm, selected: Vec<String>) -> Result<()> {
        form.select_categories(selected, &self.resolver)
    }

    pub fn cancel(&self, form: &mut TransactionForm) {
        form.close();
        self.notifier.notify(TransactionEvent::DrawerClosed);
    }

    pub async fn submit(&self, form: &mut TransactionForm) -> Result<SubmitOutcome> {
        if !form.validate() {
            return Ok(SubmitOutcome::Invalid(form.errors().clone()));
        }
        let event = self.save(form).await?;
        Ok(SubmitOutcome::Dispatched(event))
    }

    /// Persists the category, embeds the attachment and notifies the host.
    ///
    /// An attachment that fails to encode is dropped; storage errors abort the
    /// save before anything is dispatched.
    pub async fn save(&self, form: &mut TransactionForm) -> Result<TransactionEvent> {
        let categoria = form.categoria.trim().to_string();
        let outcome = self.resolver.commit_category(&categoria)?;
        if !matches!(outcome, CommitOutcome::Unchanged | CommitOutcome::Empty) {
            tracing::debug!(?outcome, "category committed");
        }

        let attachment = self.process_attachment(form.attachment.as_ref()).await;

        let payload = TransactionPayload {
            id: form.edit_id,
            nome: form.nome.trim().to_string(),
            valor: form.valor.trim().to_string(),
            tipo: form.tipo.clone(),
            categoria,
            data: form.data,
            attachment,
        };
        let event = if form.is_editing {
            TransactionEvent::Updated(payload)
        } else {
            TransactionEvent::Created(payload)
        };

        tracing::info!(event = event.event_name(), "transaction dispatched");
        self.notifier.notify(event.clone());
        form.close();
        Ok(event)
    }

    async fn process_attachment(&self, attachment: Option<&Attachment>) -> Option<String> {
        match attachment? {
            Attachment::Encoded(data) => Some(data.clone()),
            Attachment::Pending(file) => match self.encoder.encode(file).await {
                Ok(encoded) => Some(encoded),
                Err(err) => {
                    tracing::error!(file = %file.file_name, error = %err, "attachment conversion failed");
                    None
                }
            },
        }
    }
}
