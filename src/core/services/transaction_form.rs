use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};

use crate::{
    domain::{Attachment, TransactionKind, TransactionPayload},
    errors::{EntryError, Result},
};

use super::category_resolver::CategoryResolver;

pub const NOME_REQUIRED: &str = "O nome é obrigatório";
pub const VALOR_REQUIRED: &str = "O valor é obrigatório";
pub const VALOR_POSITIVE: &str = "O valor deve ser um número maior que zero";
pub const TIPO_REQUIRED: &str = "Selecione um tipo";
pub const CATEGORIA_REQUIRED: &str = "A categoria é obrigatória";
pub const DATA_REQUIRED: &str = "A data é obrigatória";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Nome,
    Valor,
    Tipo,
    Categoria,
    Data,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Nome,
        FormField::Valor,
        FormField::Tipo,
        FormField::Categoria,
        FormField::Data,
    ];
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Nome => "nome",
            FormField::Valor => "valor",
            FormField::Tipo => "tipo",
            FormField::Categoria => "categoria",
            FormField::Data => "data",
        };
        f.write_str(name)
    }
}

pub type FieldErrors = BTreeMap<FormField, String>;

/// Draft state of the transaction drawer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    pub is_open: bool,
    pub is_editing: bool,
    pub edit_id: Option<i64>,
    pub nome: String,
    pub valor: String,
    pub tipo: String,
    /// Category label as it will be stored on the transaction.
    pub categoria: String,
    /// Slugs selected in the picker; only the first one is used.
    pub selected_categories: Vec<String>,
    pub data: Option<DateTime<Utc>>,
    pub attachment: Option<Attachment>,
    errors: FieldErrors,
    touched: BTreeSet<FormField>,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the drawer; a detail carrying a non-zero `id` switches to edit mode.
    pub fn open(
        &mut self,
        detail: Option<&TransactionPayload>,
        resolver: &CategoryResolver,
    ) -> Result<()> {
        match detail {
            Some(payload) if payload.id.is_some_and(|id| id != 0) => {
                self.open_for_edit(payload, resolver)
            }
            _ => {
                self.open_for_create();
                Ok(())
            }
        }
    }

    pub fn open_for_create(&mut self) {
        *self = Self {
            is_open: true,
            ..Self::default()
        };
    }

    pub fn open_for_edit(
        &mut self,
        payload: &TransactionPayload,
        resolver: &CategoryResolver,
    ) -> Result<()> {
        let id = payload
            .id
            .ok_or_else(|| EntryError::InvalidInput("edited transaction has no id".into()))?;
        let selection = resolver.resolve_selection_from_label(&payload.categoria)?;

        *self = Self {
            is_open: true,
            is_editing: true,
            edit_id: Some(id),
            nome: payload.nome.clone(),
            valor: payload.valor.clone(),
            tipo: payload.tipo.to_lowercase(),
            categoria: payload.categoria.clone(),
            selected_categories: selection.into_iter().collect(),
            data: payload.data,
            attachment: payload
                .attachment
                .clone()
                .filter(|encoded| !encoded.is_empty())
                .map(Attachment::Encoded),
            ..Self::default()
        };
        tracing::debug!(id, categoria = %self.categoria, "transaction form opened for edit");
        Ok(())
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing {
            "Editar Transação"
        } else {
            "Nova Transação"
        }
    }

    pub fn set_nome(&mut self, nome: impl Into<String>) {
        self.nome = nome.into();
        self.clear_error_if_touched(FormField::Nome);
    }

    pub fn set_valor(&mut self, valor: impl Into<String>) {
        self.valor = valor.into();
        self.clear_error_if_touched(FormField::Valor);
    }

    pub fn set_tipo(&mut self, tipo: impl Into<String>) {
        self.tipo = tipo.into();
        self.clear_error_if_touched(FormField::Tipo);
        self.touched.insert(FormField::Tipo);
    }

    pub fn set_data(&mut self, data: Option<DateTime<Utc>>) {
        self.data = data;
        self.clear_error_if_touched(FormField::Data);
        self.touched.insert(FormField::Data);
    }

    pub fn set_attachment(&mut self, attachment: Option<Attachment>) {
        self.attachment = attachment;
    }

    /// Marks a field as visited, as on blur.
    pub fn touch(&mut self, field: FormField) {
        self.touched.insert(field);
    }

    /// Applies a picker selection; the first slug decides the category label.
    pub fn select_categories(
        &mut self,
        selected: Vec<String>,
        resolver: &CategoryResolver,
    ) -> Result<()> {
        let first = selected.first().cloned();
        self.selected_categories = selected;
        let Some(first) = first else {
            self.categoria.clear();
            return Ok(());
        };

        self.categoria = resolver.resolve_label_from_selection(&first)?;
        self.touched.insert(FormField::Categoria);
        self.errors.remove(&FormField::Categoria);
        Ok(())
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// Error to render for `field`: only shown once it was touched.
    pub fn visible_error(&self, field: FormField) -> Option<&str> {
        self.error(field).filter(|_| self.is_touched(field))
    }

    /// Checks every field, records the errors and reports whether the draft is valid.
    pub fn validate(&mut self) -> bool {
        let mut errors = self.field_errors();
        if errors.is_empty() && self.selected_categories.is_empty() {
            self.errors
                .insert(FormField::Categoria, CATEGORIA_REQUIRED.to_string());
            self.touched.insert(FormField::Categoria);
            return false;
        }
        if errors.is_empty() {
            return true;
        }
        if self.selected_categories.is_empty() {
            errors.insert(FormField::Categoria, CATEGORIA_REQUIRED.to_string());
        }
        tracing::debug!(count = errors.len(), "transaction form rejected");
        self.errors = errors;
        self.touched.extend(FormField::ALL);
        false
    }

    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.nome.is_empty() {
            errors.insert(FormField::Nome, NOME_REQUIRED.to_string());
        }
        if self.valor.is_empty() {
            errors.insert(FormField::Valor, VALOR_REQUIRED.to_string());
        } else if !parse_amount(&self.valor).is_some_and(|value| value > 0.0) {
            errors.insert(FormField::Valor, VALOR_POSITIVE.to_string());
        }
        if TransactionKind::parse(&self.tipo).is_none() {
            errors.insert(FormField::Tipo, TIPO_REQUIRED.to_string());
        }
        if self.categoria.is_empty() {
            errors.insert(FormField::Categoria, CATEGORIA_REQUIRED.to_string());
        }
        if self.data.is_none() {
            errors.insert(FormField::Data, DATA_REQUIRED.to_string());
        }
        errors
    }

    fn clear_error_if_touched(&mut self, field: FormField) {
        if self.touched.contains(&field) {
            self.errors.remove(&field);
        }
    }
}

/// Reads the leading number of an amount typed with `,` or `.` as decimal separator.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let replaced = raw.replacen(',', ".", 1);
    let trimmed = replaced.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, ch)| !(ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | 'e' | 'E')))
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..end];
    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
