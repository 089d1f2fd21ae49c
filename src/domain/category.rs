//! Domain types representing transaction categories and their colors.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::labels_match;

/// Display color tokens handed out to categories without a stored color.
pub const PALETTE: [&str; 18] = [
    "bg-green-500",
    "bg-blue-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-red-500",
    "bg-orange-500",
    "bg-yellow-500",
    "bg-teal-500",
    "bg-cyan-500",
    "bg-indigo-500",
    "bg-violet-500",
    "bg-emerald-500",
    "bg-lime-500",
    "bg-amber-500",
    "bg-red-600",
    "bg-blue-600",
    "bg-purple-600",
    "bg-pink-600",
];

/// Built-in categories as `(value, label)` pairs, in display order.
pub const DEFAULT_CATEGORIES: [(&str, &str); 15] = [
    ("salario", "Salário"),
    ("assinaturas", "Assinaturas"),
    ("cartao-credito", "Cartão de Crédito"),
    ("comida", "Comida"),
    ("mercado", "Mercado"),
    ("financiamento", "Financiamento"),
    ("internet", "Internet"),
    ("casa", "Casa"),
    ("pensao", "Pensão"),
    ("reserva", "Reserva"),
    ("investimentos", "Investimentos"),
    ("entretenimento", "Entretenimento"),
    ("educacao", "Educação"),
    ("transferencia", "Transferência"),
    ("deposito", "Depósito"),
];

const DEFAULT_CATEGORY_COLORS: [(&str, &str); 15] = [
    ("Salário", "bg-green-500"),
    ("Assinaturas", "bg-purple-500"),
    ("Cartão de Crédito", "bg-red-500"),
    ("Comida", "bg-orange-500"),
    ("Mercado", "bg-yellow-500"),
    ("Financiamento", "bg-indigo-500"),
    ("Internet", "bg-cyan-500"),
    ("Casa", "bg-teal-500"),
    ("Pensão", "bg-pink-500"),
    ("Reserva", "bg-emerald-500"),
    ("Investimentos", "bg-blue-500"),
    ("Entretenimento", "bg-violet-500"),
    ("Educação", "bg-amber-500"),
    ("Transferência", "bg-lime-500"),
    ("Depósito", "bg-blue-600"),
];

/// Static color table for the default categories, keyed by label.
///
/// Its key set doubles as the list of "default category keys": a label found
/// here is never persisted as a custom category.
pub static CATEGORY_COLORS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| DEFAULT_CATEGORY_COLORS.into_iter().collect());

/// Label → color token mapping.
pub type CategoryColorMap = HashMap<String, String>;

/// A selectable transaction category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Slug, unique key of the category.
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Category {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        labels_match(&self.label, label)
    }
}

/// Returns the built-in categories as owned values.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(value, label)| Category::new(*value, *label))
        .collect()
}

/// Returns `true` when `label` is one of the default color table keys.
pub fn is_default_key(label: &str) -> bool {
    CATEGORY_COLORS.contains_key(label)
}

/// Merges the default color table with persisted custom colors; custom wins.
pub fn merged_color_map(custom: &CategoryColorMap) -> CategoryColorMap {
    let mut merged: CategoryColorMap = CATEGORY_COLORS
        .iter()
        .map(|(label, color)| (label.to_string(), color.to_string()))
        .collect();
    merged.extend(custom.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
