//! Reconciles category selections and labels against the default and custom
//! category sets, and persists new or recolored custom categories.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    core::utils::{normalize_category_value, title_case_slug},
    domain::{
        default_categories, is_default_key, merged_color_map, Category, CategoryColorMap, PALETTE,
    },
    errors::Result,
    storage::CategoryStore,
};

use super::category_catalog::CategoryCatalog;

const EVENT_CAPACITY: usize = 64;

/// Notification sent whenever the persisted custom categories change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEvent {
    Created(Category),
    Recolored { label: String, color: String },
}

/// What [`CategoryResolver::commit_category`] did with a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Blank label, nothing to do.
    Empty,
    /// Label is a default category key; defaults are never persisted.
    DefaultCategory,
    /// A new custom category was stored.
    Created(Category),
    /// An existing custom category got a new color.
    Recolored(Category),
    /// Existing custom category, color already up to date.
    Unchanged,
}

/// Maps a selected slug to its display label.
///
/// Defaults are consulted first, then custom categories. Unknown slugs are
/// turned into a title-cased label.
pub fn resolve_label_from_selection(
    selected_value: &str,
    defaults: &[Category],
    custom: &[Category],
) -> String {
    if selected_value.is_empty() {
        return String::new();
    }
    defaults
        .iter()
        .chain(custom.iter())
        .find(|category| category.value == selected_value)
        .map(|category| category.label.clone())
        .unwrap_or_else(|| title_case_slug(selected_value))
}

/// Maps a stored label back to the slug that should appear selected.
pub fn resolve_selection_from_label(
    label: &str,
    defaults: &[Category],
    custom: &[Category],
) -> Option<String> {
    if label.is_empty() {
        return None;
    }
    let value = defaults
        .iter()
        .chain(custom.iter())
        .find(|category| category.has_label(label))
        .map(|category| category.value.clone())
        .unwrap_or_else(|| normalize_category_value(label));
    Some(value)
}

/// Palette entry derived from the sum of the label's UTF-16 code units.
pub fn fallback_color(label: &str) -> &'static str {
    let hash: u64 = label.encode_utf16().map(u64::from).sum();
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}

/// Color lookup over an already merged color map and the custom list.
pub fn color_for_label(label: &str, colors: &CategoryColorMap, custom: &[Category]) -> String {
    if let Some(color) = colors.get(label) {
        return color.clone();
    }
    custom
        .iter()
        .find(|category| category.has_label(label))
        .and_then(|category| category.color.clone())
        .unwrap_or_else(|| fallback_color(label).to_string())
}

/// Category resolution service over an injected [`CategoryStore`].
pub struct CategoryResolver {
    store: Arc<dyn CategoryStore>,
    defaults: Vec<Category>,
    events: broadcast::Sender<CategoryEvent>,
}

impl CategoryResolver {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            defaults: default_categories(),
            events,
        }
    }

    pub fn store(&self) -> &Arc<dyn CategoryStore> {
        &self.store
    }

    pub fn defaults(&self) -> &[Category] {
        &self.defaults
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CategoryEvent> {
        self.events.subscribe()
    }

    /// Builds a cached view that refreshes itself on [`CategoryEvent`]s.
    pub fn catalog(&self) -> CategoryCatalog {
        CategoryCatalog::new(
            Arc::clone(&self.store),
            self.defaults.clone(),
            self.subscribe(),
        )
    }

    pub fn custom_categories(&self) -> Result<Vec<Category>> {
        self.store.load_custom_categories()
    }

    pub fn color_map(&self) -> Result<CategoryColorMap> {
        Ok(merged_color_map(&self.store.load_custom_category_colors()?))
    }

    pub fn resolve_label_from_selection(&self, selected_value: &str) -> Result<String> {
        let custom = self.custom_categories()?;
        let label = resolve_label_from_selection(selected_value, &self.defaults, &custom);
        tracing::debug!(selected_value, label = %label, "resolved category selection");
        Ok(label)
    }

    pub fn resolve_selection_from_label(&self, label: &str) -> Result<Option<String>> {
        let custom = self.custom_categories()?;
        Ok(resolve_selection_from_label(label, &self.defaults, &custom))
    }

    pub fn resolve_color_for_label(&self, label: &str) -> Result<String> {
        let colors = self.color_map()?;
        let custom = self.custom_categories()?;
        Ok(color_for_label(label, &colors, &custom))
    }

    /// Ensures `label` has a persisted custom category with a current color.
    ///
    /// Performs at most two writes: the category list (or an append) and the
    /// color table entry. Storage errors are returned unchanged.
    pub fn commit_category(&self, label: &str) -> Result<CommitOutcome> {
        let label = label.trim();
        if label.is_empty() {
            return Ok(CommitOutcome::Empty);
        }

        let custom = self.custom_categories()?;
        let existing = custom.iter().find(|category| category.has_label(label));

        let Some(existing) = existing else {
            if is_default_key(label) {
                tracing::debug!(label, "default category, nothing to persist");
                return Ok(CommitOutcome::DefaultCategory);
            }
            return self.create_custom(label);
        };

        let color = self.resolve_color_for_label(label)?;
        if existing.color.as_deref() == Some(color.as_str()) {
            return Ok(CommitOutcome::Unchanged);
        }

        let mut recolored = existing.clone();
        recolored.color = Some(color.clone());
        let updated: Vec<Category> = custom
            .iter()
            .map(|category| {
                if category.has_label(label) {
                    Category {
                        color: Some(color.clone()),
                        ..category.clone()
                    }
                } else {
                    category.clone()
                }
            })
            .collect();

        self.store.save_custom_category_color(label, &color)?;
        self.store.save_custom_categories(&updated)?;
        tracing::info!(label, color = %color, "custom category recolored");
        self.emit(CategoryEvent::Recolored {
            label: label.to_string(),
            color,
        });
        Ok(CommitOutcome::Recolored(recolored))
    }

    fn create_custom(&self, label: &str) -> Result<CommitOutcome> {
        let color = self.resolve_color_for_label(label)?;
        let value = normalize_category_value(label);
        if let Some(shadowed) = self.defaults.iter().find(|category| category.value == value) {
            tracing::warn!(
                label,
                value = %value,
                default_label = %shadowed.label,
                "custom category slug collides with a default category"
            );
        }

        let category = Category::new(value, label).with_color(color.clone());
        self.store.add_custom_category(&category)?;
        self.store.save_custom_category_color(label, &color)?;
        tracing::info!(label, value = %category.value, color = %color, "custom category created");
        self.emit(CategoryEvent::Created(category.clone()));
        Ok(CommitOutcome::Created(category))
    }

    fn emit(&self, event: CategoryEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("no category subscribers");
        }
    }
}
