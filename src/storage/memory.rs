use std::sync::{Mutex, MutexGuard};

use crate::{
    domain::{Category, CategoryColorMap},
    errors::{EntryError, Result},
};

use super::CategoryStore;

/// A single mutation recorded by [`InMemoryCategoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    SaveCategories(Vec<Category>),
    AddCategory(Category),
    SaveColor { label: String, color: String },
}

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<Category>,
    colors: CategoryColorMap,
    writes: Vec<StoreWrite>,
}

/// Process-local store that keeps a log of every write it receives.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store without recording writes.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let colors = categories
            .iter()
            .filter_map(|cat| cat.color.clone().map(|color| (cat.label.clone(), color)))
            .collect();
        Self {
            state: Mutex::new(MemoryState {
                categories,
                colors,
                writes: Vec::new(),
            }),
        }
    }

    /// Seeds color table entries, overriding colors derived from the categories.
    pub fn with_colors(mut self, colors: CategoryColorMap) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.colors.extend(colors);
        }
        self
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.lock().map(|state| state.writes.clone()).unwrap_or_default()
    }

    pub fn clear_writes(&self) {
        if let Ok(mut state) = self.lock() {
            state.writes.clear();
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| EntryError::Storage("in-memory category store poisoned".into()))
    }
}

impl CategoryStore for InMemoryCategoryStore {
    fn load_custom_categories(&self) -> Result<Vec<Category>> {
        Ok(self.lock()?.categories.clone())
    }

    fn save_custom_categories(&self, categories: &[Category]) -> Result<()> {
        let mut state = self.lock()?;
        state.categories = categories.to_vec();
        state
            .writes
            .push(StoreWrite::SaveCategories(categories.to_vec()));
        Ok(())
    }

    fn add_custom_category(&self, category: &Category) -> Result<()> {
        let mut state = self.lock()?;
        state.categories.push(category.clone());
        state.writes.push(StoreWrite::AddCategory(category.clone()));
        Ok(())
    }

    fn load_custom_category_colors(&self) -> Result<CategoryColorMap> {
        Ok(self.lock()?.colors.clone())
    }

    fn save_custom_category_color(&self, label: &str, color: &str) -> Result<()> {
        let mut state = self.lock()?;
        state.colors.insert(label.to_string(), color.to_string());
        state.writes.push(StoreWrite::SaveColor {
            label: label.to_string(),
            color: color.to_string(),
        });
        Ok(())
    }
}
