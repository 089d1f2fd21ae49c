use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::{
    domain::{merged_color_map, Category, CategoryColorMap},
    errors::Result,
    storage::CategoryStore,
};

use super::category_resolver::CategoryEvent;

/// Cached option list and color map for the category picker.
///
/// Both views are loaded lazily and dropped whenever the resolver announces a
/// change, so the next access reads fresh data from storage.
pub struct CategoryCatalog {
    store: Arc<dyn CategoryStore>,
    defaults: Vec<Category>,
    events: broadcast::Receiver<CategoryEvent>,
    options: Option<Vec<Category>>,
    colors: Option<CategoryColorMap>,
    reloads: usize,
}

impl CategoryCatalog {
    pub(crate) fn new(
        store: Arc<dyn CategoryStore>,
        defaults: Vec<Category>,
        events: broadcast::Receiver<CategoryEvent>,
    ) -> Self {
        Self {
            store,
            defaults,
            events,
            options: None,
            colors: None,
            reloads: 0,
        }
    }

    /// Default categories followed by the persisted custom ones.
    pub fn options(&mut self) -> Result<&[Category]> {
        self.sync();
        let options = match self.options.take() {
            Some(options) => options,
            None => {
                let mut options = self.defaults.clone();
                options.extend(self.store.load_custom_categories()?);
                self.reloads += 1;
                options
            }
        };
        Ok(self.options.insert(options).as_slice())
    }

    /// Only the custom entries of [`Self::options`].
    pub fn custom_options(&mut self) -> Result<&[Category]> {
        let skip = self.defaults.len();
        let options = self.options()?;
        Ok(&options[skip..])
    }

    pub fn color_map(&mut self) -> Result<&CategoryColorMap> {
        self.sync();
        let colors = match self.colors.take() {
            Some(colors) => colors,
            None => {
                let custom = self.store.load_custom_category_colors()?;
                self.reloads += 1;
                merged_color_map(&custom)
            }
        };
        Ok(&*self.colors.insert(colors))
    }

    /// Number of storage reads performed to rebuild the views.
    pub fn reloads(&self) -> usize {
        self.reloads
    }

    fn sync(&mut self) {
        let mut stale = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    tracing::debug!(?event, "category catalog invalidated");
                    stale = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "category catalog lagged behind events");
                    stale = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if stale {
            self.options = None;
            self.colors = None;
        }
    }
}
