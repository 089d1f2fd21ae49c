use serde::de::DeserializeOwned;
use serde::Serialize;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    core::utils::ensure_dir,
    domain::{Category, CategoryColorMap},
    errors::Result,
};

use super::CategoryStore;

const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_CATEGORIES_FILE: &str = "custom_categories.json";
pub const DEFAULT_COLORS_FILE: &str = "custom_category_colors.json";

/// Filesystem-backed JSON persistence for custom categories and colors.
///
/// Missing files read as empty collections. Every write replaces the file
/// through a temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct JsonCategoryStore {
    root: PathBuf,
    categories_path: PathBuf,
    colors_path: PathBuf,
}

impl JsonCategoryStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        Self::with_file_names(root, DEFAULT_CATEGORIES_FILE, DEFAULT_COLORS_FILE)
    }

    pub fn with_file_names(root: PathBuf, categories_file: &str, colors_file: &str) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self {
            categories_path: root.join(categories_file),
            colors_path: root.join(colors_file),
            root,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_file_names(
            config.resolve_data_dir(),
            &config.categories_file,
            &config.colors_file,
        )
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn categories_path(&self) -> &Path {
        &self.categories_path
    }

    pub fn colors_path(&self) -> &Path {
        &self.colors_path
    }
}

impl CategoryStore for JsonCategoryStore {
    fn load_custom_categories(&self) -> Result<Vec<Category>> {
        read_or_default(&self.categories_path)
    }

    fn save_custom_categories(&self, categories: &[Category]) -> Result<()> {
        save_json_to_path(categories, &self.categories_path)?;
        tracing::debug!(
            count = categories.len(),
            path = %self.categories_path.display(),
            "custom categories written"
        );
        Ok(())
    }

    fn add_custom_category(&self, category: &Category) -> Result<()> {
        let mut categories = self.load_custom_categories()?;
        categories.push(category.clone());
        self.save_custom_categories(&categories)
    }

    fn load_custom_category_colors(&self) -> Result<CategoryColorMap> {
        read_or_default(&self.colors_path)
    }

    fn save_custom_category_color(&self, label: &str, color: &str) -> Result<()> {
        let mut colors = self.load_custom_category_colors()?;
        colors.insert(label.to_string(), color.to_string());
        save_json_to_path(&colors, &self.colors_path)
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(&data)?)
}

pub fn save_json_to_path<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
