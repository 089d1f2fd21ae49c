use dirs::{data_dir, home_dir};
use std::{env, ffi::OsString, fs, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = "transaction_entry";
const HOME_ENV: &str = "TRANSACTION_ENTRY_HOME";

/// Returns the application data directory, honoring `TRANSACTION_ENTRY_HOME`.
pub fn app_data_dir() -> PathBuf {
    data_dir_with_override(env::var_os(HOME_ENV))
}

fn data_dir_with_override(custom: Option<OsString>) -> PathBuf {
    if let Some(custom) = custom {
        return PathBuf::from(custom);
    }
    data_dir()
        .or_else(home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Converts a category label into its slug form.
///
/// Lowercases, folds Latin diacritics to ASCII and collapses every run of
/// other characters into a single `-`. Idempotent.
pub fn normalize_category_value(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for ch in label.chars().flat_map(char::to_lowercase) {
        let folded = if ch.is_ascii_alphanumeric() {
            Some(ch.to_string())
        } else {
            fold_diacritic(ch).map(str::to_string)
        };
        match folded {
            Some(part) => {
                if pending_dash {
                    slug.push('-');
                    pending_dash = false;
                }
                slug.push_str(&part);
            }
            None => pending_dash = !slug.is_empty(),
        }
    }
    slug
}

fn fold_diacritic(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'œ' => "oe",
        'ß' => "ss",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        _ => return None,
    };
    Some(folded)
}

/// Builds a display label from a slug: each `-` separated word gets its first
/// character upper-cased, words are joined by single spaces.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
