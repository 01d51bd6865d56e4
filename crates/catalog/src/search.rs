//! Free-text product search.

use unicode_normalization::UnicodeNormalization;

use crate::product::Product;

/// A case-insensitive substring query over product names and descriptions.
///
/// Query and text are both NFKC-normalized before lowercasing, so a name stored
/// with decomposed accents still matches a precomposed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Build a query. An empty string yields `None`: there is nothing to search for.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            needle: normalize(raw),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, product: &Product) -> bool {
        normalize(&product.name).contains(&self.needle)
            || normalize(&product.description).contains(&self.needle)
    }
}

fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}
