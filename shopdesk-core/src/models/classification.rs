use serde::{Deserialize, Serialize};

use super::Category;

/// Output of the rephraser: the canonical query plus its categories.
///
/// `categories` is never empty; it holds `Misc` alone when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub rephrased_query: String,
    pub categories: Vec<Category>,
}

impl Classification {
    pub fn new(rephrased_query: impl Into<String>, mut categories: Vec<Category>) -> Self {
        if categories.is_empty() {
            categories.push(Category::Misc);
        }
        Self {
            rephrased_query: rephrased_query.into(),
            categories,
        }
    }

    /// First detected category.
    pub fn primary(&self) -> Category {
        self.categories.first().copied().unwrap_or(Category::Misc)
    }

    pub fn has(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}
