use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain category assigned to a rephrased query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Order,
    Product,
    Inventory,
    Page,
    Misc,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Order,
        Self::Product,
        Self::Inventory,
        Self::Page,
        Self::Misc,
    ];

    /// Label the rephraser appends to a query, e.g. `inventory-query`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Order => "order-query",
            Self::Product => "product-query",
            Self::Inventory => "inventory-query",
            Self::Page => "pages-query",
            Self::Misc => "misc-query",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
