use shopdesk_core::models::Category;

/// Keyword vocabularies in test order. Categories are emitted in this order.
pub const VOCABULARIES: [(Category, &[&str]); 4] = [
    (Category::Order, &["order"]),
    (Category::Product, &["product"]),
    (Category::Inventory, &["inventory"]),
    (Category::Page, &["pages"]),
];

/// Categories whose vocabulary appears in `text`, case-insensitively. `[Misc]` when none do.
pub fn categorize(text: &str) -> Vec<Category> {
    let lowered = text.to_lowercase();
    let found: Vec<Category> = VOCABULARIES
        .iter()
        .filter(|(_, words)| words.iter().any(|w| lowered.contains(w)))
        .map(|(category, _)| *category)
        .collect();
    if found.is_empty() {
        vec![Category::Misc]
    } else {
        found
    }
}
