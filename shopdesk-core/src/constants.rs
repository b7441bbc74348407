//! Fixed domain vocabulary shared by the strategies and the renderer.

/// Shopdesk version string.
pub const SHOPDESK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Order statuses in detection order. Stored lowercase in the orders table.
pub const ORDER_STATUSES: [&str; 6] = ["Confirmed", "Shipped", "New", "Canceled", "AT_WMS", "Error"];

/// Statuses summarised when a question names no status.
pub const DEFAULT_ORDER_STATUSES: [&str; 4] = ["New", "Confirmed", "AT_WMS", "Shipped"];

/// Upstream order channels.
pub const ORDER_SOURCES: [&str; 2] = ["BigCommerce", "Costco"];

/// Canonical warehouse names.
pub const WAREHOUSES: [&str; 5] = [
    "Indiana",
    "Pennsylvania",
    "Los Angeles",
    "Tacoma 3PL",
    "Santa Clara 3PL",
];

// --- Placeholders ---
pub const NO_INFO_AVAILABLE: &str = "No info available";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_ORDERS_FOUND: &str = "No orders found for the given status and date.";
pub const NO_DATE_TIME: &str = "No date time available";
pub const PRODUCT_NOT_AVAILABLE: &str = "The product you are looking for is not available";
