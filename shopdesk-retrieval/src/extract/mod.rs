//! Date and identifier extraction from free text.

mod dates;
mod identifiers;

pub use dates::{extract_dates, extract_dates_on};
pub use identifiers::extract_identifiers;
