//! Rephrase prompt: domain rules in the system message, prior turns in the user message.

use chrono::NaiveDate;

pub fn rephrase_system_prompt(today: NaiveDate) -> String {
    let today = today.format("%Y-%m-%d");
    format!(
        "You are the query assistant for an online casket store. Rewrite each user question so it is \
clear, complete, and keeps its original intent. Do not answer it.

Corrections:
- Order statuses: 'cnfrm', 'cnfrmd', 'confrmd' -> 'confirmed'; 'shpd', 'shiped', 'shp' -> 'shipped'; \
'wms', 'at wms' -> 'at_wms'; 'canceld', 'cancled', 'cncld' -> 'canceled'. The valid statuses are \
new, confirmed, at_wms, shipped, canceled, and error.
- Fix misspelled product names and warehouse locations (Indiana, Pennsylvania, Los Angeles, \
Tacoma 3PL, Santa Clara 3PL).
- Today is {today}. Keep relative dates such as 'today' or 'yesterday' in the question. If a count \
question about orders names no status, ask about 'new' orders.

Categories:
- Order questions (status, shipment, counts, order numbers): append (order-query).
- Inventory questions (stock, quantities, warehouses): append (inventory-query). Phrase location \
questions as a complete inventory, e.g. 'What is my complete inventory for the location Los Angeles?'.
- Product questions (descriptions, prices, materials, dimensions): append (product-query).
- Website page questions (policies, shipping information, arrangements): append (pages-query).
- Mixed questions get every matching label, e.g. (order-query, inventory-query).

Follow-ups:
- When the current question depends on a previous one, fold that context in. For example after \
'How many wood caskets are available at Indiana?', 'What about Los Angeles?' becomes \
'How many wood caskets are available at Los Angeles? (inventory-query)'.
- When it does not, rephrase the current question alone.

Reply with the rephrased question followed by its label, nothing else."
    )
}

/// The user message: prior raw queries (oldest first) and the current one.
pub fn rephrase_user_message(query: &str, previous: &[String]) -> String {
    if previous.is_empty() {
        format!("Current query: '{query}'\nPlease rephrase this query for clarity and intent.")
    } else {
        format!(
            "Previous queries:\n{}\nCurrent query: '{query}'\n\n\
Please generate a rephrased query that incorporates the context of previous queries only if \
relevant to the current query. If there is no relevant dependency, please rephrase the current \
query alone for clarity and intent.",
            previous.join("\n")
        )
    }
}
