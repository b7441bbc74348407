use chrono::NaiveDate;
use proptest::prelude::*;

use shopdesk_core::models::{Category, Classification};
use shopdesk_retrieval::engine::select_strategy;
use shopdesk_retrieval::{extract_dates_on, extract_identifiers, Strategy as Dispatched};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
}

proptest! {
    #[test]
    fn identifiers_keep_mention_order(ids in prop::collection::vec(0u32..10_000_000, 0..6)) {
        let text = ids
            .iter()
            .map(|id| format!("order {id}"))
            .collect::<Vec<_>>()
            .join(" and ");
        let expected: Vec<String> = ids.iter().map(u32::to_string).collect();
        prop_assert_eq!(extract_identifiers(&text), expected);
    }

    #[test]
    fn iso_dates_normalise_to_themselves(date in any_date()) {
        let iso = date.format("%Y-%m-%d").to_string();
        let found = extract_dates_on(&format!("orders on {iso}"), today());
        prop_assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![iso]);
    }

    #[test]
    fn slash_dates_read_month_first(date in any_date()) {
        let text = format!("orders on {}", date.format("%m/%d/%Y"));
        let found = extract_dates_on(&text, today());
        prop_assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec![date.format("%Y-%m-%d").to_string()]
        );
    }

    #[test]
    fn day_month_year_words_normalise(date in any_date()) {
        use chrono::Datelike;
        let month = MONTHS[date.month0() as usize];
        let text = format!("shipped on {} {month} {}", date.day(), date.year());
        let found = extract_dates_on(&text, today());
        prop_assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec![date.format("%Y-%m-%d").to_string()]
        );
    }

    #[test]
    fn order_label_always_dispatches_to_orders(
        extra in prop::sample::subsequence(
            vec![Category::Product, Category::Inventory, Category::Page],
            0..=3,
        ),
        text in "[a-z ]{0,40}",
    ) {
        let mut categories = vec![Category::Order];
        categories.extend(extra);
        let c = Classification::new(text, categories);
        prop_assert_eq!(select_strategy(&c), Dispatched::Order);
    }
}
