//! Absolute and relative date extraction, normalised to `YYYY-MM-DD`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{Datelike, Duration, Local, NaiveDate};
use regex::{Captures, Regex};
use tracing::trace;

const MONTH: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";
const ORDINAL: &str = r"(?:st|nd|rd|th)?";

// Alternatives are tried leftmost-first. Word forms must name a month, so a
// preposition before a number ("on 11/08/2024") never shadows the numeric form.
static DATE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        concat!(
            r"\b(?P<iso>\d{{4}}-\d{{2}}-\d{{2}})\b",
            r"|\b(?P<numeric>\d{{2}}/\d{{2}}/\d{{4}}|\d{{2}}-\d{{2}}-\d{{4}})\b",
            r"|\b(?P<dd>\d{{1,2}}){ord}\s+(?P<dm>{month})\b(?:,?\s+(?P<dy>\d{{4}})\b)?",
            r"|\b(?P<mm>{month})\s+(?P<md>\d{{1,2}}){ord}\b(?:,?\s+(?P<my>\d{{4}})\b)?",
        ),
        month = MONTH,
        ord = ORDINAL,
    ))
    .ok()
});

/// Dates mentioned in `text`, relative to the local calendar day.
pub fn extract_dates(text: &str) -> BTreeSet<String> {
    extract_dates_on(text, Local::now().date_naive())
}

/// Dates mentioned in `text`, with `today` anchoring relative terms and missing years.
///
/// Unparseable matches are dropped. The set is sorted, so its first element is the earliest date.
pub fn extract_dates_on(text: &str, today: NaiveDate) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    let mut dates = BTreeSet::new();

    if lowered.contains("today") {
        dates.insert(iso(today));
    }
    if lowered.contains("yesterday") {
        dates.insert(iso(today - Duration::days(1)));
    }

    let Some(re) = DATE_PATTERN.as_ref() else {
        return dates;
    };
    for caps in re.captures_iter(&lowered) {
        match parse_match(&caps, today.year()) {
            Some(date) => {
                dates.insert(iso(date));
            }
            None => trace!(matched = caps.get(0).map_or("", |m| m.as_str()), "unparseable date dropped"),
        }
    }
    dates
}

fn parse_match(caps: &Captures<'_>, current_year: i32) -> Option<NaiveDate> {
    if let Some(m) = caps.name("iso") {
        return NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok();
    }
    if let Some(m) = caps.name("numeric") {
        return parse_numeric(m.as_str());
    }
    let (day, month, year) = if let Some(d) = caps.name("dd") {
        (d, caps.name("dm")?, caps.name("dy"))
    } else {
        (caps.name("md")?, caps.name("mm")?, caps.name("my"))
    };
    let day: u32 = day.as_str().parse().ok()?;
    let month = month_number(month.as_str())?;
    let year = match year {
        Some(y) => y.as_str().parse().ok()?,
        None => current_year,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month-first, falling back to day-first when the first field cannot be a month.
fn parse_numeric(s: &str) -> Option<NaiveDate> {
    let sep = if s.contains('/') { '/' } else { '-' };
    let month_first = format!("%m{sep}%d{sep}%Y");
    let day_first = format!("%d{sep}%m{sep}%Y");
    NaiveDate::parse_from_str(s, &month_first)
        .or_else(|_| NaiveDate::parse_from_str(s, &day_first))
        .ok()
}

fn month_number(word: &str) -> Option<u32> {
    let prefix = word.get(..3)?;
    let n = match prefix {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(text: &str) -> Vec<String> {
        let today = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
        extract_dates_on(text, today).into_iter().collect()
    }

    #[test]
    fn iso_slash_and_dash_forms() {
        assert_eq!(on("shipped on 2024-11-08"), vec!["2024-11-08"]);
        assert_eq!(on("orders from 10/11/2024"), vec!["2024-10-11"]);
        assert_eq!(on("orders from 10-11-2024"), vec!["2024-10-11"]);
    }

    #[test]
    fn numeric_form_falls_back_to_day_first() {
        assert_eq!(on("placed 25/12/2024"), vec!["2024-12-25"]);
    }

    #[test]
    fn ordinal_day_and_month_name_default_to_current_year() {
        assert_eq!(on("new orders on 8th Dec"), vec!["2024-12-08"]);
        assert_eq!(on("December 8th"), vec!["2024-12-08"]);
    }

    #[test]
    fn explicit_year_is_kept_in_both_orders() {
        assert_eq!(on("December 8th, 2023"), vec!["2023-12-08"]);
        assert_eq!(on("8th December, 2023"), vec!["2023-12-08"]);
        assert_eq!(on("sept 3 2022"), vec!["2022-09-03"]);
    }

    #[test]
    fn relative_terms() {
        assert_eq!(on("orders confirmed today"), vec!["2024-11-20"]);
        assert_eq!(on("what shipped yesterday"), vec!["2024-11-19"]);
    }

    #[test]
    fn invalid_and_non_dates_are_dropped() {
        assert!(on("status of order 30257").is_empty());
        assert!(on("31st feb").is_empty());
        assert!(on("5 orders from the mayor").is_empty());
    }

    #[test]
    fn duplicates_collapse_and_sort() {
        assert_eq!(
            on("2024-11-19 or yesterday or 2024-11-02"),
            vec!["2024-11-02", "2024-11-19"]
        );
    }
}
