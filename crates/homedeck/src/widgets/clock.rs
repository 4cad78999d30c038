//! Date line and name-day lookup.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use utoipa::ToSchema;

use crate::settings::Language;

static NAMEDAYS_JSON: &str = include_str!("../../data/namedays.json");

const WEEKDAYS_HU: [&str; 7] = [
    "hétfő", "kedd", "szerda", "csütörtök", "péntek", "szombat", "vasárnap",
];
const WEEKDAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const MONTHS_HU: [&str; 12] = [
    "január", "február", "március", "április", "május", "június",
    "július", "augusztus", "szeptember", "október", "november", "december",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodayView {
    pub date_line: String,
    pub nameday: Option<String>,
}

fn nameday_table() -> &'static HashMap<u32, HashMap<u32, Vec<String>>> {
    static TABLE: OnceLock<HashMap<u32, HashMap<u32, Vec<String>>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let raw: HashMap<String, HashMap<String, Vec<String>>> =
            serde_json::from_str(NAMEDAYS_JSON).expect("embedded nameday table is valid JSON");
        raw.into_iter()
            .map(|(month, days)| {
                let month = month.parse().expect("month key");
                let days = days
                    .into_iter()
                    .map(|(day, names)| (day.parse().expect("day key"), names))
                    .collect();
                (month, days)
            })
            .collect()
    })
}

/// Names celebrated on the given calendar day, joined with ", ".
pub fn nameday(date: NaiveDate) -> Option<String> {
    nameday_table()
        .get(&date.month())
        .and_then(|days| days.get(&date.day()))
        .map(|names| names.join(", "))
}

/// Localized long-form date line, e.g. `2026. augusztus 6., csütörtök`
/// or `Thursday, August 6, 2026`.
pub fn date_line(date: NaiveDate, language: Language) -> String {
    let weekday_index = match date.weekday() {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    };
    let month_index = (date.month() - 1) as usize;
    match language {
        Language::Hu => format!(
            "{}. {} {}., {}",
            date.year(),
            MONTHS_HU[month_index],
            date.day(),
            WEEKDAYS_HU[weekday_index]
        ),
        Language::En => format!(
            "{}, {} {}, {}",
            WEEKDAYS_EN[weekday_index],
            MONTHS_EN[month_index],
            date.day(),
            date.year()
        ),
    }
}

/// The complete widget view for a given day.
pub fn today_view(date: NaiveDate, language: Language) -> TodayView {
    TodayView {
        date_line: date_line(date, language),
        nameday: nameday(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_day_of_a_leap_year() {
        for date in NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .iter_days()
            .take(366)
        {
            assert!(
                nameday(date).is_some(),
                "no nameday for {}-{}",
                date.month(),
                date.day()
            );
        }
    }

    #[test]
    fn nameday_joins_names() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        assert_eq!(nameday(date).unwrap(), "Fábián, Sebestyén");
    }

    #[test]
    fn hungarian_date_line() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(date_line(date, Language::Hu), "2026. március 15., vasárnap");
    }

    #[test]
    fn english_date_line() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(date_line(date, Language::En), "Sunday, March 15, 2026");
    }

    #[test]
    fn today_view_carries_both_fields() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let view = today_view(date, Language::En);
        assert!(view.date_line.contains("December"));
        assert_eq!(view.nameday.as_deref(), Some("Szilveszter"));
    }
}
