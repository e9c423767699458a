//! List, date, and time formatting for both languages.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};

use crate::vocabulary::Language;

const SW_MONTHS: [&str; 12] = [
    "Januari", "Februari", "Machi", "Aprili", "Mei", "Juni", "Julai", "Agosti", "Septemba",
    "Oktoba", "Novemba", "Desemba",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Swahili hour names, index 0 = saa moja (7 o'clock).
const SW_HOURS: [&str; 12] = [
    "Moja",
    "Mbili",
    "Tatu",
    "Nne",
    "Tano",
    "Sita",
    "Saba",
    "Nane",
    "Tisa",
    "Kumi",
    "Kumi na Moja",
    "Kumi na Mbili",
];

/// Capitalize the first letter of every space-separated word.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join items with the language's conjunction: `A`, `A na B`, `A, B, na C`.
pub fn format_list<S: AsRef<str>>(items: &[S], lang: Language) -> String {
    let conjunction = lang.conjunction();
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {conjunction} {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");
            format!("{head}, {conjunction} {}", last.as_ref())
        }
    }
}

/// Localized pieces of a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDate {
    /// Two-digit day of month.
    pub day: String,
    pub month: String,
    pub year: i32,
    pub weekday: String,
    /// `DD/MM/YYYY`.
    pub numeric: String,
}

/// Anchor a calendar date at 12:00 UTC so no offset can move it to a
/// neighbouring day.
fn utc_noon(date: NaiveDate) -> DateTime<Utc> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    Utc.from_utc_datetime(&date.and_time(noon))
}

fn weekday_name(weekday: Weekday, lang: Language) -> &'static str {
    match (lang, weekday) {
        (Language::Sw, Weekday::Mon) => "Jumatatu",
        (Language::Sw, Weekday::Tue) => "Jumanne",
        (Language::Sw, Weekday::Wed) => "Jumatano",
        (Language::Sw, Weekday::Thu) => "Alhamisi",
        (Language::Sw, Weekday::Fri) => "Ijumaa",
        (Language::Sw, Weekday::Sat) => "Jumamosi",
        (Language::Sw, Weekday::Sun) => "Jumapili",
        (Language::En, Weekday::Mon) => "Monday",
        (Language::En, Weekday::Tue) => "Tuesday",
        (Language::En, Weekday::Wed) => "Wednesday",
        (Language::En, Weekday::Thu) => "Thursday",
        (Language::En, Weekday::Fri) => "Friday",
        (Language::En, Weekday::Sat) => "Saturday",
        (Language::En, Weekday::Sun) => "Sunday",
    }
}

pub fn format_date(date: NaiveDate, lang: Language) -> FormattedDate {
    let anchor = utc_noon(date);
    let month_index = anchor.month0() as usize;
    let month = match lang {
        Language::Sw => SW_MONTHS[month_index],
        Language::En => EN_MONTHS[month_index],
    };

    FormattedDate {
        day: format!("{:02}", anchor.day()),
        month: month.to_string(),
        year: anchor.year(),
        weekday: weekday_name(anchor.weekday(), lang).to_string(),
        numeric: anchor.format("%d/%m/%Y").to_string(),
    }
}

/// Period of day for a 24-hour clock hour.
fn swahili_period(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Asubuhi",
        12..=15 => "Mchana",
        16..=18 => "Jioni",
        _ => "Usiku",
    }
}

/// Swahili hour name for a 24-hour clock hour. Swahili time counts from
/// sunrise, six hours behind the 24-hour clock.
fn swahili_hour(hour: u32) -> &'static str {
    let count = (hour + 6) % 12;
    let index = if count == 0 { 11 } else { count as usize - 1 };
    SW_HOURS[index]
}

/// Swahili civil time, e.g. `Saa Nne na nusu Asubuhi` for 10:30.
///
/// Past the half hour the phrase counts down to the next hour (`kasorobo`,
/// `kasoro dakika N`); the named hour also picks the period word.
fn format_time_sw(time: NaiveTime) -> String {
    let hour = time.hour();
    let next_hour = (hour + 1) % 24;
    let (named, phrase) = match time.minute() {
        0 => (hour, "kamili".to_string()),
        15 => (hour, "na robo".to_string()),
        30 => (hour, "na nusu".to_string()),
        45 => (next_hour, "kasorobo".to_string()),
        m if m < 30 => (hour, format!("na dakika {m}")),
        m => (next_hour, format!("kasoro dakika {}", 60 - m)),
    };
    format!(
        "Saa {} {phrase} {}",
        swahili_hour(named),
        swahili_period(named)
    )
}

/// Localized clock time: `10:30 AM` or `Saa Nne na nusu Asubuhi`.
pub fn format_time(time: NaiveTime, lang: Language) -> String {
    match lang {
        Language::En => time.format("%-I:%M %p").to_string(),
        Language::Sw => format_time_sw(time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&["A"], Language::En), "A");
        assert_eq!(format_list(&["A"], Language::Sw), "A");
        assert_eq!(format_list(&["A", "B"], Language::En), "A and B");
        assert_eq!(format_list(&["A", "B", "C"], Language::Sw), "A, B, na C");
        assert_eq!(format_list(&["A", "B", "C", "D"], Language::En), "A, B, C, and D");
        assert_eq!(format_list::<&str>(&[], Language::En), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("SINGIDA"), "Singida");
        assert_eq!(title_case("DAR ES SALAAM"), "Dar Es Salaam");
        assert_eq!(title_case("kIGOMA"), "Kigoma");
    }

    #[test]
    fn test_format_date_swahili() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        let formatted = format_date(date, Language::Sw);
        assert_eq!(formatted.day, "09");
        assert_eq!(formatted.month, "Julai");
        assert_eq!(formatted.year, 2025);
        assert_eq!(formatted.weekday, "Jumatano");
        assert_eq!(formatted.numeric, "09/07/2025");
    }

    #[test]
    fn test_format_date_english() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let formatted = format_date(date, Language::En);
        assert_eq!(formatted.day, "01");
        assert_eq!(formatted.month, "January");
        assert_eq!(formatted.weekday, "Thursday");
        assert_eq!(formatted.numeric, "01/01/2026");
    }

    #[test]
    fn test_swahili_time_idioms() {
        assert_eq!(format_time(t(7, 0), Language::Sw), "Saa Moja kamili Asubuhi");
        assert_eq!(format_time(t(10, 30), Language::Sw), "Saa Nne na nusu Asubuhi");
        assert_eq!(format_time(t(9, 15), Language::Sw), "Saa Tatu na robo Asubuhi");
        assert_eq!(format_time(t(10, 45), Language::Sw), "Saa Tano kasorobo Asubuhi");
        assert_eq!(format_time(t(14, 10), Language::Sw), "Saa Nane na dakika 10 Mchana");
        assert_eq!(format_time(t(16, 50), Language::Sw), "Saa Kumi na Moja kasoro dakika 10 Jioni");
        assert_eq!(format_time(t(18, 0), Language::Sw), "Saa Kumi na Mbili kamili Jioni");
        assert_eq!(format_time(t(20, 0), Language::Sw), "Saa Mbili kamili Usiku");
        assert_eq!(format_time(t(0, 0), Language::Sw), "Saa Sita kamili Usiku");
    }

    #[test]
    fn test_english_time() {
        assert_eq!(format_time(t(10, 30), Language::En), "10:30 AM");
        assert_eq!(format_time(t(7, 5), Language::En), "7:05 AM");
        assert_eq!(format_time(t(0, 15), Language::En), "12:15 AM");
        assert_eq!(format_time(t(15, 0), Language::En), "3:00 PM");
    }
}
