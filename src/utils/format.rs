use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Portuguese month names for the long signature date.
const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

/// Format a date as DD/MM/YYYY.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a date in long Portuguese form, e.g. "09 de março de 2025".
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS_PT[date.month0() as usize],
        date.year()
    )
}

/// Format a time with the lowercase "h" separator, e.g. "07h30".
pub fn hour_minute(time: NaiveTime) -> String {
    format!("{:02}h{:02}", time.hour(), time.minute())
}

/// Format an expected-hours range, e.g. "Das 07h30 às 17h00".
pub fn time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("Das {} às {}", hour_minute(start), hour_minute(end))
}

/// Truncate a string to a maximum number of characters. No ellipsis: the
/// tail is silently dropped for fixed-width column fit.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}
