use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::format::{short_date, time_range};

/// The non-personnel facts about a duty: reference documents, date, place
/// and expected hours. Free-form strings plus parsed date/time values, with
/// no cross-field invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub order_number: String,
    pub bulletin_number: String,
    pub date: NaiveDate,
    pub location: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl EventMetadata {
    /// Event date as DD/MM/YYYY.
    pub fn date_display(&self) -> String {
        short_date(self.date)
    }

    /// Expected hours as "Das HHhMM às HHhMM".
    pub fn time_range_display(&self) -> String {
        time_range(self.start_time, self.end_time)
    }

    /// Combined service-order and bulletin reference.
    pub fn reference_display(&self) -> String {
        format!(
            "NS Nº {} - BG Nº {}",
            self.order_number, self.bulletin_number
        )
    }
}
