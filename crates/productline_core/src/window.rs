use chrono::{Duration, DurationRound};

use crate::{ProductLine, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinceDateOption {
    pub label: &'static str,
    pub value: Timestamp,
}

pub fn last_24_hours(now: Timestamp) -> Timestamp {
    start_of_hour(now - Duration::hours(24))
}

pub fn last_7_days(now: Timestamp) -> Timestamp {
    start_of_hour(now - Duration::days(7))
}

pub fn last_30_days(now: Timestamp) -> Timestamp {
    start_of_hour(now - Duration::days(30))
}

/// Window choices offered for a product line, anchored at `now`.
pub fn since_date_options(product_line: &ProductLine, now: Timestamp) -> Vec<SinceDateOption> {
    vec![
        SinceDateOption {
            label: "Last 24 Hours",
            value: last_24_hours(now),
        },
        SinceDateOption {
            label: "Last 7 Days",
            value: last_7_days(now),
        },
        SinceDateOption {
            label: "Last 30 Days",
            value: last_30_days(now),
        },
        SinceDateOption {
            label: "All",
            value: product_line.created_on,
        },
    ]
}

fn start_of_hour(value: Timestamp) -> Timestamp {
    // Truncation to a whole hour cannot overflow for representable UTC times.
    value.duration_trunc(Duration::hours(1)).unwrap_or(value)
}
