//! The fixed fields of a spoken timestamp.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine parts a spoken timestamp is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Fixed introductory phrase.
    Prefix,
    /// Hour of the 12-hour clock.
    Hour,
    /// Minute of the hour.
    Minute,
    /// "am" or "pm".
    AmPm,
    /// Fixed connective "on".
    On,
    /// Day of the week.
    Day,
    /// Month of the year.
    Month,
    /// Day of the month.
    Date,
    /// Fixed closing phrase.
    Suffix,
}

impl Field {
    /// The order snippets are concatenated in, independent of fetch order.
    pub const CANONICAL_ORDER: [Field; 9] = [
        Field::Prefix,
        Field::Hour,
        Field::Minute,
        Field::AmPm,
        Field::On,
        Field::Day,
        Field::Month,
        Field::Date,
        Field::Suffix,
    ];

    /// Returns the string representation of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Prefix => "prefix",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::AmPm => "ampm",
            Field::On => "on",
            Field::Day => "day",
            Field::Month => "month",
            Field::Date => "date",
            Field::Suffix => "suffix",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
