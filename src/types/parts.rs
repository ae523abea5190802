//! Timestamp values and their asset identifiers.
//!
//! A [`TimestampParts`] is the validated, immutable description of one spoken
//! timestamp. Each field maps to a snippet by a fixed naming convention
//! (`hour_7`, `minute_5`, `pm`, ...), which is the contract with whoever
//! records and hosts the snippets.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::field::Field;
use crate::error::{Result, StampError};

/// Half of the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Returns the string representation, which is also the asset identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }

    /// Meridiem of a 24-hour clock hour.
    pub fn from_hour24(hour: u32) -> Self {
        if hour >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated values for every variable field of a spoken timestamp.
///
/// Equality is field-for-field; two requests with equal parts produce the
/// same stitched clip, which is what the stitch cache relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimestampParts {
    hour: u8,
    minute: u8,
    ampm: Meridiem,
    day: u8,
    month: u8,
    date: u8,
}

impl TimestampParts {
    /// Creates timestamp parts, validating every range.
    ///
    /// `day` counts from Sunday = 1 to Saturday = 7.
    pub fn new(
        hour: u8,
        minute: u8,
        ampm: Meridiem,
        day: u8,
        month: u8,
        date: u8,
    ) -> Result<Self> {
        check_range(Field::Hour, hour, 1, 12)?;
        check_range(Field::Minute, minute, 0, 59)?;
        check_range(Field::Day, day, 1, 7)?;
        check_range(Field::Month, month, 1, 12)?;
        check_range(Field::Date, date, 1, 31)?;

        Ok(Self {
            hour,
            minute,
            ampm,
            day,
            month,
            date,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn ampm(&self) -> Meridiem {
        self.ampm
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn date(&self) -> u8 {
        self.date
    }

    /// Returns the asset identifier for a field.
    pub fn asset_id(&self, field: Field) -> String {
        match field {
            Field::Prefix => "prefix".to_string(),
            Field::Hour => format!("hour_{}", self.hour),
            Field::Minute => format!("minute_{}", self.minute),
            Field::AmPm => self.ampm.as_str().to_string(),
            Field::On => "on".to_string(),
            Field::Day => format!("day_{}", self.day),
            Field::Month => format!("month_{}", self.month),
            Field::Date => format!("date_{}", self.date),
            Field::Suffix => "suffix".to_string(),
        }
    }

    /// Returns every field with its asset identifier, in canonical order.
    pub fn assets(&self) -> Vec<(Field, String)> {
        Field::CANONICAL_ORDER
            .iter()
            .map(|&field| (field, self.asset_id(field)))
            .collect()
    }

    /// Computes the cache key for these parts.
    ///
    /// The key is the first 16 hex characters of the SHA256 hash of the
    /// canonical JSON serialization, so equal parts always share a key.
    pub fn cache_key(&self) -> String {
        // Serializing a struct of integers and a unit enum cannot fail.
        let canonical = serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self));
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        let result = hasher.finalize();
        // Take first 8 bytes (16 hex chars)
        hex::encode(&result[..8])
    }
}

impl fmt::Display for TimestampParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02} {} day {} month {} date {}",
            self.hour, self.minute, self.ampm, self.day, self.month, self.date
        )
    }
}

fn check_range(field: Field, value: u8, min: u8, max: u8) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(StampError::invalid_field(
            field,
            value as u32,
            min as u32,
            max as u32,
        ))
    }
}

/// Timestamp fields as supplied by the user, any of which may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampInput {
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub ampm: Option<Meridiem>,
    pub day: Option<u8>,
    pub month: Option<u8>,
    pub date: Option<u8>,
}

/// Result of resolving a [`TimestampInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub parts: TimestampParts,
    /// Fields that were filled from the clock rather than supplied.
    pub defaulted: Vec<Field>,
}

impl TimestampInput {
    /// Fills every missing field from `now` and validates the result.
    pub fn resolve(&self, now: &NaiveDateTime) -> Result<Resolved> {
        let mut defaulted = Vec::new();

        let hour = self.hour.unwrap_or_else(|| {
            defaulted.push(Field::Hour);
            match now.hour() % 12 {
                0 => 12,
                h => h as u8,
            }
        });
        let minute = self.minute.unwrap_or_else(|| {
            defaulted.push(Field::Minute);
            now.minute() as u8
        });
        let ampm = self.ampm.unwrap_or_else(|| {
            defaulted.push(Field::AmPm);
            Meridiem::from_hour24(now.hour())
        });
        let day = self.day.unwrap_or_else(|| {
            defaulted.push(Field::Day);
            now.weekday().number_from_sunday() as u8
        });
        let month = self.month.unwrap_or_else(|| {
            defaulted.push(Field::Month);
            now.month() as u8
        });
        let date = self.date.unwrap_or_else(|| {
            defaulted.push(Field::Date);
            now.day() as u8
        });

        let parts = TimestampParts::new(hour, minute, ampm, day, month, date)?;
        Ok(Resolved { parts, defaulted })
    }
}

/// Encode bytes as hex string.
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: &[u8]) -> String {
        let mut s = String::with_capacity(bytes.len() * 2);
        for &b in bytes {
            s.push(HEX_CHARS[(b >> 4) as usize] as char);
            s.push(HEX_CHARS[(b & 0xf) as usize] as char);
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample_parts() -> TimestampParts {
        TimestampParts::new(7, 5, Meridiem::Pm, 3, 11, 22).unwrap()
    }

    #[test]
    fn asset_ids_follow_naming_convention() {
        let ids: Vec<String> = sample_parts().assets().into_iter().map(|(_, id)| id).collect();
        assert_eq!(
            ids,
            vec![
                "prefix", "hour_7", "minute_5", "pm", "on", "day_3", "month_11", "date_22",
                "suffix"
            ]
        );
    }

    #[test]
    fn out_of_range_fields_rejected() {
        let err = TimestampParts::new(13, 0, Meridiem::Am, 1, 1, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidField);
        assert!(err.message.contains("hour"));

        assert!(TimestampParts::new(0, 0, Meridiem::Am, 1, 1, 1).is_err());
        assert!(TimestampParts::new(1, 60, Meridiem::Am, 1, 1, 1).is_err());
        assert!(TimestampParts::new(1, 0, Meridiem::Am, 8, 1, 1).is_err());
        assert!(TimestampParts::new(1, 0, Meridiem::Am, 1, 13, 1).is_err());
        assert!(TimestampParts::new(1, 0, Meridiem::Am, 1, 1, 32).is_err());
        assert!(TimestampParts::new(12, 59, Meridiem::Pm, 7, 12, 31).is_ok());
    }

    #[test]
    fn cache_key_deterministic() {
        let key1 = sample_parts().cache_key();
        let key2 = sample_parts().cache_key();
        assert_eq!(key1, key2);
        assert_eq!(key1.len(), 16);
        assert!(key1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn cache_key_varies_with_every_field() {
        let base = sample_parts().cache_key();
        let variants = [
            TimestampParts::new(8, 5, Meridiem::Pm, 3, 11, 22).unwrap(),
            TimestampParts::new(7, 6, Meridiem::Pm, 3, 11, 22).unwrap(),
            TimestampParts::new(7, 5, Meridiem::Am, 3, 11, 22).unwrap(),
            TimestampParts::new(7, 5, Meridiem::Pm, 4, 11, 22).unwrap(),
            TimestampParts::new(7, 5, Meridiem::Pm, 3, 12, 22).unwrap(),
            TimestampParts::new(7, 5, Meridiem::Pm, 3, 11, 23).unwrap(),
        ];
        for variant in variants {
            assert_ne!(variant, sample_parts());
            assert_ne!(variant.cache_key(), base);
        }
    }

    #[test]
    fn resolve_keeps_supplied_fields() {
        let input = TimestampInput {
            hour: Some(7),
            minute: Some(5),
            ampm: Some(Meridiem::Pm),
            day: Some(3),
            month: Some(11),
            date: Some(22),
        };
        let resolved = input.resolve(&at(2024, 1, 1, 9, 41)).unwrap();
        assert_eq!(resolved.parts, sample_parts());
        assert!(resolved.defaulted.is_empty());
    }

    #[test]
    fn resolve_fills_from_clock() {
        // 2024-03-15 was a Friday: Sunday = 1, so Friday = 6
        let resolved = TimestampInput::default()
            .resolve(&at(2024, 3, 15, 13, 45))
            .unwrap();
        assert_eq!(resolved.parts.hour(), 1);
        assert_eq!(resolved.parts.minute(), 45);
        assert_eq!(resolved.parts.ampm(), Meridiem::Pm);
        assert_eq!(resolved.parts.day(), 6);
        assert_eq!(resolved.parts.month(), 3);
        assert_eq!(resolved.parts.date(), 15);
        assert_eq!(resolved.defaulted.len(), 6);
    }

    #[test]
    fn resolve_midnight_and_noon() {
        let midnight = TimestampInput::default()
            .resolve(&at(2024, 3, 15, 0, 30))
            .unwrap();
        assert_eq!(midnight.parts.hour(), 12);
        assert_eq!(midnight.parts.ampm(), Meridiem::Am);

        let noon = TimestampInput::default()
            .resolve(&at(2024, 3, 15, 12, 15))
            .unwrap();
        assert_eq!(noon.parts.hour(), 12);
        assert_eq!(noon.parts.ampm(), Meridiem::Pm);
    }

    #[test]
    fn resolve_rejects_invalid_supplied_value() {
        let input = TimestampInput {
            minute: Some(75),
            ..Default::default()
        };
        let err = input.resolve(&at(2024, 3, 15, 8, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidField);
    }
}
