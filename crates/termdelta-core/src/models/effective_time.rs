use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A release effective time, stored as the integer `YYYYMMDD`.
///
/// Integer order is chronological order. `MAX` sits after every real date and
/// is used for "latest state" lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveTime(u32);

impl EffectiveTime {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(u32::MAX);

    /// Build from an integer `YYYYMMDD`, rejecting impossible calendar dates.
    pub fn from_yyyymmdd(value: u32) -> Option<Self> {
        let (year, month, day) = (value / 10_000, (value / 100) % 100, value % 100);
        if !(1000..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year as i32, month, day).map(|_| Self(value))
    }

    /// Parse exactly eight ASCII digits forming a valid date.
    pub fn parse(text: &str) -> Option<Self> {
        if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        text.parse::<u32>().ok().and_then(Self::from_yyyymmdd)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Calendar date, `None` for the `MIN`/`MAX` sentinels.
    pub fn to_date(self) -> Option<NaiveDate> {
        let v = self.0;
        NaiveDate::from_ymd_opt((v / 10_000) as i32, (v / 100) % 100, v % 100)
    }
}

impl fmt::Display for EffectiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_dates() {
        let t = EffectiveTime::parse("20210131").unwrap();
        assert_eq!(t.value(), 20210131);
        assert_eq!(t.to_string(), "20210131");
        assert_eq!(t.to_date(), NaiveDate::from_ymd_opt(2021, 1, 31));
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in ["", "2021013", "202101311", "2021-01-", "2021013a", " 20210131", "20211301", "20210230"] {
            assert!(EffectiveTime::parse(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn sentinels_bracket_real_dates() {
        let t = EffectiveTime::from_yyyymmdd(20020131).unwrap();
        assert!(EffectiveTime::MIN < t && t < EffectiveTime::MAX);
        assert!(EffectiveTime::MAX.to_date().is_none());
    }
}
