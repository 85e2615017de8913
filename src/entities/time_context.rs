use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// Local calendar date and wall-clock time of a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeContext {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl TimeContext {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parses a `YYYY-MM-DD` date and an `HH:MM` 24-hour time.
    pub fn parse(date: &str, time: &str) -> Result<Self, Error> {
        if date.trim().is_empty() || time.trim().is_empty() {
            return Err(invalid_input_error("date and time are required"));
        }

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| invalid_input_error("date must be YYYY-MM-DD"))?;
        let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
            .map_err(|_| invalid_input_error("time must be HH:MM"))?;

        Ok(Self { date, time })
    }

    pub fn departure(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateClass {
    Day,
    NightOrWeekend,
}

impl RateClass {
    pub fn is_special(&self) -> bool {
        matches!(self, Self::NightOrWeekend)
    }

    /// Picks the value matching this rate class.
    pub fn select<T>(&self, day: T, night_or_weekend: T) -> T {
        match self {
            Self::Day => day,
            Self::NightOrWeekend => night_or_weekend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_and_time() {
        let context = TimeContext::parse("2024-03-15", "07:05").unwrap();

        assert_eq!(context.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(context.time, NaiveTime::from_hms_opt(7, 5, 0).unwrap());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(TimeContext::parse("", "10:00").unwrap_err().is_invalid_input());
        assert!(TimeContext::parse("15/03/2024", "10:00").unwrap_err().is_invalid_input());
        assert!(TimeContext::parse("2024-02-30", "10:00").unwrap_err().is_invalid_input());
        assert!(TimeContext::parse("2024-03-15", "24:00").unwrap_err().is_invalid_input());
        assert!(TimeContext::parse("2024-03-15", "9h30").unwrap_err().is_invalid_input());
    }
}
