use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::entities::{RateClass, TimeContext};

/// Night window `[night_start_hour, 24) ∪ [0, night_end_hour)`, optionally
/// extended to whole weekends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateClassifier {
    pub night_start_hour: u32,
    pub night_end_hour: u32,
    pub weekends: bool,
}

impl RateClassifier {
    pub fn new(night_start_hour: u32, night_end_hour: u32) -> Self {
        Self {
            night_start_hour,
            night_end_hour,
            weekends: true,
        }
    }

    pub fn classify(&self, context: &TimeContext) -> RateClass {
        let hour = context.time.hour();
        let is_night = hour >= self.night_start_hour || hour < self.night_end_hour;
        let is_weekend = matches!(context.date.weekday(), Weekday::Sat | Weekday::Sun);

        if is_night || (self.weekends && is_weekend) {
            RateClass::NightOrWeekend
        } else {
            RateClass::Day
        }
    }
}
