use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A wall-clock time for an alarm, in 24-hour form. Displays and serializes
/// as zero-padded `HH:MM`.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlarmTimeError {
    #[error("hour {0} is outside 0-23")]
    Hour(u32),
    #[error("minute {0} is outside 0-59")]
    Minute(u32),
    #[error("`{0}` is not a HH:MM time")]
    Format(String),
}

impl AlarmTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, AlarmTimeError> {
        let hour = u8::try_from(hour).ok().filter(|h| *h < 24).ok_or(AlarmTimeError::Hour(hour))?;
        let minute =
            u8::try_from(minute).ok().filter(|m| *m < 60).ok_or(AlarmTimeError::Minute(minute))?;
        Ok(AlarmTime { hour, minute })
    }

    /// Builds a time from a 12-hour clock reading. `pm` adds twelve hours
    /// unless the hour already is 12 or more; `am` turns 12 into 0. Without a
    /// meridiem the hour is taken as-is.
    pub fn from_twelve_hour(
        hour: u32,
        minute: u32,
        meridiem: Option<Meridiem>,
    ) -> Result<Self, AlarmTimeError> {
        let hour = match meridiem {
            Some(Meridiem::Pm) if hour < 12 => hour + 12,
            Some(Meridiem::Am) if hour == 12 => 0,
            _ => hour,
        };
        AlarmTime::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for AlarmTime {
    type Err = AlarmTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || AlarmTimeError::Format(s.to_owned());
        let (hour, minute) = s.split_once(':').ok_or_else(format_error)?;
        let hour = hour.parse().map_err(|_| format_error())?;
        let minute = minute.parse().map_err(|_| format_error())?;
        AlarmTime::new(hour, minute)
    }
}

impl TryFrom<String> for AlarmTime {
    type Error = AlarmTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AlarmTime> for String {
    fn from(value: AlarmTime) -> Self {
        value.to_string()
    }
}
