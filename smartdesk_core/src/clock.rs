//! Geometry of the analog clock picker used to choose alarm times.
//!
//! The picker shows one field at a time: hours 1-12 or minutes 0-55 in steps
//! of five. Clicks on the face are turned into values by their angle around
//! the center, and values are turned back into the angle of the hand.
//!
//! Angles handed to the renderer are in degrees, measured clockwise from the
//! 3 o'clock direction in screen coordinates (y grows downwards).

use std::fmt;

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum PickMode {
    Hour,
    Minute,
}

impl PickMode {
    pub fn toggled(self) -> Self {
        match self {
            PickMode::Hour => PickMode::Minute,
            PickMode::Minute => PickMode::Hour,
        }
    }

    /// Degrees between two consecutive units of this field.
    pub fn unit_degrees(self) -> f64 {
        match self {
            PickMode::Hour => 30.0,
            PickMode::Minute => 6.0,
        }
    }

    /// Whether `value` can be picked in this mode.
    pub fn contains(self, value: u8) -> bool {
        match self {
            PickMode::Hour => (1..=12).contains(&value),
            PickMode::Minute => value < 60 && value % 5 == 0,
        }
    }

    /// The values printed on the face.
    pub fn labels(self) -> [u8; 12] {
        match self {
            PickMode::Hour => [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
            PickMode::Minute => [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55],
        }
    }

    /// Length of the hand in percent of the face size.
    pub fn hand_length_percent(self) -> f64 {
        match self {
            PickMode::Hour => 35.0,
            PickMode::Minute => 40.0,
        }
    }
}

impl fmt::Display for PickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PickMode::Hour => "hour",
            PickMode::Minute => "minute",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("{value} is not a valid {mode} value")]
    OutOfRange { mode: PickMode, value: u8 },
}

/// A point in the picker's coordinate space, e.g. pixels relative to its
/// bounding box.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Converts a click at `pointer` on a face centered at `center` into a value
/// of the given mode.
///
/// The click angle is taken clockwise from 12 o'clock. Hours round to the
/// nearest hour, with the top of the face being 12. Minutes first round to
/// the nearest minute and then to the nearest multiple of five, wrapping 60
/// around to 0.
pub fn position_to_value(pointer: Point, center: Point, mode: PickMode) -> u8 {
    let angle = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees() + 90.0;
    let angle = angle.rem_euclid(360.0);

    match mode {
        PickMode::Hour => match (angle / 30.0).round() as u8 {
            0 => 12,
            hour if hour > 12 => 1,
            hour => hour,
        },
        PickMode::Minute => {
            let minute = (angle / 6.0).round() as u8 % 60;
            ((f64::from(minute) / 5.0).round() as u8 * 5) % 60
        }
    }
}

/// The angle at which the hand for `value` is drawn. See the module docs for
/// the angle convention.
pub fn value_to_angle(value: u8, mode: PickMode) -> f64 {
    let value = f64::from(value);
    match mode {
        PickMode::Hour => (value - 3.0) * 30.0,
        PickMode::Minute => (value / 5.0 - 3.0) * 30.0,
    }
}

/// The field a picker edits together with its current value.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ClockSelection {
    mode: PickMode,
    value: u8,
}

impl ClockSelection {
    pub fn new(mode: PickMode, value: u8) -> Result<Self, ClockError> {
        if mode.contains(value) {
            Ok(ClockSelection { mode, value })
        } else {
            Err(ClockError::OutOfRange { mode, value })
        }
    }

    pub fn mode(&self) -> PickMode {
        self.mode
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

/// State of a clock picker: which field is being edited, and the last value
/// chosen for each field. Switching fields never converts values between
/// them.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ClockPicker {
    mode: PickMode,
    hour: u8,
    minute: u8,
}

impl Default for ClockPicker {
    fn default() -> Self {
        ClockPicker { mode: PickMode::Hour, hour: 12, minute: 0 }
    }
}

impl ClockPicker {
    /// Creates a picker editing the hour field.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockError> {
        let hour = ClockSelection::new(PickMode::Hour, hour)?.value;
        let minute = ClockSelection::new(PickMode::Minute, minute)?.value;
        Ok(ClockPicker { mode: PickMode::Hour, hour, minute })
    }

    pub fn mode(&self) -> PickMode {
        self.mode
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn selection(&self) -> ClockSelection {
        let value = match self.mode {
            PickMode::Hour => self.hour,
            PickMode::Minute => self.minute,
        };
        ClockSelection { mode: self.mode, value }
    }

    pub fn switch_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Sets the value of the field being edited.
    pub fn set_value(&mut self, value: u8) -> Result<(), ClockError> {
        let value = ClockSelection::new(self.mode, value)?.value;
        match self.mode {
            PickMode::Hour => self.hour = value,
            PickMode::Minute => self.minute = value,
        }
        Ok(())
    }

    /// Handles a click on the face and returns the value it picked.
    pub fn click(&mut self, pointer: Point, center: Point) -> u8 {
        let value = position_to_value(pointer, center, self.mode);
        match self.mode {
            PickMode::Hour => self.hour = value,
            PickMode::Minute => self.minute = value,
        }
        value
    }

    pub fn hand_angle(&self) -> f64 {
        let ClockSelection { mode, value } = self.selection();
        value_to_angle(value, mode)
    }
}

/// A number printed on the clock face.
#[derive(Debug, PartialEq, Clone)]
pub struct TickLabel {
    pub value: u8,
    /// Two-digit text, e.g. "05".
    pub text: String,
    /// Position of the label's center in percent of the face, from the left.
    pub x_percent: f64,
    /// Position of the label's center in percent of the face, from the top.
    pub y_percent: f64,
}

/// Lays out the twelve labels of a face on a circle of `radius_percent`.
pub fn tick_labels(mode: PickMode, radius_percent: f64) -> Vec<TickLabel> {
    mode.labels()
        .into_iter()
        .map(|value| {
            let angle = (f64::from(value) * mode.unit_degrees() - 90.0).to_radians();
            TickLabel {
                value,
                text: format!("{value:02}"),
                x_percent: 50.0 + radius_percent * angle.cos(),
                y_percent: 50.0 + radius_percent * angle.sin(),
            }
        })
        .collect()
}
