//! Day/night phase
//!
//! Splits the day into a daylight window and the night around it, and
//! reports how far through the current half a given time of day is.

use crate::clock::ClockReading;

const HOURS_PER_DAY: f32 = 24.0;

/// Daylight window of the sky
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    sunrise_hour: u8,
    daylight_hours: u8,
}

impl DayWindow {
    /// Sunrise at 06:00, sunset at 18:00
    pub const DEFAULT: Self = Self::new(6, 12);

    /// Create a window starting at `sunrise_hour` and lasting `daylight_hours`
    ///
    /// The sunrise hour wraps into the day. Daylight is clamped to `1..=23`
    /// so both halves of the cycle are non-empty.
    pub const fn new(sunrise_hour: u8, daylight_hours: u8) -> Self {
        let daylight_hours = if daylight_hours < 1 {
            1
        } else if daylight_hours > 23 {
            23
        } else {
            daylight_hours
        };
        Self {
            sunrise_hour: sunrise_hour % 24,
            daylight_hours,
        }
    }

    pub const fn sunrise_hour(self) -> u8 {
        self.sunrise_hour
    }

    pub const fn sunset_hour(self) -> u8 {
        (self.sunrise_hour + self.daylight_hours) % 24
    }

    pub const fn daylight_hours(self) -> u8 {
        self.daylight_hours
    }

    /// Phase of the sky at `time`
    pub fn phase(self, time: ClockReading) -> DayPhase {
        let daylight = f32::from(self.daylight_hours);
        let mut since_sunrise = time.fractional_hour() - f32::from(self.sunrise_hour);
        if since_sunrise < 0.0 {
            since_sunrise += HOURS_PER_DAY;
        }

        if since_sunrise < daylight {
            DayPhase {
                is_day: true,
                t: (since_sunrise / daylight).clamp(0.0, 1.0),
            }
        } else {
            DayPhase {
                is_day: false,
                t: ((since_sunrise - daylight) / (HOURS_PER_DAY - daylight)).clamp(0.0, 1.0),
            }
        }
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Position within the current day or night
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayPhase {
    /// Whether the sun is up
    pub is_day: bool,
    /// Progress through the current half (0.0 = its start, 1.0 = its end)
    pub t: f32,
}

impl DayPhase {
    pub const fn day(t: f32) -> Self {
        Self { is_day: true, t }
    }

    pub const fn night(t: f32) -> Self {
        Self { is_day: false, t }
    }
}
