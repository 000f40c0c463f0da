//! Circular time-of-day windows over the minute buckets.

use std::ops::Range;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::traffic::buckets::MinuteBuckets;
use crate::traffic::clock::{MINUTES_PER_DAY, format_minute};
use crate::traffic::types::Trip;

/// Half-width used by the slider: a 120-minute window.
pub const DEFAULT_HALF_WIDTH: u16 = 60;

/// Control value meaning "no time filter".
pub const ANY_TIME: i32 = -1;

const DAY: usize = MINUTES_PER_DAY as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeWindow {
    Unbounded,
    Centered { minute: u16, half_width: u16 },
}

impl TimeWindow {
    /// Maps the slider's control value onto a window.
    ///
    /// `-1` selects the whole day; `0..=1439` centers a window on that minute.
    ///
    /// # Errors
    ///
    /// Any other value is rejected rather than wrapped.
    pub fn from_query(query_minute: i32, half_width: u16) -> Result<Self> {
        match query_minute {
            ANY_TIME => Ok(TimeWindow::Unbounded),
            m if (0..MINUTES_PER_DAY as i32).contains(&m) => Ok(TimeWindow::Centered {
                minute: m as u16,
                half_width,
            }),
            m => bail!("query minute {m} is outside 0..=1439 and is not {ANY_TIME}"),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, TimeWindow::Unbounded)
    }

    pub fn label(&self) -> String {
        match self {
            TimeWindow::Unbounded => "any time".to_string(),
            TimeWindow::Centered { minute, .. } => format_minute(*minute),
        }
    }

    /// Slot ranges covered by the window, in slot order starting at the
    /// window's lower edge. A window crossing midnight yields two ranges.
    pub fn slot_ranges(&self) -> Vec<Range<usize>> {
        let (minute, half_width) = match *self {
            TimeWindow::Unbounded => return vec![0..DAY],
            TimeWindow::Centered { minute, half_width } => {
                (minute as usize, half_width as usize)
            }
        };

        if 2 * half_width >= DAY {
            return vec![0..DAY];
        }
        if half_width == 0 {
            return Vec::new();
        }

        let lo = (minute + DAY - half_width) % DAY;
        let hi = (minute + half_width) % DAY;

        if lo <= hi {
            vec![lo..hi]
        } else {
            vec![lo..DAY, 0..hi]
        }
    }

    /// Whether `slot` falls in the window: `[minute - h, minute + h)` taken
    /// modulo one day.
    pub fn contains(&self, slot: u16) -> bool {
        match *self {
            TimeWindow::Unbounded => true,
            TimeWindow::Centered { minute, half_width } => {
                let (h, day) = (half_width as usize, DAY);
                if 2 * h >= day {
                    return true;
                }
                let offset = (slot as usize % day + day - minute as usize) % day;
                offset < h || offset >= day - h
            }
        }
    }
}

/// Trips in `buckets` whose minute lies inside `window`.
pub fn select<'a>(buckets: MinuteBuckets<'a>, window: &TimeWindow) -> Vec<&'a Trip> {
    let mut selected = Vec::new();
    for range in window.slot_ranges() {
        for minute in range {
            selected.extend(buckets.slot(minute));
        }
    }
    selected
}
