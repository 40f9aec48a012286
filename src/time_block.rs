// src/time_block.rs - Time-of-day blocks the playlist API schedules around

use std::fmt;

use chrono::{Local, Timelike};

/// One of the six four-hour windows the backend maps playlists onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeBlock {
    EarlyMorning,
    Morning,
    Afternoon,
    Evening,
    Night,
    LateNight,
}

impl TimeBlock {
    /// Every block, in schedule order starting from early morning.
    pub const ALL: [TimeBlock; 6] = [
        TimeBlock::EarlyMorning,
        TimeBlock::Morning,
        TimeBlock::Afternoon,
        TimeBlock::Evening,
        TimeBlock::Night,
        TimeBlock::LateNight,
    ];

    /// Label used in API payloads (`time_block` fields).
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeBlock::EarlyMorning => "early-morning",
            TimeBlock::Morning => "morning",
            TimeBlock::Afternoon => "afternoon",
            TimeBlock::Evening => "evening",
            TimeBlock::Night => "night",
            TimeBlock::LateNight => "late-night",
        }
    }

    /// Half-open hour window `[start, end)` for this block. Late night wraps
    /// midnight, so its range reads 0..4.
    pub fn hour_range(&self) -> (u32, u32) {
        match self {
            TimeBlock::EarlyMorning => (4, 8),
            TimeBlock::Morning => (8, 12),
            TimeBlock::Afternoon => (12, 16),
            TimeBlock::Evening => (16, 20),
            TimeBlock::Night => (20, 24),
            TimeBlock::LateNight => (0, 4),
        }
    }

    /// Whether `hour` falls inside this block's window. Handles windows that
    /// wrap past midnight the same way the backend schedule does.
    pub fn contains_hour(&self, hour: u32) -> bool {
        let (start, end) = self.hour_range();
        if start > end {
            hour >= start || hour < end
        } else {
            hour >= start && hour < end
        }
    }

    /// The block an hour of the day belongs to.
    pub fn for_hour(hour: u32) -> TimeBlock {
        let hour = hour % 24;
        for block in TimeBlock::ALL {
            if block.contains_hour(hour) {
                return block;
            }
        }
        // The six windows cover all 24 hours, so this is unreachable; the
        // backend defaults to early morning and we mirror that.
        TimeBlock::EarlyMorning
    }

    /// The block the local clock is in right now.
    pub fn current() -> TimeBlock {
        TimeBlock::for_hour(Local::now().hour())
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
