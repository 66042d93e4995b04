use std::fmt;

use super::{Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolutionChanged {
    pub resolution: Resolution,
    pub timestamp: Timestamp,
}

impl ResolutionChanged {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            timestamp: now(),
        }
    }
}

/// Settings committed from the settings screen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SettingsApplied {
    pub resolution: Resolution,
    pub fullscreen: bool,
    /// Volumes are linear gain in `0.0..=1.0`.
    pub master_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub timestamp: Timestamp,
}

impl SettingsApplied {
    pub fn new(
        resolution: Resolution,
        fullscreen: bool,
        master_volume: f32,
        music_volume: f32,
        sfx_volume: f32,
    ) -> Self {
        Self {
            resolution,
            fullscreen,
            master_volume: master_volume.clamp(0.0, 1.0),
            music_volume: music_volume.clamp(0.0, 1.0),
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            timestamp: now(),
        }
    }
}
