//! Backlight idle timer.
//!
//! Driven from the main loop: `activate()` on user activity, `tick()` once a
//! second. After `active_seconds` without activity the brightness drops to
//! the minimum.

use crate::config::HalConfig;
use std::path::PathBuf;

/// PIR readings at or above this value count as someone being near.
pub const PROXIMITY_THRESHOLD: i32 = 3;

/// Sysfs-backed backlight with an idle countdown.
#[derive(Debug)]
pub struct Backlight {
    path: PathBuf,
    active_seconds: u32,
    max_brightness: u32,
    min_brightness: u32,
    remaining: u32,
    bright: bool,
}

impl Backlight {
    pub fn new(path: impl Into<PathBuf>, active_seconds: u32, max_brightness: u32, min_brightness: u32) -> Self {
        Self {
            path: path.into(),
            active_seconds,
            max_brightness,
            min_brightness,
            remaining: 0,
            bright: false,
        }
    }

    /// Create from the `hal` config section.
    pub fn from_config(config: &HalConfig) -> Self {
        Self::new(
            &config.backlight_device,
            config.backlight_active_seconds,
            config.backlight_max_brightness,
            config.backlight_min_brightness,
        )
    }

    /// Register activity: go bright and restart the countdown.
    pub fn activate(&mut self) {
        self.remaining = self.active_seconds;
        if !self.bright {
            self.bright = true;
            self.write_brightness(self.max_brightness);
        }
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) {
        if !self.bright {
            return;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.bright = false;
            self.write_brightness(self.min_brightness);
        }
    }

    /// Feed a PIR proximity reading. Returns whether it counted as activity.
    pub fn on_proximity(&mut self, value: i32) -> bool {
        if value < PROXIMITY_THRESHOLD {
            return false;
        }
        self.activate();
        true
    }

    /// Whether the backlight is currently at full brightness.
    pub fn is_active(&self) -> bool {
        self.bright
    }

    /// Seconds left before dimming.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    fn write_brightness(&self, brightness: u32) {
        match std::fs::write(&self.path, format!("{}\n", brightness)) {
            Ok(()) => tracing::debug!("Backlight brightness set to {}", brightness),
            Err(e) => tracing::error!(
                "Failed to set backlight brightness on {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
