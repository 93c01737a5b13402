//! Piezo beeper driven through the evdev sound interface.

use super::Beeper;
use crate::input::{encode_raw, EV_SND, SND_BELL};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Length of a key click.
pub const CLICK_MS: u32 = 5;

/// Bell tone value written to start a beep.
const BELL_ON: i32 = 3;

/// Beeper behind an evdev node accepting `EV_SND` events.
#[derive(Debug, Clone)]
pub struct EvdevBeeper {
    path: PathBuf,
}

impl EvdevBeeper {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn beep(&self, duration: Duration) -> std::io::Result<()> {
        let mut device = OpenOptions::new().write(true).open(&self.path)?;

        device.write_all(&encode_raw(EV_SND, SND_BELL, BELL_ON))?;
        std::thread::sleep(duration);
        device.write_all(&encode_raw(EV_SND, SND_BELL, 0))?;

        Ok(())
    }
}

impl Beeper for EvdevBeeper {
    fn play(&self, duration_ms: u32) {
        if let Err(e) = self.beep(Duration::from_millis(duration_ms as u64)) {
            tracing::error!("Failed to beep on {}: {}", self.path.display(), e);
        }
    }

    fn click(&self) {
        self.play(CLICK_MS);
    }
}

/// Beeper that makes no sound (emulated runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBeeper;

impl Beeper for SilentBeeper {
    fn play(&self, duration_ms: u32) {
        tracing::trace!("beep {}ms", duration_ms);
    }

    fn click(&self) {
        tracing::trace!("click");
    }
}
