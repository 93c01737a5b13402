//! Dimmer screen
//!
//! Rotary deltas map one-to-one onto a fine-grained brightness value; the
//! button commits the percentage to the bound dimmer.

use super::{Screen, ScreenAction, ScreenContext, ScreenInfo};
use crate::hal::{Color, Display, Font};
use crate::input::InputEvent;

/// Raw units per brightness percent.
pub const DIMMER_STEP: i32 = 50;

pub const MAX_PERCENT: i32 = 100;

/// Brightness shown before the first sync.
const DEFAULT_PERCENT: i32 = 50;

const COMMIT_BEEP_MS: u32 = 100;

pub struct DimmerScreen {
    info: ScreenInfo,
    /// Brightness in `DIMMER_STEP` units per percent
    value: i32,
}

impl DimmerScreen {
    pub fn new(info: ScreenInfo) -> Self {
        Self {
            info,
            value: DEFAULT_PERCENT * DIMMER_STEP,
        }
    }

    /// Raw brightness value.
    pub fn raw_value(&self) -> i32 {
        self.value
    }

    /// Set the raw value, clamped to the valid range.
    pub fn set_raw_value(&mut self, value: i32) {
        self.value = value.clamp(0, MAX_PERCENT * DIMMER_STEP);
    }

    /// Brightness in percent.
    pub fn percent(&self) -> i32 {
        self.value / DIMMER_STEP
    }

    fn sync_from_entity(&mut self, ctx: &ScreenContext<'_>) {
        let Some(dimmer) = ctx.integrations.get_dimmer(&self.info.integration_id) else {
            tracing::warn!(
                "Dimmer screen '{}': no dimmer for integration '{}'",
                self.info.id,
                self.info.integration_id
            );
            return;
        };

        let brightness = dimmer.get_brightness() as i32;
        let value = if dimmer.get_state().is_on() {
            brightness * DIMMER_STEP
        } else {
            0
        };
        self.set_raw_value(value);

        tracing::debug!("Dimmer screen '{}' synced to {}%", self.info.id, self.percent());
    }

    fn commit(&self, ctx: &ScreenContext<'_>) {
        match ctx.integrations.get_dimmer(&self.info.integration_id) {
            Some(dimmer) => {
                tracing::info!("Setting '{}' to {}%", dimmer.name(), self.percent());
                dimmer.set_brightness(self.percent());
            }
            None => tracing::warn!(
                "Dimmer screen '{}': no dimmer for integration '{}', ignoring",
                self.info.id,
                self.info.integration_id
            ),
        }
    }
}

impl Screen for DimmerScreen {
    fn info(&self) -> &ScreenInfo {
        &self.info
    }

    fn render(&self, display: &mut dyn Display, _ctx: &ScreenContext<'_>) {
        display.set_background_color(Color::BLACK);
        display.draw_text(60, -40, &self.info.name, Color::WHITE, Font::H1);
        display.draw_text(100, 0, &format!("{}%", self.percent()), Color::WHITE, Font::H2);
    }

    fn handle_input_event(&mut self, event: &InputEvent, ctx: &ScreenContext<'_>) -> ScreenAction {
        if let Some(delta) = event.rotary_delta() {
            self.set_raw_value(self.value.saturating_sub(delta));
            return ScreenAction::Redraw;
        }

        if event.is_button_press() {
            ctx.beeper.play(COMMIT_BEEP_MS);
            self.commit(ctx);
            return self.info.next_or_back();
        }

        ScreenAction::None
    }

    fn on_change_focus(&mut self, focused: bool, ctx: &ScreenContext<'_>) {
        if focused {
            self.sync_from_entity(ctx);
        }
    }
}
