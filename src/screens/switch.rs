//! Switch screen: a two-option selector (toggle the bound switch, or go back).

use super::{Screen, ScreenAction, ScreenContext, ScreenInfo, ROTARY_THRESHOLD};
use crate::hal::{Color, Display, Font};
use crate::input::InputEvent;
use crate::integrations::SwitchState;

/// Longest name drawn in the title.
const TITLE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchOption {
    #[default]
    Toggle,
    Back,
}

pub struct SwitchScreen {
    info: ScreenInfo,
    selected: SwitchOption,
    state: SwitchState,
    accumulator: i32,
}

impl SwitchScreen {
    pub fn new(info: ScreenInfo) -> Self {
        Self {
            info,
            selected: SwitchOption::Toggle,
            state: SwitchState::Off,
            accumulator: 0,
        }
    }

    pub fn selected(&self) -> SwitchOption {
        self.selected
    }

    /// Locally cached state of the bound switch.
    pub fn state(&self) -> SwitchState {
        self.state
    }

    fn on_rotary(&mut self, delta: i32) {
        self.accumulator -= delta;

        if self.accumulator >= ROTARY_THRESHOLD {
            self.selected = SwitchOption::Back;
            self.accumulator = 0;
        } else if self.accumulator <= -ROTARY_THRESHOLD {
            self.selected = SwitchOption::Toggle;
            self.accumulator = 0;
        }
    }

    fn toggle(&mut self, ctx: &ScreenContext<'_>) -> ScreenAction {
        if self.info.integration_id.is_empty() {
            tracing::warn!("Switch screen '{}' has no integration bound", self.info.id);
            return ScreenAction::None;
        }

        let Some(switch) = ctx.integrations.get_switch(&self.info.integration_id) else {
            tracing::warn!(
                "Switch screen '{}': no switch for integration '{}'",
                self.info.id,
                self.info.integration_id
            );
            return ScreenAction::None;
        };

        self.state = self.state.toggled();
        tracing::info!("Switch '{}' turned {}", self.info.name, self.state);

        match self.state {
            SwitchState::On => switch.turn_on(),
            SwitchState::Off => switch.turn_off(),
        }

        ScreenAction::Redraw
    }
}

impl Screen for SwitchScreen {
    fn info(&self) -> &ScreenInfo {
        &self.info
    }

    fn render(&self, display: &mut dyn Display, _ctx: &ScreenContext<'_>) {
        display.set_background_color(Color::BLACK);

        let title: String = self.info.name.chars().take(TITLE_CHARS).collect();
        display.draw_text(40, -100, &title, Color::WHITE, Font::H1);

        // The toggle entry names the action, not the state
        let marker = |option: SwitchOption| if self.selected == option { "> " } else { "  " };
        let action = if self.state.is_on() { "Off" } else { "On" };

        display.draw_text(
            60,
            0,
            &format!("{}{}", marker(SwitchOption::Toggle), action),
            Color::WHITE,
            Font::H2,
        );
        display.draw_text(
            60,
            20,
            &format!("{}Back", marker(SwitchOption::Back)),
            Color::WHITE,
            Font::H2,
        );
    }

    fn handle_input_event(&mut self, event: &InputEvent, ctx: &ScreenContext<'_>) -> ScreenAction {
        if let Some(delta) = event.rotary_delta() {
            self.on_rotary(delta);
            return ScreenAction::Redraw;
        }

        if !event.is_button_press() {
            return ScreenAction::None;
        }

        ctx.beeper.click();

        match self.selected {
            SwitchOption::Toggle => self.toggle(ctx),
            SwitchOption::Back => {
                self.selected = SwitchOption::Toggle;
                self.accumulator = 0;
                ScreenAction::GoToPrevious
            }
        }
    }

    fn on_change_focus(&mut self, focused: bool, ctx: &ScreenContext<'_>) {
        if !focused {
            return;
        }

        self.accumulator = 0;
        if let Some(switch) = ctx.integrations.get_switch(&self.info.integration_id) {
            self.state = switch.get_state();
        }
    }
}
