//! Navigation controller
//!
//! Tracks the focused screen as the top of a history stack and routes input
//! to it. The stack never pops below its first entry.

use super::{Screen, ScreenAction, ScreenContext, ScreenRegistry};
use crate::hal::Display;
use crate::input::InputEvent;
use std::time::Instant;

pub struct NavigationController {
    screens: ScreenRegistry,
    /// Screen ids, oldest first; the last entry has focus
    history: Vec<String>,
    needs_render: bool,
}

impl NavigationController {
    pub fn new(screens: ScreenRegistry) -> Self {
        Self {
            screens,
            history: Vec::new(),
            needs_render: false,
        }
    }

    pub fn screens(&self) -> &ScreenRegistry {
        &self.screens
    }

    /// Id of the focused screen, `None` before the first transition.
    pub fn current_id(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn current(&self) -> Option<&dyn Screen> {
        self.current_id().and_then(|id| self.screens.get(id))
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Focus the screen `id`, pushing it onto the history.
    ///
    /// Returns false (and changes nothing) if no such screen exists.
    pub fn go_to_next_screen(&mut self, id: &str, ctx: &ScreenContext<'_>) -> bool {
        if !self.screens.contains(id) {
            tracing::error!("Cannot navigate to unknown screen '{}'", id);
            return false;
        }

        self.notify_current(false, ctx);
        self.history.push(id.to_string());
        self.notify_current(true, ctx);
        self.needs_render = true;

        tracing::debug!("Navigated to '{}' (depth {})", id, self.history.len());
        true
    }

    /// Return to the previous screen. A no-op at the root.
    pub fn go_to_previous_screen(&mut self, ctx: &ScreenContext<'_>) -> bool {
        if self.history.len() <= 1 {
            tracing::debug!("Already at the root screen");
            return false;
        }

        self.notify_current(false, ctx);
        self.history.pop();
        self.notify_current(true, ctx);
        self.needs_render = true;

        tracing::debug!(
            "Back to '{}' (depth {})",
            self.current_id().unwrap_or_default(),
            self.history.len()
        );
        true
    }

    /// Forward one input event to the focused screen and apply its action.
    /// Dropped while nothing has focus.
    pub fn process_input_event(&mut self, event: &InputEvent, ctx: &ScreenContext<'_>) {
        let Some(id) = self.history.last() else {
            tracing::debug!("No focused screen, dropping {:?}", event);
            return;
        };
        let Some(screen) = self.screens.get_mut(id) else {
            return;
        };

        let action = screen.handle_input_event(event, ctx);
        self.apply(action, ctx);
    }

    /// Apply a screen's requested action.
    pub fn apply(&mut self, action: ScreenAction, ctx: &ScreenContext<'_>) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Redraw => self.needs_render = true,
            ScreenAction::GoToNext(id) => {
                self.go_to_next_screen(&id, ctx);
            }
            ScreenAction::GoToPrevious => {
                self.go_to_previous_screen(ctx);
            }
        }
    }

    /// Advance the focused screen's timers.
    pub fn tick(&mut self, now: Instant) {
        let Some(id) = self.history.last() else {
            return;
        };

        if let Some(screen) = self.screens.get_mut(id) {
            if screen.tick(now) {
                self.needs_render = true;
            }
        }
    }

    /// Render the focused screen if anything changed. Returns whether it drew.
    pub fn render_if_needed(&mut self, display: &mut dyn Display, ctx: &ScreenContext<'_>) -> bool {
        if !self.needs_render {
            return false;
        }
        self.needs_render = false;

        match self.current() {
            Some(screen) => {
                screen.render(display, ctx);
                true
            }
            None => false,
        }
    }

    fn notify_current(&mut self, focused: bool, ctx: &ScreenContext<'_>) {
        let Some(id) = self.history.last() else {
            return;
        };

        if let Some(screen) = self.screens.get_mut(id) {
            screen.on_change_focus(focused, ctx);
        }
    }
}
