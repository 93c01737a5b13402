//! Screens and navigation.
//!
//! A screen is one navigable UI state. Screens never call the navigation
//! controller directly: input handling returns a [`ScreenAction`] which the
//! [`NavigationController`] applies after the screen call returns.

pub mod analog_clock;
pub mod dimmer;
pub mod home;
pub mod menu;
pub mod navigation;
pub mod registry;
pub mod switch;

use crate::config::string_field;
use crate::hal::{Beeper, Display, SensorSource};
use crate::input::InputEvent;
use crate::integrations::IntegrationRegistry;
use serde_json::Value;
use std::str::FromStr;
use std::time::{Duration, Instant};

pub use analog_clock::AnalogClockScreen;
pub use dimmer::DimmerScreen;
pub use home::HomeScreen;
pub use menu::{MenuIcon, MenuItem, MenuScreen};
pub use navigation::NavigationController;
pub use registry::ScreenRegistry;
pub use switch::SwitchScreen;

/// Rotary units needed to move a selection by one entry.
pub const ROTARY_THRESHOLD: i32 = 100;

/// Redraw period of clock-like screens while focused.
pub const REDRAW_PERIOD: Duration = Duration::from_millis(250);

/// Screen type, decoded once from the descriptor's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Home,
    Menu,
    Switch,
    Dimmer,
    AnalogClock,
}

impl ScreenKind {
    /// Name used when the descriptor has none.
    pub fn default_name(self) -> &'static str {
        match self {
            ScreenKind::Home => "Home",
            ScreenKind::Menu => "Menu",
            ScreenKind::Switch => "Switch",
            ScreenKind::Dimmer => "Dimmer",
            ScreenKind::AnalogClock => "Analog Clock",
        }
    }
}

impl FromStr for ScreenKind {
    type Err = String;

    /// Case-insensitive; `_`, `-` and spaces are ignored (`analog_clock`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "home" => Ok(ScreenKind::Home),
            "menu" => Ok(ScreenKind::Menu),
            "switch" => Ok(ScreenKind::Switch),
            "dimmer" => Ok(ScreenKind::Dimmer),
            "analogclock" => Ok(ScreenKind::AnalogClock),
            _ => Err(format!("unknown screen type '{}'", s)),
        }
    }
}

/// Identity and wiring shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenInfo {
    /// Unique id (defaults to the name)
    pub id: String,
    /// Display name
    pub name: String,
    /// Forward target; empty means "go back instead"
    pub next_screen_id: String,
    /// Bound integration; empty means unbound
    pub integration_id: String,
    pub kind: ScreenKind,
}

impl ScreenInfo {
    pub fn new(kind: ScreenKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            next_screen_id: String::new(),
            integration_id: String::new(),
            kind,
        }
    }

    pub fn with_next_screen(mut self, next_screen_id: impl Into<String>) -> Self {
        self.next_screen_id = next_screen_id.into();
        self
    }

    pub fn with_integration(mut self, integration_id: impl Into<String>) -> Self {
        self.integration_id = integration_id.into();
        self
    }

    /// Read the common fields of a screen descriptor.
    pub fn from_descriptor(kind: ScreenKind, descriptor: &Value) -> Self {
        let name = string_field(descriptor, "name")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| kind.default_name().to_string());
        let id = string_field(descriptor, "id")
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| name.clone());

        Self {
            id,
            name,
            next_screen_id: string_field(descriptor, "nextScreenId").unwrap_or_default(),
            integration_id: string_field(descriptor, "integrationId").unwrap_or_default(),
            kind,
        }
    }

    pub fn has_next_screen(&self) -> bool {
        !self.next_screen_id.is_empty()
    }

    /// Forward if a next screen is configured, back otherwise.
    pub fn next_or_back(&self) -> ScreenAction {
        if self.has_next_screen() {
            ScreenAction::GoToNext(self.next_screen_id.clone())
        } else {
            ScreenAction::GoToPrevious
        }
    }
}

/// What a screen asks the navigation controller to do after an input event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenAction {
    #[default]
    None,
    /// Local state changed, render again
    Redraw,
    /// Navigate forward to the screen with this id
    GoToNext(String),
    /// Pop history
    GoToPrevious,
}

/// Collaborators handed to screens on every call.
#[derive(Clone, Copy)]
pub struct ScreenContext<'a> {
    pub integrations: &'a IntegrationRegistry,
    pub beeper: &'a dyn Beeper,
    pub sensors: &'a dyn SensorSource,
}

/// One navigable UI state.
pub trait Screen {
    fn info(&self) -> &ScreenInfo;

    fn id(&self) -> &str {
        &self.info().id
    }

    /// Draw the current state.
    fn render(&self, display: &mut dyn Display, ctx: &ScreenContext<'_>);

    /// React to one input event while focused.
    fn handle_input_event(&mut self, event: &InputEvent, ctx: &ScreenContext<'_>) -> ScreenAction;

    /// Focus gained (`true`) or lost (`false`).
    fn on_change_focus(&mut self, _focused: bool, _ctx: &ScreenContext<'_>) {}

    /// Advance periodic work. Returns true when a redraw is due.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }
}

/// Periodic redraw trigger that only runs while its screen has focus.
#[derive(Debug, Clone)]
pub struct RedrawTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for RedrawTimer {
    fn default() -> Self {
        Self::new(REDRAW_PERIOD)
    }
}

impl RedrawTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Whether the timer fired; re-arms itself when it did.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}
