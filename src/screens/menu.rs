//! Menu screen
//!
//! A vertical list of items selected with the rotary encoder. Besides the
//! configured items the menu carries synthetic navigation entries: a leading
//! "Previous" when a next screen is configured, and a trailing "Next" (forward
//! to the next screen) or "Back" (pop history).

use super::{Screen, ScreenAction, ScreenContext, ScreenInfo, ROTARY_THRESHOLD};
use crate::config::string_field;
use crate::hal::{Color, Display, Font};
use crate::input::InputEvent;
use serde_json::Value;
use std::str::FromStr;

/// Beep length on activation.
const ACTIVATE_BEEP_MS: u32 = 100;

/// Row height of list items.
const ROW_HEIGHT: i32 = 25;

/// Items further than this from the selection are drawn off-screen.
const VISIBLE_ROWS: usize = 3;

/// Icon shown next to a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuIcon {
    #[default]
    None,
    Ok,
    Close,
    Home,
    Power,
    Settings,
    Gps,
    Bluetooth,
    Wifi,
    Usb,
    Bell,
    Warning,
    Trash,
    Briefcase,
    Light,
    Fan,
    Temperature,
    Stop,
    Left,
    Right,
    Plus,
    Up,
    Down,
}

impl MenuIcon {
    /// Parse an icon name, falling back to [`MenuIcon::None`].
    pub fn parse_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            if !name.is_empty() {
                tracing::warn!("Unknown menu icon '{}'", name);
            }
            MenuIcon::None
        })
    }
}

impl FromStr for MenuIcon {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let icon = match s.to_ascii_lowercase().as_str() {
            "none" => MenuIcon::None,
            "ok" => MenuIcon::Ok,
            "close" => MenuIcon::Close,
            "home" => MenuIcon::Home,
            "power" => MenuIcon::Power,
            "settings" => MenuIcon::Settings,
            "gps" => MenuIcon::Gps,
            "bluetooth" => MenuIcon::Bluetooth,
            "wifi" => MenuIcon::Wifi,
            "usb" => MenuIcon::Usb,
            "bell" => MenuIcon::Bell,
            "warning" => MenuIcon::Warning,
            "trash" => MenuIcon::Trash,
            "briefcase" => MenuIcon::Briefcase,
            "light" => MenuIcon::Light,
            "fan" => MenuIcon::Fan,
            "temperature" => MenuIcon::Temperature,
            "stop" => MenuIcon::Stop,
            "left" => MenuIcon::Left,
            "right" => MenuIcon::Right,
            "plus" => MenuIcon::Plus,
            "up" => MenuIcon::Up,
            "down" => MenuIcon::Down,
            _ => return Err(()),
        };
        Ok(icon)
    }
}

/// One entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub target_screen_id: String,
    pub icon: MenuIcon,
    /// Activating this item pops history instead of navigating forward
    pub is_previous: bool,
}

impl MenuItem {
    /// A forward item. An empty target means "the screen named like this item".
    pub fn new(name: impl Into<String>, target_screen_id: impl Into<String>, icon: MenuIcon) -> Self {
        let name = name.into();
        let mut target_screen_id = target_screen_id.into();
        if target_screen_id.is_empty() {
            target_screen_id = name.clone();
        }

        Self {
            name,
            target_screen_id,
            icon,
            is_previous: false,
        }
    }

    /// An item that pops history.
    pub fn previous(name: impl Into<String>, icon: MenuIcon) -> Self {
        Self {
            name: name.into(),
            target_screen_id: String::new(),
            icon,
            is_previous: true,
        }
    }

    /// Parse a `menuItems` entry. Entries without a name are rejected.
    pub fn from_descriptor(descriptor: &Value) -> Option<Self> {
        let name = string_field(descriptor, "name").filter(|name| !name.is_empty())?;
        let target = string_field(descriptor, "nextScreenId").unwrap_or_default();
        let icon = descriptor
            .get("icon")
            .and_then(Value::as_str)
            .map(MenuIcon::parse_lossy)
            .unwrap_or_default();

        Some(Self::new(name, target, icon))
    }
}

pub struct MenuScreen {
    info: ScreenInfo,
    items: Vec<MenuItem>,
    selected: usize,
    accumulator: i32,
}

impl MenuScreen {
    /// Build a menu around the configured items, adding navigation entries.
    pub fn new(info: ScreenInfo, configured: Vec<MenuItem>) -> Self {
        let mut items = Vec::with_capacity(configured.len() + 2);

        if info.has_next_screen() {
            items.push(MenuItem::previous("Previous", MenuIcon::Left));
        }

        items.extend(configured);

        if info.has_next_screen() {
            items.push(MenuItem::new(
                "Next",
                info.next_screen_id.clone(),
                MenuIcon::Right,
            ));
        } else {
            items.push(MenuItem::previous("Back", MenuIcon::Left));
        }

        Self {
            info,
            items,
            selected: 0,
            accumulator: 0,
        }
    }

    /// Build from a screen descriptor with an optional `menuItems` array.
    pub fn from_descriptor(info: ScreenInfo, descriptor: &Value) -> Self {
        let configured = match descriptor.get("menuItems") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| {
                    let item = MenuItem::from_descriptor(entry);
                    if item.is_none() {
                        tracing::warn!("Menu '{}': skipping invalid item {}", info.id, entry);
                    }
                    item
                })
                .collect(),
            Some(_) => {
                tracing::warn!("Menu '{}': menuItems is not an array", info.id);
                Vec::new()
            }
            None => Vec::new(),
        };

        Self::new(info, configured)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn accumulator(&self) -> i32 {
        self.accumulator
    }

    fn on_rotary(&mut self, delta: i32) {
        let last = self.items.len().saturating_sub(1);
        self.accumulator -= delta;

        if self.accumulator >= ROTARY_THRESHOLD {
            self.selected = (self.selected + 1).min(last);
            self.accumulator = 0;
        } else if self.accumulator <= -ROTARY_THRESHOLD {
            self.selected = self.selected.saturating_sub(1);
            self.accumulator = 0;
        } else if (self.accumulator > 0 && self.selected >= last)
            || (self.accumulator < 0 && self.selected == 0)
        {
            // Already at the end in that direction
            self.accumulator = 0;
        }

        tracing::debug!(
            "Menu '{}': selected {} (accumulator {})",
            self.info.id,
            self.selected,
            self.accumulator
        );
    }

    fn activate(&mut self, ctx: &ScreenContext<'_>) -> ScreenAction {
        ctx.beeper.play(ACTIVATE_BEEP_MS);

        let Some(item) = self.items.get(self.selected) else {
            return ScreenAction::None;
        };

        if item.is_previous {
            self.selected = 0;
            self.accumulator = 0;
            ScreenAction::GoToPrevious
        } else {
            ScreenAction::GoToNext(item.target_screen_id.clone())
        }
    }
}

impl Screen for MenuScreen {
    fn info(&self) -> &ScreenInfo {
        &self.info
    }

    fn render(&self, display: &mut dyn Display, _ctx: &ScreenContext<'_>) {
        display.set_background_color(Color::BLACK);
        display.draw_text(60, -100, &self.info.name, Color::WHITE, Font::H1);

        for (idx, item) in self.items.iter().enumerate() {
            let label = if idx == self.selected {
                format!("> {}", item.name)
            } else {
                item.name.clone()
            };

            let mut y = (idx as i32 - self.selected as i32) * ROW_HEIGHT;
            if idx.abs_diff(self.selected) > VISIBLE_ROWS {
                y += 200;
            }

            display.draw_text(60, y, &label, Color::WHITE, Font::H2);
        }
    }

    fn handle_input_event(&mut self, event: &InputEvent, ctx: &ScreenContext<'_>) -> ScreenAction {
        if let Some(delta) = event.rotary_delta() {
            self.on_rotary(delta);
            return ScreenAction::Redraw;
        }

        if event.is_button_press() {
            return self.activate(ctx);
        }

        ScreenAction::None
    }

    fn on_change_focus(&mut self, focused: bool, _ctx: &ScreenContext<'_>) {
        if focused {
            self.accumulator = 0;
        }
    }
}
