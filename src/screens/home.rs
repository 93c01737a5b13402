//! Home screen
//!
//! Shows the time and the backplate's temperature and humidity. Redraws
//! periodically while focused.

use super::{RedrawTimer, Screen, ScreenAction, ScreenContext, ScreenInfo};
use crate::hal::{Color, Display, Font};
use crate::input::InputEvent;
use chrono::{Local, NaiveTime};
use serde_json::Value;
use std::time::Instant;

/// Placeholder for readings the sensor source does not have.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Parse `showTempAs`; only the first letter counts (`"f"`, `"F"`,
    /// `"fahrenheit"`). Anything unrecognized is Celsius.
    pub fn from_config(value: &str) -> Self {
        match value.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('f') => TemperatureUnit::Fahrenheit,
            Some('k') => TemperatureUnit::Kelvin,
            _ => TemperatureUnit::Celsius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl TimeFormat {
    /// Parse `timeFormat` (12 or 24).
    pub fn from_config(value: i64) -> Self {
        match value {
            12 => TimeFormat::TwelveHour,
            _ => TimeFormat::TwentyFourHour,
        }
    }
}

pub fn format_time(time: NaiveTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwentyFourHour => time.format("%H:%M:%S").to_string(),
        TimeFormat::TwelveHour => time.format("%-I:%M:%S %p").to_string(),
    }
}

pub fn format_temperature(celsius: Option<f32>, unit: TemperatureUnit) -> String {
    let Some(celsius) = celsius else {
        return NOT_AVAILABLE.to_string();
    };

    match unit {
        TemperatureUnit::Celsius => format!("{:.2} C", celsius),
        TemperatureUnit::Fahrenheit => format!("{} F", (celsius * 1.8) as i64 + 32),
        TemperatureUnit::Kelvin => format!("{:.2} K", celsius + 273.15),
    }
}

pub fn format_humidity(percent: Option<f32>) -> String {
    match percent {
        Some(percent) => format!("{:.2} %", percent),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub struct HomeScreen {
    info: ScreenInfo,
    temperature_unit: TemperatureUnit,
    time_format: TimeFormat,
    timer: RedrawTimer,
}

impl HomeScreen {
    pub fn new(info: ScreenInfo, temperature_unit: TemperatureUnit, time_format: TimeFormat) -> Self {
        Self {
            info,
            temperature_unit,
            time_format,
            timer: RedrawTimer::default(),
        }
    }

    /// Build from a descriptor with optional `showTempAs` / `timeFormat`.
    pub fn from_descriptor(info: ScreenInfo, descriptor: &Value) -> Self {
        let temperature_unit = descriptor
            .get("showTempAs")
            .and_then(Value::as_str)
            .map(TemperatureUnit::from_config)
            .unwrap_or_default();
        let time_format = descriptor
            .get("timeFormat")
            .and_then(Value::as_i64)
            .map(TimeFormat::from_config)
            .unwrap_or_default();

        Self::new(info, temperature_unit, time_format)
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature_unit
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }
}

impl Screen for HomeScreen {
    fn info(&self) -> &ScreenInfo {
        &self.info
    }

    fn render(&self, display: &mut dyn Display, ctx: &ScreenContext<'_>) {
        let now = Local::now().time();

        display.set_background_color(Color::BLACK);
        display.draw_text(60, -40, &self.info.name, Color::WHITE, Font::H1);
        display.draw_text(40, 0, &format_time(now, self.time_format), Color::WHITE, Font::H1);
        display.draw_text(
            0,
            60,
            &format_temperature(ctx.sensors.temperature_c(), self.temperature_unit),
            Color::RED,
            Font::H2,
        );
        display.draw_text(
            0,
            90,
            &format_humidity(ctx.sensors.humidity_percent()),
            Color::BLUE,
            Font::H2,
        );
    }

    fn handle_input_event(&mut self, event: &InputEvent, ctx: &ScreenContext<'_>) -> ScreenAction {
        if !event.is_button_press() {
            return ScreenAction::None;
        }

        ctx.beeper.click();
        self.info.next_or_back()
    }

    fn on_change_focus(&mut self, focused: bool, _ctx: &ScreenContext<'_>) {
        if focused {
            self.timer.start(Instant::now());
        } else {
            self.timer.stop();
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.timer.poll(now)
    }
}
