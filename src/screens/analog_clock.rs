//! Analog clock screen.

use super::{RedrawTimer, Screen, ScreenAction, ScreenContext, ScreenInfo};
use crate::hal::{Color, Display, Font};
use crate::input::InputEvent;
use chrono::{Local, NaiveTime, Timelike};
use std::time::Instant;

const FACE_RADIUS: f32 = 130.0;
const HOUR_HAND: f32 = 60.0;
const MINUTE_HAND: f32 = 90.0;
const SECOND_HAND: f32 = 100.0;

/// Hand angles in degrees, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub fn at(time: NaiveTime) -> Self {
        let (h, m, s) = (time.hour() as f32, time.minute() as f32, time.second() as f32);

        Self {
            hour: (h % 12.0 + m / 60.0) * 30.0,
            minute: (m + s / 60.0) * 6.0,
            second: s * 6.0,
        }
    }
}

/// Point at `radius` along `angle` (degrees from 12 o'clock), screen coordinates.
fn polar(angle: f32, radius: f32) -> (i32, i32) {
    let rad = angle.to_radians();
    ((radius * rad.sin()).round() as i32, (-radius * rad.cos()).round() as i32)
}

pub struct AnalogClockScreen {
    info: ScreenInfo,
    timer: RedrawTimer,
}

impl AnalogClockScreen {
    pub fn new(info: ScreenInfo) -> Self {
        Self {
            info,
            timer: RedrawTimer::default(),
        }
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    fn draw_at(&self, display: &mut dyn Display, time: NaiveTime) {
        display.set_background_color(Color::BLACK);

        for (label, angle) in [("12", 0.0), ("3", 90.0), ("6", 180.0), ("9", 270.0)] {
            let (x, y) = polar(angle, FACE_RADIUS);
            display.draw_text(x, y, label, Color::WHITE, Font::H2);
        }

        let hands = HandAngles::at(time);
        for (angle, length, mark, color) in [
            (hands.hour, HOUR_HAND, "H", Color::WHITE),
            (hands.minute, MINUTE_HAND, "M", Color::WHITE),
            (hands.second, SECOND_HAND, "s", Color::RED),
        ] {
            let (x, y) = polar(angle, length);
            display.draw_text(x, y, mark, color, Font::Default);
        }

        display.draw_text(0, 0, "+", Color::RED, Font::Default);
    }
}

impl Screen for AnalogClockScreen {
    fn info(&self) -> &ScreenInfo {
        &self.info
    }

    fn render(&self, display: &mut dyn Display, _ctx: &ScreenContext<'_>) {
        self.draw_at(display, Local::now().time());
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
