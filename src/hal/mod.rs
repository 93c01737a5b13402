//! Hardware abstraction layer.
//!
//! Screens only see the narrow collaborator traits defined here. Concrete
//! implementations talk to evdev/sysfs nodes; tests substitute recorders.

pub mod backlight;
pub mod beeper;
pub mod display;
pub mod proximity;

pub use backlight::Backlight;
pub use beeper::{EvdevBeeper, SilentBeeper};
pub use display::{DrawCommand, TextFrame};
pub use proximity::{ProximityFeed, ProximitySender};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x00FF00);
    pub const BLUE: Color = Color(0x0000FF);
}

/// Text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Headline
    H1,
    /// Body / list items
    H2,
    #[default]
    Default,
}

/// Drawing surface. Draw calls are fire-and-forget.
pub trait Display {
    /// Clear the screen to `color`. Starts a new frame.
    fn set_background_color(&mut self, color: Color);

    /// Draw `text` with its origin at (`x`, `y`) relative to screen center.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, font: Font);
}

/// Audible feedback.
pub trait Beeper {
    /// Beep for `duration_ms` milliseconds.
    fn play(&self, duration_ms: u32);

    /// Short key click.
    fn click(&self);
}

/// Environment readings from the backplate.
///
/// PIR proximity is not polled through this trait; the backplate link pushes
/// it through a [`ProximitySender`].
pub trait SensorSource {
    /// Current temperature, if known
    fn temperature_c(&self) -> Option<f32>;

    /// Current relative humidity, if known
    fn humidity_percent(&self) -> Option<f32>;
}

/// Last known sensor values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    pub temperature_c: Option<f32>,
    pub humidity_percent: Option<f32>,
}

impl SensorSource for SensorSnapshot {
    fn temperature_c(&self) -> Option<f32> {
        self.temperature_c
    }

    fn humidity_percent(&self) -> Option<f32> {
        self.humidity_percent
    }
}
