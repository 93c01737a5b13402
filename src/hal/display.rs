//! Text frame display.
//!
//! Pixel rendering lives outside this crate. `TextFrame` records the draw
//! calls of the most recent frame, which is what the emulator prints and what
//! tests assert against.

use super::{Color, Display, Font};

/// One recorded `draw_text` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCommand {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Color,
    pub font: Font,
}

/// Display that keeps the draw commands of the current frame.
#[derive(Debug, Clone)]
pub struct TextFrame {
    background: Color,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFrame {
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Background of the current frame.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Draw commands of the current frame, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Just the text of each draw command.
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.text.as_str()).collect()
    }

    /// Whether any draw command contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.commands.iter().any(|c| c.text.contains(needle))
    }

    /// Number of frames started so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Write the current frame to the log.
    pub fn log_frame(&self) {
        tracing::debug!("--- frame {} (bg #{:06X}) ---", self.frames, self.background.0);
        for command in &self.commands {
            tracing::debug!("  ({:4},{:4}) {}", command.x, command.y, command.text);
        }
    }
}

impl Display for TextFrame {
    fn set_background_color(&mut self, color: Color) {
        self.background = color;
        self.commands.clear();
        self.frames += 1;
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color, font: Font) {
        self.commands.push(DrawCommand {
            x,
            y,
            text: text.to_string(),
            color,
            font,
        });
    }
}
