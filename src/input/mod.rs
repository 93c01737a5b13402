//! Hardware input handling.
//!
//! The panel has two evdev input devices: a push button and a rotary encoder.
//! [`source::InputSource`] polls both on a background thread and hands each
//! [`InputEvent`] to a callback, which normally pushes it into an
//! [`queue::EventQueue`] drained by the main loop.

pub mod emulated;
pub mod queue;
pub mod source;

use thiserror::Error;

pub use queue::{EventQueue, EventSender};
pub use source::{InputSource, PollTiming};

/// Synchronization event type (end of an event packet).
pub const EV_SYN: u16 = 0x00;
/// Key/button event type.
pub const EV_KEY: u16 = 0x01;
/// Relative axis event type (rotary encoders).
pub const EV_REL: u16 = 0x02;
/// Sound event type (beeper output).
pub const EV_SND: u16 = 0x12;
/// Bell sound code.
pub const SND_BELL: u16 = 0x01;
/// Relative dial axis.
pub const REL_DIAL: u16 = 0x07;
/// Key code reported by the panel's push button.
pub const KEY_POWER: u16 = 116;

/// Size in bytes of a kernel `struct input_event` on this target.
#[cfg(unix)]
pub const RAW_EVENT_SIZE: usize = TIMEVAL_SIZE + 8;

#[cfg(unix)]
const TIMEVAL_SIZE: usize = std::mem::size_of::<libc::timeval>();

/// Input-related errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to open {device} input at {path}: {source}")]
    DeviceOpen {
        device: InputDeviceType,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Input polling is already running")]
    AlreadyPolling,

    #[error("Failed to spawn polling thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Which physical device produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDeviceType {
    /// The push button
    Button,
    /// The rotary encoder
    Rotary,
}

impl std::fmt::Display for InputDeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputDeviceType::Button => write!(f, "button"),
            InputDeviceType::Rotary => write!(f, "rotary"),
        }
    }
}

/// One event read from an input device.
///
/// The `event_type`/`code`/`value` triple is passed through verbatim from the
/// kernel; screens interpret it through the helper methods below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Source device
    pub device_type: InputDeviceType,
    /// Kernel event type (`EV_KEY`, `EV_REL`, ...)
    pub event_type: u16,
    /// Kernel event code
    pub code: u16,
    /// Event value: 1/0 for key press/release, signed delta for rotary
    pub value: i32,
}

impl InputEvent {
    /// Create an event from its raw parts.
    pub fn new(device_type: InputDeviceType, event_type: u16, code: u16, value: i32) -> Self {
        Self {
            device_type,
            event_type,
            code,
            value,
        }
    }

    /// A button press as reported by the panel button.
    pub fn button_press() -> Self {
        Self::new(InputDeviceType::Button, EV_KEY, KEY_POWER, 1)
    }

    /// A button release.
    pub fn button_release() -> Self {
        Self::new(InputDeviceType::Button, EV_KEY, KEY_POWER, 0)
    }

    /// A rotary movement by `delta` encoder units.
    pub fn rotary(delta: i32) -> Self {
        Self::new(InputDeviceType::Rotary, EV_REL, REL_DIAL, delta)
    }

    /// The rotary "end of gesture" marker.
    pub fn end_of_gesture() -> Self {
        Self::new(InputDeviceType::Rotary, EV_SYN, 0, 0)
    }

    /// Whether this is the button going down.
    pub fn is_button_press(&self) -> bool {
        self.device_type == InputDeviceType::Button
            && self.event_type == EV_KEY
            && self.code == KEY_POWER
            && self.value == 1
    }

    /// Whether this is a rotary quiescence marker carrying no movement.
    pub fn is_end_of_gesture(&self) -> bool {
        self.device_type == InputDeviceType::Rotary && self.event_type == 0 && self.code == 0
    }

    /// Signed encoder delta for rotary movement events.
    pub fn rotary_delta(&self) -> Option<i32> {
        if self.device_type == InputDeviceType::Rotary && !self.is_end_of_gesture() {
            Some(self.value)
        } else {
            None
        }
    }

    /// Decode a kernel `struct input_event` read from `device_type`.
    ///
    /// Returns `None` for short reads. The timestamp is ignored.
    #[cfg(unix)]
    pub fn decode(device_type: InputDeviceType, bytes: &[u8]) -> Option<Self> {
        if bytes.len() < RAW_EVENT_SIZE {
            return None;
        }

        let body = &bytes[TIMEVAL_SIZE..RAW_EVENT_SIZE];
        let event_type = u16::from_ne_bytes([body[0], body[1]]);
        let code = u16::from_ne_bytes([body[2], body[3]]);
        let value = i32::from_ne_bytes([body[4], body[5], body[6], body[7]]);

        Some(Self::new(device_type, event_type, code, value))
    }
}

/// Encode a kernel `struct input_event` with a zero timestamp.
#[cfg(unix)]
pub fn encode_raw(event_type: u16, code: u16, value: i32) -> [u8; RAW_EVENT_SIZE] {
    let mut buf = [0u8; RAW_EVENT_SIZE];
    buf[TIMEVAL_SIZE..TIMEVAL_SIZE + 2].copy_from_slice(&event_type.to_ne_bytes());
    buf[TIMEVAL_SIZE + 2..TIMEVAL_SIZE + 4].copy_from_slice(&code.to_ne_bytes());
    buf[TIMEVAL_SIZE + 4..RAW_EVENT_SIZE].copy_from_slice(&value.to_ne_bytes());
    buf
}
