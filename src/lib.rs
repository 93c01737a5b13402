//! Cuckoo Panel - smart-home wall panel firmware
//!
//! Drives a small round display with a rotary encoder and a push button.
//! Hardware input is polled on a background thread and bridged into a
//! single-threaded main loop, which routes it to the focused screen; screens
//! act on remote Home Assistant entities.

pub mod config;
pub mod hal;
pub mod input;
pub mod integrations;
pub mod screens;

// Re-export commonly used types
pub use config::PanelConfig;
pub use input::{EventQueue, InputEvent, InputSource};
pub use integrations::IntegrationRegistry;
pub use screens::{NavigationController, ScreenContext, ScreenRegistry};
