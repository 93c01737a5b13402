//! Keyboard-driven input for running the panel without hardware.
//!
//! Each line on stdin is one command:
//! - `+N` / `-N`: rotate the encoder by N units
//! - empty line or `b`: press the button
//! - `pN`: report PIR proximity reading N
//! - `q`: stop reading

use super::{EventSender, InputError, InputEvent};
use crate::hal::ProximitySender;
use std::io::BufRead;
use std::thread;

/// Rotary units per emulated "notch" when a sign is given without a number.
pub const DEFAULT_STEP: i32 = 10;

/// A parsed emulator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulatorCommand {
    /// Deliver an input event
    Input(InputEvent),
    /// Report a backplate proximity reading
    Proximity(i32),
    /// Stop reading stdin
    Quit,
}

/// Parse one line of emulator input.
pub fn parse_command(line: &str) -> Option<EmulatorCommand> {
    let line = line.trim();

    match line {
        "" | "b" | "B" => return Some(EmulatorCommand::Input(InputEvent::button_press())),
        "q" | "Q" => return Some(EmulatorCommand::Quit),
        "+" => return Some(EmulatorCommand::Input(InputEvent::rotary(DEFAULT_STEP))),
        "-" => return Some(EmulatorCommand::Input(InputEvent::rotary(-DEFAULT_STEP))),
        _ => {}
    }

    if let Some(reading) = line.strip_prefix(['p', 'P']) {
        return reading.trim().parse().ok().map(EmulatorCommand::Proximity);
    }

    line.parse::<i32>()
        .ok()
        .filter(|delta| *delta != 0)
        .map(|delta| EmulatorCommand::Input(InputEvent::rotary(delta)))
}

/// Spawn a thread feeding stdin commands into the event queue and the
/// proximity feed.
pub fn spawn_stdin_reader(
    sender: EventSender,
    proximity: ProximitySender,
) -> Result<thread::JoinHandle<()>, InputError> {
    thread::Builder::new()
        .name("stdin-input".to_string())
        .spawn(move || {
            tracing::info!(
                "Emulated input: '+N'/'-N' rotate, empty line presses, 'pN' proximity, 'q' stops"
            );

            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };

                match parse_command(&line) {
                    Some(EmulatorCommand::Input(event)) => {
                        sender.push(event);
                    }
                    Some(EmulatorCommand::Proximity(value)) => {
                        proximity.report(value);
                    }
                    Some(EmulatorCommand::Quit) => break,
                    None => tracing::warn!("Unrecognized emulator command: {:?}", line),
                }
            }

            tracing::info!("Emulated input stopped");
        })
        .map_err(InputError::Spawn)
}
