//! Evdev input polling.
//!
//! Opens the button and rotary device nodes in non-blocking mode and runs a
//! single background thread that reads both and forwards every event to a
//! callback. The callback runs on the polling thread, so it should do nothing
//! more than hand the event to the main loop.

use super::{InputDeviceType, InputError, InputEvent, RAW_EVENT_SIZE};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Polling loop pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    /// Pause when neither device had data
    pub idle: Duration,
    /// Pause after an event, while the encoder is still bursting
    pub burst: Duration,
}

impl Default for PollTiming {
    fn default() -> Self {
        Self {
            idle: Duration::from_millis(10),
            burst: Duration::from_millis(1),
        }
    }
}

/// Open device handles, owned by whichever side is currently reading them.
#[derive(Debug)]
struct Devices {
    button: File,
    rotary: File,
}

/// Button + rotary encoder input source.
pub struct InputSource {
    button_path: PathBuf,
    rotary_path: PathBuf,
    timing: PollTiming,
    /// Handles while not polling; moved into the thread while polling
    devices: Option<Devices>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<Devices>>,
}

impl InputSource {
    /// Create a source for the given device nodes. Nothing is opened yet.
    pub fn new(button_path: impl Into<PathBuf>, rotary_path: impl Into<PathBuf>) -> Self {
        Self {
            button_path: button_path.into(),
            rotary_path: rotary_path.into(),
            timing: PollTiming::default(),
            devices: None,
            stop: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Override the polling pace.
    pub fn with_timing(mut self, timing: PollTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Whether both devices are open and idle.
    pub fn is_initialized(&self) -> bool {
        self.devices.is_some()
    }

    /// Whether the polling thread is running.
    pub fn is_polling(&self) -> bool {
        self.thread.is_some()
    }

    /// Open both devices in non-blocking mode.
    ///
    /// If the rotary device fails to open, the already opened button handle
    /// is closed before the error is returned.
    pub fn initialize(&mut self) -> Result<(), InputError> {
        if self.thread.is_some() {
            return Err(InputError::AlreadyPolling);
        }

        self.devices = Some(self.open_devices()?);
        Ok(())
    }

    /// Start the polling thread, opening the devices first if needed.
    pub fn start_polling<F>(&mut self, callback: F) -> Result<(), InputError>
    where
        F: FnMut(InputEvent) + Send + 'static,
    {
        if self.thread.is_some() {
            return Err(InputError::AlreadyPolling);
        }

        let devices = match self.devices.take() {
            Some(devices) => devices,
            None => self.open_devices()?,
        };

        self.stop.store(false, Ordering::Release);
        let stop = Arc::clone(&self.stop);
        let timing = self.timing;

        let handle = thread::Builder::new()
            .name("input-poll".to_string())
            .spawn(move || polling_loop(devices, stop, timing, callback))
            .map_err(InputError::Spawn)?;

        self.thread = Some(handle);
        tracing::info!("Input polling started");

        Ok(())
    }

    /// Stop the polling thread and wait for it to exit.
    ///
    /// After this returns the callback will not be invoked again. Calling it
    /// when not polling is a no-op.
    pub fn stop_polling(&mut self) {
        self.stop.store(true, Ordering::Release);

        if let Some(handle) = self.thread.take() {
            match handle.join() {
                Ok(devices) => {
                    self.devices = Some(devices);
                    tracing::info!("Input polling stopped");
                }
                Err(_) => tracing::error!("Input polling thread panicked"),
            }
        }
    }

    fn open_devices(&self) -> Result<Devices, InputError> {
        let button = open_device(InputDeviceType::Button, &self.button_path)?;
        let rotary = open_device(InputDeviceType::Rotary, &self.rotary_path)?;

        tracing::info!(
            "Opened input devices: button={}, rotary={}",
            self.button_path.display(),
            self.rotary_path.display()
        );

        Ok(Devices { button, rotary })
    }
}

impl Drop for InputSource {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

fn open_device(device: InputDeviceType, path: &Path) -> Result<File, InputError> {
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
        .map_err(|source| InputError::DeviceOpen {
            device,
            path: path.display().to_string(),
            source,
        })
}

fn polling_loop<F>(
    mut devices: Devices,
    stop: Arc<AtomicBool>,
    timing: PollTiming,
    mut callback: F,
) -> Devices
where
    F: FnMut(InputEvent),
{
    tracing::debug!("Input polling thread running");

    while !stop.load(Ordering::Acquire) {
        let mut got_event = false;

        if let Some(event) = read_event(&mut devices.button, InputDeviceType::Button) {
            callback(event);
            got_event = true;
        }

        // Encoders emit bursts: after a rotary event only pause briefly, then
        // read both devices again
        if let Some(event) = read_event(&mut devices.rotary, InputDeviceType::Rotary) {
            callback(event);
            thread::sleep(timing.burst);
            continue;
        }

        if !got_event {
            thread::sleep(timing.idle);
        }
    }

    devices
}

/// Try one non-blocking read. Anything but a full event is "no data".
fn read_event(file: &mut File, device_type: InputDeviceType) -> Option<InputEvent> {
    let mut buf = [0u8; RAW_EVENT_SIZE];

    match file.read(&mut buf) {
        Ok(n) if n == RAW_EVENT_SIZE => InputEvent::decode(device_type, &buf),
        Ok(_) => None,
        Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::Interrupted => None,
        Err(e) => {
            tracing::trace!("Read from {} device failed: {}", device_type, e);
            None
        }
    }
}
