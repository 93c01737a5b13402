//! Panel main loop.
//!
//! Owns every long-lived component. Each iteration drains the input queue into
//! the navigation controller, advances timers and renders when something
//! changed. The backlight is ticked once per second of loop iterations,
//! counted from the last activity.

use anyhow::Context;
use cuckoo_panel::config::PanelConfig;
use cuckoo_panel::hal::{
    Backlight, Beeper, EvdevBeeper, ProximityFeed, SensorSnapshot, SilentBeeper, TextFrame,
};
use cuckoo_panel::input::emulated::spawn_stdin_reader;
use cuckoo_panel::input::{EventQueue, InputSource};
use cuckoo_panel::integrations::{HttpTransport, IntegrationRegistry};
use cuckoo_panel::screens::{NavigationController, ScreenContext, ScreenRegistry};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Main loop period.
pub const LOOP_PERIOD: Duration = Duration::from_millis(5);

/// Loop iterations per backlight tick (one second).
pub const TICKS_PER_SECOND: u32 = 200;

/// Screen focused at startup.
pub const INITIAL_SCREEN: &str = "initial";

/// Collaborators lent to screens.
struct Services {
    integrations: IntegrationRegistry,
    beeper: Box<dyn Beeper>,
    sensors: SensorSnapshot,
}

impl Services {
    fn context(&self) -> ScreenContext<'_> {
        ScreenContext {
            integrations: &self.integrations,
            beeper: self.beeper.as_ref(),
            sensors: &self.sensors,
        }
    }
}

pub struct PanelApp {
    config: PanelConfig,
    services: Services,
    navigation: NavigationController,
    display: TextFrame,
    backlight: Backlight,
    queue: EventQueue,
    /// PIR readings from the backplate link (or the emulator)
    proximity: ProximityFeed,
    input: Option<InputSource>,
    stdin_reader: Option<JoinHandle<()>>,
    ticks: u32,
}

impl PanelApp {
    pub fn new(config: PanelConfig) -> anyhow::Result<Self> {
        let transport = HttpTransport::new().context("Failed to create HTTP client")?;
        let integrations = IntegrationRegistry::load(&config, Arc::new(transport));

        let screens = ScreenRegistry::load(&config);
        if !screens.contains(INITIAL_SCREEN) {
            tracing::warn!(
                "No screen with id '{}' configured, nothing will be shown",
                INITIAL_SCREEN
            );
        }

        let beeper: Box<dyn Beeper> = if config.hal.emulate_display {
            Box::new(SilentBeeper)
        } else {
            Box::new(EvdevBeeper::new(&config.hal.beeper_device))
        };

        Ok(Self {
            services: Services {
                integrations,
                beeper,
                sensors: SensorSnapshot::default(),
            },
            navigation: NavigationController::new(screens),
            display: TextFrame::new(),
            backlight: Backlight::from_config(&config.hal),
            queue: EventQueue::new(),
            proximity: ProximityFeed::new(),
            input: None,
            stdin_reader: None,
            ticks: 0,
            config,
        })
    }

    /// Start input and run until the emulated input stream ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.start_input()?;
        self.show_initial_screen();

        loop {
            self.step(Instant::now());

            if self.input_finished() {
                tracing::info!("Input stream closed, shutting down");
                break;
            }

            std::thread::sleep(LOOP_PERIOD);
        }

        self.shutdown();
        Ok(())
    }

    fn start_input(&mut self) -> anyhow::Result<()> {
        if self.config.hal.emulate_display {
            let reader = spawn_stdin_reader(self.queue.sender(), self.proximity.sender())?;
            self.stdin_reader = Some(reader);
            return Ok(());
        }

        let hal = &self.config.hal;
        let mut input = InputSource::new(&hal.button_device, &hal.rotary_device);
        input.initialize().context("Failed to open input devices")?;

        let sender = self.queue.sender();
        input
            .start_polling(move |event| {
                sender.push(event);
            })
            .context("Failed to start input polling")?;

        self.input = Some(input);
        Ok(())
    }

    fn show_initial_screen(&mut self) {
        let ctx = self.services.context();
        self.navigation.go_to_next_screen(INITIAL_SCREEN, &ctx);
        self.backlight.activate();
        self.ticks = 0;
    }

    /// One loop iteration.
    pub fn step(&mut self, now: Instant) {
        let ctx = self.services.context();
        let navigation = &mut self.navigation;

        let drained = self
            .queue
            .drain_into(|event| navigation.process_input_event(&event, &ctx));

        let backlight = &mut self.backlight;
        let mut near = false;
        self.proximity.drain_into(|value| near |= backlight.on_proximity(value));

        if drained > 0 {
            self.backlight.activate();
        }
        if drained > 0 || near {
            // The idle second starts over with the activity
            self.ticks = 0;
        }

        self.navigation.tick(now);
        if self.navigation.render_if_needed(&mut self.display, &ctx) {
            self.display.log_frame();
        }

        self.ticks += 1;
        if self.ticks >= TICKS_PER_SECOND {
            self.ticks = 0;
            self.backlight.tick();
        }
    }

    fn input_finished(&self) -> bool {
        self.stdin_reader
            .as_ref()
            .is_some_and(|reader| reader.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(mut input) = self.input.take() {
            input.stop_polling();
        }
        tracing::info!("Panel stopped");
    }
}
