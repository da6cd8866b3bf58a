//! Desktop preview app for the ornament sky
//!
//! Drives the sky frame scheduler with the real wall clock and shows the
//! strip in a window. Controls go through the same command channel the web
//! page uses on the device.

use std::time::{Instant as StdInstant, SystemTime, UNIX_EPOCH};

use eframe::egui::{self};
use ornament_sky::{
    CommandChannel, CommandSender, FrameScheduler, Instant, OutputDriver, Rgb, SkyCommand,
    SkyConfig, SkyTimeProvider, SyncedClock,
    command::{MAX_REQUESTED_SPEED_SECS, MIN_REQUESTED_SPEED_SECS},
};

/// Number of LEDs on the ornament
const LED_COUNT: usize = 16;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 28.0;

/// Gap between LEDs
const LED_GAP: f32 = 4.0;

/// Command channel size
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Command channel between UI and scheduler
static COMMANDS: CommandChannel<COMMAND_CHANNEL_SIZE> = CommandChannel::new();

/// Keeps the last frame written by the scheduler
#[derive(Default)]
struct WindowStrip {
    leds: [Rgb; LED_COUNT],
}

impl OutputDriver for WindowStrip {
    fn write(&mut self, colors: &[Rgb]) {
        for (led, color) in self.leds.iter_mut().zip(colors) {
            *led = *color;
        }
    }
}

type SkyScheduler =
    FrameScheduler<'static, SyncedClock, WindowStrip, LED_COUNT, COMMAND_CHANNEL_SIZE>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 240.0])
            .with_title("Ornament Sky Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "ornament-sky-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

/// Seconds since UTC midnight
#[allow(clippy::cast_possible_truncation)]
fn utc_seconds_of_day() -> u32 {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    (since_epoch % 86_400) as u32
}

struct PreviewApp {
    scheduler: SkyScheduler,
    commands: CommandSender<'static, COMMAND_CHANNEL_SIZE>,
    started: StdInstant,

    // UI state (tracked to detect changes and send commands)
    sky_enabled: bool,
    simulation: bool,
    speed_secs: u8,
}

impl PreviewApp {
    fn new() -> Self {
        let config = SkyConfig::DEFAULT;
        let time = SkyTimeProvider::new(SyncedClock::new(), config.sim_speed_secs_per_hour);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let speed_secs = config.sim_speed_secs_per_hour as u8;

        let mut app = Self {
            scheduler: FrameScheduler::new(
                time,
                COMMANDS.receiver(),
                WindowStrip::default(),
                &config,
            ),
            commands: COMMANDS.sender(),
            started: StdInstant::now(),
            sky_enabled: config.sky_enabled,
            simulation: false,
            speed_secs,
        };
        app.sync_clock();
        app
    }

    /// Monotonic time since the app started
    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> Instant {
        Instant::from_millis(self.started.elapsed().as_millis() as u64)
    }

    fn sync_clock(&mut self) {
        let now = self.now();
        self.scheduler
            .time_mut()
            .clock_mut()
            .sync(utc_seconds_of_day(), now);
    }

    fn send(&self, command: SkyCommand) {
        let _ = self.commands.try_send(command);
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.now();
        let result = self.scheduler.tick(now);
        ctx.request_repaint_after(std::time::Duration::from_millis(
            result.sleep_duration.as_millis(),
        ));

        let status = self.scheduler.status(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.checkbox(&mut self.sky_enabled, "Sky").changed() {
                    self.send(SkyCommand::SetSkyEnabled(self.sky_enabled));
                }
                if ui.checkbox(&mut self.simulation, "Simulate").changed() {
                    self.send(SkyCommand::SetSimulation(self.simulation));
                }

                ui.add_space(8.0);
                ui.label("s/hour:");
                let old_speed = self.speed_secs;
                ui.add(egui::Slider::new(
                    &mut self.speed_secs,
                    MIN_REQUESTED_SPEED_SECS..=MAX_REQUESTED_SPEED_SECS,
                ));
                if self.speed_secs != old_speed {
                    self.send(SkyCommand::simulation_speed(i32::from(self.speed_secs)));
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui.button("Sync clock").clicked() {
                    self.sync_clock();
                }
                if ui.button("Lose clock").clicked() {
                    self.scheduler.time_mut().clock_mut().clear();
                }

                ui.add_space(8.0);
                let sky_time = match status.sky_time {
                    Ok(reading) => reading.to_string(),
                    Err(err) => err.to_string(),
                };
                ui.label(format!(
                    "Sky: {sky_time} | sim: {} @ {} s/h",
                    if status.sim_active { "on" } else { "off" },
                    status.sim_speed
                ));
            });

            ui.add_space(16.0);

            // === LED Display ===
            let led_pitch = LED_SIZE + LED_GAP;
            #[allow(clippy::cast_precision_loss)]
            let width = LED_COUNT as f32 * led_pitch;
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, LED_SIZE), egui::Sense::hover());
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in self.scheduler.output().leds.iter().enumerate() {
                let x = origin.x + i as f32 * led_pitch;
                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, origin.y),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 3.0, color);
            }
        });
    }
}
