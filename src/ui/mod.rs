use std::time::{Duration, Instant};

use eframe::egui::{self, CentralPanel, Frame, Painter, Pos2, Sense, Vec2, Visuals};
use eyre::eyre;
use tracing::{debug, warn};

use crate::{
    circuits::{cell_rect, to_color32, Circuit, GateRenderingContext},
    io::Config,
    pixel::{dim, CROSSING_COLOR, GATE_INPUT_COLOR},
    sim::Scheduler,
    vector::Vec2isize,
};

pub struct Viewer {
    circuit: Circuit,
    scheduler: Scheduler,
    scale: f32,
    started: Instant,
    report_interval: Duration,
    last_report: Instant,
    frames: u32,
}

impl Viewer {
    pub fn new(circuit: Circuit, config: &Config) -> Self {
        let now = Instant::now();
        Self {
            scheduler: Scheduler::new(config.rate, config.max_catch_up()),
            circuit,
            scale: config.scale.max(1) as f32,
            started: now,
            report_interval: config.report_interval(),
            last_report: now,
            frames: 0,
        }
    }

    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(
            self.circuit.width() as f32 * self.scale,
            self.circuit.height() as f32 * self.scale,
        )
    }

    /// Image pixel under a point given relative to the drawing origin.
    fn pixel_at(&self, offset: Vec2) -> Vec2isize {
        Vec2isize::new(
            (offset.x / self.scale).floor() as isize,
            (offset.y / self.scale).floor() as isize,
        )
    }

    fn click(&mut self, offset: Vec2) {
        let pixel = self.pixel_at(offset);
        let Some(id) = self.circuit.resolve_wire_at(pixel) else {
            return;
        };

        debug!(%id, ?pixel, "clicked wire");
        if let Err(err) = self.circuit.toggle(id) {
            warn!(%err, "toggle failed");
        }
    }

    fn paint(&self, painter: &Painter, origin: Pos2) {
        let cell = |pos: Vec2isize| cell_rect(origin, self.scale, pos);

        for gate in self.circuit.gates() {
            let ctx = GateRenderingContext {
                painter,
                origin,
                scale: self.scale,
                gate,
            };
            ctx.fill_cell(gate.pos, GATE_INPUT_COLOR);
            gate.kind.draw(&ctx);
        }

        for wire in self.circuit.wires() {
            let color = match wire.is_high() {
                true => wire.color.rgba(),
                false => dim(wire.color.rgba()),
            };
            let color = to_color32(color);
            for &pixel in wire.pixels() {
                painter.rect_filled(cell(pixel), 0.0, color);
            }
        }

        let crossing = to_color32(CROSSING_COLOR);
        for &pos in self.circuit.crossings() {
            painter.rect_filled(cell(pos), 0.0, crossing);
        }
    }

    fn report(&mut self) {
        self.frames += 1;
        let since = self.last_report.elapsed();
        if since < self.report_interval || since.is_zero() {
            return;
        }

        debug!(
            fps = (self.frames as f64 / since.as_secs_f64()).round(),
            gates = self.circuit.gates().len(),
            wires = self.circuit.wires().len(),
            steps = self.scheduler.executed(),
            "status"
        );
        self.frames = 0;
        self.last_report = Instant::now();
    }
}

impl eframe::App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.scheduler
            .tick(&mut self.circuit, self.started.elapsed());
        self.report();

        CentralPanel::default().frame(Frame::none()).show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(self.screen_size(), Sense::click());
            let origin = response.rect.min;

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.click(pos - origin);
                }
            }

            self.paint(&painter, origin);
        });

        ctx.request_repaint();
    }

    fn clear_color(&self, _visuals: &Visuals) -> [f32; 4] {
        [0.0; 4]
    }
}

/// Opens a borderless, transparent, always-on-top window showing the circuit
/// and blocks until it is closed.
pub fn run(circuit: Circuit, config: &Config) -> eyre::Result<()> {
    let viewer = Viewer::new(circuit, config);
    let size = viewer.screen_size();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BitWidgets")
            .with_inner_size(size)
            .with_resizable(false)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "BitWidgets",
        options,
        Box::new(move |_cc| Box::new(viewer)),
    )
    .map_err(|err| eyre!("viewer exited with an error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::circuit;

    #[test]
    fn clicks_map_to_scaled_pixels() {
        let config = Config {
            scale: 4,
            ..Config::default()
        };
        let viewer = Viewer::new(circuit(&["W.", ".W"]), &config);
        assert_eq!(viewer.screen_size(), Vec2::new(8.0, 8.0));
        assert_eq!(viewer.pixel_at(Vec2::new(3.9, 0.0)), Vec2isize::new(0, 0));
        assert_eq!(viewer.pixel_at(Vec2::new(4.0, 7.5)), Vec2isize::new(1, 1));
        assert_eq!(viewer.pixel_at(Vec2::new(-0.5, 2.0)), Vec2isize::new(-1, 0));
    }

    #[test]
    fn oversized_durations_do_not_panic() {
        let config = Config::parse("(max_catch_up_secs: 1e300, report_interval_secs: 1e300)")
            .unwrap();
        let viewer = Viewer::new(circuit(&["W"]), &config);
        assert_eq!(viewer.report_interval, Duration::MAX);
    }

    #[test]
    fn zero_interval_report_skips_empty_window() {
        let config = Config {
            report_interval_secs: 0.0,
            ..Config::default()
        };
        let mut viewer = Viewer::new(circuit(&["W"]), &config);
        viewer.last_report = Instant::now() + Duration::from_secs(60);
        viewer.report();
        assert_eq!(viewer.frames, 1);
    }

    #[test]
    fn clicking_toggles_touchable_wire_only() {
        let config = Config {
            scale: 2,
            ..Config::default()
        };
        let mut viewer = Viewer::new(circuit(&["WInW"]), &config);
        viewer.click(Vec2::new(1.0, 1.0));
        assert!(viewer.circuit.wires()[0].is_high());

        viewer.click(Vec2::new(7.0, 1.0));
        assert!(!viewer.circuit.wires()[1].is_high());

        viewer.click(Vec2::new(100.0, 1.0));
        viewer.click(Vec2::new(1.0, 1.0));
        assert!(!viewer.circuit.wires()[0].is_high());
    }
}
