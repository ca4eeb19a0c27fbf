use eframe::egui::{Color32, Stroke};
use image::Rgba;

use crate::circuits::{GateImpl, GateRenderingContext};

use super::GLYPH_MIN_SCALE;

#[derive(Clone)]
pub struct Inverter;

impl GateImpl for Inverter {
    fn id() -> &'static str {
        "gate_not"
    }

    fn display_name() -> &'static str {
        "NOT gate"
    }

    fn marker_color() -> Rgba<u8> {
        Rgba([0, 0, 255, 255])
    }

    fn drive(input: bool) -> bool {
        !input
    }

    fn draw(ctx: &GateRenderingContext) {
        ctx.fill_cell(ctx.gate.output_cell(), Self::marker_color());
        if ctx.scale < GLYPH_MIN_SCALE {
            return;
        }

        let circle_pos = ctx.transform_pos([0.7, 0.5].into());
        ctx.painter.circle(
            circle_pos.into(),
            0.2 * ctx.scale,
            Color32::from_gray(200),
            Stroke::new(0.08 * ctx.scale, Color32::BLACK),
        );
    }
}
