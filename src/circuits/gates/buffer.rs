use eframe::{
    egui::{Color32, Stroke},
    epaint::PathShape,
};
use image::Rgba;

use crate::circuits::{GateImpl, GateRenderingContext};

use super::GLYPH_MIN_SCALE;

/// One-way repeater: passes a high input through to its output wire.
#[derive(Clone)]
pub struct Buffer;

impl GateImpl for Buffer {
    fn id() -> &'static str {
        "gate_buffer"
    }

    fn display_name() -> &'static str {
        "Buffer"
    }

    fn marker_color() -> Rgba<u8> {
        Rgba([0, 255, 0, 255])
    }

    fn drive(input: bool) -> bool {
        input
    }

    fn draw(ctx: &GateRenderingContext) {
        ctx.fill_cell(ctx.gate.output_cell(), Self::marker_color());
        if ctx.scale < GLYPH_MIN_SCALE {
            return;
        }

        let points = [[0.25, 0.2], [0.8, 0.5], [0.25, 0.8]]
            .into_iter()
            .map(|p| ctx.transform_pos(p.into()).into())
            .collect();

        let path = PathShape {
            points,
            closed: true,
            fill: Color32::from_gray(200),
            stroke: Stroke::new(0.08 * ctx.scale, Color32::BLACK),
        };

        ctx.painter.add(path);
    }
}
