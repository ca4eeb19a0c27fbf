//! One-time decoding of an image into a [`Circuit`].
//!
//! Gates are found first and erased from a scratch copy of the image, then
//! wires are flood filled over what remains, and finally each gate is hooked
//! up to the wires touching its two cells.

use image::RgbaImage;
use tracing::info;

use crate::{canvas::Canvas, circuits::Circuit};

mod attach;
mod gates;
mod wires;

pub use wires::WireExtraction;

pub fn extract(image: &RgbaImage) -> Circuit {
    let mut canvas = Canvas::new(image);

    info!("extracting gates");
    let gates = gates::extract_gates(&canvas);
    gates::erase_gates(&mut canvas, &gates);

    info!(gates = gates.len(), "extracting wires");
    let WireExtraction { wires, crossings } = wires::extract_wires(&mut canvas, &gates);

    info!(
        wires = wires.len(),
        crossings = crossings.len(),
        "attaching gates to wires"
    );
    let mut circuit = Circuit::assemble(
        canvas.width(),
        canvas.height(),
        gates,
        wires,
        crossings,
    );
    attach::attach(&mut circuit);

    info!("circuit ready");
    circuit
}
