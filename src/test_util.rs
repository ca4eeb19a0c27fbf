//! ASCII-art circuits for tests.
//!
//! `.` background, `W`/`M`/`Y`/`C` wire colors, `x` crossing, `I` gate input,
//! `n` inverter type marker, `b` buffer type marker.

use image::{Rgba, RgbaImage};

use crate::circuits::{Circuit, GateKind};

pub fn color_of(c: char) -> Rgba<u8> {
    match c {
        '.' => Rgba([0, 0, 0, 255]),
        'W' => Rgba([255, 255, 255, 255]),
        'M' => Rgba([255, 0, 255, 255]),
        'Y' => Rgba([255, 255, 0, 255]),
        'C' => Rgba([0, 255, 255, 255]),
        'x' => Rgba([200, 0, 0, 255]),
        'I' => crate::pixel::GATE_INPUT_COLOR,
        'n' => GateKind::Inverter.marker_color(),
        'b' => GateKind::Buffer.marker_color(),
        other => panic!("unknown circuit cell {other:?}"),
    }
}

pub fn image(rows: &[&str]) -> RgbaImage {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let mut image = RgbaImage::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.chars().count() as u32, width, "ragged row {y}");
        for (x, c) in row.chars().enumerate() {
            image.put_pixel(x as u32, y as u32, color_of(c));
        }
    }
    image
}

pub fn circuit(rows: &[&str]) -> Circuit {
    Circuit::from_image(&image(rows))
}
