//! Pixel classification.
//!
//! Wire pixels are recognized by which color channels are lit, not by exact
//! value, so a dim or slightly noisy wire still lands in the right class.
//! Gate markers are the opposite: they only count on an exact RGBA match.

use image::Rgba;

use crate::circuits::GateKind;

/// One of the four wire color classes. Wires only join pixels of the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireColor {
    White,
    Magenta,
    Yellow,
    Cyan,
}

impl WireColor {
    pub const ALL: [WireColor; 4] = [
        WireColor::White,
        WireColor::Magenta,
        WireColor::Yellow,
        WireColor::Cyan,
    ];

    /// Canonical color used when drawing a wire in its high state.
    pub fn rgba(self) -> Rgba<u8> {
        match self {
            WireColor::White => Rgba([255, 255, 255, 255]),
            WireColor::Magenta => Rgba([255, 0, 255, 255]),
            WireColor::Yellow => Rgba([255, 255, 0, 255]),
            WireColor::Cyan => Rgba([0, 255, 255, 255]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    Background,
    Wire(WireColor),
    Crossing,
}

impl PixelClass {
    /// Classifies by channel presence. Alpha is ignored.
    pub fn of(color: Rgba<u8>) -> Self {
        let [r, g, b, _] = color.0;
        match (r > 0, g > 0, b > 0) {
            (true, true, true) => PixelClass::Wire(WireColor::White),
            (true, false, true) => PixelClass::Wire(WireColor::Magenta),
            (true, true, false) => PixelClass::Wire(WireColor::Yellow),
            (false, true, true) => PixelClass::Wire(WireColor::Cyan),
            (true, false, false) => PixelClass::Crossing,
            _ => PixelClass::Background,
        }
    }

    pub fn wire_color(self) -> Option<WireColor> {
        match self {
            PixelClass::Wire(color) => Some(color),
            _ => None,
        }
    }
}

pub const CROSSING_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GATE_INPUT_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const ERASED: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Exact-match gate markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    GateInput,
    GateType(GateKind),
}

impl Marker {
    pub fn of(color: Rgba<u8>) -> Option<Self> {
        if color == GATE_INPUT_COLOR {
            return Some(Marker::GateInput);
        }

        GateKind::ALL
            .into_iter()
            .find(|kind| kind.marker_color() == color)
            .map(Marker::GateType)
    }
}

/// Halves every color channel, keeping alpha. Used for wires in the low state.
pub fn dim(color: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, a] = color.0;
    Rgba([r / 2, g / 2, b / 2, a])
}
