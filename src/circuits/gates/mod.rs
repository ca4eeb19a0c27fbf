mod buffer;
mod inverter;

pub use buffer::Buffer;
pub use inverter::Inverter;

/// Below this many screen pixels per image pixel only the marker colors are drawn.
pub(crate) const GLYPH_MIN_SCALE: f32 = 4.0;
