//! Logic circuits drawn as images.
//!
//! A circuit is a raster image: colored lines are wires, a red input marker
//! next to a blue or green type marker is an inverter or a buffer, and a
//! lone red pixel lets two wires cross without touching. [`Circuit`] decodes
//! such an image into gates and wires and steps it one gate delay at a time.

pub mod canvas;
pub mod circuits;
pub mod error;
pub mod extract;
pub mod io;
pub mod pixel;
pub mod sim;
pub mod ui;
pub mod vector;

#[cfg(test)]
mod test_util;

pub use circuits::{Circuit, Gate, GateId, GateKind, Wire, WireId};
pub use error::{Error, Result};
pub use io::Config;
pub use pixel::{PixelClass, WireColor};
pub use sim::Scheduler;
pub use vector::{Direction, Vec2isize};
