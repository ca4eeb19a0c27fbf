//! Circuit data model: gates, wires and crossings decoded from an image.

use std::fmt;

use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2 as EguiVec2};
use image::{Rgba, RgbaImage};

use crate::{
    error::{Error, Result},
    extract,
    pixel::WireColor,
    vector::{Direction, Vec2f, Vec2isize},
};

pub mod gates;

use gates::{Buffer, Inverter};

/// Per-kind gate behavior and appearance.
pub trait GateImpl {
    fn id() -> &'static str;

    fn display_name() -> &'static str;

    /// Exact color of this kind's type marker pixel.
    fn marker_color() -> Rgba<u8>;

    /// Whether the gate pulls its output high for the given input state.
    fn drive(input: bool) -> bool;

    fn draw(ctx: &GateRenderingContext);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    Inverter,
    Buffer,
}

impl GateKind {
    pub const ALL: [GateKind; 2] = [GateKind::Inverter, GateKind::Buffer];

    pub fn id(self) -> &'static str {
        match self {
            GateKind::Inverter => Inverter::id(),
            GateKind::Buffer => Buffer::id(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GateKind::Inverter => Inverter::display_name(),
            GateKind::Buffer => Buffer::display_name(),
        }
    }

    pub fn marker_color(self) -> Rgba<u8> {
        match self {
            GateKind::Inverter => Inverter::marker_color(),
            GateKind::Buffer => Buffer::marker_color(),
        }
    }

    pub fn drive(self, input: bool) -> bool {
        match self {
            GateKind::Inverter => Inverter::drive(input),
            GateKind::Buffer => Buffer::drive(input),
        }
    }

    pub fn draw(self, ctx: &GateRenderingContext) {
        match self {
            GateKind::Inverter => Inverter::draw(ctx),
            GateKind::Buffer => Buffer::draw(ctx),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GateId(pub usize);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wire#{}", self.0)
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gate#{}", self.0)
    }
}

/// A gate occupies two cells: the input marker at `pos` and the type marker
/// one step away in `direction`, which is also where its output is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub pos: Vec2isize,
    pub kind: GateKind,
    pub direction: Direction,
    pub(crate) input: Option<WireId>,
    pub(crate) output: Option<WireId>,
}

impl Gate {
    pub fn new(pos: Vec2isize, kind: GateKind, direction: Direction) -> Self {
        Self {
            pos,
            kind,
            direction,
            input: None,
            output: None,
        }
    }

    pub fn output_cell(&self) -> Vec2isize {
        self.direction.step(self.pos)
    }

    pub fn cells(&self) -> [Vec2isize; 2] {
        [self.pos, self.output_cell()]
    }

    pub fn occupies(&self, pos: Vec2isize) -> bool {
        self.pos == pos || self.output_cell() == pos
    }

    pub fn input(&self) -> Option<WireId> {
        self.input
    }

    pub fn output(&self) -> Option<WireId> {
        self.output
    }

    /// Gates missing either wire never drive anything.
    pub fn is_inert(&self) -> bool {
        self.input.is_none() || self.output.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub color: WireColor,
    pub(crate) pixels: Vec<Vec2isize>,
    pub(crate) state: bool,
    pub(crate) next: bool,
    pub(crate) touchable: bool,
}

impl Wire {
    pub fn new(color: WireColor) -> Self {
        Self {
            color,
            pixels: vec![],
            state: false,
            next: false,
            touchable: true,
        }
    }

    pub fn pixels(&self) -> &[Vec2isize] {
        &self.pixels
    }

    pub fn is_high(&self) -> bool {
        self.state
    }

    /// Touchable wires are set by the user; the rest are driven by gates.
    pub fn is_touchable(&self) -> bool {
        self.touchable
    }
}

#[derive(Debug, Clone)]
pub struct Circuit {
    width: usize,
    height: usize,
    pub(crate) gates: Vec<Gate>,
    pub(crate) wires: Vec<Wire>,
    crossings: Vec<Vec2isize>,
    wire_index: Vec<Option<WireId>>,
}

impl Circuit {
    /// Decodes a circuit from an in-memory image.
    pub fn from_image(image: &RgbaImage) -> Self {
        extract::extract(image)
    }

    pub(crate) fn assemble(
        width: usize,
        height: usize,
        gates: Vec<Gate>,
        wires: Vec<Wire>,
        crossings: Vec<Vec2isize>,
    ) -> Self {
        let mut wire_index = vec![None; width * height];
        for (i, wire) in wires.iter().enumerate() {
            for pixel in &wire.pixels {
                if let Some(pixel) = pixel.to_usize() {
                    wire_index[pixel.y * width + pixel.x] = Some(WireId(i));
                }
            }
        }

        Self {
            width,
            height,
            gates,
            wires,
            crossings,
            wire_index,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn crossings(&self) -> &[Vec2isize] {
        &self.crossings
    }

    pub fn wire(&self, id: WireId) -> Result<&Wire> {
        self.wires.get(id.0).ok_or(Error::WireOutOfRange {
            id: id.0,
            len: self.wires.len(),
        })
    }

    pub fn gate(&self, id: GateId) -> Result<&Gate> {
        self.gates.get(id.0).ok_or(Error::GateOutOfRange {
            id: id.0,
            len: self.gates.len(),
        })
    }

    pub fn resolve_wire_at(&self, pos: Vec2isize) -> Option<WireId> {
        let pos = pos.to_usize()?;
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        self.wire_index[pos.y * self.width + pos.x]
    }

    /// First gate whose input or output cell is at `pos`.
    pub fn resolve_gate_at(&self, pos: Vec2isize) -> Option<GateId> {
        self.gates
            .iter()
            .position(|gate| gate.occupies(pos))
            .map(GateId)
    }

    /// Number of gates whose output is attached to `id`.
    pub fn drivers(&self, id: WireId) -> usize {
        self.gates
            .iter()
            .filter(|gate| gate.output == Some(id))
            .count()
    }

    /// Flips a touchable wire. Returns `Ok(false)` without changing anything
    /// if the wire is gate-driven.
    pub fn toggle(&mut self, id: WireId) -> Result<bool> {
        let len = self.wires.len();
        let wire = self
            .wires
            .get_mut(id.0)
            .ok_or(Error::WireOutOfRange { id: id.0, len })?;

        if !wire.touchable {
            tracing::debug!(%id, "ignoring toggle of gate-driven wire");
            return Ok(false);
        }

        wire.state = !wire.state;
        tracing::trace!(%id, high = wire.state, "toggled wire");
        Ok(true)
    }

    pub fn high_wires(&self) -> usize {
        self.wires.iter().filter(|w| w.state).count()
    }
}

/// Where and how big one gate's type cell is on screen.
pub struct GateRenderingContext<'a> {
    pub painter: &'a Painter,
    pub origin: Pos2,
    pub scale: f32,
    pub gate: &'a Gate,
}

impl GateRenderingContext<'_> {
    pub fn cell_rect(&self, cell: Vec2isize) -> Rect {
        cell_rect(self.origin, self.scale, cell)
    }

    /// Maps a point in the type cell's local unit square, rotated so that +x
    /// points along the gate's direction, to screen space.
    pub fn transform_pos(&self, local: Vec2f) -> Vec2f {
        let centered = Vec2f::new(local.x - 0.5, local.y - 0.5);
        let rotated = match self.gate.direction {
            Direction::East => centered,
            Direction::South => Vec2f::new(-centered.y, centered.x),
            Direction::West => Vec2f::new(-centered.x, -centered.y),
            Direction::North => Vec2f::new(centered.y, -centered.x),
        };
        let center = self.cell_rect(self.gate.output_cell()).center();
        Vec2f::new(
            center.x + rotated.x * self.scale,
            center.y + rotated.y * self.scale,
        )
    }

    pub fn fill_cell(&self, cell: Vec2isize, color: Rgba<u8>) {
        self.painter
            .rect_filled(self.cell_rect(cell), 0.0, to_color32(color));
    }
}

/// Screen rectangle covered by one image pixel.
pub fn cell_rect(origin: Pos2, scale: f32, cell: Vec2isize) -> Rect {
    let cell = cell.convert(|v| v as f32);
    let min = origin + EguiVec2::new(cell.x, cell.y) * scale;
    Rect::from_min_size(min, EguiVec2::splat(scale))
}

pub fn to_color32(color: Rgba<u8>) -> Color32 {
    let [r, g, b, a] = color.0;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::circuit;

    #[test]
    fn empty_image_has_no_circuit() {
        let circuit = circuit(&["....", "....", "...."]);
        assert!(circuit.gates().is_empty());
        assert!(circuit.wires().is_empty());
        assert!(circuit.crossings().is_empty());
        assert_eq!(circuit.width(), 4);
        assert_eq!(circuit.height(), 3);
    }

    #[test]
    fn lookups_return_none_off_circuit() {
        let circuit = circuit(&["WWIn.MM"]);
        for pos in [(-1, 0), (0, -1), (7, 0), (0, 1), (4, 0), (100, 100)] {
            let pos = Vec2isize::from(pos);
            assert_eq!(circuit.resolve_wire_at(pos), None, "{pos:?}");
            assert_eq!(circuit.resolve_gate_at(pos), None, "{pos:?}");
        }
    }

    #[test]
    fn lookups_find_wires_and_both_gate_cells() {
        let circuit = circuit(&["WWIn.MM"]);
        assert_eq!(circuit.resolve_wire_at(Vec2isize::new(0, 0)), Some(WireId(0)));
        assert_eq!(circuit.resolve_wire_at(Vec2isize::new(6, 0)), Some(WireId(1)));
        assert_eq!(circuit.resolve_gate_at(Vec2isize::new(2, 0)), Some(GateId(0)));
        assert_eq!(circuit.resolve_gate_at(Vec2isize::new(3, 0)), Some(GateId(0)));
        assert_eq!(circuit.resolve_wire_at(Vec2isize::new(2, 0)), None);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut circuit = circuit(&["WWW"]);
        let id = WireId(0);
        assert!(!circuit.wire(id).unwrap().is_high());
        assert!(circuit.toggle(id).unwrap());
        assert!(circuit.wire(id).unwrap().is_high());
        assert!(circuit.toggle(id).unwrap());
        assert!(!circuit.wire(id).unwrap().is_high());
    }

    #[test]
    fn toggle_ignores_driven_wires() {
        let mut circuit = circuit(&["WIbW"]);
        let output = circuit.gates()[0].output().unwrap();
        assert!(!circuit.toggle(output).unwrap());
        assert!(!circuit.wire(output).unwrap().is_high());
    }

    #[test]
    fn out_of_range_ids_are_errors() {
        let mut circuit = circuit(&["W"]);
        assert!(matches!(
            circuit.toggle(WireId(1)),
            Err(Error::WireOutOfRange { id: 1, len: 1 })
        ));
        assert!(matches!(
            circuit.wire(WireId(9)),
            Err(Error::WireOutOfRange { id: 9, len: 1 })
        ));
        assert!(matches!(
            circuit.gate(GateId(0)),
            Err(Error::GateOutOfRange { id: 0, len: 0 })
        ));
    }
}
