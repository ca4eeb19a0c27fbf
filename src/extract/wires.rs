use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::{
    canvas::Canvas,
    circuits::{Gate, Wire},
    pixel::{PixelClass, WireColor},
    vector::{Direction, Vec2isize},
};

pub struct WireExtraction {
    pub wires: Vec<Wire>,
    /// Crossing pixels some wire jumped over, each recorded once.
    pub crossings: Vec<Vec2isize>,
}

/// Flood fills every wire out of a canvas that already has its gates erased.
///
/// Claimed pixels are erased as they are dequeued, so the raster scan never
/// starts a second wire inside one that is already filled.
pub fn extract_wires(canvas: &mut Canvas, gates: &[Gate]) -> WireExtraction {
    let gate_cells: HashSet<Vec2isize> = gates.iter().flat_map(Gate::cells).collect();
    let mut crossings = Crossings::default();
    let mut wires = vec![];

    for pos in canvas.positions() {
        let Some(color) = canvas.class(pos).and_then(PixelClass::wire_color) else {
            continue;
        };

        let wire = flood_fill(canvas, pos, color, &gate_cells, &mut crossings);
        trace!(
            id = wires.len(),
            ?color,
            pixels = wire.pixels.len(),
            "filled wire"
        );
        wires.push(wire);
    }

    WireExtraction {
        wires,
        crossings: crossings.list,
    }
}

#[derive(Default)]
struct Crossings {
    seen: HashSet<Vec2isize>,
    list: Vec<Vec2isize>,
}

impl Crossings {
    fn record(&mut self, pos: Vec2isize) {
        if self.seen.insert(pos) {
            self.list.push(pos);
        }
    }
}

/// A queued fill position. Skip items are gate cells: the fill passes
/// through them but never claims them.
#[derive(Debug, Clone, Copy)]
struct FillItem {
    pos: Vec2isize,
    skip: bool,
}

/// FIFO that refuses a coordinate while it is already waiting in the queue.
#[derive(Default)]
struct FillQueue {
    items: VecDeque<FillItem>,
    queued: HashSet<Vec2isize>,
}

impl FillQueue {
    fn push(&mut self, pos: Vec2isize, skip: bool) {
        if self.queued.insert(pos) {
            self.items.push_back(FillItem { pos, skip });
        }
    }

    fn pop(&mut self) -> Option<FillItem> {
        let item = self.items.pop_front()?;
        self.queued.remove(&item.pos);
        Some(item)
    }
}

fn flood_fill(
    canvas: &mut Canvas,
    seed: Vec2isize,
    color: WireColor,
    gate_cells: &HashSet<Vec2isize>,
    crossings: &mut Crossings,
) -> Wire {
    let mut wire = Wire::new(color);
    let mut queue = FillQueue::default();
    queue.push(seed, false);

    let same_wire = PixelClass::Wire(color);

    while let Some(FillItem { pos, skip }) = queue.pop() {
        if !skip {
            wire.pixels.push(pos);
            canvas.erase(pos);
        }

        for (direction, neighbor) in Direction::neighbors(pos) {
            let Some(class) = canvas.class(neighbor) else {
                continue;
            };

            if class == same_wire {
                queue.push(neighbor, false);
            }

            if skip {
                continue;
            }

            if class == PixelClass::Crossing {
                crossings.record(neighbor);
                let beyond = direction.step(neighbor);
                if canvas.class(beyond) == Some(same_wire) {
                    queue.push(beyond, false);
                }
            }

            if gate_cells.contains(&neighbor) {
                queue.push(neighbor, true);
            }
        }
    }

    wire
}
