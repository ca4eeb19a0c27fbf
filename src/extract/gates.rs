use crate::{
    canvas::Canvas,
    circuits::Gate,
    pixel::Marker,
    vector::Direction,
};

/// Finds every input marker with a type marker beside it. One input marker
/// surrounded by several type markers yields one gate per type marker.
pub fn extract_gates(canvas: &Canvas) -> Vec<Gate> {
    let mut gates = vec![];

    for pos in canvas.positions() {
        if canvas.get(pos).and_then(Marker::of) != Some(Marker::GateInput) {
            continue;
        }

        for (direction, neighbor) in Direction::neighbors(pos) {
            if let Some(Marker::GateType(kind)) = canvas.get(neighbor).and_then(Marker::of) {
                gates.push(Gate::new(pos, kind, direction));
            }
        }
    }

    gates
}

pub fn erase_gates(canvas: &mut Canvas, gates: &[Gate]) {
    for gate in gates {
        for cell in gate.cells() {
            canvas.erase(cell);
        }
    }
}
