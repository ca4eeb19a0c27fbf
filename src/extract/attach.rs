use tracing::debug;

use crate::{
    circuits::{Circuit, GateId, WireId},
    vector::{Direction, Vec2isize},
};

/// Hooks every gate up to the wires around its input and output cells, and
/// marks each output wire as gate-driven.
pub fn attach(circuit: &mut Circuit) {
    for i in 0..circuit.gates.len() {
        let gate = &circuit.gates[i];
        let input = first_wire_around(circuit, gate.pos);
        let output = first_wire_around(circuit, gate.output_cell());

        if input.is_none() {
            debug!(gate = %GateId(i), kind = gate.kind.id(), pos = ?gate.pos, "gate has no input wire");
        }
        if output.is_none() {
            debug!(gate = %GateId(i), kind = gate.kind.id(), pos = ?gate.pos, "gate has no output wire");
        }

        if let Some(output) = output {
            circuit.wires[output.0].touchable = false;
        }

        let gate = &mut circuit.gates[i];
        gate.input = input;
        gate.output = output;
    }

    for id in (0..circuit.wires.len()).map(WireId) {
        let drivers = circuit.drivers(id);
        if drivers > 1 {
            debug!(wire = %id, drivers, "wire is driven by several gates");
        }
    }
}

fn first_wire_around(circuit: &Circuit, cell: Vec2isize) -> Option<WireId> {
    Direction::neighbors(cell).find_map(|(_, pos)| circuit.resolve_wire_at(pos))
}
