//! Synchronous, double-buffered simulation.
//!
//! Every step clears the next-state buffer of each gate-driven wire, lets
//! every gate read the current state of its input and pull its output's
//! buffer high, then commits the buffers. Gates only see the state from
//! before the step, so a signal moves one gate per step.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::circuits::Circuit;

impl Circuit {
    pub fn step(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step_once();
        }
    }

    fn step_once(&mut self) {
        for wire in self.wires.iter_mut().filter(|w| !w.touchable) {
            wire.next = false;
        }

        for gate in &self.gates {
            let (Some(input), Some(output)) = (gate.input, gate.output) else {
                continue;
            };

            if gate.kind.drive(self.wires[input.0].state) {
                self.wires[output.0].next = true;
            }
        }

        for wire in self.wires.iter_mut().filter(|w| !w.touchable) {
            wire.state = wire.next;
        }
    }
}

/// Keeps a circuit stepping at a fixed rate against wall-clock time.
#[derive(Debug, Clone)]
pub struct Scheduler {
    rate: f64,
    executed: u64,
    max_catch_up: Duration,
}

impl Scheduler {
    /// `rate` is in steps per second; `max_catch_up` bounds how long a single
    /// [`tick`](Self::tick) may spend running overdue steps.
    pub fn new(rate: u32, max_catch_up: Duration) -> Self {
        Self {
            rate: f64::from(rate),
            executed: 0,
            max_catch_up,
        }
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Runs every step owed for `elapsed` time since the scheduler started.
    /// Returns how many steps ran.
    pub fn tick(&mut self, circuit: &mut Circuit, elapsed: Duration) -> u64 {
        let due = (elapsed.as_secs_f64() * self.rate).ceil() as u64;
        let started = Instant::now();
        let mut ran = 0;

        while self.executed < due {
            circuit.step(1);
            self.executed += 1;
            ran += 1;

            if started.elapsed() >= self.max_catch_up {
                if self.executed < due {
                    warn!(
                        behind = due - self.executed,
                        "simulation is lagging behind real time"
                    );
                }
                break;
            }
        }

        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        circuits::{Circuit, WireId},
        test_util::circuit,
        vector::Vec2isize,
    };

    fn high_at(circuit: &Circuit, x: isize, y: isize) -> bool {
        let id = circuit.resolve_wire_at(Vec2isize::new(x, y)).unwrap();
        circuit.wire(id).unwrap().is_high()
    }

    fn wire_at(circuit: &Circuit, x: isize, y: isize) -> WireId {
        circuit.resolve_wire_at(Vec2isize::new(x, y)).unwrap()
    }

    #[test]
    fn inverter_follows_input_after_one_step() {
        let mut c = circuit(&["WWInWW"]);
        assert!(!high_at(&c, 5, 0));

        c.step(1);
        assert!(high_at(&c, 5, 0));

        let input = wire_at(&c, 0, 0);
        c.toggle(input).unwrap();
        assert!(high_at(&c, 5, 0));
        c.step(1);
        assert!(!high_at(&c, 5, 0));
    }

    #[test]
    fn buffer_follows_input_after_one_step() {
        let mut c = circuit(&["WIbW"]);
        c.step(3);
        assert!(!high_at(&c, 3, 0));

        c.toggle(wire_at(&c, 0, 0)).unwrap();
        c.step(1);
        assert!(high_at(&c, 3, 0));
    }

    fn inverter_chain(len: usize) -> Circuit {
        let mut row = String::from("W");
        for _ in 0..len {
            row.push_str("InW");
        }
        circuit(&[&row])
    }

    #[test]
    fn chain_needs_one_step_per_gate() {
        for k in 1..=3usize {
            let mut c = inverter_chain(k);
            let last = (3 * k) as isize;

            // Settle with the input low, then flip it and watch the far end.
            c.step(k + 1);
            let settled = high_at(&c, last, 0);
            assert_eq!(settled, k % 2 == 1);

            c.toggle(wire_at(&c, 0, 0)).unwrap();
            for step in 1..k {
                c.step(1);
                assert_eq!(high_at(&c, last, 0), settled, "k={k} step={step}");
            }
            c.step(1);
            assert_eq!(high_at(&c, last, 0), !settled, "k={k}");
        }
    }

    #[test]
    fn shared_output_is_wired_or() {
        // Two buffers feed the magenta wire.
        let mut c = circuit(&[
            "WIb..", //
            "..MMM", //
            "YIb..",
        ]);
        let out = (4, 1);
        c.step(1);
        assert!(!high_at(&c, out.0, out.1));

        c.toggle(wire_at(&c, 0, 0)).unwrap();
        c.step(1);
        assert!(high_at(&c, out.0, out.1));

        c.toggle(wire_at(&c, 0, 0)).unwrap();
        c.toggle(wire_at(&c, 0, 2)).unwrap();
        c.step(1);
        assert!(high_at(&c, out.0, out.1));

        c.toggle(wire_at(&c, 0, 2)).unwrap();
        c.step(1);
        assert!(!high_at(&c, out.0, out.1));
    }

    #[test]
    fn inert_gates_never_drive() {
        let mut c = circuit(&["In.WW"]);
        c.step(5);
        assert!(!high_at(&c, 4, 0));
        assert!(c.wires()[0].is_touchable());
    }

    #[test]
    fn touchable_wires_are_left_alone() {
        let mut c = circuit(&["WInW"]);
        c.toggle(wire_at(&c, 0, 0)).unwrap();
        c.step(4);
        assert!(high_at(&c, 0, 0));
    }

    #[test]
    fn scheduler_runs_owed_steps() {
        let mut c = circuit(&["WInW"]);
        let mut scheduler = Scheduler::new(60, Duration::from_secs(60));
        assert_eq!(scheduler.tick(&mut c, Duration::ZERO), 0);
        assert_eq!(scheduler.tick(&mut c, Duration::from_millis(500)), 30);
        assert_eq!(scheduler.tick(&mut c, Duration::from_millis(500)), 0);
        assert_eq!(scheduler.tick(&mut c, Duration::from_secs(1)), 30);
        assert_eq!(scheduler.executed(), 60);
        assert!(high_at(&c, 3, 0));
    }

    #[test]
    fn scheduler_gives_up_when_out_of_budget() {
        let mut c = circuit(&["WInW"]);
        let mut scheduler = Scheduler::new(100, Duration::ZERO);
        assert_eq!(scheduler.tick(&mut c, Duration::from_secs(1)), 1);
        assert_eq!(scheduler.executed(), 1);
    }

    #[test]
    fn zero_rate_never_steps() {
        let mut c = circuit(&["WInW"]);
        let mut scheduler = Scheduler::new(0, Duration::from_secs(1));
        assert_eq!(scheduler.tick(&mut c, Duration::from_secs(10)), 0);
    }
}
