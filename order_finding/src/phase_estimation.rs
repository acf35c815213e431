//! Phase-estimation circuit for the order of `a` modulo `N`.
//!
//! Layout: an m-qubit control register `ctrl` followed by an n-qubit data
//! register `data`, and an m-bit classical register `c`.
//!
//! 1. `data` is set to |1⟩.
//! 2. Every control qubit gets a Hadamard.
//! 3. Control qubit i conditions multiplication by `a^(2^i) mod N` on `data`.
//! 4. Inverse QFT (with swaps) on `ctrl`.
//! 5. `ctrl` is measured into `c`; `data` is never measured.
//!
//! Measuring `y` then estimates `y / 2^m ≈ k / r` for a random `k`.

use std::collections::HashMap;

use circuit_sim::backend::MAX_QUBITS;
use circuit_sim::circuit::{Circuit, Register};
use log::debug;

use crate::arith::{data_register_size, gcd, mod_mul};
use crate::controlled_power::ControlledPower;
use crate::errors::{OrderFindingError, Result};
use crate::modular_unitary::{ModularUnitary, MAX_DATA_QUBITS};

/// Largest control register: at least one data qubit must still fit in the
/// simulator.
pub const MAX_CONTROL_QUBITS: usize = MAX_QUBITS - 1;

/// A built phase-estimation circuit and the registers it was built on.
#[derive(Debug, Clone)]
pub struct PhaseEstimationCircuit {
    modulus: u64,
    base: u64,
    circuit: Circuit,
    control: Register,
    data: Register,
    output: Register,
}

impl PhaseEstimationCircuit {
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn control(&self) -> &Register {
        &self.control
    }

    pub fn data(&self) -> &Register {
        &self.data
    }

    /// Classical register receiving the control measurement.
    pub fn output(&self) -> &Register {
        &self.output
    }

    /// m.
    pub fn control_qubits(&self) -> usize {
        self.control.size()
    }

    /// n.
    pub fn data_qubits(&self) -> usize {
        self.data.size()
    }
}

/// Assemble the order-finding circuit for `base` mod `modulus` with
/// `control_qubits` control qubits.
///
/// Register sizes are checked against the simulator limits before any
/// matrix is built. Each distinct multiplier `a^(2^i) mod N` is built once
/// and shared by every control qubit that needs it.
pub fn build_circuit(
    modulus: u64,
    base: u64,
    control_qubits: usize,
) -> Result<PhaseEstimationCircuit> {
    if modulus < 2 {
        return Err(OrderFindingError::InvalidModulus(modulus));
    }
    let g = gcd(base, modulus);
    if g > 1 {
        return Err(OrderFindingError::InvalidInput { base, modulus, gcd: g });
    }
    let n = data_register_size(modulus);
    if n > MAX_DATA_QUBITS {
        return Err(OrderFindingError::RegisterTooLarge {
            register: "data",
            qubits: n,
            max: MAX_DATA_QUBITS,
        });
    }
    if control_qubits == 0 || control_qubits > MAX_CONTROL_QUBITS {
        return Err(OrderFindingError::RegisterTooLarge {
            register: "control",
            qubits: control_qubits,
            max: MAX_CONTROL_QUBITS,
        });
    }
    if control_qubits + n > MAX_QUBITS {
        return Err(OrderFindingError::RegisterTooLarge {
            register: "ctrl+data",
            qubits: control_qubits + n,
            max: MAX_QUBITS,
        });
    }
    debug!(
        "Order-finding circuit for a = {}, N = {}: m = {} control, n = {} data qubits",
        base, modulus, control_qubits, n
    );

    let mut circuit = Circuit::new();
    let control = circuit.add_register("ctrl", control_qubits);
    let data = circuit.add_register("data", n);
    let output = circuit.add_classical_register("c", control_qubits);

    circuit.x(data.qubit(0))?;
    for q in control.qubits() {
        circuit.h(q)?;
    }

    let targets: Vec<usize> = data.qubits().collect();
    let mut unitaries: HashMap<u64, ModularUnitary> = HashMap::new();
    // a^(2^i) mod N, squared each step
    let mut multiplier = base % modulus;
    for i in 0..control_qubits {
        let unitary = match unitaries.get(&multiplier) {
            Some(u) => u.clone(),
            None => {
                let u = ModularUnitary::build(multiplier, modulus)?;
                unitaries.insert(multiplier, u.clone());
                u
            }
        };
        let power = ControlledPower::new(base, 1u64 << i, unitary);
        circuit.append_controlled(power.place(control.qubit(i), &targets)?)?;
        multiplier = mod_mul(multiplier, multiplier, modulus);
    }
    debug!("{} distinct multiplier matrices", unitaries.len());

    circuit.inverse_qft(&control, true)?;
    circuit.measure(&control, &output)?;

    Ok(PhaseEstimationCircuit {
        modulus,
        base,
        circuit,
        control,
        data,
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_sim::circuit::{ControlledGate, Operation};

    #[test]
    fn layout_for_fifteen() {
        let pe = build_circuit(15, 7, 8).unwrap();
        let c = pe.circuit();
        assert_eq!(pe.control_qubits(), 8);
        assert_eq!(pe.data_qubits(), 4);
        assert_eq!(c.num_qubits(), 12);
        assert_eq!(c.num_clbits(), 8);
        assert_eq!(c.count_controlled(), 8);
        assert_eq!(c.count_inverse_qft(), 1);
        assert_eq!(c.measured_qubits(), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn fragment_order() {
        let pe = build_circuit(15, 7, 3).unwrap();
        let ops = pe.circuit().operations();
        // x on data[0], 3 hadamards, 3 controlled powers, iqft, measure
        assert_eq!(ops.len(), 9);
        assert!(matches!(ops[0], Operation::X { target: 3 }));
        for (i, op) in ops[1..4].iter().enumerate() {
            assert!(matches!(op, Operation::H { target } if *target == i));
        }
        let multipliers: Vec<&str> = ops[4..7]
            .iter()
            .map(|op| match op {
                Operation::Controlled(g) => g.label(),
                other => panic!("unexpected {}", other),
            })
            .collect();
        // 7^1, 7^2, 7^4 mod 15
        assert_eq!(multipliers, vec!["7×mod15", "4×mod15", "1×mod15"]);
        for (i, op) in ops[4..7].iter().enumerate() {
            if let Operation::Controlled(g) = op {
                assert_eq!(g.control(), i);
                assert_eq!(g.targets(), &[3, 4, 5, 6]);
            }
        }
        assert!(matches!(ops[7], Operation::InverseQft { do_swaps: true, .. }));
        assert!(matches!(ops[8], Operation::Measure { .. }));
    }

    #[test]
    fn construction_is_deterministic() {
        let a = build_circuit(21, 2, 6).unwrap();
        let b = build_circuit(21, 2, 6).unwrap();
        let fmt = |pe: &PhaseEstimationCircuit| {
            pe.circuit()
                .operations()
                .iter()
                .map(|op| op.to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(fmt(&a), fmt(&b));
    }

    #[test]
    fn repeated_multipliers_share_one_matrix() {
        // 7^4 = 7^8 = 1 mod 15
        let pe = build_circuit(15, 7, 4).unwrap();
        let gates: Vec<&ControlledGate> = pe
            .circuit()
            .operations()
            .iter()
            .filter_map(|op| match op {
                Operation::Controlled(g) => Some(g),
                _ => None,
            })
            .collect();
        assert_eq!(gates.len(), 4);
        assert_eq!(gates[2].label(), "1×mod15");
        assert_eq!(gates[3].label(), "1×mod15");
        assert!(std::ptr::eq(gates[2].unitary(), gates[3].unitary()));
        assert!(!std::ptr::eq(gates[0].unitary(), gates[1].unitary()));
    }

    #[test]
    fn oversized_registers_rejected_before_building() {
        // N = 4095 needs 12 data qubits
        assert!(matches!(
            build_circuit(4095, 2, 25),
            Err(OrderFindingError::RegisterTooLarge { register: "data", qubits: 12, .. })
        ));
        // 21 + 10 qubits for N = 1000
        assert!(matches!(
            build_circuit(1000, 3, 21),
            Err(OrderFindingError::RegisterTooLarge { register: "ctrl+data", qubits: 31, max: 24 })
        ));
        assert!(matches!(
            build_circuit(1000, 3, MAX_CONTROL_QUBITS + 1),
            Err(OrderFindingError::RegisterTooLarge { register: "control", .. })
        ));
        // exactly at the limit
        let pe = build_circuit(15, 7, MAX_QUBITS - 4).unwrap();
        assert_eq!(pe.circuit().num_qubits(), MAX_QUBITS);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            build_circuit(15, 3, 8),
            Err(OrderFindingError::InvalidInput { gcd: 3, .. })
        ));
        assert!(matches!(
            build_circuit(1, 1, 8),
            Err(OrderFindingError::InvalidModulus(1))
        ));
        assert!(matches!(
            build_circuit(15, 7, 0),
            Err(OrderFindingError::RegisterTooLarge { .. })
        ));
    }
}
