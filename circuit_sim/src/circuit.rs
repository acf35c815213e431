//! Circuit description: registers plus an append-only list of operations.
//!
//! Qubits are addressed by global index. Global qubit `q` is bit `q` of a
//! basis-state index (little-endian), so register integers read out with
//! their first qubit as the least significant bit.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::errors::{CircuitError, CircuitResult};
use crate::matrix::Matrix;

/// Target qubit list of a controlled gate.
pub type Targets = SmallVec<[usize; 8]>;

/// A named, contiguous run of qubit (or classical bit) indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    name: String,
    offset: usize,
    size: usize,
}

impl Register {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Global index of the `i`th element of the register.
    pub fn qubit(&self, i: usize) -> usize {
        assert!(i < self.size, "Index {} out of register {}", i, self.name);
        self.offset + i
    }

    /// All global indices, least significant first.
    pub fn qubits(&self) -> impl Iterator<Item = usize> {
        self.offset..self.offset + self.size
    }
}

/// Apply `unitary` to `targets` when the `control` qubit is |1⟩.
///
/// Target `targets[k]` carries bit `k` of the row/column index of `unitary`.
#[derive(Debug, Clone)]
pub struct ControlledGate {
    label: String,
    control: usize,
    targets: Targets,
    unitary: Arc<Matrix>,
}

impl ControlledGate {
    pub fn new<S: Into<String>>(
        label: S,
        control: usize,
        targets: &[usize],
        unitary: Arc<Matrix>,
    ) -> CircuitResult<Self> {
        let label = label.into();
        if targets.is_empty() {
            return Err(CircuitError::new(format!("Gate {} has no targets", label)));
        }
        if unitary.dim() != 1usize << targets.len() {
            return Err(CircuitError::new(format!(
                "Gate {} has a {}x{} matrix but {} target qubits",
                label,
                unitary.dim(),
                unitary.dim(),
                targets.len()
            )));
        }
        if targets.contains(&control) {
            return Err(CircuitError::new(format!(
                "Gate {} uses qubit {} as both control and target",
                label, control
            )));
        }
        for (i, t) in targets.iter().enumerate() {
            if targets[i + 1..].contains(t) {
                return Err(CircuitError::new(format!(
                    "Gate {} repeats target qubit {}",
                    label, t
                )));
            }
        }
        Ok(Self {
            label,
            control,
            targets: targets.iter().copied().collect(),
            unitary,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn control(&self) -> usize {
        self.control
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn unitary(&self) -> &Matrix {
        &self.unitary
    }

    /// Total qubits touched, control included.
    pub fn arity(&self) -> usize {
        self.targets.len() + 1
    }
}

/// One fragment of a circuit.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Pauli X.
    X { target: usize },
    /// Hadamard.
    H { target: usize },
    /// Dense unitary conditioned on a single control qubit.
    Controlled(ControlledGate),
    /// Inverse quantum Fourier transform over `qubits` (least significant
    /// first). With `do_swaps` the output is bit-reversed back so the
    /// measured integer has the same bit order as the input.
    InverseQft { qubits: Vec<usize>, do_swaps: bool },
    /// Measure `qubits[k]` into bit `k` of the named classical register.
    Measure { qubits: Vec<usize>, register: String },
}

impl Operation {
    /// Every qubit the operation touches.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Operation::X { target } | Operation::H { target } => vec![*target],
            Operation::Controlled(g) => {
                let mut qs = vec![g.control()];
                qs.extend_from_slice(g.targets());
                qs
            }
            Operation::InverseQft { qubits, .. } | Operation::Measure { qubits, .. } => {
                qubits.clone()
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::X { target } => write!(f, "x q{}", target),
            Operation::H { target } => write!(f, "h q{}", target),
            Operation::Controlled(g) => {
                write!(f, "c-{} q{} -> {:?}", g.label(), g.control(), g.targets())
            }
            Operation::InverseQft { qubits, do_swaps } => {
                write!(f, "qft_dg{} {:?}", if *do_swaps { "" } else { "(no swaps)" }, qubits)
            }
            Operation::Measure { qubits, register } => {
                write!(f, "measure {:?} -> {}", qubits, register)
            }
        }
    }
}

/// Quantum and classical registers plus the ordered list of operations
/// applied to them.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    qregs: Vec<Register>,
    cregs: Vec<Register>,
    ops: Vec<Operation>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `size` fresh qubits, all starting in |0⟩.
    pub fn add_register<S: Into<String>>(&mut self, name: S, size: usize) -> Register {
        let reg = Register {
            name: name.into(),
            offset: self.num_qubits(),
            size,
        };
        self.qregs.push(reg.clone());
        reg
    }

    /// Allocate `size` classical bits.
    pub fn add_classical_register<S: Into<String>>(&mut self, name: S, size: usize) -> Register {
        let reg = Register {
            name: name.into(),
            offset: self.num_clbits(),
            size,
        };
        self.cregs.push(reg.clone());
        reg
    }

    pub fn num_qubits(&self) -> usize {
        self.qregs.iter().map(Register::size).sum()
    }

    pub fn num_clbits(&self) -> usize {
        self.cregs.iter().map(Register::size).sum()
    }

    pub fn registers(&self) -> &[Register] {
        &self.qregs
    }

    pub fn classical_registers(&self) -> &[Register] {
        &self.cregs
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn x(&mut self, target: usize) -> CircuitResult<()> {
        self.push(Operation::X { target })
    }

    pub fn h(&mut self, target: usize) -> CircuitResult<()> {
        self.push(Operation::H { target })
    }

    pub fn append_controlled(&mut self, gate: ControlledGate) -> CircuitResult<()> {
        self.push(Operation::Controlled(gate))
    }

    pub fn inverse_qft(&mut self, register: &Register, do_swaps: bool) -> CircuitResult<()> {
        self.push(Operation::InverseQft {
            qubits: register.qubits().collect(),
            do_swaps,
        })
    }

    /// Measure a whole quantum register into a classical register of the
    /// same size.
    pub fn measure(&mut self, qreg: &Register, creg: &Register) -> CircuitResult<()> {
        if qreg.size() != creg.size() {
            return Err(CircuitError::new(format!(
                "Cannot measure {} qubits into {} classical bits",
                qreg.size(),
                creg.size()
            )));
        }
        if !self.cregs.contains(creg) {
            return Err(CircuitError::new(format!(
                "Unknown classical register {}",
                creg.name()
            )));
        }
        self.push(Operation::Measure {
            qubits: qreg.qubits().collect(),
            register: creg.name().to_string(),
        })
    }

    /// Qubits read out by measurement, in classical bit order.
    pub fn measured_qubits(&self) -> Vec<usize> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Operation::Measure { qubits, .. } => Some(qubits.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn count_controlled(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Operation::Controlled(_)))
            .count()
    }

    pub fn count_inverse_qft(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Operation::InverseQft { .. }))
            .count()
    }

    fn push(&mut self, op: Operation) -> CircuitResult<()> {
        let n = self.num_qubits();
        if let Some(q) = op.qubits().into_iter().find(|&q| q >= n) {
            return Err(CircuitError::new(format!(
                "Qubit {} out of range for a {}-qubit circuit ({})",
                q, n, op
            )));
        }
        self.ops.push(op);
        Ok(())
    }
}
