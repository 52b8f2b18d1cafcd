/// Dense quantum state vector.
///
/// An n-qubit register has 2^n basis states and holds one complex amplitude
/// per basis state. Basis index `i` encodes qubit `k` in bit `k` of `i`.
/// Physical states satisfy Σ|αᵢ|² = 1; the gate kernels preserve it but do
/// not check it.
use super::bits;
use crate::error::{GateError, GateResult};
use num_complex::Complex64;
use std::fmt;

/// Hard ceiling on register width: 2^30 amplitudes is already 16 GiB.
pub const MAX_QUBITS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Create a register of `num_qubits` qubits initialised to |0...0⟩.
    pub fn new(num_qubits: usize) -> GateResult<Self> {
        Self::basis(num_qubits, 0)
    }

    /// Create a register with all amplitude mass on basis state `index`.
    pub fn basis(num_qubits: usize, index: usize) -> GateResult<Self> {
        if num_qubits == 0 {
            return Err(GateError::InvalidLength(1));
        }
        if num_qubits > MAX_QUBITS {
            return Err(GateError::TooManyQubits { requested: num_qubits, limit: MAX_QUBITS });
        }
        let dim = 1usize << num_qubits;
        if index >= dim {
            return Err(GateError::BasisStateOutOfRange { index, dim });
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self { num_qubits, amplitudes })
    }

    /// Wrap an existing amplitude buffer. The length must be 2^n with n >= 1.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> GateResult<Self> {
        let num_qubits =
            bits::qubit_count(amplitudes.len()).ok_or(GateError::InvalidLength(amplitudes.len()))?;
        if num_qubits > MAX_QUBITS {
            return Err(GateError::TooManyQubits { requested: num_qubits, limit: MAX_QUBITS });
        }
        Ok(Self { num_qubits, amplitudes })
    }

    #[inline(always)]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the state space: 2^n
    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    #[inline(always)]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable view of the amplitudes. The length cannot change through it.
    #[inline(always)]
    pub fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Replace every amplitude with the contents of `buffer`.
    ///
    /// Used by transforms that accumulate into a scratch buffer.
    pub(crate) fn replace_amplitudes(&mut self, buffer: Vec<Complex64>) {
        debug_assert_eq!(buffer.len(), self.amplitudes.len());
        self.amplitudes = buffer;
    }

    /// Probability of measuring basis state at index `i`: |αᵢ|²
    #[inline(always)]
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes[index].norm_sqr()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Total probability (≈ 1.0 for a physical state)
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Re-normalize to unit length. A zero vector is left untouched.
    pub fn normalize(&mut self) {
        let total = self.total_probability();
        if total < 1e-24 {
            return;
        }
        let inv_norm = 1.0 / total.sqrt();
        for amp in self.amplitudes.iter_mut() {
            *amp *= inv_norm;
        }
    }

    /// Reset to |0...0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    /// Qubit 0 is the least-significant bit.
    #[inline(always)]
    pub fn qubit_bit(basis_idx: usize, qubit: usize) -> bool {
        (basis_idx >> qubit) & 1 == 1
    }

    /// Ket label for basis state `index`, qubit 0 rightmost.
    pub fn basis_label(&self, index: usize) -> String {
        (0..self.num_qubits)
            .rev()
            .map(|q| if Self::qubit_bit(index, q) { '1' } else { '0' })
            .collect()
    }

    /// Probability of measuring `qubit` as |1⟩, marginalised over the rest.
    pub fn marginal_probability_one(&self, qubit: usize) -> f64 {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| Self::qubit_bit(*i, qubit))
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Projective measurement of `qubit` driven by a uniform sample `rng` in [0, 1).
    ///
    /// Returns `true` for |1⟩. Amplitudes inconsistent with the outcome are
    /// zeroed and the state is re-normalised in place.
    pub fn collapse(&mut self, qubit: usize, rng: f64) -> GateResult<bool> {
        if qubit >= self.num_qubits {
            return Err(GateError::QubitOutOfRange {
                gate: "Measure",
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        let outcome = rng < self.marginal_probability_one(qubit);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if Self::qubit_bit(i, qubit) != outcome {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        self.normalize();
        Ok(outcome)
    }

    /// Index of the largest |αᵢ|². Ties resolve to the lowest index.
    ///
    /// A deterministic read-out, not a sample.
    pub fn max_probability_index(&self) -> usize {
        let mut best = 0;
        let mut best_prob = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p > best_prob {
                best_prob = p;
                best = i;
            }
        }
        best
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StateVector ({} qubits, dim={}):", self.num_qubits, self.dim())?;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let prob = amp.norm_sqr();
            if prob > 1e-12 {
                writeln!(
                    f,
                    "  |{}⟩  amplitude: {:.6}{:+.6}i  probability: {:.4}",
                    self.basis_label(i),
                    amp.re,
                    amp.im,
                    prob
                )?;
            }
        }
        Ok(())
    }
}
