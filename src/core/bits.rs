/// Bit arithmetic over state-vector indices.
///
/// Basis index `i` encodes qubit `k` in bit `k` (qubit 0 is the LSB).
/// Everything here is pure and allocation-free.
use num_complex::Complex64;
use std::f64::consts::TAU;

/// True iff every control qubit's bit is set in `index`.
///
/// An empty control set is trivially satisfied.
#[inline]
pub fn controls_satisfied(index: usize, controls: &[usize]) -> bool {
    controls.iter().all(|&c| (index >> c) & 1 == 1)
}

/// Kernel of the discrete Fourier transform over a `width`-qubit block:
/// e^(2πi · output · input / 2^width).
///
/// The product is exact in 128-bit arithmetic and is reduced modulo 2^width
/// before it is turned into an angle, so the argument to `sin`/`cos` stays in
/// [0, 2π). From width 128 on the product is already below the modulus.
pub fn transform_phase_factor(output: usize, input: usize, width: usize) -> Complex64 {
    let product = (output as u128) * (input as u128);
    let reduced = if width < 128 { product & ((1u128 << width) - 1) } else { product };
    let scale = 2f64.powi(i32::try_from(width).unwrap_or(i32::MAX));
    Complex64::from_polar(1.0, TAU * (reduced as f64) / scale)
}

/// Place bit `k` of `sub_index` at register position `qubits[k]`.
#[inline]
pub fn scatter_bits(sub_index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .filter(|(k, _)| (sub_index >> k) & 1 == 1)
        .fold(0, |acc, (_, &q)| acc | (1 << q))
}

/// Mask with one bit set per listed qubit.
#[inline]
pub fn qubit_mask(qubits: &[usize]) -> usize {
    qubits.iter().fold(0, |acc, &q| acc | (1 << q))
}

/// Qubit count for a buffer of `len` amplitudes, if `len` is a power of two >= 2.
pub fn qubit_count(len: usize) -> Option<usize> {
    (len >= 2 && len.is_power_of_two()).then(|| len.trailing_zeros() as usize)
}
