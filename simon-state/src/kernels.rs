//! Amplitude kernels for the Hadamard and CNOT gates
//!
//! Each kernel walks the state in blocks of `2 * stride`, where `stride` is
//! the bit weight of the qubit whose value differs between the paired
//! amplitudes. Blocks are disjoint, so the parallel variants hand each one to
//! a rayon task with no further synchronisation.

use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::FRAC_1_SQRT_2;

/// Apply a Hadamard on `qubit`
///
/// For each pair `(a, b)` of amplitudes differing only in bit `qubit`, the
/// pair becomes `((a + b)/√2, (a − b)/√2)`.
pub fn apply_hadamard(state: &mut [Complex64], qubit: usize, parallel: bool) {
    let stride = 1usize << qubit;
    if parallel {
        state
            .par_chunks_mut(stride * 2)
            .for_each(|block| hadamard_block(block, stride));
    } else {
        state
            .chunks_mut(stride * 2)
            .for_each(|block| hadamard_block(block, stride));
    }
}

#[inline]
fn hadamard_block(block: &mut [Complex64], stride: usize) {
    let (low, high) = block.split_at_mut(stride);
    for (a, b) in low.iter_mut().zip(high.iter_mut()) {
        let sum = (*a + *b) * FRAC_1_SQRT_2;
        let diff = (*a - *b) * FRAC_1_SQRT_2;
        *a = sum;
        *b = diff;
    }
}

/// Apply a CNOT with the given control and target
///
/// Swaps the amplitudes of every index pair differing only in bit `target`
/// whose bit `control` is 1. Caller guarantees `control != target`.
pub fn apply_cnot(state: &mut [Complex64], control: usize, target: usize, parallel: bool) {
    let stride = 1usize << target;
    let control_mask = 1usize << control;
    let block_len = stride * 2;

    if parallel {
        state
            .par_chunks_mut(block_len)
            .enumerate()
            .for_each(|(k, block)| cnot_block(block, k * block_len, stride, control_mask));
    } else {
        state
            .chunks_mut(block_len)
            .enumerate()
            .for_each(|(k, block)| cnot_block(block, k * block_len, stride, control_mask));
    }
}

#[inline]
fn cnot_block(block: &mut [Complex64], base: usize, stride: usize, control_mask: usize) {
    let (low, high) = block.split_at_mut(stride);
    for (j, (a, b)) in low.iter_mut().zip(high.iter_mut()).enumerate() {
        if (base + j) & control_mask != 0 {
            std::mem::swap(a, b);
        }
    }
}

/// Squared magnitude of every amplitude
pub fn compute_probabilities(state: &[Complex64], parallel: bool) -> Vec<f64> {
    if parallel {
        state.par_iter().map(|a| a.norm_sqr()).collect()
    } else {
        state.iter().map(|a| a.norm_sqr()).collect()
    }
}
