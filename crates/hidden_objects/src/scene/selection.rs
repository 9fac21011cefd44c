//! Random selection helpers used while composing a scene.
//!
//! - [pick_uniform]: picks one item of a slice with equal probability.
//! - [shuffled_indices]: a uniformly random permutation of `0..n` (Fisher-Yates).
use rand::RngCore;

use crate::sampling::rand_below;

pub fn pick_uniform<'a, T>(items: &'a [T], rng: &mut dyn RngCore) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rand_below(rng, items.len()))
}

pub fn shuffled_indices(n: usize, rng: &mut dyn RngCore) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rand_below(rng, i + 1);
        indices.swap(i, j);
    }
    indices
}
