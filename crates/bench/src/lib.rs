//! Shared benchmark configuration and positional workloads.

use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const MEDIUM_SIZE_THRESHOLD: usize = 16_000;
const LARGE_SIZE_THRESHOLD: usize = 128_000;
const RNG_SEED: u64 = 0x5EED_2026;
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

/// Picks the runtime preset matching a workload of `size` elements.
pub fn apply_runtime_config_for_size<M: Measurement>(
    size: usize,
    group: &mut BenchmarkGroup<'_, M>,
) {
    if size >= LARGE_SIZE_THRESHOLD {
        apply_large_runtime_config(group);
    } else if size >= MEDIUM_SIZE_THRESHOLD {
        apply_medium_runtime_config(group);
    } else {
        apply_small_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

pub fn seed_for(label: u64, size: u64) -> u64 {
    let seed = RNG_SEED ^ size.wrapping_mul(SEED_MIX);
    mix_seed(seed ^ label.wrapping_mul(SEED_MIX.rotate_left(31)))
}

pub fn seed_for_iter(base: u64, iter: u64) -> u64 {
    mix_seed(base ^ iter.wrapping_mul(SEED_MIX))
}

fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionalOp {
    Get { index: usize },
    Insert { index: usize, value: i64 },
    Remove { index: usize },
}

/// Generates `count` get/insert/remove operations that stay in bounds for a
/// sequence starting at `len` elements.
///
/// The length is steered so that it is back at `len` after the last operation
/// (for `len > 0`), which keeps repeated benchmark iterations comparable.
pub fn generate_positional_ops<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    count: usize,
) -> Vec<PositionalOp> {
    let mut current = len;
    let mut ops = Vec::with_capacity(count);
    for step in 0..count {
        let remaining = (count - step) as isize;
        let drift = current as isize - len as isize;
        let can_get = current > 0 && drift.abs() < remaining;
        let can_insert = current == 0 || drift + 1 < remaining;
        let can_remove = current > 0 && 1 - drift < remaining;
        let roll = match rng.random_range(0..3) {
            0 if can_get => 0,
            1 if can_insert => 1,
            2 if can_remove => 2,
            _ if drift > 0 => 2,
            _ if can_insert => 1,
            _ => 0,
        };
        match roll {
            0 => ops.push(PositionalOp::Get {
                index: rng.random_range(0..current),
            }),
            1 => {
                ops.push(PositionalOp::Insert {
                    index: rng.random_range(0..=current),
                    value: rng.random(),
                });
                current += 1;
            }
            _ => {
                ops.push(PositionalOp::Remove {
                    index: rng.random_range(0..current),
                });
                current -= 1;
            }
        }
    }
    ops
}
