use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{
    PositionalOp, apply_runtime_config_for_size, apply_small_runtime_config,
    generate_positional_ops, seed_for, seed_for_iter,
};
use criterion::measurement::Measurement;
use criterion::{BatchSize, BenchmarkGroup, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use avl_list::AvlTreeList;

const SIZES: [usize; 5] = [1_000, 4_000, 16_000, 64_000, 256_000];
const OPS_PER_SIZE: usize = 100;
const CONCAT_RATIOS: [usize; 3] = [1, 8, 64];

trait BenchSeq {
    fn from_values(values: Vec<i64>) -> Self;
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&i64>;
    fn insert(&mut self, index: usize, value: i64);
    fn remove(&mut self, index: usize) -> Option<i64>;
}

impl BenchSeq for AvlTreeList<i64> {
    fn from_values(values: Vec<i64>) -> Self {
        AvlTreeList::from_vec(values)
    }

    fn len(&self) -> usize {
        AvlTreeList::len(self)
    }

    fn get(&self, index: usize) -> Option<&i64> {
        AvlTreeList::get(self, index)
    }

    fn insert(&mut self, index: usize, value: i64) {
        if let Ok(rotations) = AvlTreeList::insert(self, index, value) {
            black_box(rotations);
        }
    }

    fn remove(&mut self, index: usize) -> Option<i64> {
        AvlTreeList::remove(self, index)
    }
}

impl BenchSeq for Vec<i64> {
    fn from_values(values: Vec<i64>) -> Self {
        values
    }

    fn len(&self) -> usize {
        <[i64]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&i64> {
        <[i64]>::get(self, index)
    }

    fn insert(&mut self, index: usize, value: i64) {
        Vec::insert(self, index, value);
    }

    fn remove(&mut self, index: usize) -> Option<i64> {
        (index < Vec::len(self)).then(|| Vec::remove(self, index))
    }
}

fn generate_initial<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i64> {
    (0..size).map(|_| rng.random()).collect()
}

pub fn bench_positional(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_list/positional");

    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let base_seed = seed_for(1, size as u64);
        let mut init_rng = StdRng::seed_from_u64(base_seed);
        let initial = generate_initial(size, &mut init_rng);

        bench_seq::<AvlTreeList<i64>, _>(&mut group, "avl", size, base_seed, &initial);
        bench_seq::<Vec<i64>, _>(&mut group, "vec", size, base_seed, &initial);
    }

    group.finish();
}

fn bench_seq<S, M>(
    group: &mut BenchmarkGroup<'_, M>,
    label: &str,
    size: usize,
    base_seed: u64,
    initial: &[i64],
) where
    S: BenchSeq,
    M: Measurement<Value = Duration>,
{
    let mut seq = S::from_values(initial.to_vec());

    group.bench_function(BenchmarkId::new(label, size), |bencher| {
        bencher.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            for iter in 0..iters {
                let mut op_rng = StdRng::seed_from_u64(seed_for_iter(base_seed, iter));
                let ops = generate_positional_ops(&mut op_rng, seq.len(), OPS_PER_SIZE);
                let start = Instant::now();
                run_ops(&mut seq, &ops);
                black_box(seq.len());
                total += start.elapsed();
            }
            total
        })
    });
}

fn run_ops<S: BenchSeq>(seq: &mut S, ops: &[PositionalOp]) {
    for op in ops {
        match *op {
            PositionalOp::Get { index } => {
                if let Some(value) = seq.get(index) {
                    black_box(*value);
                }
            }
            PositionalOp::Insert { index, value } => seq.insert(index, value),
            PositionalOp::Remove { index } => {
                black_box(seq.remove(index));
            }
        }
    }
}

pub fn bench_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_list/concat");

    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let mut rng = StdRng::seed_from_u64(seed_for(2, size as u64));
        for &ratio in &CONCAT_RATIOS {
            let right_len = (size / (ratio + 1)).max(1);
            let left = AvlTreeList::from_vec(generate_initial(size - right_len, &mut rng));
            let right = AvlTreeList::from_vec(generate_initial(right_len, &mut rng));

            group.bench_function(BenchmarkId::new(format!("1:{ratio}"), size), |bencher| {
                bencher.iter_batched(
                    || (left.clone(), right.clone()),
                    |(mut left, right)| {
                        black_box(left.concat(right));
                        left
                    },
                    BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

pub fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_list/rebuild");
    apply_small_runtime_config(&mut group);

    for &size in &SIZES[..3] {
        let values = generate_initial(size, &mut StdRng::seed_from_u64(seed_for(3, size as u64)));

        group.bench_function(BenchmarkId::new("from_vec", size), |bencher| {
            bencher.iter_batched(
                || values.clone(),
                AvlTreeList::from_vec,
                BatchSize::LargeInput,
            )
        });
        group.bench_function(BenchmarkId::new("insert_back", size), |bencher| {
            bencher.iter_batched(
                || values.clone(),
                |values| {
                    let mut list = AvlTreeList::new();
                    list.extend(values);
                    list
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_function(BenchmarkId::new("sort", size), |bencher| {
            let list = AvlTreeList::from_vec(values.clone());
            bencher.iter(|| black_box(list.sort()))
        });
    }

    group.finish();
}
