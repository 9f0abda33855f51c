use std::time::Duration;

use criterion::{Criterion, Throughput};
use pattern_scatter::region::Region;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Square (or cube) region of side 1000 in `dim` dimensions.
#[allow(dead_code)]
pub fn bench_region(dim: usize) -> Region {
    Region::new(vec![[0.0, 1000.0]; dim]).expect("valid bench region")
}

pub fn bench_rng(salt: u64) -> StdRng {
    StdRng::seed_from_u64(0xC0FFEE_u64 ^ salt)
}
