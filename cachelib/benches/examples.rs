use std::fs::File;
use std::io::Read;
use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use cachelib::config::LayeredCacheConfig;
use cachelib::simulator::Simulator;
use cachelib::util::get_configs;

/// Replays every bundled trace against every sample configuration
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Examples");

    get_configs()
        .unwrap()
        .iter()
        .for_each(|case| {
            // Only the timing matters here, the regression tests check the counts
            let config = LayeredCacheConfig::from_path(&case.config).unwrap();
            let mut trace_file = File::open(&case.trace).unwrap();
            let mut buf = Vec::new();
            // Held in memory so file reads stay out of the measurement
            trace_file.read_to_end(&mut buf).unwrap();
            let name = case.output.file_stem().unwrap().to_string_lossy().into_owned();
            group.bench_with_input(BenchmarkId::new("Example", name), &(config, buf), |bench, (conf, buf)| {
                bench.iter(|| {
                    Simulator::new(conf).unwrap().simulate(buf.as_slice()).unwrap().main_memory_accesses
                });
            });
        });
}

criterion_group!(
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
);
criterion_main!(benches);
