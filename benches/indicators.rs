#[path = "../tests/fixtures/mod.rs"]
mod fixtures;

use crate::fixtures::load_sample_series;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use marketpulse_ta::{
    AnalysisConfig, Bb, BbConfig, Ema, EmaConfig, Macd, MacdConfig, Rsi, RsiConfig, Sma,
    SmaConfig, analyze, monthly_returns,
};
use std::{hint::black_box, num::NonZero, time::Duration};

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).expect("non zero value")
}

fn stream_benchmarks(c: &mut Criterion) {
    let series = load_sample_series();
    let bars = series.bars();
    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(10));

    macro_rules! stream_bench {
        ($name:expr, $ind_type:ty, $config:expr) => {
            group.bench_function($name, |b| {
                b.iter_batched(
                    || <$ind_type>::new($config),
                    |mut ind| {
                        for bar in bars {
                            black_box(ind.compute(bar));
                        }
                    },
                    BatchSize::SmallInput,
                );
            });
        };
    }

    stream_bench!("sma20", Sma, SmaConfig::close(nz(20)));
    stream_bench!("sma50", Sma, SmaConfig::close(nz(50)));
    stream_bench!("ema12", Ema, EmaConfig::close(nz(12)));
    stream_bench!("ema26", Ema, EmaConfig::close(nz(26)));
    stream_bench!("bb20", Bb, BbConfig::close(nz(20)));
    stream_bench!("rsi14", Rsi, RsiConfig::close(nz(14)));
    stream_bench!("macd", Macd, MacdConfig::standard());

    group.finish();
}

fn suite_benchmarks(c: &mut Criterion) {
    let series = load_sample_series();
    let config = AnalysisConfig::default();
    let mut group = c.benchmark_group("suite");
    group.throughput(Throughput::Elements(series.len() as u64));

    group.bench_function("analyze", |b| {
        b.iter(|| black_box(analyze(black_box(&series), black_box(&config))));
    });

    group.bench_function("monthly", |b| {
        b.iter(|| black_box(monthly_returns(black_box(&series))));
    });

    group.finish();
}

criterion_group!(benches, stream_benchmarks, suite_benchmarks);
criterion_main!(benches);
