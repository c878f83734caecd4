use anyhow::Result;
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trendline_core::{Chart, DataRow, Dataset, RenderOptions};

fn build_dataset(days: usize, series: usize) -> Dataset {
    let first = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
    let columns = (0..series).map(|i| format!("browser{i}")).collect();
    let rows = (0..days)
        .map(|i| {
            let values = (0..series)
                .map(|s| {
                    let v = 1000.0 + (i as f64 * 0.01 + s as f64).sin() * 200.0 + s as f64 * 300.0;
                    // sprinkle a few gaps
                    if (i + s) % 97 == 0 { None } else { Some(v.round()) }
                })
                .collect();
            DataRow { date: first + Duration::days(i as i64), values }
        })
        .collect();
    Dataset { columns, rows }
}

fn bench_render(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2018, 6, 1).unwrap();
    let opts = RenderOptions::default();

    let mut group = c.benchmark_group("render_svg");
    for &days in &[365usize, 2_000usize] {
        let data = build_dataset(days, 4);
        group.bench_function(format!("build_{days}"), |b| {
            b.iter(|| -> Result<()> {
                let chart = Chart::build(black_box(&data), start, &opts)?;
                black_box(chart);
                Ok(())
            });
        });
        group.bench_function(format!("svg_{days}"), |b| {
            let chart = Chart::build(&data, start, &opts).unwrap();
            b.iter(|| black_box(chart.render_svg(&opts)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
