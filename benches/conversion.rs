use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pipe2xml::{convert, convert_str, ConvertOptions, Row, SAMPLE_INPUT};
use std::io;

fn generate_input(persons: usize) -> String {
    let mut input = String::new();
    for i in 0..persons {
        input.push_str(&format!("P|First{}|Last{}\n", i, i));
        input.push_str(&format!("T|070-{:06}|018-{:06}\n", i, i));
        input.push_str(&format!("A|Street {}|Uppsala|{}\n", i, 75000 + i % 1000));
        for child in 0..3 {
            input.push_str(&format!("F|Child{}|{}\n", child, 1990 + child));
            input.push_str(&format!("A|Street {}|Uppsala|75330\n", i));
        }
    }
    input
}

fn benchmark_lex_row(c: &mut Criterion) {
    let line = "A|  S:t Johannesgatan 16  |Uppsala|75330";

    c.bench_function("lex_row", |b| b.iter(|| Row::parse(black_box(line))));
}

fn benchmark_convert_sample(c: &mut Criterion) {
    let options = ConvertOptions::default();

    c.bench_function("convert_sample", |b| {
        b.iter(|| convert_str(black_box(SAMPLE_INPUT), &options))
    });
}

fn benchmark_convert_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_persons");
    let options = ConvertOptions::default();

    for size in [10, 100, 1000].iter() {
        let input = generate_input(*size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| convert(black_box(input.as_bytes()), io::sink(), &options))
        });
    }
    group.finish();
}

fn benchmark_convert_latin1(c: &mut Criterion) {
    let input = generate_input(100).replace("Street", "Gärdet");
    let options = ConvertOptions::new().with_charset("iso-8859-1").unwrap();

    c.bench_function("convert_latin1", |b| {
        b.iter(|| convert_str(black_box(&input), &options))
    });
}

criterion_group!(
    benches,
    benchmark_lex_row,
    benchmark_convert_sample,
    benchmark_convert_sizes,
    benchmark_convert_latin1
);
criterion_main!(benches);
