use criterion::{Criterion, black_box, criterion_group, criterion_main};
use treecompare::{Flag, RuleSet, Value, diff};

fn records(count: usize, offset: usize) -> Value {
    Value::sequence((0..count).map(|i| {
        let n = (i + offset) % count;
        Value::mapping([
            ("id", Value::from(n)),
            ("name", Value::from(format!("record-{n}"))),
            ("tags", Value::sequence(["a", "b", "c"])),
        ])
    }))
}

fn keyed_benchmark(c: &mut Criterion) {
    let expected = records(200, 0);
    let actual = records(200, 0);
    let rules = RuleSet::default();

    c.bench_function("diff (keyed, 200 records)", |b| {
        b.iter(|| diff(black_box(&expected), black_box(&actual), &rules).unwrap())
    });
}

fn unkeyed_benchmark(c: &mut Criterion) {
    // Rotated so every record has to be found by the exact pass
    let expected = records(200, 0);
    let actual = records(200, 37);
    let rules = RuleSet::patterns([(r"^\[\d+\]$", Flag::IgnoreKey)]).unwrap();

    c.bench_function("diff (unkeyed, 200 rotated records)", |b| {
        b.iter(|| diff(black_box(&expected), black_box(&actual), &rules).unwrap())
    });
}

fn text_benchmark(c: &mut Criterion) {
    let expected = Value::from("Lorem ipsum dolor sit amet,\n  consectetur elit.\n".repeat(50));
    let actual = Value::from("Lorem ipsum  dolor sit amet,\nconsectetur elit.\n".repeat(50));
    let rules = RuleSet::fixed(Flag::IgnoreSpacing);

    c.bench_function("diff (text, ignore_spacing)", |b| {
        b.iter(|| diff(black_box(&expected), black_box(&actual), &rules).unwrap())
    });
}

criterion_group!(benches, keyed_benchmark, unkeyed_benchmark, text_benchmark);
criterion_main!(benches);
