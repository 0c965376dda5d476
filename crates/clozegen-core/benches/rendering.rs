use criterion::{black_box, criterion_group, criterion_main, Criterion};

use clozegen_core::{Context, Template, Value};

const WALL_TEMPLATE: &str = r#"
Let's consider a flat concrete wall of width $$w$$ = {w:3.2f} m
and surface area $$S$$ = {S:3.2f} m<sup>2</sup>.
The surfaces are maintained at temperatures
$$\theta_0$$ = {θ0:3.1f} °C and $$\theta_w$$ = {θw:3.1f} °C.
The thermal conductivity is $$\lambda$$ = {λ:3.2f} W/m·K.

$$U$$ = {{1:NUMERICAL:={U:3.2f}:0.5}} (±0.5) W/m<sup>2</sup>K,
$$R$$ = {{1:NUMERICAL:={R:7.6f}:0.005}} (±0.005) K/W,
$$\varphi_{{0,w}}$$ = {{1:NUMERICAL:={φ:3.2f}:10}} (±10) W/m<sup>2</sup>,
$$q_{{0,w}}$$ = {{1:NUMERICAL:={q:3.2f}:100}} (±100) W.
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_parse");

    group.bench_function("wall", |b| {
        b.iter(|| Template::parse("wall", black_box(WALL_TEMPLATE)))
    });

    let large = WALL_TEMPLATE.repeat(50);
    group.bench_function("wall_x50", |b| {
        b.iter(|| Template::parse("wall", black_box(&large)))
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_render");

    let template = Template::parse("wall", WALL_TEMPLATE).unwrap();
    let values: Vec<(&str, Value)> = vec![
        ("w", Value::Float(0.2)),
        ("S", Value::Int(20)),
        ("θ0", Value::Int(-5)),
        ("θw", Value::Int(20)),
        ("λ", Value::Float(1.8)),
        ("U", Value::Float(9.0)),
        ("R", Value::Float(0.005555)),
        ("φ", Value::Float(-225.0)),
        ("q", Value::Float(-4500.0)),
    ];
    let mut context = Context::new();
    for (name, value) in &values {
        context.insert(name, value).unwrap();
    }

    group.bench_function("wall", |b| {
        b.iter(|| template.render(black_box(&context)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
