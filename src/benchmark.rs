use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reg_ast::pipeline::compile;
use reg_ast::postfix::{shunting_yard, NullSink};
use reg_ast::preprocess::{desugar, expand_escapes, insert_concat};
use reg_ast::token::tokenize;

static PATTERNS: &[&str] = &[
    "(a|b)*abb",
    "a+b?c*",
    "((a|b)+|(c.d)?)*e",
    "\\(x\\)|y+",
    "0(1|0)*1+",
];

fn criterion_benchmark_compile(c: &mut Criterion) {
    c.bench_function("compile patterns to ast", |b| {
        b.iter(|| {
            for pattern in PATTERNS {
                let _ = compile(black_box(pattern));
            }
        })
    });
}

fn criterion_benchmark_untraced_postfix(c: &mut Criterion) {
    c.bench_function("postfix conversion without trace", |b| {
        b.iter(|| {
            for pattern in PATTERNS {
                let expanded = expand_escapes(black_box(pattern));
                if let Ok(desugared) = desugar(tokenize(&expanded)) {
                    let explicit = insert_concat(&desugared);
                    let _ = shunting_yard(&explicit, &mut NullSink);
                }
            }
        })
    });
}

fn criterion_benchmark_regex_baseline(c: &mut Criterion) {
    c.bench_function("regex crate parse baseline", |b| {
        b.iter(|| {
            for pattern in ["(a|b)*abb", "a+b?c*", "0(1|0)*1"] {
                let _ = regex::Regex::new(black_box(pattern));
            }
        })
    });
}

criterion_group!(
    benches,
    criterion_benchmark_compile,
    criterion_benchmark_untraced_postfix,
    criterion_benchmark_regex_baseline
);
criterion_main!(benches);
