//! Manifest parsing benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lentil_manifest::{parse_pipfile, validate};

const MANIFEST: &str = r#"
[[source]]
url = "https://pypi.org/simple"
verify_ssl = true
name = "pypi"

[packages]
requests = "*"
pillow = "*"
pillow-heif = "*"
opencv-python = "*"
numpy = ">=1.24, <2"

[dev-packages]
mypy = "*"
pytest = "*"
black = "*"
isort = "*"
flake8 = "*"
build = "*"

[requires]
python_version = "3.11"
python_full_version = "3.11.0"
"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_pipfile", |b| {
        b.iter(|| parse_pipfile(black_box(MANIFEST)).unwrap())
    });
}

fn bench_validate(c: &mut Criterion) {
    let manifest = parse_pipfile(MANIFEST).unwrap();
    c.bench_function("validate", |b| b.iter(|| validate(black_box(&manifest))));
}

criterion_group!(benches, bench_parse, bench_validate);
criterion_main!(benches);
