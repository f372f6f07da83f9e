use basecalc::{Base, CalculatorSession, FloatFormat, Number, Operation};

fn test_parse() {
    for base in Base::all() {
        black_box(Number::parse("1010.1011", base).unwrap());
    }
}

fn test_format() {
    let n = Number::parse("39887.5625", Base::DECIMAL).unwrap();
    for base in Base::all() {
        black_box(n.format_in(base));
    }
}

fn test_arithmetic() {
    let a = Number::parse("1200.2", Base::new(5).unwrap()).unwrap();
    let b = Number::parse("35.6", Base::new(15).unwrap()).unwrap();
    black_box(a.add(&b).unwrap());
    black_box(a.sub(&b).unwrap());
    black_box(a.mul(&b).unwrap());
    black_box(a.div(&b).unwrap());
}

fn test_complement() {
    let a = Number::parse("ABCDEF", Base::HEXADECIMAL).unwrap();
    black_box(a.radix_complement(None).unwrap());
    black_box(a.nor(&a).unwrap());
}

fn test_floating_point() {
    let a = Number::parse("-1.FFFFFFFF", Base::HEXADECIMAL).unwrap();
    black_box(a.to_floating_point(FloatFormat::SINGLE));
    black_box(a.to_floating_point(FloatFormat::DOUBLE));
}

fn test_session() {
    let mut s = CalculatorSession::new();
    for c in "12345.5".chars() {
        s.add_digit(c).unwrap();
    }
    s.perform_operation(Operation::Multiply);
    for c in "42".chars() {
        s.add_digit(c).unwrap();
    }
    s.solve().unwrap();
    s.change_base(Base::HEXADECIMAL).unwrap();
    black_box(s.current_text());
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_parse", |b| b.iter(test_parse));
    c.bench_function("test_format", |b| b.iter(test_format));
    c.bench_function("test_arithmetic", |b| b.iter(test_arithmetic));
    c.bench_function("test_complement", |b| b.iter(test_complement));
    c.bench_function("test_floating_point", |b| b.iter(test_floating_point));
    c.bench_function("test_session", |b| b.iter(test_session));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
