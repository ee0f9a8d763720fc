use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use jiff::Timestamp;
use pasty::{TokenOptions, TokenService};

pub fn criterion_benchmark(c: &mut Criterion) {
    let options = TokenOptions::default()
        .for_audience("https://paseto.io/")
        .from_issuer("https://github.com/conradludgate/paseto-rs/");
    let service = TokenService::new("public", options).unwrap();
    let unchecked = service.with_options(TokenOptions::default());

    let expires = Timestamp::now() + Duration::from_secs(3600);
    let reserved = [("sub", "conradludgate")];
    let custom = [("user", "conradludgate")];

    let token = service.issue(expires, custom, None).unwrap();

    let mut g = c.benchmark_group("verify");

    g.bench_function("validate_public", |b| {
        b.iter(|| service.validate_public(black_box(&*token)).unwrap())
    });

    g.bench_function("validate_public_no_predicates", |b| {
        b.iter(|| unchecked.validate_public(black_box(&*token)).unwrap())
    });

    g.bench_function("verify_public", |b| {
        b.iter(|| service.verify_public(black_box(&*token)).unwrap().claims)
    });

    g.finish();

    let mut g = c.benchmark_group("sign");

    g.bench_function("issue", |b| {
        b.iter(|| service.issue(expires, black_box(custom), None).unwrap())
    });

    g.bench_function("issue_with_footer", |b| {
        let footer = br#"{"kid":"k4.pid.example"}"#.as_slice();
        b.iter(|| service.issue(expires, black_box(custom), Some(footer)).unwrap())
    });

    g.bench_function("issue_rejected_claim", |b| {
        b.iter(|| service.issue(expires, black_box(reserved), None).unwrap_err())
    });

    g.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
