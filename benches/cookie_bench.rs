// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jarclient::http::cookie::{pack_cookies, parse_cookie_header, parse_set_cookie};
use jarclient::CookieStore;

fn cookie_codec_benchmark(c: &mut Criterion) {
    let header = (0..20)
        .map(|i| format!("cookie{}=value{}", i, i))
        .collect::<Vec<_>>()
        .join("; ");
    let cookies = parse_cookie_header(&header);

    c.bench_function("parse_cookie_header", |b| {
        b.iter(|| black_box(parse_cookie_header(black_box(&header))))
    });

    c.bench_function("pack_cookies", |b| {
        b.iter(|| black_box(pack_cookies(black_box(&cookies))))
    });

    c.bench_function("parse_set_cookie", |b| {
        b.iter(|| {
            black_box(parse_set_cookie(black_box(
                "session=abc123; Path=/; Expires=Wed, 21 Oct 2025 07:28:00 GMT; HttpOnly",
            )))
        })
    });
}

fn cookie_store_benchmark(c: &mut Criterion) {
    let directives = vec![
        "session=abc123; Path=/; HttpOnly",
        "theme=dark; Expires=Wed, 21 Oct 2025 07:28:00 GMT",
        "csrf=token; Path=/; Secure",
    ];

    c.bench_function("store_set_from_raw", |b| {
        let store = CookieStore::new();
        b.iter(|| store.set_from_raw("example.com", directives.iter()))
    });
}

criterion_group!(benches, cookie_codec_benchmark, cookie_store_benchmark);
criterion_main!(benches);
