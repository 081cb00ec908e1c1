// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;

use criterion::Criterion;
use mandel::{calculate, render, Grayscale, RenderConfig, Renderer, Viewport};

fn bench_calculate(c: &mut Criterion) {
    c.bench_function("calculate seahorse 1000", |b| {
        b.iter(|| calculate(-0.743643887, 0.131825904, 1000))
    });
}

fn bench_render(c: &mut Criterion) {
    let vp = Viewport::new(-0.5, 0.0, 1.0, 200, 150);
    c.bench_function("render 200x150", move |b| {
        b.iter(|| render(&vp, RenderConfig::new(256, 1, &Grayscale)).unwrap())
    });
    c.bench_function("render 200x150 aa3 single thread", move |b| {
        b.iter(|| {
            Renderer::new(RenderConfig::new(256, 3, &Grayscale))
                .with_workers(1)
                .render(&vp)
                .unwrap()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_calculate, bench_render
}
criterion_main!(benches);
