// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use figlens::output::{render, serialize_parts, OutputFormat};
use figlens::simplify::{simplify, SimplifyOptions};

mod fixtures;
mod profiler;

// Group names (`output.render`, `output.parts`) and case ids are stable across refactors.
fn benches_output(c: &mut Criterion) {
    let cases = [fixtures::Case::Small, fixtures::Case::MediumShared, fixtures::Case::LargeUnique];

    for format in [OutputFormat::Json, OutputFormat::Yaml] {
        let mut group = c.benchmark_group(format!("output.render.{format}"));
        for case in cases {
            let design = simplify(&fixtures::fixture(case), &SimplifyOptions::default())
                .expect("simplify");
            let bytes = render(&design, format).expect("render").len() as u64;
            group.throughput(Throughput::Bytes(bytes));
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(render(black_box(&design), format).expect("render").len()))
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("output.parts");
        let design = simplify(
            &fixtures::fixture(fixtures::Case::MediumShared),
            &SimplifyOptions::default(),
        )
        .expect("simplify");
        group.bench_function("medium_shared_json", move |b| {
            b.iter(|| {
                let parts = serialize_parts(black_box(&design), OutputFormat::Json).expect("parts");
                black_box(parts.nodes.len() + parts.global_vars.len())
            })
        });
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_output
}
criterion_main!(benches);
