use anyhow::anyhow;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use guarded::{catch, run_guarded, throw};

fn bench_anyhow(c: &mut Criterion) {
    fn rust() {
        let mut cleanups = 0u32;
        let result = std::panic::catch_unwind(|| {
            std::panic::resume_unwind(Box::new(anyhow!("Hello, world!")));
        });
        if let Err(mut bx) = result {
            let err = bx.downcast_mut::<anyhow::Error>().unwrap();
            replace_with::replace_with_or_abort(err, |e| e.context("In handler"));
            black_box(bx);
        }
        cleanups += 1;
        black_box(cleanups);
    }

    fn guarded() {
        let mut cleanups = 0u32;
        run_guarded(
            || throw(anyhow!("Hello, world!")),
            |mut ex| {
                let err = ex.downcast_mut::<anyhow::Error>().unwrap();
                replace_with::replace_with_or_abort(err, |e| e.context("In handler"));
                black_box(ex);
            },
            || cleanups += 1,
        );
        black_box(cleanups);
    }

    let mut group = c.benchmark_group("anyhow");
    group.bench_function("Rust", |b| b.iter(|| rust()));
    group.bench_function("guarded", |b| b.iter(|| guarded()));
    group.finish();
}

fn bench_simple(c: &mut Criterion) {
    fn rust() {
        let _ = black_box(std::panic::catch_unwind(|| {
            std::panic::resume_unwind(Box::new("Hello, world!"));
        }));
    }

    fn guarded() {
        let _ = black_box(catch(|| throw::<&'static str>("Hello, world!")));
    }

    let mut group = c.benchmark_group("simple");
    group.bench_function("Rust", |b| b.iter(|| rust()));
    group.bench_function("guarded", |b| b.iter(|| guarded()));
    group.finish();
}

fn bench_success(c: &mut Criterion) {
    let mut group = c.benchmark_group("success");
    group.bench_function("guarded", |b| {
        b.iter(|| {
            let mut cleanups = 0u32;
            run_guarded(|| black_box(()), |_| unreachable!(), || cleanups += 1);
            black_box(cleanups)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_anyhow, bench_simple, bench_success);
criterion_main!(benches);
