//! Whole-frame stepping benchmark.

use criterion::{criterion_group, criterion_main, Criterion};
use famicore_core::Console;

fn nop_rom() -> Vec<u8> {
    let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 2, 1, 0x00, 0x00];
    image.extend_from_slice(&[0; 8]);
    let mut prg = vec![0xEA; 32 * 1024];
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    image.extend_from_slice(&prg);
    image.extend(std::iter::repeat(0).take(8 * 1024));
    image
}

fn bench_step_frame(c: &mut Criterion) {
    let rom = nop_rom();

    c.bench_function("step_frame", |b| {
        let mut console = Console::new(&rom).unwrap();
        b.iter(|| console.step_frame());
    });

    c.bench_function("step_frame_rendering", |b| {
        let mut console = Console::new(&rom).unwrap();
        // Turn both layers on so the pixel pipeline does real work.
        famicore_core::Bus::write(console.bus_mut(), 0x2001, 0x1E);
        b.iter(|| console.step_frame());
    });
}

criterion_group!(benches, bench_step_frame);
criterion_main!(benches);
