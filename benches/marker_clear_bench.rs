use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cmap_core::prelude::*;

fn build_map(nb_cells: usize) -> (MapBaseData, Vec<Cell<Vertex2>>) {
    let mut map = MapBaseData::new();
    let cells = (0..nb_cells).map(|_| map.add_cell()).collect();
    (map, cells)
}

fn bench_marker_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("marker_clear");
    let buffers = BufferPool::new();
    let mut rng = SmallRng::seed_from_u64(42);

    for &nb_cells in &[10_000usize, 1_000_000usize] {
        let (map, cells) = build_map(nb_cells);
        // A handful of marks scattered over the orbit.
        let picked: Vec<Cell<Vertex2>> = (0..16)
            .map(|_| cells[rng.gen_range(0..nb_cells)])
            .collect();

        group.bench_with_input(
            BenchmarkId::new("auto_clear", nb_cells),
            &nb_cells,
            |b, _| {
                b.iter(|| {
                    let mut m = AutoClearMarker::new(&map);
                    for &cell in &picked {
                        m.mark(cell);
                    }
                    black_box(m.is_marked(picked[0]));
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("tracked", nb_cells),
            &nb_cells,
            |b, _| {
                b.iter(|| {
                    let mut m = TrackedMarker::new(&map, &buffers);
                    for &cell in &picked {
                        m.mark(cell);
                    }
                    black_box(m.is_marked(picked[0]));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_marker_clear);
criterion_main!(benches);
