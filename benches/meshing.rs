/// Benchmark suite for chunk meshing
/// Covers the cheapest and the worst case of face culling, plus generated terrain
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voxel_city::{BlockId, Chunk, World, WorldDimensions};

fn one_chunk_world(fill: impl Fn(i32, i32, i32) -> BlockId) -> World {
    let mut world = World::new(WorldDimensions {
        world_size: 1,
        world_height: 1,
    });
    for x in 0..16 {
        for y in 0..16 {
            for z in 0..16 {
                world.update_block(x, y, z, fill(x, y, z));
            }
        }
    }
    world
}

fn bench_mesh_empty(c: &mut Criterion) {
    c.bench_function("mesh_empty_chunk", |b| {
        let mut world = one_chunk_world(|_, _, _| BlockId::EMPTY);
        b.iter(|| {
            world.create();
            black_box(world.chunks()[0].mesh().face_count())
        });
    });
}

fn bench_mesh_solid(c: &mut Criterion) {
    c.bench_function("mesh_solid_chunk", |b| {
        let mut world = one_chunk_world(|_, _, _| BlockId::STONE);
        b.iter(|| {
            world.create();
            black_box(world.chunks()[0].mesh().face_count())
        });
    });
}

fn bench_mesh_checkerboard(c: &mut Criterion) {
    c.bench_function("mesh_checkerboard_chunk", |b| {
        // every solid cell is surrounded by air: maximum face count
        let mut world = one_chunk_world(|x, y, z| {
            if (x + y + z) % 2 == 0 {
                BlockId::BRICK
            } else {
                BlockId::EMPTY
            }
        });
        b.iter(|| {
            world.create();
            black_box(world.chunks()[0].mesh().face_count())
        });
    });
}

fn bench_remesh_after_edit(c: &mut Criterion) {
    c.bench_function("remesh_after_single_edit", |b| {
        let mut world = World::new(WorldDimensions {
            world_size: 3,
            world_height: 1,
        });
        world.generate(42, 0.4);
        let mut toggle = false;
        b.iter(|| {
            toggle = !toggle;
            let block = if toggle { BlockId::GLASS } else { BlockId::EMPTY };
            world.update_block(24, 10, 24, block);
            black_box(world.regenerate_dirty())
        });
    });
}

fn bench_chunk_generate(c: &mut Criterion) {
    c.bench_function("chunk_generate_terrain", |b| {
        let mut world = World::new(WorldDimensions {
            world_size: 1,
            world_height: 1,
        });
        world.generate(7, 2.0);
        let mut chunks: Vec<Chunk> = vec![Chunk::new(cgmath::Point3::new(0, 0, 0))];
        for x in 0..16 {
            for y in 0..16 {
                for z in 0..16 {
                    if let (Some(block), Some(cell)) =
                        (world.get_cube(x, y, z), chunks[0].get_local_mut(x, y, z))
                    {
                        *cell = block;
                    }
                }
            }
        }
        b.iter(|| {
            Chunk::generate(&mut chunks, 0);
            black_box(chunks[0].mesh().face_count())
        });
    });
}

criterion_group!(
    benches,
    bench_mesh_empty,
    bench_mesh_solid,
    bench_mesh_checkerboard,
    bench_remesh_after_edit,
    bench_chunk_generate
);
criterion_main!(benches);
