/// Integration tests for face culling, chunk dirtying and the building
/// overlay, driven through the public `World` API only.
use cgmath::Vector3;
use voxel_city::*;

fn world(world_size: u32, world_height: u32) -> World {
    World::new(WorldDimensions {
        world_size,
        world_height,
    })
}

fn face_count(world: &World) -> usize {
    world.chunks().iter().map(|chunk| chunk.mesh().face_count()).sum()
}

#[test]
fn adjacent_stones_hide_their_shared_faces() {
    let mut world = world(1, 1);
    world.update_block(1, 1, 1, BlockId::STONE);
    world.update_block(2, 1, 1, BlockId::STONE);
    world.create();

    let chunk = world.chunk(0, 0, 0).unwrap();
    assert!(!chunk.should_render_face(world.chunks(), 1, 1, 1, Vector3::new(1, 0, 0)));
    assert!(!chunk.should_render_face(world.chunks(), 2, 1, 1, Vector3::new(-1, 0, 0)));
    assert_eq!(face_count(&world), 10);
}

#[test]
fn world_edge_faces_always_render() {
    let mut world = world(2, 1);
    world.update_block(0, 0, 0, BlockId::STONE);
    world.update_block(31, 15, 31, BlockId::STONE);
    let chunks = world.chunks();

    let origin = world.chunk(0, 0, 0).unwrap();
    assert!(origin.should_render_face(chunks, 0, 0, 0, Vector3::new(-1, 0, 0)));
    assert!(origin.should_render_face(chunks, 0, 0, 0, Vector3::new(0, -1, 0)));

    let far = world.chunk(1, 0, 1).unwrap();
    assert!(far.should_render_face(chunks, 15, 15, 15, Vector3::new(1, 0, 0)));
    assert!(far.should_render_face(chunks, 15, 15, 15, Vector3::new(0, 1, 0)));
}

#[test]
fn culling_reads_across_chunk_seams() {
    let mut world = world(2, 1);
    world.update_block(15, 3, 3, BlockId::STONE);
    world.update_block(16, 3, 3, BlockId::STONE);
    world.create();

    let left = world.chunk(0, 0, 0).unwrap();
    assert!(!left.should_render_face(world.chunks(), 15, 3, 3, Vector3::new(1, 0, 0)));
    assert_eq!(face_count(&world), 10);
}

#[test]
fn glass_faces_follow_the_cutout_rule() {
    let mut world = world(1, 1);
    world.update_block(1, 1, 1, BlockId::STONE);
    world.update_block(2, 1, 1, BlockId::GLASS);
    world.update_block(3, 1, 1, BlockId::GLASS);
    let chunks = world.chunks();
    let chunk = world.chunk(0, 0, 0).unwrap();

    // stone looking at glass renders, glass looking at stone does not
    assert!(chunk.should_render_face(chunks, 1, 1, 1, Vector3::new(1, 0, 0)));
    assert!(!chunk.should_render_face(chunks, 2, 1, 1, Vector3::new(-1, 0, 0)));
    // glass against glass renders on neither side
    assert!(!chunk.should_render_face(chunks, 2, 1, 1, Vector3::new(1, 0, 0)));
    assert!(!chunk.should_render_face(chunks, 3, 1, 1, Vector3::new(-1, 0, 0)));
}

#[test]
fn water_surfaces_only_render_against_non_water() {
    let mut world = world(1, 1);
    world.update_block(1, 1, 1, BlockId::WATER);
    world.update_block(2, 1, 1, BlockId::WATER);
    world.update_block(1, 0, 1, BlockId::SAND);
    let chunks = world.chunks();
    let chunk = world.chunk(0, 0, 0).unwrap();

    assert!(!chunk.should_render_face(chunks, 1, 1, 1, Vector3::new(1, 0, 0)));
    assert!(chunk.should_render_face(chunks, 1, 0, 1, Vector3::new(0, 1, 0)));
    assert!(!chunk.should_render_face(chunks, 1, 1, 1, Vector3::new(0, -1, 0)));
}

#[test]
fn half_slab_keeps_its_top_under_stone() {
    let mut world = world(1, 1);
    world.update_block(4, 4, 4, BlockId::HALF_SLAB);
    world.update_block(4, 5, 4, BlockId::STONE);
    world.create();

    // six slab faces (top forced) plus six stone faces (bottom sees a half block)
    assert_eq!(face_count(&world), 12);
}

#[test]
fn update_block_dirties_the_owner_and_its_neighbours() {
    let mut world = world(3, 3);
    world.create();
    assert_eq!(world.dirty_chunk_count(), 0);

    world.update_block(20, 20, 20, BlockId::BRICK);
    assert_eq!(world.dirty_chunk_count(), 7);
    assert_eq!(world.regenerate_dirty(), 7);

    // a corner chunk only has three neighbours
    world.update_block(1, 1, 1, BlockId::BRICK);
    assert_eq!(world.dirty_chunk_count(), 4);
}

#[test]
fn placing_then_removing_restores_the_economy() {
    let mut world = world(1, 1);
    world.place_building(Building::ROAD, 2, 1, 3);
    world.place_building(Building::ENERGYPLANT, 9, 1, 9);
    let before = (world.energy_delta(), world.water_delta(), world.passive_income());

    world.place_building(Building::HOUSE, 3, 1, 3);
    world.place_building(Building::FACTORY, 1, 1, 3);
    assert_ne!((world.energy_delta(), world.water_delta(), world.passive_income()), before);

    world.remove_building(1, 1, 3);
    world.remove_building(3, 1, 3);
    assert_eq!((world.energy_delta(), world.water_delta(), world.passive_income()), before);
}

/// Energy, water and connected income summed over the whole overlay.
fn recount(world: &World, width: i32) -> (i32, i32, i32) {
    let (mut energy, mut water, mut income) = (0, 0, 0);
    for x in 0..width {
        for z in 0..width {
            let building = world.get_building(x, z);
            let data = building.data();
            energy += data.energy;
            water += data.water;
            if building != Building::NOTHING
                && !building.is_road()
                && world.amount_of_adjacent_roads(x, z) > 0
            {
                income += data.income;
            }
        }
    }
    (energy, water, income)
}

#[test]
fn random_edit_sequences_keep_totals_exact() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_c17e);
    let mut world = world(1, 1);
    // a small patch so roads and buildings keep bumping into each other
    let patch = 6;

    for step in 0..600 {
        let (x, z) = (rng.i32(0..patch), rng.i32(0..patch));
        if rng.u8(0..3) == 0 {
            if let Some(at) = world.building_position(x, z) {
                world.remove_building(at.x, at.y, at.z);
            }
        } else {
            let building = Building::PLACEABLE[rng.usize(0..Building::PLACEABLE.len())];
            world.place_building(building, x, 1, z);
        }

        let (energy, water, income) = recount(&world, 16);
        assert_eq!(world.energy_delta(), energy, "energy after step {step}");
        assert_eq!(world.water_delta(), water, "water after step {step}");
        assert_eq!(world.connected_income(), income, "income after step {step}");

        let mut expected = income;
        if energy < 0 {
            expected /= 2;
        }
        if water < 0 {
            expected /= 2;
        }
        assert_eq!(world.passive_income(), expected + 1, "payout after step {step}");
    }
}

#[test]
fn a_second_road_does_not_double_count_income() {
    let mut world = world(1, 1);
    world.place_building(Building::ENERGYPLANT, 10, 1, 10);
    world.place_building(Building::WATERPLANT, 12, 1, 12);
    world.place_building(Building::HOUSE, 3, 1, 3);
    assert_eq!(world.passive_income(), 1);

    world.place_building(Building::ROAD, 4, 1, 3);
    assert_eq!(world.passive_income(), 2 + 1);
    world.place_building(Building::ROAD, 3, 1, 4);
    assert_eq!(world.amount_of_adjacent_roads(3, 3), 2);
    assert_eq!(world.passive_income(), 2 + 1);

    world.remove_building(4, 1, 3);
    assert_eq!(world.passive_income(), 2 + 1);
    world.remove_building(3, 1, 4);
    assert_eq!(world.passive_income(), 1);
}

#[test]
fn procedural_generation_is_deterministic() {
    let dims = WorldDimensions {
        world_size: 2,
        world_height: 1,
    };
    let (mut a, mut b) = (World::new(dims), World::new(dims));
    a.generate(1234, 0.1);
    b.generate(1234, 0.1);

    let width = dims.width_in_blocks();
    for x in 0..width {
        for z in 0..width {
            for y in 0..dims.height_in_blocks() {
                assert_eq!(a.get_cube(x, y, z), b.get_cube(x, y, z));
            }
            assert_eq!(a.get_building(x, z), b.get_building(x, z));
        }
    }
    assert_eq!(a.positions_of(Building::TREE), b.positions_of(Building::TREE));
}

#[test]
fn procedural_terrain_follows_the_layering_rules() {
    let dims = WorldDimensions {
        world_size: 2,
        world_height: 1,
    };
    let mut world = World::new(dims);
    world.generate(99, 2.0);
    assert!(world.positions_of(Building::TREE).is_empty());

    let width = dims.width_in_blocks();
    for x in 0..width {
        for z in 0..width {
            assert_eq!(world.get_cube(x, 0, z), Some(BlockId::SAND));
            let top = world.surface_height(x, z).unwrap();
            assert!(top <= 7);
            if world.get_cube(x, 1, z) == Some(BlockId::WATER) {
                assert_eq!(top, 2);
                continue;
            }
            for y in 1..top {
                let expected = if y < 3 { BlockId::GRASS } else { BlockId::STONE };
                assert_eq!(world.get_cube(x, y, z), Some(expected));
            }
        }
    }
}

#[test]
fn column_occupancy_round_trips() {
    let mut world = world(1, 1);
    world.place_building(Building::HOUSE, 5, 1, 5);
    assert_eq!(world.get_building(5, 5), Building::HOUSE);
    world.remove_building(5, 1, 5);
    assert_eq!(world.get_building(5, 5), Building::NOTHING);
    assert!(world.positions_of(Building::HOUSE).is_empty());
}
