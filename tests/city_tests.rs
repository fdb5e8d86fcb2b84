/// End-to-end tests: purchases through the treasury, block picking and
/// scripted runs of the whole application.
use cgmath::{Point3, Vector3};
use voxel_city::{
    engine_state::{
        rendering::{AllVisible, DrawStats},
        voxels::world::{raycast::traverse, BlockEditor},
    },
    *,
};

fn flat_world() -> World {
    let mut world = World::new(WorldDimensions {
        world_size: 1,
        world_height: 1,
    });
    for x in 0..16 {
        for z in 0..16 {
            world.update_block(x, 0, z, BlockId::GRASS);
        }
    }
    world.create();
    world
}

#[test]
fn a_small_town_pays_its_way() {
    let mut world = flat_world();
    world.update_block(0, 1, 0, BlockId::WATER);
    let mut treasury = Treasury::new(100, 10.0);

    treasury.try_place(&mut world, Building::WATERPLANT, 1, 1, 0).unwrap();
    treasury.try_place(&mut world, Building::ENERGYPLANT, 2, 1, 0).unwrap();
    for x in 3..8 {
        treasury.try_place(&mut world, Building::ROAD, x, 1, 1).unwrap();
    }
    treasury.try_place(&mut world, Building::HOUSE, 3, 1, 2).unwrap();
    treasury.try_place(&mut world, Building::SHOP, 4, 1, 2).unwrap();
    assert_eq!(treasury.money(), 100 - 15 - 15 - 5 * 2 - 4 - 6);

    assert_eq!(world.energy_delta(), 5 - 1 - 1 - 1);
    assert_eq!(world.water_delta(), 5 - 1 - 1 - 1);
    assert_eq!(world.passive_income(), 2 + 3 + 1);
    assert_eq!(treasury.tick(&world, 10.0), 6);

    assert_eq!(
        treasury.try_place(&mut world, Building::WATERPLANT, 10, 1, 10),
        Err(PlacementError::NoWaterNearby)
    );
}

#[test]
fn failed_purchases_leave_the_world_alone() {
    let mut world = flat_world();
    let mut treasury = Treasury::new(3, 10.0);
    assert!(treasury.try_place(&mut world, Building::HOUSE, 5, 1, 5).is_err());
    assert_eq!(world.get_building(5, 5), Building::NOTHING);
    assert!(treasury.try_demolish(&mut world, 5, 1, 5).is_err());
    assert_eq!(treasury.money(), 3);
}

#[test]
fn rays_stop_at_the_first_solid_block() {
    let mut world = flat_world();
    world.update_block(4, 1, 4, BlockId::WATER);

    let hit = world
        .pick(Point3::new(4.0, 10.0, 4.0), Vector3::new(0.0, -1.0, 0.0), 50.0)
        .unwrap();
    assert_eq!(hit.position, Point3::new(4, 0, 4));
    assert_eq!(hit.block, BlockId::GRASS);
    assert_eq!(hit.previous, Some(Point3::new(4, 1, 4)));

    assert!(world
        .pick(Point3::new(4.0, 10.0, 4.0), Vector3::new(0.0, 1.0, 0.0), 50.0)
        .is_none());
}

#[test]
fn traversal_visits_neighbouring_cells_in_order() {
    let cells = traverse(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), 3.2);
    assert_eq!(
        cells,
        vec![
            Point3::new(0, 0, 0),
            Point3::new(1, 0, 0),
            Point3::new(2, 0, 0),
            Point3::new(3, 0, 0),
        ]
    );
    let cells = traverse(Point3::new(0.2, 0.1, 0.3), Vector3::new(1.0, 2.0, -0.5), 20.0);
    for pair in cells.windows(2) {
        let d = pair[1] - pair[0];
        assert_eq!(d.x.abs() + d.y.abs() + d.z.abs(), 1);
    }
}

#[test]
fn editor_places_against_the_hit_face() {
    let mut world = flat_world();
    let mut editor = BlockEditor::new(BlockId::BRICK);
    let down = Vector3::new(0.0, -1.0, 0.0);

    let hit = world.pick(Point3::new(6.0, 8.0, 6.0), down, 50.0).unwrap();
    assert!(editor.place_block(&mut world, &hit));
    assert_eq!(world.get_cube(6, 1, 6), Some(BlockId::BRICK));

    let hit = world.pick(Point3::new(6.0, 8.0, 6.0), down, 50.0).unwrap();
    editor.break_block(&mut world, &hit);
    assert_eq!(world.get_cube(6, 1, 6), Some(BlockId::EMPTY));

    editor.select(BlockId::HALF_SLAB);
    let hit = world.pick(Point3::new(6.0, 8.0, 6.0), down, 50.0).unwrap();
    assert!(editor.place_block(&mut world, &hit));
    let hit = world.pick(Point3::new(6.0, 8.0, 6.0), down, 50.0).unwrap();
    assert!(editor.place_block(&mut world, &hit));
    // two half slabs merge into a full slab
    assert_eq!(world.get_cube(6, 1, 6), Some(BlockId::SLAB));
    assert_eq!(world.get_cube(6, 2, 6), Some(BlockId::EMPTY));
}

#[test]
fn drawing_submits_terrain_and_buildings() {
    let mut world = flat_world();
    world.place_building(Building::HOUSE, 2, 1, 2);
    world.place_building(Building::HOUSE, 3, 1, 2);
    world.update_block(8, 1, 8, BlockId::WATER);

    let mut stats = DrawStats::default();
    world.draw(&Default::default(), &AllVisible, &mut stats);
    assert_eq!(stats.indexed_draws, 2);
    assert_eq!(stats.instanced_draws, 1);
    assert_eq!(stats.instances, 2);
}

#[test]
fn scripted_run_from_json() {
    let config = GameConfig::from_json(
        r#"{
            "dimensions": { "world_size": 2, "world_height": 1 },
            "generation": { "kind": "procedural", "seed": 5, "tree_threshold": 2.0 },
            "starting_money": 50,
            "simulated_frames": 20,
            "frame_secs": 1.0,
            "actions": [
                { "action": "build", "building": "road", "x": 10, "z": 10 },
                { "action": "build", "building": "house", "x": 10, "z": 11 },
                { "action": "build", "building": "factory", "x": 10, "z": 11 },
                { "action": "demolish", "x": 20, "z": 20 },
                { "action": "select_block", "block": 7 }
            ]
        }"#,
    )
    .unwrap();

    let summary = run_with(config).unwrap();
    assert_eq!(summary.actions_applied, 3);
    assert_eq!(summary.actions_rejected, 2);
    assert_eq!(summary.frames, 20);
    // house income 2 halved for both deficits, plus one, paid twice
    assert_eq!(summary.money, 50 - 2 - 4 + 2);
}

#[test]
fn default_run_builds_the_demo_city() {
    let config = GameConfig {
        dimensions: WorldDimensions {
            world_size: 2,
            world_height: 1,
        },
        simulated_frames: 5,
        ..GameConfig::default()
    };
    let mut app = ApplicationState::new(config).unwrap();
    let summary = app.run();
    assert!(summary.actions_applied > 0);
    assert!(!app.engine_state.world.positions_of(Building::ROAD).is_empty());
    assert!(summary.last_frame.triangles > 0);
}
