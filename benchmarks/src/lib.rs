//! Shared scene setup for the mega2d benchmarks.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use mega2d::physics::container::{SpatialBody, SpatialFixture};
use mega2d::{
    Body, CellRange, ContactFilter, Fixture, FixtureKey, NoopContactListener, QuadTree, Rect,
    SpatialGrid, StandardCollisionHandler, WorldConfig, WorldContainer, WorldSystem,
};

/// Side length of the square area scenes are scattered over, in world units.
pub const EXTENT: f32 = 4096.0;
pub const PIXELS_PER_METER: i32 = 32;

/// Deterministic linear congruential generator in `[0, 1)`.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// `n` rectangles between 8 and 72 units wide scattered over the scene area.
pub fn scatter_bounds(n: usize) -> Vec<Rect> {
    let mut rng = Lcg::new(0x5eed);
    (0..n)
        .map(|_| {
            let x = rng.next_f32() * EXTENT;
            let y = rng.next_f32() * EXTENT;
            let w = 8.0 + rng.next_f32() * 64.0;
            let h = 8.0 + rng.next_f32() * 64.0;
            Rect::new(x, y, w, h)
        })
        .collect()
}

/// Indexed entries for `n` scattered bodies, each with one fixture.
pub struct ContainerScene {
    pub world: hecs::World,
    pub bodies: Vec<(SpatialBody, CellRange)>,
    pub fixtures: Vec<(SpatialFixture, CellRange)>,
}

pub fn setup_container_scene(n: usize) -> anyhow::Result<ContainerScene> {
    let mut world = hecs::World::new();
    let mut bodies = Vec::with_capacity(n);
    let mut fixtures = Vec::with_capacity(n);

    for bounds in scatter_bounds(n) {
        let entity = world.spawn(());
        let cells = CellRange::from_rect(&bounds, PIXELS_PER_METER)?;
        bodies.push((
            SpatialBody {
                entity,
                body_type: mega2d::BodyType::Dynamic,
                bounds,
            },
            cells,
        ));
        fixtures.push((
            SpatialFixture {
                key: FixtureKey::new(entity, mega2d::FixtureId(0)),
                fixture_type: "body".into(),
                shape: bounds.into(),
            },
            cells,
        ));
    }

    Ok(ContainerScene {
        world,
        bodies,
        fixtures,
    })
}

/// Cell bounds of the whole scene area.
pub fn scene_cells() -> CellRange {
    let max = (EXTENT as i32 + 128) / PIXELS_PER_METER;
    CellRange::new(0, 0, max, max)
}

pub fn new_quadtree() -> QuadTree {
    QuadTree::new(scene_cells(), 8, 8)
}

/// Clear `container` and index the whole scene.
pub fn fill(container: &mut dyn WorldContainer, scene: &ContainerScene) {
    container.clear();
    for (body, cells) in &scene.bodies {
        container.add_body(body.clone(), *cells);
    }
    for (fixture, cells) in &scene.fixtures {
        container.add_fixture(fixture.clone(), *cells);
    }
}

/// `n` falling boxes with feet over one wide floor, stepped on a grid.
pub fn setup_world(n: usize) -> anyhow::Result<(hecs::World, WorldSystem)> {
    let mut world = hecs::World::new();

    for bounds in scatter_bounds(n) {
        let body = Body::dynamic(Rect::new(bounds.x, bounds.y + 64.0, 32.0, 32.0))
            .with_gravity(Vec2::new(0.0, -320.0))
            .with_fixture(
                Fixture::new("feet", Rect::new(0.0, 0.0, 28.0, 4.0))
                    .with_offset(Vec2::new(0.0, -14.0)),
            );
        world.spawn((body,));
    }

    let floor = Body::static_body(Rect::new(0.0, 0.0, EXTENT + 128.0, 64.0))
        .with_fixture(Fixture::new("floor", Rect::new(0.0, 0.0, EXTENT + 128.0, 64.0)));
    world.spawn((floor,));

    let config = WorldConfig {
        contact_filter: ContactFilter::new().with("feet", "floor"),
        ..WorldConfig::default()
    };
    let system = WorldSystem::with_container(
        config,
        Rc::new(RefCell::new(SpatialGrid::new())),
        NoopContactListener,
        StandardCollisionHandler,
    )?;
    Ok((world, system))
}
