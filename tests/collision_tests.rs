use sledline::{
    CollisionRecorder, CollisionResolver, Ink, Line, LineGrid, LineId, NoOpStepObserver, Particle, Rider, Vec2,
    WorldConfig,
};

fn resolver() -> CollisionResolver<f64> {
    CollisionResolver::new(&WorldConfig::new())
}

fn horizontal(id: u32, y: f64, ink: Ink) -> Line<f64> {
    Line::new(LineId(id), Vec2::new(-100.0, y), Vec2::new(200.0, y), ink)
}

/// A rider whose body point `index` travels from `from` to `to` this frame.
fn rider_moving(index: usize, from: Vec2<f64>, to: Vec2<f64>) -> Rider<f64> {
    let mut rider = Rider::new(Vec2::new(0.0, -500.0));
    let p = rider.particle_mut(index);
    p.prev_pos = from;
    p.pos = to;
    rider
}

#[test]
fn point_through_line_ends_on_incoming_side() {
    let config: WorldConfig<f64> = WorldConfig::new();
    let mut grid: LineGrid<f64> = LineGrid::new(config.grid_spacing).unwrap();
    grid.add(&horizontal(0, 100.0, Ink::Solid));

    let foot = 4;
    let mut rider = rider_moving(foot, Vec2::new(50.0, 95.0), Vec2::new(50.0, 105.0));
    resolver().resolve(&mut rider, foot, &grid, &mut NoOpStepObserver);

    let p = rider.particle(foot);
    assert!(p.pos.y < 100.0, "point left on the far side at {}", p.pos.y);
    assert!(100.0 - p.pos.y >= config.line_thickness);

    // Clear of the line now: a second pass finds nothing.
    let mut recorder: CollisionRecorder<f64> = CollisionRecorder::new();
    resolver().resolve(&mut rider, foot, &grid, &mut recorder);
    assert!(recorder.points.is_empty());
}

#[test]
fn nearest_intersection_wins() {
    let near = horizontal(1, 102.0, Ink::Solid);
    let far = horizontal(0, 105.0, Ink::Solid);
    let p = Particle { pos: Vec2::new(50.0, 110.0), prev_pos: Vec2::new(50.0, 100.0), mass: 1.0 };

    let contact = resolver().nearest_contact(&p, &[far, near]).expect("both lines crossed");
    assert_eq!(contact.line.id, LineId(1));
    assert!(contact.resolved.y < 102.0);
}

#[test]
fn acceleration_lines_are_reported() {
    let mut grid: LineGrid<f64> = LineGrid::new(50.0).unwrap();
    let boost = horizontal(3, 100.0, Ink::Acceleration);
    grid.add(&boost);

    let foot = 5;
    let mut rider = rider_moving(foot, Vec2::new(50.0, 95.0), Vec2::new(50.0, 105.0));
    let struck = resolver().resolve(&mut rider, foot, &grid, &mut NoOpStepObserver);
    assert_eq!(struck.get(&LineId(3)), Some(&boost));
}

#[test]
fn solid_lines_are_not_reported_as_acceleration() {
    let mut grid: LineGrid<f64> = LineGrid::new(50.0).unwrap();
    grid.add(&horizontal(0, 100.0, Ink::Solid));
    let foot = 4;
    let mut rider = rider_moving(foot, Vec2::new(50.0, 95.0), Vec2::new(50.0, 105.0));
    let struck = resolver().resolve(&mut rider, foot, &grid, &mut NoOpStepObserver);
    assert!(struck.is_empty());
}

#[test]
fn scenery_never_collides() {
    let mut grid: LineGrid<f64> = LineGrid::new(50.0).unwrap();
    grid.add(&horizontal(0, 100.0, Ink::Scenery));
    let foot = 4;
    let mut rider = rider_moving(foot, Vec2::new(50.0, 95.0), Vec2::new(50.0, 105.0));
    resolver().resolve(&mut rider, foot, &grid, &mut NoOpStepObserver);
    assert_eq!(rider.particle(foot).pos, Vec2::new(50.0, 105.0));
}

#[test]
fn sensitive_point_collision_detaches_rider() {
    let mut grid: LineGrid<f64> = LineGrid::new(50.0).unwrap();
    grid.add(&horizontal(0, 100.0, Ink::Solid));
    let butt = 0;
    let mut rider = rider_moving(butt, Vec2::new(50.0, 95.0), Vec2::new(50.0, 105.0));

    let mut recorder: CollisionRecorder<f64> = CollisionRecorder::new();
    resolver().resolve(&mut rider, butt, &grid, &mut recorder);
    assert!(!rider.on_sled());
    assert!(recorder.detached);
    assert_eq!(recorder.points.len(), 1);
}

#[test]
fn iteration_cap_bounds_resolution() {
    let config: WorldConfig<f64> = WorldConfig::new().with_max_collision_iterations(1);
    let resolver = CollisionResolver::new(&config);
    let mut grid: LineGrid<f64> = LineGrid::new(50.0).unwrap();
    grid.add(&horizontal(0, 100.0, Ink::Solid));
    grid.add(&horizontal(1, 102.0, Ink::Solid));

    let foot = 4;
    let mut rider = rider_moving(foot, Vec2::new(50.0, 95.0), Vec2::new(50.0, 110.0));
    let mut recorder: CollisionRecorder<f64> = CollisionRecorder::new();
    resolver.resolve(&mut rider, foot, &grid, &mut recorder);
    assert_eq!(recorder.points.len(), 1);
}

#[test]
fn point_stopping_on_line_goes_back_the_way_it_came() {
    let config: WorldConfig<f64> = WorldConfig::new();
    let mut grid: LineGrid<f64> = LineGrid::new(config.grid_spacing).unwrap();
    grid.add(&horizontal(0, 100.0, Ink::Solid));

    let foot = 4;
    let mut rider = rider_moving(foot, Vec2::new(50.0, 95.0), Vec2::new(50.0, 100.0));
    let mut recorder: CollisionRecorder<f64> = CollisionRecorder::new();
    resolver().resolve(&mut rider, foot, &grid, &mut recorder);
    assert_eq!(recorder.points.len(), 1);

    let p = rider.particle(foot);
    assert!(100.0 - p.pos.y >= config.line_thickness, "left at y = {}", p.pos.y);

    let mut recheck: CollisionRecorder<f64> = CollisionRecorder::new();
    resolver().resolve(&mut rider, foot, &grid, &mut recheck);
    assert!(recheck.points.is_empty());
}
