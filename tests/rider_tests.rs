use sledline::rider::{ANCHOR_POINT, BODY_POINTS, SCARF_POINTS};
use sledline::{solver, Rider, Vec2};

#[test]
fn topology_has_fixed_point_and_constraint_counts() {
    let rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
    assert_eq!(rider.particles().len(), BODY_POINTS + SCARF_POINTS);
    assert_eq!(rider.body().len(), BODY_POINTS);
    assert_eq!(rider.scarf_points().len(), SCARF_POINTS);
    assert_eq!(rider.rigid_constraints().len(), 11);
    assert_eq!(rider.attachment_constraints().len(), 8);
    assert_eq!(rider.leg_constraints().len(), 2);
    assert_eq!(rider.scarf_constraints().len(), SCARF_POINTS);
    assert!(rider.on_sled());
}

#[test]
fn new_rider_moves_right_at_unit_speed() {
    let rider: Rider<f64> = Rider::new(Vec2::new(40.0, 40.0));
    assert!((rider.speed() - 1.0).abs() < 1e-12);
    for p in rider.particles() {
        assert_eq!(p.velocity(), Vec2::new(1.0, 0.0));
    }
}

#[test]
fn rider_is_built_relative_to_start() {
    let a: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
    let b: Rider<f64> = Rider::new(Vec2::new(100.0, -20.0));
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pb.pos - pa.pos, Vec2::new(100.0, -20.0));
    }
    assert_eq!(b.anchor(), b.particle(ANCHOR_POINT).pos);
}

#[test]
fn legs_are_free_to_stretch_at_rest() {
    let rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
    for leg in rider.leg_constraints() {
        assert!(leg.length(rider.particles()) > leg.rest_length);
    }
}

#[test]
fn flag_snapshot_is_independent() {
    let mut rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
    let flag = rider.clone();
    rider.particle_mut(0).pos += Vec2::new(5.0, 5.0);
    rider.detach();
    assert!(flag.on_sled());
    assert_eq!(flag.particle(0).pos, Vec2::new(10.0, 0.0));
}

#[test]
fn detach_is_permanent_until_rebuild() {
    let mut rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
    rider.detach();
    for _ in 0..5 {
        solver::relax(&mut rider, 0.4);
    }
    assert!(!rider.on_sled());
    assert!(rider.attachment_constraints().is_empty());

    rider.rebuild(Vec2::new(0.0, 0.0));
    assert!(rider.on_sled());
    assert_eq!(rider.attachment_constraints().len(), 8);
}

#[test]
fn skeleton_follows_points() {
    let rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
    let limbs = rider.limbs();
    let torso = limbs[4];
    assert_eq!(torso.r1, rider.particle(0).pos);
    assert_eq!(torso.r2, rider.particle(1).pos);
    let strings = rider.sled_strings().expect("on the sled");
    assert_eq!(strings[0].r2, strings[1].r2);
}
