//! Relaxation passes over the rider's constraint groups.

use crate::float::Float;
use crate::rider::Rider;

/// Outcome of one constraint pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PassReport {
    /// A sled attachment broke during this pass.
    pub detached: bool,
}

/// One constraint pass: legs, then endurance checks while on the sled,
/// then rigid and sled attachment constraints.
///
/// Endurance checks run before any rigid correction so a broken
/// attachment is never resolved in the pass it breaks.
pub fn relax<F: Float>(rider: &mut Rider<F>, endurance: F) -> PassReport {
    solve_legs(rider);
    let detached = rider.on_sled() && check_endurance(rider, endurance);
    solve_rigid(rider);
    PassReport { detached }
}

/// Minimum-length pass over the leg constraints.
pub fn solve_legs<F: Float>(rider: &mut Rider<F>) {
    let parts = rider.parts_mut();
    for c in parts.legs {
        c.solve_min_length(parts.particles);
    }
}

/// Detach the rider if any sled attachment is strained past `endurance`.
///
/// Returns whether this call detached the rider.
pub fn check_endurance<F: Float>(rider: &mut Rider<F>, endurance: F) -> bool {
    if !rider.on_sled() {
        return false;
    }
    let broken = rider
        .attachment_constraints()
        .iter()
        .position(|c| c.exceeds_endurance(rider.particles(), endurance));
    match broken {
        Some(index) => {
            tracing::debug!(constraint = index, "sled attachment over endurance");
            rider.detach()
        }
        None => false,
    }
}

/// Symmetric pass over rigid constraints, then sled attachments.
pub fn solve_rigid<F: Float>(rider: &mut Rider<F>) {
    let parts = rider.parts_mut();
    for c in parts.rigid.iter().chain(parts.attachments) {
        c.solve(parts.particles);
    }
}

/// One-sided pass down the scarf chain.
pub fn solve_scarf<F: Float>(rider: &mut Rider<F>) {
    let parts = rider.parts_mut();
    for c in parts.scarf {
        c.solve_one_sided(parts.particles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rider::SCARF_POINTS;
    use crate::vec::Vec2;

    #[test]
    fn relaxed_rider_at_rest_does_not_move() {
        let mut rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
        let before = rider.clone();
        let report = relax(&mut rider, 0.4);
        assert!(!report.detached);
        for (a, b) in rider.particles().iter().zip(before.particles()) {
            assert!(a.pos.distance(b.pos) < 1e-9);
        }
    }

    #[test]
    fn scarf_pass_pulls_tail_back_to_length() {
        let mut rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
        let tail = rider.particles().len() - 1;
        rider.particle_mut(tail).pos += Vec2::new(-30.0, 0.0);
        let rest = rider.scarf_constraints()[SCARF_POINTS - 1].rest_length;
        solve_scarf(&mut rider);
        let c = &rider.scarf_constraints()[SCARF_POINTS - 1];
        assert!((c.length(rider.particles()) - rest).abs() < 1e-9);
    }

    #[test]
    fn endurance_is_ignored_once_detached() {
        let mut rider: Rider<f64> = Rider::new(Vec2::new(0.0, 0.0));
        rider.detach();
        rider.particle_mut(0).pos += Vec2::new(100.0, 0.0);
        assert!(!check_endurance(&mut rider, 0.4));
    }
}
