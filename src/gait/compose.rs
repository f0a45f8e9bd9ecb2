//! Phase-shift gait families: trot, walk, bound and pronk.
//!
//! Each family is a table of [`MovementPlan`]s. A plan says, for every leg,
//! which stride to walk at and how far into the cycle that leg starts. The
//! composer solves each distinct stride once, rotates it per leg and zips the
//! four legs into frames.
use alloc::collections::btree_map::{BTreeMap, Entry};
use alloc::vec::Vec;

use super::phase::PhaseOffset;
use super::single_leg::build_leg_trajectory;
use super::{
    Frame, GaitFamily, GaitParameters, GaitTrajectorySet, JointAngles, LegTrajectory, Movement,
    Stride,
};
use crate::error::GaitError;
use crate::kinematics::LegSolver;
use crate::robot::leg::Leg;

/// Stride and phase of one leg within a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegDrive {
    pub stride: Stride,
    pub phase: PhaseOffset,
}

/// Leg assignment for one movement key, in [`Leg`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementPlan {
    pub movement: Movement,
    pub legs: [LegDrive; 4],
}

impl MovementPlan {
    pub fn drive(&self, leg: Leg) -> LegDrive {
        self.legs[leg]
    }
}

const F: Stride = Stride::FORWARD;
const B: Stride = Stride::BACKWARD;
const F75: Stride = Stride(75);
const F50: Stride = Stride(50);
const B75: Stride = Stride(-75);
const B50: Stride = Stride(-50);

const P0: PhaseOffset = PhaseOffset::ZERO;
const P1: PhaseOffset = PhaseOffset::QUARTER;
const P2: PhaseOffset = PhaseOffset::new(2, 4);
const P3: PhaseOffset = PhaseOffset::THREE_QUARTERS;
const HALF: PhaseOffset = PhaseOffset::HALF;

const fn d(stride: Stride, phase: PhaseOffset) -> LegDrive {
    LegDrive { stride, phase }
}

const fn plan(movement: Movement, legs: [LegDrive; 4]) -> MovementPlan {
    MovementPlan { movement, legs }
}

// Diagonal pairs (FL+BR, FR+BL) half a cycle apart. Turns run one side
// backwards; partial turns shorten the inside legs.
const TROT: [MovementPlan; 12] = [
    plan(Movement::Forward, [d(F, P0), d(F, HALF), d(F, HALF), d(F, P0)]),
    plan(Movement::Backward, [d(B, P0), d(B, HALF), d(B, HALF), d(B, P0)]),
    plan(Movement::Left, [d(B, P0), d(F, HALF), d(B, HALF), d(F, P0)]),
    plan(Movement::Right, [d(F, P0), d(B, HALF), d(F, HALF), d(B, P0)]),
    plan(Movement::ForwardLeft75, [d(F75, P0), d(F, HALF), d(F75, HALF), d(F, P0)]),
    plan(Movement::ForwardLeft50, [d(F50, P0), d(F, HALF), d(F50, HALF), d(F, P0)]),
    plan(Movement::ForwardRight75, [d(F, P0), d(F75, HALF), d(F, HALF), d(F75, P0)]),
    plan(Movement::ForwardRight50, [d(F, P0), d(F50, HALF), d(F, HALF), d(F50, P0)]),
    plan(Movement::BackwardLeft75, [d(B75, P0), d(B, HALF), d(B75, HALF), d(B, P0)]),
    plan(Movement::BackwardLeft50, [d(B50, P0), d(B, HALF), d(B50, HALF), d(B, P0)]),
    plan(Movement::BackwardRight75, [d(B, P0), d(B75, HALF), d(B, HALF), d(B75, P0)]),
    plan(Movement::BackwardRight50, [d(B, P0), d(B50, HALF), d(B, HALF), d(B50, P0)]),
];

// One leg after the other, a quarter cycle apart.
const WALK: [MovementPlan; 4] = [
    plan(Movement::Forward, [d(F, P0), d(F, P1), d(F, P2), d(F, P3)]),
    plan(Movement::Backward, [d(B, P0), d(B, P1), d(B, P2), d(B, P3)]),
    plan(Movement::Left, [d(B, P0), d(F, P1), d(B, P2), d(F, P3)]),
    plan(Movement::Right, [d(F, P0), d(B, P1), d(F, P2), d(B, P3)]),
];

// Front pair together, back pair together a quarter cycle later.
const BOUND: [MovementPlan; 2] = [
    plan(Movement::Forward, [d(F, P0), d(F, P0), d(F, P1), d(F, P1)]),
    plan(Movement::Backward, [d(B, P0), d(B, P0), d(B, P1), d(B, P1)]),
];

// All four legs in phase.
const PRONK: [MovementPlan; 2] = [
    plan(Movement::Forward, [d(F, P0); 4]),
    plan(Movement::Backward, [d(B, P0); 4]),
];

/// Movement table of a phase-shift family. Crawl has none.
pub fn plans(family: GaitFamily) -> &'static [MovementPlan] {
    match family {
        GaitFamily::Trot => &TROT,
        GaitFamily::Walk => &WALK,
        GaitFamily::Bound => &BOUND,
        GaitFamily::Pronk => &PRONK,
        GaitFamily::Crawl => &[],
    }
}

/// Interleave four leg cycles into frames, position by position.
pub fn zip_frames(legs: [&[JointAngles]; 4]) -> Vec<Frame> {
    let len = legs.iter().map(|leg| leg.len()).min().unwrap_or(0);
    debug_assert!(legs.iter().all(|leg| leg.len() == len), "leg cycles differ in length");

    (0..len)
        .map(|i| Frame::from_legs(legs.map(|leg| leg[i])))
        .collect()
}

/// Generate every movement of `family` from its table. Any leg that cannot be
/// solved fails the whole family. Crawl has no table and comes back empty;
/// [`super::generate_family`] sends it to [`super::crawl`].
pub fn generate<S: LegSolver>(
    solver: &S,
    params: &GaitParameters,
    family: GaitFamily,
) -> Result<GaitTrajectorySet, GaitError> {
    let plans = plans(family);
    let mut strides: BTreeMap<Stride, LegTrajectory> = BTreeMap::new();
    for drive in plans.iter().flat_map(|plan| plan.legs) {
        if let Entry::Vacant(slot) = strides.entry(drive.stride) {
            slot.insert(build_leg_trajectory(solver, params, drive.stride.scale())?);
        }
    }

    let len = params.cycle_len();
    let trajectories = plans
        .iter()
        .map(|plan| {
            let legs = plan
                .legs
                .map(|drive| strides[&drive.stride].rotated(drive.phase.shift(len)));
            let frames = zip_frames([
                legs[0].angles(),
                legs[1].angles(),
                legs[2].angles(),
                legs[3].angles(),
            ]);
            (plan.movement, frames)
        })
        .collect();

    Ok(GaitTrajectorySet::new(family, trajectories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::JointSolution;
    use approx::assert_relative_eq;

    struct Passthrough;

    impl LegSolver for Passthrough {
        fn solve(&self, x: f32, y: f32, _mode: bool, _variant: u8) -> JointSolution {
            JointSolution::new(x, y, true)
        }
    }

    fn params(family: GaitFamily) -> GaitParameters {
        GaitParameters {
            stack_type: family,
            x0: 0.0,
            y0: 50.0,
            x_range: 20.0,
            y_range: 10.0,
            y_range_down: 2.0,
            lift_steps: 7,
            down_steps: 5,
        }
    }

    #[test]
    fn every_family_follows_its_table() {
        for family in [GaitFamily::Trot, GaitFamily::Walk, GaitFamily::Bound, GaitFamily::Pronk] {
            let p = params(family);
            let set = generate(&Passthrough, &p, family).unwrap();
            let len = p.cycle_len();

            assert_eq!(set.family(), family);
            assert_eq!(set.movements().collect::<Vec<_>>(), family.movements());

            for plan in plans(family) {
                let frames = set.get(plan.movement).unwrap();
                assert_eq!(frames.len(), len);

                for leg in Leg::ALL {
                    let drive = plan.drive(leg);
                    let base =
                        build_leg_trajectory(&Passthrough, &p, drive.stride.scale()).unwrap();
                    let shift = drive.phase.shift(len);
                    for (i, frame) in frames.iter().enumerate() {
                        let expected = base.angles()[(i + shift) % len];
                        assert_eq!(
                            frame.leg(leg),
                            expected,
                            "{family} {} {leg} frame {i}",
                            plan.movement
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn trot_diagonals_are_half_a_cycle_apart() {
        let p = params(GaitFamily::Trot);
        let set = generate(&Passthrough, &p, GaitFamily::Trot).unwrap();
        let frames = set.get(Movement::Forward).unwrap();

        for i in 0..frames.len() {
            let later = frames[(i + 6) % frames.len()];
            assert_eq!(frames[i].leg(Leg::FrontRight), later.leg(Leg::FrontLeft));
            assert_eq!(frames[i].leg(Leg::BackRight), frames[i].leg(Leg::FrontLeft));
        }
    }

    /// Distance the foot travels along x over one cycle.
    fn sweep(frames: &[Frame], leg: Leg) -> f32 {
        let xs = frames.iter().map(|frame| frame.leg(leg).q1);
        xs.clone().fold(f32::MIN, f32::max) - xs.fold(f32::MAX, f32::min)
    }

    #[test]
    fn trot_partial_turns_shorten_the_inside_legs() {
        let p = params(GaitFamily::Trot);
        let set = generate(&Passthrough, &p, GaitFamily::Trot).unwrap();
        let full = sweep(set.get(Movement::Forward).unwrap(), Leg::FrontLeft);
        assert_relative_eq!(full, 20.0, epsilon = 1e-4);

        let cases: [(Movement, [f32; 4]); 5] = [
            (Movement::ForwardLeft75, [0.75, 1.0, 0.75, 1.0]),
            (Movement::ForwardLeft50, [0.5, 1.0, 0.5, 1.0]),
            (Movement::ForwardRight75, [1.0, 0.75, 1.0, 0.75]),
            (Movement::BackwardLeft50, [0.5, 1.0, 0.5, 1.0]),
            (Movement::BackwardRight50, [1.0, 0.5, 1.0, 0.5]),
        ];
        for (movement, ratios) in cases {
            let frames = set.get(movement).unwrap();
            for leg in Leg::ALL {
                assert_relative_eq!(sweep(frames, leg), ratios[leg] * full, epsilon = 1e-4);
            }
        }

        // a backward inside leg ends its lift behind the neutral point
        let back = set.get(Movement::BackwardLeft75).unwrap();
        assert_relative_eq!(back[p.lift_steps - 1].leg(Leg::FrontLeft).q1, -7.5, epsilon = 1e-4);
        assert_relative_eq!(back[p.lift_steps - 1].leg(Leg::BackRight).q1, -10.0, epsilon = 1e-4);
    }

    #[test]
    fn walk_legs_are_a_quarter_cycle_apart() {
        let set = generate(&Passthrough, &params(GaitFamily::Walk), GaitFamily::Walk).unwrap();
        let frames = set.get(Movement::Forward).unwrap();
        assert_eq!(frames.len(), 12);

        for i in 0..12 {
            let fl = |shift: usize| frames[(i + shift) % 12].leg(Leg::FrontLeft);
            assert_eq!(frames[i].leg(Leg::FrontRight), fl(3), "frame {i}");
            assert_eq!(frames[i].leg(Leg::BackLeft), fl(6), "frame {i}");
            assert_eq!(frames[i].leg(Leg::BackRight), fl(9), "frame {i}");
        }
    }

    #[test]
    fn bound_pairs_front_and_back_legs() {
        let set = generate(&Passthrough, &params(GaitFamily::Bound), GaitFamily::Bound).unwrap();

        for movement in [Movement::Forward, Movement::Backward] {
            let frames = set.get(movement).unwrap();
            for i in 0..frames.len() {
                let frame = frames[i];
                assert_eq!(frame.leg(Leg::FrontLeft), frame.leg(Leg::FrontRight));
                assert_eq!(frame.leg(Leg::BackLeft), frame.leg(Leg::BackRight));
                assert_eq!(
                    frame.leg(Leg::BackLeft),
                    frames[(i + 3) % 12].leg(Leg::FrontLeft),
                    "{movement} frame {i}"
                );
            }
        }
    }

    #[test]
    fn pronk_moves_all_legs_together() {
        let set = generate(&Passthrough, &params(GaitFamily::Pronk), GaitFamily::Pronk).unwrap();

        for (movement, frames) in set.iter() {
            for frame in frames {
                let fl = frame.leg(Leg::FrontLeft);
                assert!(Leg::ALL.iter().all(|&leg| frame.leg(leg) == fl), "{movement}");
            }
        }
        let forward = set.get(Movement::Forward).unwrap();
        assert_relative_eq!(sweep(forward, Leg::BackRight), 20.0, epsilon = 1e-4);
    }

    #[test]
    fn turns_drive_sides_in_opposite_directions() {
        let set = generate(&Passthrough, &params(GaitFamily::Walk), GaitFamily::Walk).unwrap();
        let left = set.get(Movement::Left).unwrap();
        let backward = set.get(Movement::Backward).unwrap();
        let forward = set.get(Movement::Forward).unwrap();

        for ((l, b), f) in left.iter().zip(backward).zip(forward) {
            assert_eq!(l.leg(Leg::FrontLeft), b.leg(Leg::FrontLeft));
            assert_eq!(l.leg(Leg::FrontRight), f.leg(Leg::FrontRight));
        }
    }

    #[test]
    fn one_unreachable_stride_fails_the_family() {
        /// Only reaches feet behind the neutral point.
        struct RearOnly;

        impl LegSolver for RearOnly {
            fn solve(&self, x: f32, y: f32, _mode: bool, _variant: u8) -> JointSolution {
                JointSolution::new(x, y, x <= 0.0)
            }
        }

        let err = generate(&RearOnly, &params(GaitFamily::Pronk), GaitFamily::Pronk).unwrap_err();
        assert!(matches!(err, GaitError::GenerationFailed { .. }));
    }

    #[test]
    fn crawl_has_no_table() {
        let set = generate(&Passthrough, &params(GaitFamily::Crawl), GaitFamily::Crawl).unwrap();
        assert_eq!(set.family(), GaitFamily::Crawl);
        assert!(set.is_empty());
    }

    #[test]
    fn zip_interleaves_legs() {
        let a = [JointAngles::new(1.0, 2.0)];
        let b = [JointAngles::new(3.0, 4.0)];
        let frames = zip_frames([&a[..], &b[..], &a[..], &b[..]]);
        assert_eq!(frames, [Frame([1.0, 2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 4.0])]);
    }
}
