//! Crawl: a statically stable gait with at most one foot in the air.
//!
//! A cycle is seven steps. Gliding legs move along the ground with linear
//! interpolation over `lift_steps` samples; the one lifting leg (if any) swings
//! along a sine arc over `down_steps` samples. With `s = x_range`:
//!
//! ```text
//! step  FL   FR   BL   BR   lifting
//!  1    -s   -s   -s   -s   -
//!  2     0    0    0  +4s   BR
//!  3     0  +4s    0    0   FR
//!  4   -2s  -2s  -2s  -2s   -
//!  5     0    0  +4s    0   BL
//!  6   +4s    0    0    0   FL
//!  7    -s   -s   -s   -s   -
//! ```
//!
//! Backwards is the same table with diagonal legs swapped and signs negated.
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::compose::zip_frames;
use super::interpolate::{linear_interpolate, sine_interpolate};
use super::single_leg::{check_clearance, solve_waypoints};
use super::{GaitFamily, GaitParameters, GaitTrajectorySet, Movement, Stride, Waypoint};
use crate::error::GaitError;
use crate::kinematics::LegSolver;
use crate::robot::leg::Leg;

/// One crawl step: per-leg x displacement in strides, and the leg that swings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrawlStep {
    pub deltas: [f32; 4],
    pub lifting: Option<Leg>,
}

impl CrawlStep {
    const fn new(deltas: [f32; 4], lifting: Option<Leg>) -> Self {
        Self { deltas, lifting }
    }

    /// The step a backwards crawl takes in place of this one.
    pub fn reversed(&self) -> CrawlStep {
        let mut deltas = [0.0; 4];
        for leg in Leg::ALL {
            deltas[leg] = -self.deltas[leg.diagonal()];
        }
        CrawlStep {
            deltas,
            lifting: self.lifting.map(Leg::diagonal),
        }
    }
}

pub const FORWARD_STEPS: [CrawlStep; 7] = [
    CrawlStep::new([-1.0, -1.0, -1.0, -1.0], None),
    CrawlStep::new([0.0, 0.0, 0.0, 4.0], Some(Leg::BackRight)),
    CrawlStep::new([0.0, 4.0, 0.0, 0.0], Some(Leg::FrontRight)),
    CrawlStep::new([-2.0, -2.0, -2.0, -2.0], None),
    CrawlStep::new([0.0, 0.0, 4.0, 0.0], Some(Leg::BackLeft)),
    CrawlStep::new([4.0, 0.0, 0.0, 0.0], Some(Leg::FrontLeft)),
    CrawlStep::new([-1.0, -1.0, -1.0, -1.0], None),
];

/// Step table for `movement`; only forward and backward exist.
pub fn steps(movement: Movement) -> Option<[CrawlStep; 7]> {
    match movement {
        Movement::Forward => Some(FORWARD_STEPS),
        Movement::Backward => Some(FORWARD_STEPS.map(|step| step.reversed())),
        _ => None,
    }
}

/// Foot positions of every leg over one cycle of `steps`.
pub fn crawl_waypoints(params: &GaitParameters, steps: &[CrawlStep]) -> [Vec<Waypoint>; 4] {
    let stride = params.x_range;
    let mut x = [params.x0; 4];
    let mut paths: [Vec<Waypoint>; 4] = Default::default();

    for step in steps {
        for leg in Leg::ALL {
            let start = x[leg];
            let end = start + step.deltas[leg] * stride;
            let segment = if step.lifting == Some(leg) {
                sine_interpolate(start, end, params.y0, params.y_range, params.down_steps)
            } else {
                linear_interpolate(start, end, params.y0, params.lift_steps)
            };
            paths[leg].extend(segment);
            x[leg] = end;
        }
    }
    paths
}

/// Generate the forward and backward crawl. Legs are solved one waypoint at a
/// time with no stride shrinking; any unreachable waypoint fails the gait.
///
/// `params` must already be validated, as [`super::generate_family`] does.
pub fn generate<S: LegSolver>(
    solver: &S,
    params: &GaitParameters,
) -> Result<GaitTrajectorySet, GaitError> {
    check_clearance(params.y0, params.y_range)?;

    let mut trajectories = BTreeMap::new();
    for &movement in GaitFamily::Crawl.movements() {
        let Some(steps) = steps(movement) else {
            continue;
        };
        let stride_scale = if movement == Movement::Backward {
            Stride::BACKWARD.scale()
        } else {
            Stride::FORWARD.scale()
        };

        let paths = crawl_waypoints(params, &steps);
        let mut legs: [Vec<_>; 4] = Default::default();
        for leg in Leg::ALL {
            legs[leg] = solve_waypoints(solver, &paths[leg]).map_err(|cause| {
                GaitError::GenerationFailed {
                    stride_scale,
                    attempts: 1,
                    cause: Box::new(cause),
                }
            })?;
        }

        let frames = zip_frames([
            legs[0].as_slice(),
            legs[1].as_slice(),
            legs[2].as_slice(),
            legs[3].as_slice(),
        ]);
        trajectories.insert(movement, frames);
    }

    Ok(GaitTrajectorySet::new(GaitFamily::Crawl, trajectories))
}
