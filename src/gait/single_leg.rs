//! One leg's gait cycle, solved to joint angles.
//!
//! The foot sweeps forward along a lift arc for `lift_steps` samples, then
//! back along a push-down arc for `down_steps` samples. When the solver cannot
//! reach a sample, the stride and lift height both shrink by 1 and the whole
//! cycle is solved again, until it fits or either range is used up.
use alloc::boxed::Box;
use alloc::vec::Vec;
use log::{debug, warn};

use super::interpolate::sine_interpolate;
use super::{GaitParameters, JointAngles, LegTrajectory, Waypoint};
use crate::config::{IK_MODE, IK_VARIANT, MIN_FOOT_CLEARANCE};
use crate::error::GaitError;
use crate::kinematics::LegSolver;

/// Reject lift arcs whose top would come within `MIN_FOOT_CLEARANCE` of the hip.
pub fn check_clearance(y0: f32, y_range: f32) -> Result<(), GaitError> {
    if y0 - y_range < MIN_FOOT_CLEARANCE {
        return Err(GaitError::InfeasibleGeometry { y0, y_range });
    }
    Ok(())
}

/// Foot positions of one cycle at `stride_scale` of `params.x_range`.
///
/// The sweep is centred on `x0`; a negative scale runs it backwards.
pub fn cycle_waypoints(params: &GaitParameters, stride_scale: f32) -> Vec<Waypoint> {
    let half_stride = params.x_range * stride_scale / 2.0;
    let x_start = params.x0 - half_stride;
    let x_end = params.x0 + half_stride;

    let mut waypoints =
        sine_interpolate(x_start, x_end, params.y0, params.y_range, params.lift_steps);
    waypoints.extend(sine_interpolate(
        x_end,
        x_start,
        params.y0,
        -params.y_range_down,
        params.down_steps,
    ));
    waypoints
}

/// Solve every waypoint, stopping at the first one the solver rejects.
pub fn solve_waypoints<S: LegSolver>(
    solver: &S,
    waypoints: &[Waypoint],
) -> Result<Vec<JointAngles>, GaitError> {
    waypoints
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let solution = solver.solve(point.x, point.y, IK_MODE, IK_VARIANT);
            if solver.is_feasible(&solution) {
                Ok(JointAngles::new(solution.q1, solution.q2))
            } else {
                Err(GaitError::SolverOutOfRange {
                    index,
                    q1: solution.q1,
                    q2: solution.q2,
                })
            }
        })
        .collect()
}

/// Build one leg's trajectory, trading stride for feasibility.
///
/// Fails with [`GaitError::InfeasibleGeometry`] before any solve when the lift
/// arc breaks the clearance guard, and with [`GaitError::GenerationFailed`]
/// once shrinking reaches a zero range.
pub fn build_leg_trajectory<S: LegSolver>(
    solver: &S,
    params: &GaitParameters,
    stride_scale: f32,
) -> Result<LegTrajectory, GaitError> {
    params.validate()?;
    if !(-1.0..=1.0).contains(&stride_scale) {
        return Err(GaitError::InvalidParameters("stride scale must be within -1..=1"));
    }

    let mut x_range = params.x_range;
    let mut y_range = params.y_range;
    let mut attempts = 0;

    loop {
        check_clearance(params.y0, y_range)?;
        attempts += 1;

        let attempt = params.with_ranges(x_range, y_range);
        match solve_waypoints(solver, &cycle_waypoints(&attempt, stride_scale)) {
            Ok(angles) => {
                if attempts > 1 {
                    warn!("[GAIT] stride {stride_scale} shrunk to {x_range} x {y_range}");
                }
                return Ok(LegTrajectory::new(angles, x_range, y_range));
            }
            Err(cause) => {
                debug!("[GAIT] attempt {attempts} at x range {x_range}: {cause}");
                x_range -= 1.0;
                y_range -= 1.0;
                if x_range <= 0.0 || y_range <= 0.0 {
                    return Err(GaitError::GenerationFailed {
                        stride_scale,
                        attempts,
                        cause: Box::new(cause),
                    });
                }
            }
        }
    }
}
