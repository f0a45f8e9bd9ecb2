//! Inverse kinematics seam and servo unit conversion.
//!
//! The gait engine never looks at leg geometry directly. It hands every foot
//! position to a [`LegSolver`] and only inspects the returned [`JointSolution`]
//! against the solver's [`JointLimits`].
//!
//! - [`conversion`] holds the default five-bar solver and degree/tick mapping.
pub mod conversion;

use crate::config::{JOINT_MAX_DEG, JOINT_MIN_DEG};

/// Result of one inverse kinematics call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSolution {
    pub q1: f32,
    pub q2: f32,
    /// `false` when the solver could not reach the requested foot position.
    pub ok: bool,
}

impl JointSolution {
    pub fn new(q1: f32, q2: f32, ok: bool) -> Self {
        Self { q1, q2, ok }
    }

    pub fn unreachable() -> Self {
        Self {
            q1: 0.0,
            q2: 0.0,
            ok: false,
        }
    }
}

/// Inclusive range a joint angle (degrees) must stay within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    pub min: f32,
    pub max: f32,
}

impl JointLimits {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, angle: f32) -> bool {
        angle.is_finite() && angle >= self.min && angle <= self.max
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::new(JOINT_MIN_DEG, JOINT_MAX_DEG)
    }
}

/// Inverse kinematics for one two-motor leg.
pub trait LegSolver {
    /// Solve joint angles for the foot at `(x, y)`.
    fn solve(&self, x: f32, y: f32, mode: bool, variant: u8) -> JointSolution;

    /// Documented joint range; anything outside is treated as a failed solve.
    fn joint_limits(&self) -> JointLimits {
        JointLimits::default()
    }

    /// Whether a solution can be sent to the motors as is.
    fn is_feasible(&self, solution: &JointSolution) -> bool {
        let limits = self.joint_limits();
        solution.ok && limits.contains(solution.q1) && limits.contains(solution.q2)
    }
}

impl<S: LegSolver + ?Sized> LegSolver for &S {
    fn solve(&self, x: f32, y: f32, mode: bool, variant: u8) -> JointSolution {
        (**self).solve(x, y, mode, variant)
    }

    fn joint_limits(&self) -> JointLimits {
        (**self).joint_limits()
    }

    fn is_feasible(&self, solution: &JointSolution) -> bool {
        (**self).is_feasible(solution)
    }
}
