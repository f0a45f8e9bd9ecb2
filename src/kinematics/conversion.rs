//! Default five-bar inverse kinematics and servo unit conversion.
//!
//! Both motors of a Q8bot leg sit on the hip, `MOTOR_SPACING` apart. Each motor
//! drives a proximal link and the two distal links meet at the foot, so every
//! side is solved as a planar two-link chain with the law of cosines.
use core::f32::consts::PI;
#[allow(unused_imports)]
use micromath::F32Ext;

use super::{JointLimits, JointSolution, LegSolver};
use crate::config::{
    GEAR_RATIO, LENGTH_DISTAL, LENGTH_PROXIMAL, MOTOR_SPACING, TICKS_PER_REV, ZERO_OFFSET_TICKS,
};

/// Symmetric five-bar leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveBarLeg {
    pub motor_spacing: f32,
    pub proximal: f32,
    pub distal: f32,
    pub limits: JointLimits,
}

impl Default for FiveBarLeg {
    fn default() -> Self {
        Self {
            motor_spacing: MOTOR_SPACING,
            proximal: LENGTH_PROXIMAL,
            distal: LENGTH_DISTAL,
            limits: JointLimits::default(),
        }
    }
}

impl FiveBarLeg {
    /// Angle (radians) between the motor-to-foot line and the proximal link,
    /// or `None` when the foot is out of reach of that side.
    fn elbow_angle(&self, dx: f32, y: f32) -> Option<(f32, f32)> {
        let d_squared = dx.powi(2) + y.powi(2);
        let d = d_squared.sqrt();
        if d <= f32::EPSILON {
            return None;
        }

        let cos_alpha = (self.proximal.powi(2) - self.distal.powi(2) + d_squared)
            / (2.0 * self.proximal * d);
        if !(-1.0..=1.0).contains(&cos_alpha) {
            return None;
        }

        Some((y.atan2(dx), cos_alpha.acos()))
    }
}

impl LegSolver for FiveBarLeg {
    /// `mode = true` bends both elbows outwards. `variant` is unused: this
    /// linkage has a single assembly per mode.
    fn solve(&self, x: f32, y: f32, mode: bool, _variant: u8) -> JointSolution {
        let half = self.motor_spacing / 2.0;

        let Some((base_left, alpha_left)) = self.elbow_angle(x + half, y) else {
            return JointSolution::unreachable();
        };
        let Some((base_right, alpha_right)) = self.elbow_angle(x - half, y) else {
            return JointSolution::unreachable();
        };

        let (q1, q2) = if mode {
            (base_left + alpha_left, base_right - alpha_right)
        } else {
            (base_left - alpha_left, base_right + alpha_right)
        };

        // Convert radians to degrees
        JointSolution::new(q1 * 180.0 / PI, q2 * 180.0 / PI, true)
    }

    fn joint_limits(&self) -> JointLimits {
        self.limits
    }
}

fn degrees_per_tick() -> f32 {
    360.0 / TICKS_PER_REV / GEAR_RATIO
}

/// Joint angle in degrees to the motor's position register value.
///
/// Adds half a tick and truncates toward zero, the same as the firmware's
/// `_deg2Dxl`. Positive angles round half up; negative angles within a tick
/// of zero come out as 0.
pub fn deg_to_ticks(angle: f32) -> i32 {
    (angle / degrees_per_tick() + 0.5) as i32 + ZERO_OFFSET_TICKS
}

/// Position register value back to a joint angle in degrees.
pub fn ticks_to_deg(ticks: i32) -> f32 {
    (ticks - ZERO_OFFSET_TICKS) as f32 * degrees_per_tick()
}
