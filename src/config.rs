//! Physical and movement constants for the Q8bot leg and its gait presets.
//!
//! Lengths are millimetres in the leg's working plane: `x` runs along the body
//! (positive towards the front), `y` runs down from the motor axis to the foot.
//! Angles are degrees.
use crate::gait::{GaitFamily, GaitParameters};

// LEG SIZE (symmetric five-bar linkage)
pub const MOTOR_SPACING: f32 = 19.5;
pub const LENGTH_PROXIMAL: f32 = 25.0;
pub const LENGTH_DISTAL: f32 = 45.0;

/// Smallest allowed foot height at the top of the lift arc (`y0 - y_range`).
pub const MIN_FOOT_CLEARANCE: f32 = 5.0;

/// Range a solved joint angle must fall in to be sent to the motors. Wider
/// than the linkage can physically reach; it only rejects nonsense solutions.
pub const JOINT_MIN_DEG: f32 = -90.0;
pub const JOINT_MAX_DEG: f32 = 270.0;

/// Most samples a lift or down phase may have. Keeps every generated family,
/// and so the firmware table, well inside 16-bit offsets.
pub const MAX_PHASE_STEPS: usize = 1000;

/// Rate at which the robot replays a gait look-up table.
pub const GAIT_FREQUENCY_HZ: u32 = 200;
pub const GAIT_INTERVAL_MS: u32 = 1000 / GAIT_FREQUENCY_HZ;

// SERVO UNITS: one revolution is 4096 ticks at the output of the gearbox
pub const TICKS_PER_REV: f32 = 4096.0;
pub const GEAR_RATIO: f32 = 1.0;
pub const ZERO_OFFSET_TICKS: i32 = 0;

/// Solver mode and variant the engine always asks for (elbows out, first branch).
pub const IK_MODE: bool = true;
pub const IK_VARIANT: u8 = 1;

/// Default parameters for each gait family, tuned on the reference robot.
pub fn default_parameters(family: GaitFamily) -> GaitParameters {
    match family {
        GaitFamily::Trot => GaitParameters {
            stack_type: family,
            x0: 0.0,
            y0: 43.36,
            x_range: 40.0,
            y_range: 20.0,
            y_range_down: 0.0,
            lift_steps: 50,
            down_steps: 50,
        },
        GaitFamily::Walk => GaitParameters {
            stack_type: family,
            x0: 0.0,
            y0: 43.36,
            x_range: 30.0,
            y_range: 15.0,
            y_range_down: 0.0,
            lift_steps: 25,
            down_steps: 75,
        },
        GaitFamily::Bound => GaitParameters {
            stack_type: family,
            x0: 0.0,
            y0: 43.36,
            x_range: 40.0,
            y_range: 20.0,
            y_range_down: 5.0,
            lift_steps: 40,
            down_steps: 40,
        },
        GaitFamily::Pronk => GaitParameters {
            stack_type: family,
            x0: 0.0,
            y0: 43.36,
            x_range: 20.0,
            y_range: 25.0,
            y_range_down: 5.0,
            lift_steps: 40,
            down_steps: 40,
        },
        GaitFamily::Crawl => GaitParameters {
            stack_type: family,
            x0: 0.0,
            y0: 43.36,
            x_range: 5.0,
            y_range: 15.0,
            y_range_down: 0.0,
            lift_steps: 20,
            down_steps: 30,
        },
    }
}
