use alloc::boxed::Box;
use thiserror::Error;

use crate::gait::{GaitFamily, Movement};

/// Why a trajectory could not be generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaitError {
    /// The top of the lift arc would come closer to the hip than the clearance guard allows.
    #[error("lift height {y_range} from y0 {y0} breaks the minimum foot clearance")]
    InfeasibleGeometry { y0: f32, y_range: f32 },

    /// A solved joint angle was missing or outside the joint limits.
    #[error("sample {index} solved to ({q1}, {q2}) which is out of range")]
    SolverOutOfRange { index: usize, q1: f32, q2: f32 },

    /// No feasible trajectory remained after shrinking; `cause` is the last attempt's failure.
    #[error("no feasible trajectory at stride scale {stride_scale} after {attempts} attempts")]
    GenerationFailed {
        stride_scale: f32,
        attempts: usize,
        #[source]
        cause: Box<GaitError>,
    },

    #[error("invalid gait parameters: {0}")]
    InvalidParameters(&'static str),
}

/// Why a byte buffer is not a valid command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("frame is {len} bytes, expected at least {expected}")]
    Truncated { len: usize, expected: usize },

    #[error("unknown command type {0}")]
    UnknownCommand(u8),

    #[error("command {command} cannot carry {count} payload elements")]
    PayloadCount { command: u8, count: u8 },

    #[error("{0} bytes left over after the payload")]
    TrailingBytes(usize),

    #[error("{family} has no {movement} trajectory")]
    UnsupportedMovement {
        family: GaitFamily,
        movement: Movement,
    },
}

/// Why a trajectory set cannot be added to the look-up table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LutError {
    #[error("table would hold {frames} frames, the firmware indexes at most {max}")]
    TooManyFrames { frames: usize, max: usize },
}

/// A gait family or movement name did not match any known one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognised gait or movement name")]
pub struct ParseNameError;
