//! Gait trajectory engine for the Q8bot quadruped.
//!
//! Generates cyclic joint-angle sequences for trot, walk, bound, pronk and
//! crawl from a few geometric parameters, encodes them as robot commands and
//! flattens them into the look-up table the firmware replays.
//!
//! Modules: [`gait`] generation, [`kinematics`] solver seam, [`robot`] legs and
//! commands, [`lut`] firmware table, [`playback`] host-side replay.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod gait;
pub mod kinematics;
pub mod lut;
pub mod playback;
pub mod robot;

pub use error::{CommandError, GaitError, LutError};
pub use gait::{
    generate, generate_family, Frame, GaitFamily, GaitParameters, GaitTrajectorySet, Movement,
};
pub use kinematics::{conversion::FiveBarLeg, JointSolution, LegSolver};
