//! Gait trajectory generation.
//!
//! Turns a handful of geometric [`GaitParameters`] into cyclic per-frame joint
//! targets for all four legs:
//!
//! - [`interpolate`] produces the raw foot waypoints.
//! - [`single_leg`] solves one leg's cycle, shrinking the stride when a
//!   waypoint cannot be reached.
//! - [`phase`] rotates a leg cycle to stagger legs in time.
//! - [`compose`] assembles trot, walk, bound and pronk from a per-family table.
//! - [`crawl`] runs the seven-step crawl sequence.
//!
//! Generation is a pure function of its inputs; the returned
//! [`GaitTrajectorySet`] is never touched again by the engine.
pub mod compose;
pub mod crawl;
pub mod interpolate;
pub mod phase;
pub mod single_leg;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Display;
use core::str::FromStr;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::MAX_PHASE_STEPS;
use crate::error::{GaitError, ParseNameError};
use crate::kinematics::LegSolver;
use crate::robot::{joint::Joint, leg::Leg};

/// Qualitative leg-coordination pattern. The order is the wire order used to
/// build gait indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GaitFamily {
    Trot = 0,
    Walk = 1,
    Bound = 2,
    Pronk = 3,
    Crawl = 4,
}

impl GaitFamily {
    pub const ALL: [GaitFamily; 5] = [
        GaitFamily::Trot,
        GaitFamily::Walk,
        GaitFamily::Bound,
        GaitFamily::Pronk,
        GaitFamily::Crawl,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            GaitFamily::Trot => "trot",
            GaitFamily::Walk => "walk",
            GaitFamily::Bound => "bound",
            GaitFamily::Pronk => "pronk",
            GaitFamily::Crawl => "crawl",
        }
    }

    /// Movement keys a set of this family contains.
    pub fn movements(self) -> &'static [Movement] {
        match self {
            GaitFamily::Trot => &Movement::ALL,
            GaitFamily::Walk => &Movement::STRAIGHT,
            GaitFamily::Bound | GaitFamily::Pronk | GaitFamily::Crawl => &Movement::LINEAR,
        }
    }

    pub fn supports(self, movement: Movement) -> bool {
        self.movements().contains(&movement)
    }
}

impl Display for GaitFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GaitFamily {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GaitFamily::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseNameError)
    }
}

/// Movement key of a trajectory set. Partial turns keep the inside legs at
/// 75% or 50% of the full stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Movement {
    Forward = 0,
    Backward = 1,
    Left = 2,
    Right = 3,
    ForwardLeft75 = 4,
    ForwardLeft50 = 5,
    ForwardRight75 = 6,
    ForwardRight50 = 7,
    BackwardLeft75 = 8,
    BackwardLeft50 = 9,
    BackwardRight75 = 10,
    BackwardRight50 = 11,
}

impl Movement {
    pub const COUNT: usize = 12;

    pub const ALL: [Movement; Movement::COUNT] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
        Movement::ForwardLeft75,
        Movement::ForwardLeft50,
        Movement::ForwardRight75,
        Movement::ForwardRight50,
        Movement::BackwardLeft75,
        Movement::BackwardLeft50,
        Movement::BackwardRight75,
        Movement::BackwardRight50,
    ];

    /// Forward, backward and on-the-spot turns.
    pub const STRAIGHT: [Movement; 4] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
    ];

    pub const LINEAR: [Movement; 2] = [Movement::Forward, Movement::Backward];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Movement::Forward => "f",
            Movement::Backward => "b",
            Movement::Left => "l",
            Movement::Right => "r",
            Movement::ForwardLeft75 => "fl_0.75",
            Movement::ForwardLeft50 => "fl_0.5",
            Movement::ForwardRight75 => "fr_0.75",
            Movement::ForwardRight50 => "fr_0.5",
            Movement::BackwardLeft75 => "bl_0.75",
            Movement::BackwardLeft50 => "bl_0.5",
            Movement::BackwardRight75 => "br_0.75",
            Movement::BackwardRight50 => "br_0.5",
        }
    }
}

impl Display for Movement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Movement {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Movement::ALL
            .into_iter()
            .find(|movement| movement.key() == s)
            .ok_or(ParseNameError)
    }
}

/// Signed percentage of the nominal stride. Negative walks backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stride(pub i8);

impl Stride {
    pub const FORWARD: Stride = Stride(100);
    pub const BACKWARD: Stride = Stride(-100);

    pub fn scale(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl Display for Stride {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Geometry of one gait cycle, shared by all four legs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaitParameters {
    /// Family these parameters were tuned for; [`generate`] dispatches on it.
    pub stack_type: GaitFamily,
    /// Neutral foot position.
    pub x0: f32,
    pub y0: f32,
    /// Full stride length.
    pub x_range: f32,
    /// Lift height of the swing arc.
    pub y_range: f32,
    /// Depth of the push-down arc during stance.
    pub y_range_down: f32,
    /// Samples in the lift phase.
    pub lift_steps: usize,
    /// Samples in the down phase.
    pub down_steps: usize,
}

impl GaitParameters {
    pub fn cycle_len(&self) -> usize {
        self.lift_steps + self.down_steps
    }

    /// Same cycle with a different stride and lift height.
    pub fn with_ranges(&self, x_range: f32, y_range: f32) -> Self {
        Self {
            x_range,
            y_range,
            ..*self
        }
    }

    pub fn validate(&self) -> Result<(), GaitError> {
        if self.lift_steps == 0 || self.down_steps == 0 {
            return Err(GaitError::InvalidParameters("step counts must be positive"));
        }
        if self.lift_steps > MAX_PHASE_STEPS || self.down_steps > MAX_PHASE_STEPS {
            return Err(GaitError::InvalidParameters("step counts are too large"));
        }
        let values = [self.x0, self.y0, self.x_range, self.y_range, self.y_range_down];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GaitError::InvalidParameters("geometry must be finite"));
        }
        if self.x_range < 0.0 || self.y_range < 0.0 || self.y_range_down < 0.0 {
            return Err(GaitError::InvalidParameters("ranges must not be negative"));
        }
        Ok(())
    }
}

/// Foot position sample in the leg plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: f32,
    pub y: f32,
}

impl Waypoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Motor angles of one leg, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub q1: f32,
    pub q2: f32,
}

impl JointAngles {
    pub fn new(q1: f32, q2: f32) -> Self {
        Self { q1, q2 }
    }
}

/// One full gait cycle of a single leg. Index `len()` wraps back to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LegTrajectory {
    angles: Vec<JointAngles>,
    /// Stride actually used, after any shrinking.
    pub x_range: f32,
    /// Lift height actually used, after any shrinking.
    pub y_range: f32,
}

impl LegTrajectory {
    pub fn new(angles: Vec<JointAngles>, x_range: f32, y_range: f32) -> Self {
        Self {
            angles,
            x_range,
            y_range,
        }
    }

    pub fn angles(&self) -> &[JointAngles] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// This cycle started `shift` samples later.
    pub fn rotated(&self, shift: usize) -> LegTrajectory {
        LegTrajectory {
            angles: phase::rotate(&self.angles, shift),
            ..*self
        }
    }
}

/// Synchronised pose of all four legs:
/// `[FL.q1, FL.q2, FR.q1, FR.q2, BL.q1, BL.q2, BR.q1, BR.q2]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame(pub [f32; 8]);

impl Frame {
    pub fn from_legs(legs: [JointAngles; 4]) -> Self {
        let mut values = [0.0; 8];
        for leg in Leg::ALL {
            let angles = legs[leg];
            values[leg as usize * 2] = angles.q1;
            values[leg as usize * 2 + 1] = angles.q2;
        }
        Self(values)
    }

    pub fn leg(&self, leg: Leg) -> JointAngles {
        JointAngles::new(self.joint(leg, Joint::Q1), self.joint(leg, Joint::Q2))
    }

    pub fn joint(&self, leg: Leg, joint: Joint) -> f32 {
        self.0[leg as usize * 2 + joint as usize]
    }

    pub fn values(&self) -> &[f32; 8] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Whole degrees, as carried by a `MOVE` command.
    pub fn to_degrees(&self) -> [i32; 8] {
        self.0.map(|v| v.round() as i32)
    }
}

impl From<[i32; 8]> for Frame {
    fn from(degrees: [i32; 8]) -> Self {
        Self(degrees.map(|v| v as f32))
    }
}

/// Every movement of one gait family, computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct GaitTrajectorySet {
    family: GaitFamily,
    trajectories: BTreeMap<Movement, Vec<Frame>>,
}

impl GaitTrajectorySet {
    pub(crate) fn new(family: GaitFamily, trajectories: BTreeMap<Movement, Vec<Frame>>) -> Self {
        Self {
            family,
            trajectories,
        }
    }

    pub fn family(&self) -> GaitFamily {
        self.family
    }

    pub fn get(&self, movement: Movement) -> Option<&[Frame]> {
        self.trajectories.get(&movement).map(Vec::as_slice)
    }

    /// Lookup by key, e.g. `"fl_0.75"`.
    pub fn get_key(&self, key: &str) -> Option<&[Frame]> {
        key.parse().ok().and_then(|movement| self.get(movement))
    }

    pub fn movements(&self) -> impl Iterator<Item = Movement> + '_ {
        self.trajectories.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Movement, &[Frame])> + '_ {
        self.trajectories
            .iter()
            .map(|(movement, frames)| (*movement, frames.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }
}

/// Generate every movement of the family named by `params.stack_type`.
pub fn generate<S: LegSolver>(
    solver: &S,
    params: &GaitParameters,
) -> Result<GaitTrajectorySet, GaitError> {
    generate_family(solver, params, params.stack_type)
}

/// Generate every movement of `family` with `params`, ignoring `stack_type`.
pub fn generate_family<S: LegSolver>(
    solver: &S,
    params: &GaitParameters,
    family: GaitFamily,
) -> Result<GaitTrajectorySet, GaitError> {
    params.validate()?;
    let set = match family {
        GaitFamily::Crawl => crawl::generate(solver, params)?,
        _ => compose::generate(solver, params, family)?,
    };
    log::info!("[GAIT] generated {} with {} movements", family, set.len());
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::JointSolution;

    #[test]
    fn movement_keys_parse_back() {
        for movement in Movement::ALL {
            assert_eq!(movement.key().parse::<Movement>(), Ok(movement));
            assert_eq!(Movement::ALL[movement.index()], movement);
        }
        assert_eq!("fl_0.25".parse::<Movement>(), Err(ParseNameError));
    }

    #[test]
    fn family_names_parse_back() {
        for family in GaitFamily::ALL {
            assert_eq!(family.name().parse::<GaitFamily>(), Ok(family));
        }
        assert_eq!("TROT".parse::<GaitFamily>(), Ok(GaitFamily::Trot));
        assert!("gallop".parse::<GaitFamily>().is_err());
    }

    #[test]
    fn family_movement_counts() {
        let counts: Vec<usize> = GaitFamily::ALL.iter().map(|f| f.movements().len()).collect();
        assert_eq!(counts, [12, 4, 2, 2, 2]);
        assert!(GaitFamily::Walk.supports(Movement::Right));
        assert!(!GaitFamily::Bound.supports(Movement::Left));
    }

    #[test]
    fn frame_layout_follows_leg_order() {
        let frame = Frame::from_legs([
            JointAngles::new(1.0, 2.0),
            JointAngles::new(3.0, 4.0),
            JointAngles::new(5.0, 6.0),
            JointAngles::new(7.0, 8.0),
        ]);
        assert_eq!(frame.0, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(frame.joint(Leg::BackLeft, Joint::Q2), 6.0);
        assert_eq!(frame.leg(Leg::FrontRight), JointAngles::new(3.0, 4.0));
    }

    #[test]
    fn frame_rounds_to_whole_degrees() {
        let frame = Frame([0.4, 89.6, -0.6, 90.0, 0.0, 90.0, 0.0, 90.0]);
        assert_eq!(frame.to_degrees(), [0, 90, -1, 90, 0, 90, 0, 90]);
    }

    #[test]
    fn parameters_validation() {
        let params = GaitParameters {
            stack_type: GaitFamily::Walk,
            x0: 0.0,
            y0: 50.0,
            x_range: 20.0,
            y_range: 10.0,
            y_range_down: 10.0,
            lift_steps: 5,
            down_steps: 5,
        };
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.cycle_len(), 10);

        let zero_steps = GaitParameters { lift_steps: 0, ..params };
        assert!(matches!(zero_steps.validate(), Err(GaitError::InvalidParameters(_))));

        let negative = params.with_ranges(-1.0, 10.0);
        assert!(negative.validate().is_err());

        let longest = GaitParameters { down_steps: MAX_PHASE_STEPS, ..params };
        assert_eq!(longest.validate(), Ok(()));
    }

    #[test]
    fn absurd_step_counts_are_rejected_before_generation() {
        struct Never;

        impl LegSolver for Never {
            fn solve(&self, _x: f32, _y: f32, _mode: bool, _variant: u8) -> JointSolution {
                unreachable!("solver called with invalid parameters")
            }
        }

        let mut params = crate::config::default_parameters(GaitFamily::Trot);
        params.lift_steps = usize::MAX;
        assert_eq!(
            generate(&Never, &params),
            Err(GaitError::InvalidParameters("step counts are too large"))
        );

        params.stack_type = GaitFamily::Crawl;
        params.lift_steps = 20;
        params.down_steps = MAX_PHASE_STEPS + 1;
        assert!(matches!(generate(&Never, &params), Err(GaitError::InvalidParameters(_))));
    }
}
