//! Joint enumeration and display helpers.
//!
//! Each Q8bot leg has two motors; [`Joint`] picks one of them inside a leg's
//! slot of a [`Frame`](crate::gait::Frame).
use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Q1 = 0,
    Q2 = 1,
}

impl Display for Joint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Joint::Q1 => f.write_str("q1"),
            Joint::Q2 => f.write_str("q2"),
        }
    }
}
