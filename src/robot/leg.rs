use core::fmt::Display;
use core::ops::{Index, IndexMut};

/// Leg positions, in the order their joints appear in a [`Frame`](crate::gait::Frame).
///
/// ```text
///     Front
///   FL     FR
///   BL     BR
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Leg {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl Leg {
    pub const ALL: [Leg; 4] = [Leg::FrontLeft, Leg::FrontRight, Leg::BackLeft, Leg::BackRight];

    /// Leg on the opposite corner of the body (FL↔BR, FR↔BL).
    pub fn diagonal(self) -> Leg {
        match self {
            Leg::FrontLeft => Leg::BackRight,
            Leg::FrontRight => Leg::BackLeft,
            Leg::BackLeft => Leg::FrontRight,
            Leg::BackRight => Leg::FrontLeft,
        }
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Leg::FrontLeft => f.write_str("front left"),
            Leg::FrontRight => f.write_str("front right"),
            Leg::BackLeft => f.write_str("back left"),
            Leg::BackRight => f.write_str("back right"),
        }
    }
}

impl TryFrom<usize> for Leg {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Leg::ALL.get(value).copied().ok_or(value)
    }
}

impl<T> Index<Leg> for [T; 4] {
    type Output = T;

    fn index(&self, leg: Leg) -> &Self::Output {
        &self[leg as usize]
    }
}

impl<T> IndexMut<Leg> for [T; 4] {
    fn index_mut(&mut self, leg: Leg) -> &mut Self::Output {
        &mut self[leg as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_is_an_involution() {
        for leg in Leg::ALL {
            assert_eq!(leg.diagonal().diagonal(), leg);
            assert_ne!(leg.diagonal(), leg);
        }
    }

    #[test]
    fn index_by_leg() {
        let mut xs = [0, 1, 2, 3];
        xs[Leg::BackLeft] = 7;
        assert_eq!(xs[Leg::BackLeft], 7);
        assert_eq!(Leg::try_from(3usize), Ok(Leg::BackRight));
        assert_eq!(Leg::try_from(4usize), Err(4));
    }
}
