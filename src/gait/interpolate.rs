//! Foot waypoint interpolation between two x positions.
//!
//! Both curves skip the start point and land exactly on `end`, so consecutive
//! segments can be appended without duplicating samples.
use alloc::vec;
use alloc::vec::Vec;
use core::f32::consts::PI;
#[allow(unused_imports)]
use micromath::F32Ext;

use super::Waypoint;

/// `i`-th of `steps` evenly spaced x positions after `start`.
fn x_at(start: f32, end: f32, i: usize, steps: usize) -> f32 {
    if i == steps {
        end
    } else {
        start + (end - start) * i as f32 / steps as f32
    }
}

/// `steps` samples from `start` to `end` at constant height `y0`.
pub fn linear_interpolate(start: f32, end: f32, y0: f32, steps: usize) -> Vec<Waypoint> {
    if steps <= 1 {
        return vec![Waypoint::new(end, y0)];
    }

    (1..=steps)
        .map(|i| Waypoint::new(x_at(start, end, i, steps), y0))
        .collect()
}

/// `steps` samples from `start` to `end` along a half-sine arc that rises
/// `y_range` above `y0` (towards the hip) and comes back down to `y0`.
pub fn sine_interpolate(
    start: f32,
    end: f32,
    y0: f32,
    y_range: f32,
    steps: usize,
) -> Vec<Waypoint> {
    if steps <= 1 {
        return vec![Waypoint::new(end, y0)];
    }

    (1..=steps)
        .map(|i| Waypoint::new(x_at(start, end, i, steps), arc_height(y0, -y_range, i, steps)))
        .collect()
}

/// Height of sample `i` (1-based) on a half-sine arc of `amplitude` over
/// `steps` samples. The last sample sits back on `y0`.
pub(crate) fn arc_height(y0: f32, amplitude: f32, i: usize, steps: usize) -> f32 {
    if i >= steps {
        return y0;
    }
    y0 + (i as f32 * PI / steps as f32).sin() * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_is_evenly_spaced_and_ends_on_target() {
        let points = linear_interpolate(0.0, 10.0, 40.0, 4);

        assert_eq!(points.len(), 4);
        let xs: Vec<f32> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, [2.5, 5.0, 7.5, 10.0]);
        assert!(points.iter().all(|p| p.y == 40.0));
    }

    #[test]
    fn degenerate_step_counts_return_the_endpoint() {
        for steps in [0, 1] {
            assert_eq!(linear_interpolate(-3.0, 7.0, 40.0, steps), [Waypoint::new(7.0, 40.0)]);
            assert_eq!(sine_interpolate(-3.0, 7.0, 40.0, 9.0, steps), [Waypoint::new(7.0, 40.0)]);
        }
    }

    #[test]
    fn sine_arc_peaks_midway_and_returns_to_base() {
        let points = sine_interpolate(0.0, 8.0, 40.0, 10.0, 4);

        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[0].y, 40.0 - 10.0 * (PI / 4.0).sin(), epsilon = 1e-4);
        assert_relative_eq!(points[1].y, 30.0, epsilon = 1e-4);
        assert_eq!(points[3], Waypoint::new(8.0, 40.0));
        assert!(points.iter().all(|p| p.y <= 40.0));
    }

    #[test]
    fn backwards_interpolation_moves_towards_smaller_x() {
        let points = linear_interpolate(5.0, -5.0, 40.0, 5);
        assert!(points.windows(2).all(|w| w[1].x < w[0].x));
        assert_eq!(points.last().map(|p| p.x), Some(-5.0));
    }
}
