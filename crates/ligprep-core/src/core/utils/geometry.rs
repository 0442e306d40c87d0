use nalgebra::{Point3, Unit, Vector3};
use std::f64::consts::PI;

/// Half the width of the space occupied by a set of spheres along `direction`.
///
/// Each atom covers `[p·u - r, p·u + r]` on the axis; the result is half the span from the
/// lowest lower bound to the highest upper bound. `positions` and `radii` must be
/// index-aligned and non-empty.
pub fn projected_half_extent(
    positions: &[Point3<f64>],
    radii: &[f64],
    direction: &Unit<Vector3<f64>>,
) -> f64 {
    debug_assert_eq!(positions.len(), radii.len());
    debug_assert!(!positions.is_empty());

    let axis: &Vector3<f64> = direction.as_ref();
    let (low, high) = positions.iter().zip(radii).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(low, high), (p, &r)| {
            let t = p.coords.dot(axis);
            (low.min(t - r), high.max(t + r))
        },
    );
    (high - low) / 2.0
}

pub fn sphere_volume(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * radius.powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn single_atom_extent_equals_its_radius_in_any_direction() {
        let positions = [Point3::new(3.0, -2.0, 5.0)];
        let radii = [1.7];
        for dir in [
            Vector3::x(),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(-0.3, 0.2, 0.9),
        ] {
            let u = Unit::new_normalize(dir);
            assert!(f64_approx_equal(
                projected_half_extent(&positions, &radii, &u),
                1.7
            ));
        }
    }

    #[test]
    fn two_atoms_along_axis_span_distance_plus_radii() {
        let positions = [Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)];
        let radii = [1.0, 2.0];

        let along = projected_half_extent(&positions, &radii, &Vector3::x_axis());
        assert!(f64_approx_equal(along, (4.0 + 2.0 + 1.0) / 2.0));

        let across = projected_half_extent(&positions, &radii, &Vector3::y_axis());
        assert!(f64_approx_equal(across, 2.0));
    }

    #[test]
    fn extent_is_symmetric_under_direction_flip() {
        let positions = [
            Point3::new(0.1, 0.5, -1.0),
            Point3::new(2.0, -1.0, 0.3),
            Point3::new(-0.7, 0.0, 1.1),
        ];
        let radii = [1.7, 1.52, 1.2];
        let u = Unit::new_normalize(Vector3::new(0.4, -0.8, 0.2));
        let flipped = Unit::new_normalize(-u.into_inner());
        assert!(f64_approx_equal(
            projected_half_extent(&positions, &radii, &u),
            projected_half_extent(&positions, &radii, &flipped)
        ));
    }

    #[test]
    fn sphere_volume_matches_formula() {
        assert!(f64_approx_equal(sphere_volume(1.0), 4.0 / 3.0 * PI));
        assert!(f64_approx_equal(sphere_volume(2.0), 32.0 / 3.0 * PI));
        assert_eq!(sphere_volume(0.0), 0.0);
    }
}
