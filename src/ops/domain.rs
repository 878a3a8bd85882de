use crate::ops::geometry::Geometry;
use crate::ops::sample::Sample;

/// Whether a sample may enter, or leave, the reduction for this geometry.
///
/// Hyperbolic samples must stay strictly inside the Poincaré disc. Elliptic and
/// Euclidean samples have no boundary, only non-finite coordinates are rejected.
#[inline]
pub fn admits(geometry: &Geometry, sample: &Sample) -> bool {
    if !sample.is_finite() {
        return false;
    }
    match geometry {
        Geometry::Hyperbolic(_) => sample.norm_sq() < 1.0,
        Geometry::Elliptic(_) | Geometry::Euclidean(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::geometry::TriangleGroup;
    use crate::ops::sample::Parity;

    #[test]
    fn test_poincare_disc_boundary() {
        let hyperbolic = TriangleGroup::new(5, 4, 2).unwrap().classify().unwrap();
        assert!(admits(&hyperbolic, &Sample::new(0.3, 0.2, Parity::Even)));
        assert!(!admits(&hyperbolic, &Sample::new(1.5, 0.0, Parity::Even)));
        assert!(!admits(&hyperbolic, &Sample::new(1.0, 0.0, Parity::Even)));
    }

    #[test]
    fn test_unbounded_geometries() {
        let euclidean = TriangleGroup::new(4, 4, 2).unwrap().classify().unwrap();
        let elliptic = TriangleGroup::new(5, 3, 2).unwrap().classify().unwrap();
        let far = Sample::new(123.0, -45.0, Parity::Odd);
        assert!(admits(&euclidean, &far));
        assert!(admits(&elliptic, &far));
        assert!(!admits(&elliptic, &Sample::new(f32::INFINITY, 0.0, Parity::Even)));
        assert!(!admits(&euclidean, &Sample::new(0.0, f32::NAN, Parity::Even)));
    }
}
