use shared::{domain::Point2D, error::GeometryError};

pub fn distance(a: Point2D, b: Point2D) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle at `c` between the rays `c -> a` and `c -> b`, by the law of cosines.
///
/// Errors when `c` coincides with `a` or `b`. `a == b` is well defined and
/// yields 0.
pub fn interior_angle(a: Point2D, b: Point2D, c: Point2D) -> Result<f64, GeometryError> {
    let cb = distance(c, b);
    let ac = distance(a, c);
    let ab = distance(a, b);

    let denominator = 2.0 * cb * ac;
    if denominator == 0.0 {
        return Err(GeometryError::DegenerateTriangle);
    }

    let cosine = (cb.powi(2) + ac.powi(2) - ab.powi(2)) / denominator;
    Ok(cosine.clamp(-1.0, 1.0).acos())
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
