//! Generalized Bezier evaluation in Bernstein form.
//!
//! A curve of degree `n` is defined by `n + 1` points
//! `[origin, control_0, .., control_{n-2}, end]` and evaluated as
//!
//! ```text
//! B(t) = Σ_{i=0}^{n} C(n, i) (1 - t)^(n - i) t^i P_i
//! ```
//!
//! The renderer and the diagram-text exporter both sample curves through
//! [`sample`]; they differ only in step count.

#[cfg(test)]
#[path = "bezier_test.rs"]
mod bezier_test;

use crate::consts::EXPORT_BEZIER_BASE_STEPS;
use crate::geom::Vec2;

/// `n!` for the small degrees used by diagram curves.
#[must_use]
pub fn factorial(n: u32) -> u64 {
    (1..=u64::from(n)).product()
}

/// Binomial coefficient `C(n, i)`; zero when `i > n`.
#[must_use]
pub fn binomial(n: u32, i: u32) -> u64 {
    if i > n {
        return 0;
    }
    factorial(n) / (factorial(i) * factorial(n - i))
}

/// Evaluate the curve through `points` at parameter `t` in `[0, 1]`.
///
/// An empty slice evaluates to the origin; a single point is constant.
#[must_use]
pub fn evaluate(points: &[Vec2], t: f64) -> Vec2 {
    let Some(n) = points.len().checked_sub(1) else {
        return Vec2::ZERO;
    };
    #[allow(clippy::cast_possible_truncation)]
    let n = n as u32;
    let s = 1.0 - t;

    points.iter().zip(0_u32..).fold(Vec2::ZERO, |acc, (p, i)| {
        #[allow(clippy::cast_precision_loss)]
        let coeff = binomial(n, i) as f64;
        let weight = coeff * s.powi((n - i).cast_signed()) * t.powi(i.cast_signed());
        acc + p.scale(weight)
    })
}

/// Sample `steps + 1` points at uniform `t = k / steps`, including both ends.
#[must_use]
pub fn sample(points: &[Vec2], steps: usize) -> Vec<Vec2> {
    if steps == 0 {
        return vec![evaluate(points, 0.0)];
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = steps as f64;
    (0..=steps)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / denom;
            evaluate(points, t)
        })
        .collect()
}

/// Assemble `[origin, controls.., end]` for evaluation.
#[must_use]
pub fn control_polygon(origin: Vec2, controls: &[Vec2], end: Vec2) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(controls.len() + 2);
    points.push(origin);
    points.extend_from_slice(controls);
    points.push(end);
    points
}

/// Step count used when flattening a curve with `control_count` control points for export.
#[must_use]
pub fn export_steps(control_count: usize) -> usize {
    EXPORT_BEZIER_BASE_STEPS + 2 * control_count
}
