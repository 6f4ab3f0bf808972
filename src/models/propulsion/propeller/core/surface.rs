//! Power as a continuous function of airspeed and thrust.
//!
//! Test-stand samples form an irregular cloud in the (airspeed, thrust) plane:
//! each rpm section sweeps airspeed while thrust falls off. The surface
//! triangulates that cloud and interpolates power linearly within each
//! triangle. Queries outside the sampled envelope extend the plane of the
//! nearest triangle instead of failing.

mod error;
mod triangulation;

pub use error::SurfaceError;

use log::debug;
use uom::si::{
    f64::{Force, Power, Velocity},
    force::newton,
    power::watt,
    velocity::meter_per_second,
};

use super::table::PerformanceTable;
use triangulation::{Point, Triangle, barycentric, distance_squared_to_triangle, triangulate};

/// Barycentric slack for treating a query as inside a triangle.
const INSIDE_TOLERANCE: f64 = 1e-9;

/// A power value read from a [`PerformanceSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerEstimate {
    pub power: Power,

    /// True if the query fell outside the sampled envelope.
    ///
    /// Extrapolated values are lower confidence and should not be relied on
    /// for safety margins.
    pub extrapolated: bool,
}

/// Piecewise-linear interpolant of power over (airspeed, thrust).
///
/// The surface is immutable once built and can be queried from many threads.
#[derive(Debug, Clone)]
pub struct PerformanceSurface {
    /// Distinct samples as (airspeed m/s, thrust N, power W).
    samples: Vec<[f64; 3]>,
    /// Samples mapped onto the unit square for triangulation.
    points: Vec<Point>,
    scale: Scale,
    triangles: Vec<Triangle>,
}

impl PerformanceSurface {
    /// Builds a surface from a table already normalized to internal units.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the table has fewer than 3 distinct
    /// (airspeed, thrust) samples or they are all collinear.
    pub fn new(table: &PerformanceTable) -> Result<Self, SurfaceError> {
        Self::from_samples(
            table
                .rows()
                .iter()
                .map(|row| [row.airspeed, row.thrust, row.power]),
        )
    }

    /// Builds a surface from `[airspeed m/s, thrust N, power W]` samples.
    ///
    /// Non-finite samples are ignored. When several samples share an
    /// (airspeed, thrust) location, the first one is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if fewer than 3 distinct samples remain or
    /// they are all collinear.
    pub fn from_samples(samples: impl IntoIterator<Item = [f64; 3]>) -> Result<Self, SurfaceError> {
        let mut samples: Vec<[f64; 3]> = samples
            .into_iter()
            .filter(|sample| sample.iter().all(|v| v.is_finite()))
            .collect();

        // Stable sort, so dedup keeps the first sample at each location.
        samples.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
        samples.dedup_by(|b, a| a[0] == b[0] && a[1] == b[1]);

        if samples.len() < 3 {
            return Err(SurfaceError::InsufficientSamples {
                found: samples.len(),
            });
        }

        let scale = Scale::fit(&samples);
        let points: Vec<Point> = samples.iter().map(|s| scale.apply(s[0], s[1])).collect();
        let triangles = triangulate(&points);

        if triangles.is_empty() {
            return Err(SurfaceError::Collinear {
                count: samples.len(),
            });
        }

        debug!(
            "performance surface: {} samples, {} triangles",
            samples.len(),
            triangles.len()
        );

        Ok(Self {
            samples,
            points,
            scale,
            triangles,
        })
    }

    /// Returns the (possibly extrapolated) power at the given airspeed and thrust.
    #[must_use]
    pub fn power(&self, airspeed: Velocity, thrust: Force) -> Power {
        self.evaluate(airspeed, thrust).power
    }

    /// Returns the power at the given airspeed and thrust, flagging extrapolation.
    #[must_use]
    pub fn evaluate(&self, airspeed: Velocity, thrust: Force) -> PowerEstimate {
        let x = airspeed.get::<meter_per_second>();
        let y = thrust.get::<newton>();
        let p = self.scale.apply(x, y);

        let mut nearest: Option<(f64, [f64; 3], Triangle)> = None;
        for &triangle in &self.triangles {
            let Some(weights) = barycentric(p, self.corners(triangle)) else {
                continue;
            };

            if weights.iter().all(|&w| w >= -INSIDE_TOLERANCE) {
                return PowerEstimate {
                    power: Power::new::<watt>(self.blend(triangle, weights)),
                    extrapolated: false,
                };
            }

            let distance = distance_squared_to_triangle(p, self.corners(triangle));
            if nearest.is_none_or(|(best, _, _)| distance < best) {
                nearest = Some((distance, weights, triangle));
            }
        }

        debug!("extrapolating power at {x} m/s, {y} N");
        let value = nearest.map_or(f64::NAN, |(_, weights, triangle)| {
            self.blend(triangle, weights)
        });

        PowerEstimate {
            power: Power::new::<watt>(value),
            extrapolated: true,
        }
    }

    /// Number of distinct samples the surface interpolates.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of triangles in the interpolation mesh.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn corners(&self, [a, b, c]: Triangle) -> [Point; 3] {
        [self.points[a], self.points[b], self.points[c]]
    }

    fn blend(&self, triangle: Triangle, weights: [f64; 3]) -> f64 {
        triangle
            .iter()
            .zip(weights)
            .map(|(&vertex, weight)| weight * self.samples[vertex][2])
            .sum()
    }
}

/// Affine map of sample coordinates onto the unit square.
#[derive(Debug, Clone, Copy)]
struct Scale {
    x_min: f64,
    x_span: f64,
    y_min: f64,
    y_span: f64,
}

impl Scale {
    fn fit(samples: &[[f64; 3]]) -> Self {
        let (x_min, x_max) = bounds(samples.iter().map(|s| s[0]));
        let (y_min, y_max) = bounds(samples.iter().map(|s| s[1]));
        Self {
            x_min,
            x_span: span(x_min, x_max),
            y_min,
            y_span: span(y_min, y_max),
        }
    }

    fn apply(self, x: f64, y: f64) -> Point {
        Point::new((x - self.x_min) / self.x_span, (y - self.y_min) / self.y_span)
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn span(min: f64, max: f64) -> f64 {
    if max > min { max - min } else { 1.0 }
}
