use super::error::ModelError;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use std::f64::consts::TAU;

/// A closed ball in space: the region ligand positions are drawn from.
///
/// Sampling is stateless; the sphere only carries its centre and radius, and the caller
/// supplies the random source for each draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3<f64>,
    radius: f64,
}

impl Sphere {
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidSphereRadius`] if `radius` is negative or not finite.
    pub fn new(center: Point3<f64>, radius: f64) -> Result<Self, ModelError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(ModelError::InvalidSphereRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        nalgebra::distance(&self.center, point) <= self.radius
    }

    /// Draws a point uniformly by volume from the ball.
    ///
    /// The direction is uniform on the unit sphere (uniform `cos θ` and `φ`), and the
    /// distance from the centre is `R * u^(1/3)` so that the radial density grows with
    /// `r²`. A zero-radius sphere always yields its centre.
    pub fn sample(&self, rng: &mut impl Rng) -> Point3<f64> {
        if self.radius == 0.0 {
            return self.center;
        }
        let cos_theta: f64 = rng.gen_range(-1.0..=1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi: f64 = rng.gen_range(0.0..TAU);
        let r = self.radius * rng.r#gen::<f64>().cbrt();

        let direction = Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
        self.center + direction * r
    }
}
