// Copyright @yucwang 2023

use super::constants::{ PI, Float, Vector2f, Vector3f };
use super::frame::Frame;

pub fn sample_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1. - z * z).max(0.0).sqrt();
    let phi: Float = 2. * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniform direction on the upper hemisphere of `basis`.
pub fn sample_hemisphere(basis: &Frame, u: Float, v: Float) -> Vector3f {
    basis.from_local(sample_uniform_hemisphere(&Vector2f::new(u, v)))
}

/// Uniform direction inside the cone of `half_angle` radians around `direction`.
pub fn sample_cone(direction: &Vector3f, half_angle: Float, u: Float, v: Float) -> Vector3f {
    if half_angle <= 0.0 {
        return *direction;
    }
    let cos_max = half_angle.min(PI).cos();
    let cos_theta = 1.0 - u * (1.0 - cos_max);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2.0 * PI * v).sin_cos();

    let frame = Frame::from_z(direction.normalize());
    frame.from_local(Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta))
}

pub fn sample_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r:   Float;

    if r1 == 0. && r2 == 0. {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}
