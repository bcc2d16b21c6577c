// 4x4 homogeneous transforms
// Column vectors: compose(a, b) applies b first, then a.

use crate::error::ParseError;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Principal rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(ParseError::UnknownAxis(s.to_string())),
        }
    }
}

pub fn identity() -> glm::DMat4 {
    glm::identity::<f64, 4>()
}

/// Pure translation matrix
pub fn translation_matrix(x: f64, y: f64, z: f64) -> glm::DMat4 {
    glm::mat4(
        1.0, 0.0, 0.0, x, //
        0.0, 1.0, 0.0, y, //
        0.0, 0.0, 1.0, z, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Right-handed rotation about a principal axis.
/// A quarter turn about Y carries +Z onto +X.
pub fn rotation_matrix(angle: f64, axis: Axis) -> glm::DMat4 {
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => glm::mat4(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ),
        Axis::Y => glm::mat4(
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ),
        Axis::Z => glm::mat4(
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ),
    }
}

/// Non-uniform scale matrix
pub fn scale_matrix(x: f64, y: f64, z: f64) -> glm::DMat4 {
    glm::mat4(
        x, 0.0, 0.0, 0.0, //
        0.0, y, 0.0, 0.0, //
        0.0, 0.0, z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// `a · b`: the result applies `b` first, then `a`
pub fn compose(a: &glm::DMat4, b: &glm::DMat4) -> glm::DMat4 {
    a * b
}

/// Translate `matrix` by (x, y, z), pre-multiplying: `T · matrix`
pub fn translate(matrix: &glm::DMat4, x: f64, y: f64, z: f64) -> glm::DMat4 {
    compose(&translation_matrix(x, y, z), matrix)
}

/// Rotate `matrix` about `axis`, pre-multiplying: `R · matrix`
pub fn rotate(matrix: &glm::DMat4, angle: f64, axis: Axis) -> glm::DMat4 {
    compose(&rotation_matrix(angle, axis), matrix)
}

/// Scale `matrix`, pre-multiplying: `S · matrix`
pub fn rescale(matrix: &glm::DMat4, x: f64, y: f64, z: f64) -> glm::DMat4 {
    compose(&scale_matrix(x, y, z), matrix)
}

/// Rotate a direction vector about a principal axis
pub fn rotate_vec3(v: &glm::DVec3, angle: f64, axis: Axis) -> glm::DVec3 {
    let r = rotation_matrix(angle, axis);
    let out = r * glm::vec4(v.x, v.y, v.z, 0.0);
    glm::vec3(out.x, out.y, out.z)
}

/// Apply `m` to a point (w = 1)
pub fn transform_point(m: &glm::DMat4, p: &glm::DVec3) -> glm::DVec3 {
    let out = m * glm::vec4(p.x, p.y, p.z, 1.0);
    glm::vec3(out.x, out.y, out.z)
}

/// Apply `m` to a direction (w = 0), ignoring translation
pub fn transform_direction(m: &glm::DMat4, d: &glm::DVec3) -> glm::DVec3 {
    let out = m * glm::vec4(d.x, d.y, d.z, 0.0);
    glm::vec3(out.x, out.y, out.z)
}

/// Translation column of an affine transform
pub fn translation_of(m: &glm::DMat4) -> glm::DVec3 {
    glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Column-major copy, the layout scene graphs usually upload
pub fn to_cols_array(m: &glm::DMat4) -> [[f64; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (col, column) in out.iter_mut().enumerate() {
        for (row, value) in column.iter_mut().enumerate() {
            *value = m[(row, col)];
        }
    }
    out
}

/// Largest absolute element difference between two matrices
pub fn max_abs_diff(a: &glm::DMat4, b: &glm::DMat4) -> f64 {
    (a - b).iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn near(a: &glm::DVec3, b: &glm::DVec3) -> bool {
        (a - b).iter().all(|v| v.abs() < EPS)
    }

    #[test]
    fn rotation_then_inverse_is_identity() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for angle in [0.0, 0.01, -0.3, FRAC_PI_2, 2.5, -PI, 7.0] {
                let m = rotate(&rotate(&identity(), angle, axis), -angle, axis);
                assert!(max_abs_diff(&m, &identity()) < EPS, "{axis} {angle}");
            }
        }
    }

    #[test]
    fn quarter_turn_about_y_maps_z_to_x() {
        let v = rotate_vec3(&glm::vec3(0.0, 0.0, 1.0), FRAC_PI_2, Axis::Y);
        assert!(near(&v, &glm::vec3(1.0, 0.0, 0.0)));
    }

    #[test]
    fn right_handed_x_and_z() {
        let y_to_z = rotate_vec3(&glm::vec3(0.0, 1.0, 0.0), FRAC_PI_2, Axis::X);
        assert!(near(&y_to_z, &glm::vec3(0.0, 0.0, 1.0)));
        let x_to_y = rotate_vec3(&glm::vec3(1.0, 0.0, 0.0), FRAC_PI_2, Axis::Z);
        assert!(near(&x_to_y, &glm::vec3(0.0, 1.0, 0.0)));
    }

    #[test]
    fn builders_pre_multiply() {
        // Rotate first, then translate: the translation is not rotated.
        let m = translate(&rotate(&identity(), FRAC_PI_2, Axis::Y), 1.0, 2.0, 3.0);
        assert!(near(&translation_of(&m), &glm::vec3(1.0, 2.0, 3.0)));

        // Translate first, then rotate: the offset swings with the rotation.
        let m = rotate(&translate(&identity(), 0.0, 0.0, 1.0), FRAC_PI_2, Axis::Y);
        assert!(near(&translation_of(&m), &glm::vec3(1.0, 0.0, 0.0)));
    }

    #[test]
    fn rescale_then_point() {
        let m = translate(&rescale(&identity(), 2.0, 3.0, 4.0), 1.0, 0.0, 0.0);
        let p = transform_point(&m, &glm::vec3(1.0, 1.0, 1.0));
        assert!(near(&p, &glm::vec3(3.0, 3.0, 4.0)));
    }

    #[test]
    fn directions_ignore_translation() {
        let m = translate(&identity(), 5.0, 5.0, 5.0);
        let d = transform_direction(&m, &glm::vec3(0.0, 0.0, 1.0));
        assert!(near(&d, &glm::vec3(0.0, 0.0, 1.0)));
    }

    #[test]
    fn cols_array_is_column_major() {
        let cols = to_cols_array(&translation_matrix(1.0, 2.0, 3.0));
        assert_eq!(cols[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(cols[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn axis_parses_case_insensitively() {
        assert_eq!("Y".parse::<Axis>().unwrap(), Axis::Y);
        assert!("w".parse::<Axis>().is_err());
    }
}
