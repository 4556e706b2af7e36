use crate::foundation::core::Affine;

/// Decomposed 2D affine transform.
///
/// Canonical composition order: `T(translate) * R(rotate) * Shear(shear) * S(scale)`.
/// `decompose` followed by `compose` reproduces the source matrix up to float error.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformParts {
    /// Horizontal translation.
    pub translate_x: f64,
    /// Vertical translation.
    pub translate_y: f64,
    /// Horizontal scale (negative when the matrix mirrors).
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Shear factor applied between rotation and scale.
    pub shear: f64,
    /// Rotation in degrees.
    pub rotate: f64,
}

impl Default for TransformParts {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear: 0.0,
            rotate: 0.0,
        }
    }
}

impl TransformParts {
    /// Split `m` into translation, rotation, shear and scale.
    pub fn decompose(m: Affine) -> Self {
        let [a, b, c, d, e, f] = m.as_coeffs();
        let det = a * d - b * c;
        let ccw = if det < 0.0 { -1.0 } else { 1.0 };

        let scale_x = ccw * a.hypot(b);
        let theta = (ccw * b).atan2(ccw * a);
        let shear = if det != 0.0 { (a * c + b * d) / det } else { 0.0 };
        let scale_y = if scale_x != 0.0 {
            det / scale_x
        } else {
            c.hypot(d)
        };

        Self {
            translate_x: e,
            translate_y: f,
            scale_x,
            scale_y,
            shear,
            rotate: theta.to_degrees(),
        }
    }

    /// Rebuild the affine matrix.
    pub fn compose(&self) -> Affine {
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::rotate(self.rotate.to_radians())
            * Affine::new([1.0, 0.0, self.shear, 1.0, 0.0, 0.0])
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/transform.rs"]
mod tests;
