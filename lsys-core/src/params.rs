//! Numeric drawing parameters of an L-system.

use lsys_graphics::types::Scalar;

use crate::error::{ErrorKind, LsysError, LsysResult};

/// Turning angle plus the amounts used by the adjusting symbols.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Initial turning angle in degrees.
    pub angle: Scalar,
    /// Factor for `>`, `<`, `*`, `/`.
    pub scale_factor: Scalar,
    /// Amount for `#` and `!`.
    pub width_increment: Scalar,
    /// Amount for `&` and `%`.
    pub length_increment: Scalar,
    /// Amount for `(` and `)`.
    pub angle_increment: Scalar,
}

impl Params {
    /// Parameters with the given turning angle and neutral adjustments.
    pub const fn with_angle(angle: Scalar) -> Self {
        Self {
            angle,
            scale_factor: 1.0,
            width_increment: 0.0,
            length_increment: 0.0,
            angle_increment: 0.0,
        }
    }

    /// Reject values the interpreter cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`] for a non-finite value or a
    /// zero scale factor.
    pub fn validate(&self) -> LsysResult<()> {
        let named = [
            ("angle", self.angle),
            ("scale_factor", self.scale_factor),
            ("width_increment", self.width_increment),
            ("length_increment", self.length_increment),
            ("angle_increment", self.angle_increment),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(LsysError::new(
                    ErrorKind::InvalidParameter,
                    format!("`{name}` must be finite, got {value}"),
                ));
            }
        }
        if self.scale_factor == 0.0 {
            return Err(LsysError::new(
                ErrorKind::InvalidParameter,
                "`scale_factor` must be non-zero",
            ));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::with_angle(90.0)
    }
}
