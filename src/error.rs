use std::fmt;

/// The vector being normalized when a Gram-Schmidt step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The raw acceleration vector (`u1`).
    Acceleration,
    /// Residue of the global X-axis after removing its `u1` component.
    U2,
    /// Residue of the global Y-axis after removing its `u1` and `u2` components.
    U3,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Acceleration => write!(f, "acceleration"),
            Stage::U2 => write!(f, "u2"),
            Stage::U3 => write!(f, "u3"),
        }
    }
}

/// Errors produced while building the global-to-IMU basis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BasisError {
    /// A vector had zero (or non-finite) length and could not be normalized.
    #[error("Invalid input: cannot normalize {stage} with length {norm}")]
    InvalidInput { stage: Stage, norm: f64 },

    /// The computed basis vectors are not pairwise orthogonal.
    #[error(
        "Orthogonality violation: e1·e2 = {e1_e2:e}, e1·e3 = {e1_e3:e}, e2·e3 = {e2_e3:e}"
    )]
    OrthogonalityViolation { e1_e2: f64, e1_e3: f64, e2_e3: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_vector() {
        let err = BasisError::InvalidInput {
            stage: Stage::U2,
            norm: 0.0,
        };
        assert_eq!(err.to_string(), "Invalid input: cannot normalize u2 with length 0");
    }

    #[test]
    fn orthogonality_message_carries_dot_products() {
        let err = BasisError::OrthogonalityViolation {
            e1_e2: 0.5,
            e1_e3: 0.0,
            e2_e3: -0.25,
        };
        let message = err.to_string();
        assert!(message.contains("e1·e2 = 5e-1"));
        assert!(message.contains("e2·e3 = -2.5e-1"));
    }
}
