use nalgebra::{Matrix3, Vector3};
use tracing::{debug, warn};

use crate::error::{BasisError, Stage};

/// Largest absolute pairwise dot product accepted between basis vectors.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-6;

/// Residues at or below this length are treated as zero vectors.
///
/// `u2` and `u3` are built from unit vectors, so this is an absolute bound.
pub const RESIDUE_TOLERANCE: f64 = 1e-10;

/// Projection of `v` onto the line spanned by `u`: `(u·v / u·u) * u`
pub fn project(u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    u * (u.dot(v) / u.dot(u))
}

/// Three unit vectors describing the global frame in IMU coordinates.
///
/// `e1` is the sensed gravity direction (global Z), `e2` the global X-axis
/// and `e3` the global Y-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub e1: Vector3<f64>,
    pub e2: Vector3<f64>,
    pub e3: Vector3<f64>,
}

impl Basis {
    /// Pairwise dot products `(e1·e2, e1·e3, e2·e3)`.
    pub fn dot_products(&self) -> (f64, f64, f64) {
        (
            self.e1.dot(&self.e2),
            self.e1.dot(&self.e3),
            self.e2.dot(&self.e3),
        )
    }

    pub fn check_orthogonality(&self, tolerance: f64) -> Result<(), BasisError> {
        let (e1_e2, e1_e3, e2_e3) = self.dot_products();

        if [e1_e2, e1_e3, e2_e3]
            .iter()
            .all(|dot| dot.abs() < tolerance)
        {
            Ok(())
        } else {
            Err(BasisError::OrthogonalityViolation {
                e1_e2,
                e1_e3,
                e2_e3,
            })
        }
    }

    /// Global-to-IMU rotation, with columns ordered `[e2, e3, e1]` (global X, Y, Z).
    pub fn rotation(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[self.e2, self.e3, self.e1])
    }
}

/// The projections subtracted while orthogonalizing the global axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projections {
    /// `proj(u1, v2)`
    pub u1_v2: Vector3<f64>,
    /// `proj(u1, v3)`
    pub u1_v3: Vector3<f64>,
    /// `proj(u2, v3)`
    pub u2_v3: Vector3<f64>,
}

/// Every vector produced by one Gram-Schmidt run, kept for inspection and plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GramSchmidt {
    /// Global X, Y and Z unit axes.
    pub global_axes: [Vector3<f64>; 3],
    pub projections: Projections,
    pub basis: Basis,
}

impl GramSchmidt {
    pub fn rotation(&self) -> Matrix3<f64> {
        self.basis.rotation()
    }
}

/// Builds the orthonormal basis from a gravity reading taken while the IMU is stationary.
///
/// The reading is rescaled to unit length first, so only its direction matters.
/// The global X-axis and then the global Y-axis are orthogonalized against it, in that order.
pub fn gram_schmidt_process(acceleration: &Vector3<f64>) -> Result<GramSchmidt, BasisError> {
    match orthonormalize(acceleration) {
        Ok(result) => {
            let Basis { e1, e2, e3 } = result.basis;
            debug!(?e2, ?e3, ?e1, "Orthonormal basis in IMU coordinate");
            Ok(result)
        }
        Err(err) => {
            warn!(?acceleration, %err, "Could not build IMU basis");
            Err(err)
        }
    }
}

/// Computes the rotation matrix mapping global-frame vectors to IMU-frame vectors.
pub fn compute_basis(acceleration: &Vector3<f64>) -> Result<Matrix3<f64>, BasisError> {
    Ok(gram_schmidt_process(acceleration)?.rotation())
}

fn orthonormalize(acceleration: &Vector3<f64>) -> Result<GramSchmidt, BasisError> {
    let global_x = Vector3::x();
    let global_y = Vector3::y();
    let global_z = Vector3::z();

    // rescale to unit gravity
    let u1 = normalize_reading(acceleration)?;
    let e1 = u1;

    let v2 = global_x;
    let u1_v2 = project(&u1, &v2);
    let u2 = v2 - u1_v2;
    let e2 = normalize(&u2, Stage::U2, RESIDUE_TOLERANCE)?;

    let v3 = global_y;
    let u1_v3 = project(&u1, &v3);
    let u2_v3 = project(&u2, &v3);
    let u3 = v3 - u1_v3 - u2_v3;
    let e3 = normalize(&u3, Stage::U3, RESIDUE_TOLERANCE)?;

    let basis = Basis { e1, e2, e3 };
    basis.check_orthogonality(ORTHOGONALITY_TOLERANCE)?;

    Ok(GramSchmidt {
        global_axes: [global_x, global_y, global_z],
        projections: Projections {
            u1_v2,
            u1_v3,
            u2_v3,
        },
        basis,
    })
}

/// Scales a raw reading to unit length, for any non-zero finite magnitude.
///
/// Dividing by the largest component first keeps the norm from overflowing
/// or underflowing.
fn normalize_reading(reading: &Vector3<f64>) -> Result<Vector3<f64>, BasisError> {
    let invalid = || BasisError::InvalidInput {
        stage: Stage::Acceleration,
        norm: reading.norm(),
    };

    if !reading.iter().all(|c| c.is_finite()) {
        return Err(invalid());
    }

    let largest = reading.amax();
    if largest == 0.0 {
        return Err(invalid());
    }

    normalize(&(reading / largest), Stage::Acceleration, 0.0)
}

/// Scales `v` to unit length, rejecting vectors no longer than `tolerance`.
fn normalize(v: &Vector3<f64>, stage: Stage, tolerance: f64) -> Result<Vector3<f64>, BasisError> {
    let norm = v.norm();
    if !norm.is_finite() || norm <= tolerance {
        return Err(BasisError::InvalidInput { stage, norm });
    }
    Ok(v / norm)
}
