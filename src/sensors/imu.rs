use nalgebra::{Matrix3, Vector3};

use crate::{
    algorithms::gram_schmidt::{compute_basis, gram_schmidt_process, GramSchmidt},
    error::BasisError,
};

/// A single IMU reading in the sensor's body frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuUpdate {
    pub timestamp: f64,
    pub acceleration: Vector3<f64>,
    /// angular rate
    pub rotation: Vector3<f64>,
}

impl ImuUpdate {
    /// Reading from a sensor at rest, where the accelerometer only senses gravity
    pub fn stationary(timestamp: f64, acceleration: Vector3<f64>) -> Self {
        Self {
            timestamp,
            acceleration,
            rotation: Vector3::zeros(),
        }
    }

    /// Rotation from the global frame into this sensor's frame
    pub fn global_to_imu(&self) -> Result<Matrix3<f64>, BasisError> {
        compute_basis(&self.acceleration)
    }

    pub fn frame_alignment(&self) -> Result<GramSchmidt, BasisError> {
        gram_schmidt_process(&self.acceleration)
    }
}
