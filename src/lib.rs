//! Aligns an IMU's sensor frame with the global frame from a single stationary
//! gravity reading, using the Gram-Schmidt process against the global X and Y axes.

pub mod algorithms;
pub mod error;
pub mod sensors;
pub mod visualization;

pub use algorithms::gram_schmidt::{compute_basis, gram_schmidt_process, Basis, GramSchmidt};
pub use error::{BasisError, Stage};
