//! Collection of the numeric routines used to align an IMU with the global frame

pub mod gram_schmidt;
