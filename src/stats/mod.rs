//! Robust statistical primitives.

mod robust;

pub use robust::{mad, mad_outliers, median, robust_z_score, MAD_SCALE};
