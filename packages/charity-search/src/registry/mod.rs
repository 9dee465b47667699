//! Registry implementations.

#[cfg(feature = "commission")]
pub mod commission;
