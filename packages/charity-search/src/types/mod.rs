//! Data types for register searches and records.

pub mod criteria;
pub mod record;
