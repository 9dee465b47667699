//! Core trait abstractions.
//!
//! The registry transport is the only collaborator the core talks to; it is
//! reached through [`registry::CharityRegistry`].

pub mod registry;
