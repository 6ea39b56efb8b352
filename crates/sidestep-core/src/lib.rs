//! Sidestep Core Types
//!
//! This crate provides the geometric foundation shared by the Sidestep
//! placement engine and its hosts:
//!
//! - **Geometry**: points, sizes, axis-aligned bounds and insets ([`geometry`] module)

pub mod geometry;
