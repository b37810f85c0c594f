//! Edgemap - Sobel edge maps for grayscale Netpbm images.
//!
//! Command-line front end over the `graymap` crate.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
