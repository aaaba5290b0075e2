//! # u-probability
//!
//! Probability distributions, special functions, and clustering.
//!
//! The crate is layered bottom-up: special functions feed the
//! distribution families, which feed sampling and goodness-of-fit checks.
//! Nothing here knows about any consumer domain.
//!
//! ## Modules
//!
//! - [`special`] — Gamma, error and incomplete beta functions with inverses
//! - [`random`] — The [`random::RandomSource`] seam and sampling helpers
//! - [`distributions`] — Continuous and discrete families behind one trait
//! - [`stats`] — Descriptive statistics and chi-squared goodness of fit
//! - [`matrix`] — Dense row-major matrix
//! - [`clustering`] — K-means with k-means++ seeding
//!
//! ## Design Philosophy
//!
//! - **Total functions**: invalid parameters and probabilities outside
//!   `[0, 1]` give NaN instead of panicking
//! - **Pure core**: every distribution operation is a free function of its
//!   parameters; the structs are thin `Copy` wrappers
//! - **Injectable randomness**: samplers draw from any `RandomSource`, so
//!   results are reproducible under a fixed seed
//! - **Property-based testing**: Mathematical invariants verified via proptest

pub mod clustering;
pub mod distributions;
pub mod matrix;
pub mod random;
pub mod special;
pub mod stats;
