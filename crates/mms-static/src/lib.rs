//! Static site generator for the MMS site.
//!
//! Renders the single-page site for a chosen variant from the content catalog
//! and writes it, with its stylesheet, navigation runtime and images, to disk.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
