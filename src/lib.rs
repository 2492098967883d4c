//! Core library for the vic-crime-series command line application.
//!
//! The library loads the two Crime Statistics Agency Victoria criminal
//! incident releases (years ending March 2010–2019 and years ending
//! September 2012–2021), maps their headers onto one schema, and stitches
//! them into a single 2010–2021 series. File adapters live under [`io`], the
//! table representation inside [`model`], header mapping in [`standardize`],
//! and the operations hang off [`processor::CrimeDataProcessor`]: loading,
//! [`merge`], [`summary`] aggregation, [`export`], [`report`] and
//! [`validate`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod merge;
pub mod model;
pub mod processor;
pub mod report;
pub mod standardize;
pub mod summary;
pub mod validate;

pub use config::ProcessorConfig;
pub use error::{DataError, Result};
pub use processor::CrimeDataProcessor;
