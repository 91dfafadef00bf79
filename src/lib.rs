//! Driver for generating the blst SWIG JavaScript binding (blst_wrap.cpp)
//!
//! Invoked from the node-gyp build as `blst-wrap <blst.swg> <blst_wrap.cpp>`.
//! A prebuilt wrapper is reused when available, otherwise SWIG is run and
//! its output is cached for the next build.

pub mod commands;
pub mod config;
pub mod error;
pub mod prebuild;
pub mod toolchain;

pub use error::{DriverError, DriverResult};
