//! # framesmith testkit
//!
//! Test utilities for framesmith.
//!
//! This crate provides:
//! - Sample projects and compilers pinned to a fixed clock
//! - Project files in temporary directories, for CLI tests
//! - Property-based test generators using proptest
//! - Known-answer vectors for checksums and whole frames
//!
//! ## Usage
//!
//! ```rust,ignore
//! use framesmith_testkit::prelude::*;
//!
//! #[test]
//! fn modbus_frame() {
//!     let output = modbus_read_project()
//!         .compile(&fixed_compiler(Mode::Hex), &CounterStore::new())
//!         .unwrap();
//!     assert_eq!(output.bytes.len(), 8);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
    pub use framesmith_core::{CounterStore, Mode};
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
