// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Nanowire NEGF assembles the tight-binding Hamiltonian of a one dimensional nanowire
//!
//! # Overview
//! In a quantum transport calculation the device is discretised into `N_D` sites along the wire,
//! each carrying `N_int` internal degrees of freedom (spin, or the particle and hole components of
//! a superconducting wire). In the nearest neighbour tight-binding approximation the Hamiltonian
//! of the device is block tridiagonal: each site carries an on-site block and each pair of
//! adjacent sites is joined by a coupling block. The Green's function recursions which consume the
//! Hamiltonian only ever touch these three block bands, so they are all that is stored.
//!
//! # Usage
//! The crate is distributed with a small binary, which reads the parameters of a wire from a `.toml`
//! file and reports on the assembled Hamiltonian:
//!
//! ```toml
//! t0 = 1.0
//! N_D = 50
//! N_int = 2
//! Delta = 0.01
//! phase = 0.0
//! mu1 = 0.1
//! mu2 = 0.1
//! ```
//!
//! From a library the Hamiltonian is built from a `ParameterStore`:
//!
//! ```no_run
//! use nanowire_negf::{hamiltonian::{Hamiltonian, HamiltonianBuilder}, parameters::ParameterStore};
//!
//! let parameters: ParameterStore<f64> = [("t0", 1.0), ("N_D", 50.0), ("N_int", 2.0)]
//!     .into_iter()
//!     .collect();
//! let hamiltonian: Hamiltonian<f64> = HamiltonianBuilder::default()
//!     .with_parameters(&parameters)
//!     .build()?;
//! assert_eq!(hamiltonian.shape(), [50, 50, 2, 2]);
//! # Ok::<(), nanowire_negf::BuildError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Error handling
mod error;

/// System Hamiltonian
pub mod hamiltonian;

/// Physical parameters of the wire
pub mod parameters;

/// Helper functions and traits
mod utilities;

pub use error::{BuildError, CsrError};
