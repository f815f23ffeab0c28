//! Planar three-body gravitational simulation and periodic-orbit tooling.
//!
//! The integrator and analysis layers live in this crate; the orbit catalog,
//! file loaders, and exporters are workspace crates re-exported here so that
//! front-ends only need one dependency.

pub mod analysis;
pub mod simulation;

pub use three_body_catalog as catalog;
pub use three_body_config as config;
pub use three_body_core::{constants, vector};
pub use three_body_export as export;

pub use catalog::{Catalog, CatalogError, InvalidOrbit, OrbitConfig};
pub use simulation::Simulation;
