//! Core library for the `vayuwatch-backend` service.
//!
//! Everything the binary wires together lives here so integration tests can
//! assemble the same router in-process: the domain model and CPCB
//! classification (`models`), the baseline geography (`registry`), the
//! periodic live-data simulation (`simulate`), the advisory derivations
//! (`intelligence`), runtime configuration (`config`), and the HTTP surface
//! (`routes`).

pub mod config;
pub mod intelligence;
pub mod models;
pub mod registry;
pub mod routes;
pub mod simulate;

pub use config::Config;
