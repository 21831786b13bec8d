//! Parallel Adaptive Large Neighborhood Search (PALNS).
//!
//! PALNS iteratively perturbs a solution via destroy/repair operator pairs,
//! accepting or rejecting candidates under a cooling simulated-annealing
//! criterion, while adapting each pair's sampling probability based on its
//! historical success. Multiple workers explore the neighborhood in
//! parallel against a shared current solution, best solution, and operator
//! weight table.
//!
//! # Architecture
//!
//! - [`problem`] — the external collaborators: [`problem::Solution`], the
//!   construction heuristic, the abort predicate, and the progress
//!   callback.
//! - [`operators`] — [`operators::DestroyOperator`] / [`operators::RepairOperator`]
//!   and the fixed destroy x repair pair linearization.
//! - [`weights`] — the weight table, its cumulative distribution, and
//!   roulette-wheel selection.
//! - [`acceptance`] — the simulated-annealing acceptance oracle and the
//!   [`acceptance::Classification`] tag.
//! - [`state`] — the shared current/best solution and the weight table,
//!   each behind its own async-aware lock.
//! - [`config`] — [`config::PalnsConfig`] and its validation.
//! - [`engine`] — [`engine::PalnsEngine`], the worker pipeline, and the
//!   coordinator.
//! - [`report`] — an optional, pure weight-log formatter.
//!
//! # Usage
//!
//! Implement [`problem::Solution`] for your solution type, implement
//! [`problem::ConstructionHeuristic`] to build an initial solution, supply
//! one or more [`operators::DestroyOperator`]/[`operators::RepairOperator`]
//! implementations, and run [`engine::PalnsEngine::solve`].

pub mod acceptance;
pub mod config;
pub mod engine;
pub mod error;
pub mod operators;
pub mod problem;
pub mod random;
pub mod report;
pub mod state;
pub mod weights;

pub use config::PalnsConfig;
pub use engine::PalnsEngine;
pub use error::PalnsError;
pub use problem::Solution;
