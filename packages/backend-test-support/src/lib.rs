//! Test support shared by the Parley backend test binaries.
//!
//! Provides idempotent test logging and assertions for the problem-details
//! error contract, without depending on backend types.

pub mod logging;
pub mod problem_details;

pub use problem_details::assert_problem_details;
