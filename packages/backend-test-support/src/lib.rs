//! Test support utilities for the Lifeline backend.
//!
//! Shared between unit and integration tests: one-time logging
//! initialization and assertions for the problem-details error contract.

pub mod logging;
pub mod problem_details;
