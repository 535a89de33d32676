//! Pitchboard - Two-Round Pitch Competition Judging Engine
//!
//! This crate implements the scoring and round-progression core for a
//! two-round judging competition: internal judges score allocated teams in
//! Round 1, the top teams per domain advance to Round 2 with an external
//! judge panel, and finalized results feed tabular report projections.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
