//! icogen CLI - interactive crowdsale generator.
//!
//! Walks an operator through deploying a capped token crowdsale, or through
//! inspecting and contributing to an existing one, against a JSON-RPC node.

pub mod commands;
pub mod config;
pub mod console;
pub mod output;
pub mod prompt;
pub mod telemetry;
pub mod workflow;
