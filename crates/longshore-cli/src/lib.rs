//! # longshore-cli
//!
//! Longshore command-line interface.
//!
//! Provides commands for:
//! - Container lifecycle (run, start, stop, terminate, logs)
//! - Service management and scaling
//! - Node inspection
//! - Node cluster provisioning and scaling
//!
//! # Architecture
//!
//! The CLI talks to the Longshore REST API over HTTPS using
//! [`longshore_api::PlatformClient`]. Identifiers given on the command line
//! may be names, short UUIDs, or full UUIDs; resolution lives in
//! `longshore-core` and runs against the live API.
//!
//! ```text
//! ┌───────────────┐      REST (JSON)      ┌─────────────────┐
//! │ longshore-cli │◄─────────────────────►│  Longshore API  │
//! └───────────────┘     (api/v1, HTTPS)   └─────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use error::CliError;
pub use output::OutputFormat;
