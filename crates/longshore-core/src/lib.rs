//! # longshore-core
//!
//! Identifier resolution and spec-string parsing for the Longshore CLI.
//!
//! Two independent, pure subsystems:
//! - the [`resolve`] module turns ambiguous user-supplied tokens (full
//!   UUIDs, short UUIDs, names) into exactly one remote object or a typed
//!   failure, querying the remote collection through the [`ResourceLookup`]
//!   trait;
//! - the [`spec`] module validates the compact port/link/environment
//!   notations operators type and produces the structured records the
//!   platform API expects.
//!
//! This crate performs no I/O of its own; the only blocking boundary is the
//! injected [`ResourceLookup`] implementation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ident;
pub mod resolve;
pub mod spec;

pub use error::{BadParameter, BadParameterKind};
pub use ident::is_uuid4;
pub use resolve::{
    resolve, resolve_quiet, LookupFilter, Resolution, ResolveError, ResolveFailure, ResourceKind,
    ResourceLookup,
};
pub use spec::{
    parse_envvars, parse_links, parse_ports, EnvVarSpec, LinkSpec, PortSpec, Protocol,
};
