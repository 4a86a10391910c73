//! # longshore-api
//!
//! REST client for the Longshore platform API.
//!
//! [`PlatformClient`] owns the HTTP stack; the typed collection handles it
//! hands out ([`resources::Containers`], [`resources::Services`],
//! [`resources::Nodes`], [`resources::NodeClusters`]) implement
//! `longshore_core::ResourceLookup`, so user-supplied identifiers resolve
//! against the live API with the same logic the core crate tests in
//! isolation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod model;
pub mod resources;

pub use client::PlatformClient;
pub use error::ApiError;
pub use model::{
    Container, ContainerDefinition, Node, NodeCluster, NodeClusterDefinition, Service,
    ServiceDefinition,
};
