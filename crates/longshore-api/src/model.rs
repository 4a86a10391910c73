//! Platform API model types.
//!
//! Read models carry the subset of fields the CLI renders; write models
//! (`*Definition`) carry exactly what a create request sends, with parsed
//! spec records going onto the wire unchanged.

use chrono::{DateTime, Utc};
use longshore_core::{EnvVarSpec, LinkSpec, PortSpec};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serde adapter for the platform's RFC 2822 timestamps
/// (`Sun, 6 Apr 2014 18:11:17 +0000`). Absent and null fields decode to
/// `None`; a malformed date is a decode error.
pub mod rfc2822 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize an optional timestamp back into RFC 2822 text.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc2822()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional RFC 2822 timestamp.
    ///
    /// # Errors
    ///
    /// Fails when the field is present, non-null, and not valid RFC 2822.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) => DateTime::parse_from_rfc2822(&text)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}

/// A container as reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    /// Unique identifier.
    pub uuid: Uuid,
    /// Container name.
    pub name: String,
    /// Image the container runs.
    pub image_name: String,
    /// Lifecycle state, as the platform spells it.
    pub state: String,
    /// Command the container runs, if overridden.
    #[serde(default)]
    pub run_command: Option<String>,
    /// Exposed and published ports.
    #[serde(default)]
    pub container_ports: Vec<PortSpec>,
    /// When the container was deployed.
    #[serde(default, with = "rfc2822")]
    pub deployed: Option<DateTime<Utc>>,
    /// Exit code of the last run, if the container stopped.
    #[serde(default)]
    pub exit_code: Option<i32>,
}

/// A service (a set of containers run from one definition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier.
    pub uuid: Uuid,
    /// Service name.
    pub name: String,
    /// Image the service runs.
    pub image_name: String,
    /// Lifecycle state, as the platform spells it.
    pub state: String,
    /// Containers currently running.
    #[serde(default)]
    pub current_num_containers: u32,
    /// Containers the service is scaled to.
    #[serde(default)]
    pub target_num_containers: u32,
    /// When the service was deployed.
    #[serde(default, with = "rfc2822")]
    pub deployed: Option<DateTime<Utc>>,
}

/// A worker node. Nodes have no name; they are addressed by identifier
/// only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub uuid: Uuid,
    /// Lifecycle state, as the platform spells it.
    pub state: String,
    /// Public FQDN, once the node is provisioned.
    #[serde(default)]
    pub external_fqdn: Option<String>,
    /// Last heartbeat from the node agent.
    #[serde(default, with = "rfc2822")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// A cluster of worker nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCluster {
    /// Unique identifier.
    pub uuid: Uuid,
    /// Cluster name.
    pub name: String,
    /// Lifecycle state, as the platform spells it.
    pub state: String,
    /// Deployment region.
    #[serde(default)]
    pub region: Option<String>,
    /// Node type provisioned in this cluster.
    #[serde(default)]
    pub node_type: Option<String>,
    /// Nodes currently provisioned.
    #[serde(default)]
    pub current_num_nodes: u32,
    /// Nodes the cluster is scaled to.
    #[serde(default)]
    pub target_num_nodes: u32,
    /// When the cluster was deployed.
    #[serde(default, with = "rfc2822")]
    pub deployed: Option<DateTime<Utc>>,
}

/// Payload for creating a container.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContainerDefinition {
    /// Image to run.
    pub image: String,
    /// Container name; the platform derives one from the image when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Command to run in the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_command: Option<String>,
    /// Entrypoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    /// Ports to expose or publish.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub container_ports: Vec<PortSpec>,
    /// Environment variables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub container_envvars: Vec<EnvVarSpec>,
    /// Links to other containers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linked_to_container: Vec<LinkSpec>,
}

/// Payload for creating a service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceDefinition {
    /// Image to run.
    pub image: String,
    /// Service name; the platform derives one from the image when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Command to run in each container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_command: Option<String>,
    /// Entrypoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<String>,
    /// Ports to expose or publish.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub container_ports: Vec<PortSpec>,
    /// Environment variables.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub container_envvars: Vec<EnvVarSpec>,
    /// Links to other services.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linked_to_service: Vec<LinkSpec>,
    /// Initial number of containers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_num_containers: Option<u32>,
}

/// Payload for creating a node cluster.
#[derive(Debug, Clone, Serialize)]
pub struct NodeClusterDefinition {
    /// Cluster name.
    pub name: String,
    /// Deployment region.
    pub region: String,
    /// Node type to provision.
    pub node_type: String,
    /// Initial number of nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_num_nodes: Option<u32>,
}
