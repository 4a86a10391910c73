//! Typed handles over the platform's resource collections.
//!
//! Each handle implements [`ResourceLookup`] so the identifier resolver can
//! query it, plus the lifecycle operations the CLI commands use. List
//! responses arrive in a `{"objects": [...]}` envelope; pagination metadata
//! is ignored.

use longshore_core::{LookupFilter, ResourceKind, ResourceLookup};
use serde::Deserialize;
use uuid::Uuid;

use crate::client::PlatformClient;
use crate::error::ApiError;
use crate::model::{
    Container, ContainerDefinition, Node, NodeCluster, NodeClusterDefinition, Service,
    ServiceDefinition,
};

/// List response envelope.
#[derive(Debug, Deserialize)]
struct Listing<T> {
    objects: Vec<T>,
}

/// Logs response envelope.
#[derive(Debug, Deserialize)]
struct LogsBody {
    logs: String,
}

fn filter_query<'a>(filter: LookupFilter<'a>) -> [(&'static str, &'a str); 1] {
    match filter {
        LookupFilter::UuidPrefix(prefix) => [("uuid__startswith", prefix)],
        LookupFilter::Name(name) => [("name", name)],
    }
}

/// Handle over the container collection.
#[derive(Debug, Clone, Copy)]
pub struct Containers<'a> {
    client: &'a PlatformClient,
}

impl<'a> Containers<'a> {
    pub(crate) fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// List every container.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_all(&self) -> Result<Vec<Container>, ApiError> {
        let url = self.client.endpoint("container/");
        let listing: Listing<Container> = self.client.get_json(&url, &[]).await?;
        Ok(listing.objects)
    }

    /// Create and deploy a container.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn run(&self, definition: &ContainerDefinition) -> Result<Container, ApiError> {
        let url = self.client.endpoint("container/");
        self.client.post_json(&url, definition).await
    }

    /// Start a stopped container.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn start(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("container/{uuid}/start/"));
        self.client.post_action(&url, &serde_json::json!({})).await
    }

    /// Stop a running container.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stop(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("container/{uuid}/stop/"));
        self.client.post_action(&url, &serde_json::json!({})).await
    }

    /// Terminate a container.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn terminate(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("container/{uuid}/"));
        self.client.delete(&url).await
    }

    /// Fetch the stored log tail of a container.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn logs(&self, uuid: &Uuid) -> Result<String, ApiError> {
        let url = self.client.endpoint(&format!("container/{uuid}/logs/"));
        let body: LogsBody = self.client.get_json(&url, &[]).await?;
        Ok(body.logs)
    }
}

impl ResourceLookup for Containers<'_> {
    type Object = Container;
    type Error = ApiError;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Container
    }

    async fn fetch_by_uuid(&self, uuid: &str) -> Result<Option<Container>, ApiError> {
        let url = self.client.endpoint(&format!("container/{uuid}/"));
        self.client.get_optional(&url).await
    }

    async fn list(&self, filter: LookupFilter<'_>) -> Result<Vec<Container>, ApiError> {
        let url = self.client.endpoint("container/");
        let listing: Listing<Container> =
            self.client.get_json(&url, &filter_query(filter)).await?;
        Ok(listing.objects)
    }
}

/// Handle over the service collection.
#[derive(Debug, Clone, Copy)]
pub struct Services<'a> {
    client: &'a PlatformClient,
}

impl<'a> Services<'a> {
    pub(crate) fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// List every service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_all(&self) -> Result<Vec<Service>, ApiError> {
        let url = self.client.endpoint("service/");
        let listing: Listing<Service> = self.client.get_json(&url, &[]).await?;
        Ok(listing.objects)
    }

    /// Create and deploy a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn run(&self, definition: &ServiceDefinition) -> Result<Service, ApiError> {
        let url = self.client.endpoint("service/");
        self.client.post_json(&url, definition).await
    }

    /// Scale a service to a target number of containers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn scale(&self, uuid: &Uuid, target: u32) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("service/{uuid}/scale/"));
        self.client
            .post_action(&url, &serde_json::json!({"target_num_containers": target}))
            .await
    }

    /// Start a stopped service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn start(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("service/{uuid}/start/"));
        self.client.post_action(&url, &serde_json::json!({})).await
    }

    /// Stop a running service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn stop(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("service/{uuid}/stop/"));
        self.client.post_action(&url, &serde_json::json!({})).await
    }

    /// Terminate a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn terminate(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("service/{uuid}/"));
        self.client.delete(&url).await
    }

    /// Fetch the stored log tail of a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn logs(&self, uuid: &Uuid) -> Result<String, ApiError> {
        let url = self.client.endpoint(&format!("service/{uuid}/logs/"));
        let body: LogsBody = self.client.get_json(&url, &[]).await?;
        Ok(body.logs)
    }
}

impl ResourceLookup for Services<'_> {
    type Object = Service;
    type Error = ApiError;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Service
    }

    async fn fetch_by_uuid(&self, uuid: &str) -> Result<Option<Service>, ApiError> {
        let url = self.client.endpoint(&format!("service/{uuid}/"));
        self.client.get_optional(&url).await
    }

    async fn list(&self, filter: LookupFilter<'_>) -> Result<Vec<Service>, ApiError> {
        let url = self.client.endpoint("service/");
        let listing: Listing<Service> =
            self.client.get_json(&url, &filter_query(filter)).await?;
        Ok(listing.objects)
    }
}

/// Handle over the node collection. Nodes carry no name, so the resolver
/// only ever queries this collection by identifier.
#[derive(Debug, Clone, Copy)]
pub struct Nodes<'a> {
    client: &'a PlatformClient,
}

impl<'a> Nodes<'a> {
    pub(crate) fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// List every node.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_all(&self) -> Result<Vec<Node>, ApiError> {
        let url = self.client.endpoint("node/");
        let listing: Listing<Node> = self.client.get_json(&url, &[]).await?;
        Ok(listing.objects)
    }

    /// Terminate a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn terminate(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("node/{uuid}/"));
        self.client.delete(&url).await
    }
}

impl ResourceLookup for Nodes<'_> {
    type Object = Node;
    type Error = ApiError;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Node
    }

    async fn fetch_by_uuid(&self, uuid: &str) -> Result<Option<Node>, ApiError> {
        let url = self.client.endpoint(&format!("node/{uuid}/"));
        self.client.get_optional(&url).await
    }

    async fn list(&self, filter: LookupFilter<'_>) -> Result<Vec<Node>, ApiError> {
        let url = self.client.endpoint("node/");
        let listing: Listing<Node> =
            self.client.get_json(&url, &filter_query(filter)).await?;
        Ok(listing.objects)
    }
}

/// Handle over the node cluster collection.
#[derive(Debug, Clone, Copy)]
pub struct NodeClusters<'a> {
    client: &'a PlatformClient,
}

impl<'a> NodeClusters<'a> {
    pub(crate) fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// List every node cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_all(&self) -> Result<Vec<NodeCluster>, ApiError> {
        let url = self.client.endpoint("nodecluster/");
        let listing: Listing<NodeCluster> = self.client.get_json(&url, &[]).await?;
        Ok(listing.objects)
    }

    /// Create and provision a node cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(
        &self,
        definition: &NodeClusterDefinition,
    ) -> Result<NodeCluster, ApiError> {
        let url = self.client.endpoint("nodecluster/");
        self.client.post_json(&url, definition).await
    }

    /// Scale a cluster to a target number of nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn scale(&self, uuid: &Uuid, target: u32) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("nodecluster/{uuid}/scale/"));
        self.client
            .post_action(&url, &serde_json::json!({"target_num_nodes": target}))
            .await
    }

    /// Terminate a cluster and all its nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn terminate(&self, uuid: &Uuid) -> Result<(), ApiError> {
        let url = self.client.endpoint(&format!("nodecluster/{uuid}/"));
        self.client.delete(&url).await
    }
}

impl ResourceLookup for NodeClusters<'_> {
    type Object = NodeCluster;
    type Error = ApiError;

    fn kind(&self) -> ResourceKind {
        ResourceKind::NodeCluster
    }

    async fn fetch_by_uuid(&self, uuid: &str) -> Result<Option<NodeCluster>, ApiError> {
        let url = self.client.endpoint(&format!("nodecluster/{uuid}/"));
        self.client.get_optional(&url).await
    }

    async fn list(&self, filter: LookupFilter<'_>) -> Result<Vec<NodeCluster>, ApiError> {
        let url = self.client.endpoint("nodecluster/");
        let listing: Listing<NodeCluster> =
            self.client.get_json(&url, &filter_query(filter)).await?;
        Ok(listing.objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use longshore_core::{resolve, ResolveError, ResolveFailure};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const UUID: &str = "7a4cfe51-038b-42d6-825e-3b533888d8cd";

    fn container_json(name: &str) -> serde_json::Value {
        serde_json::json!({
            "uuid": UUID,
            "name": name,
            "image_name": "nginx:latest",
            "state": "Running",
            "deployed": "Sun, 6 Apr 2014 18:11:17 +0000",
        })
    }

    async fn client_for(server: &MockServer) -> PlatformClient {
        PlatformClient::new(&server.uri(), None).expect("should build")
    }

    #[tokio::test]
    async fn fetch_by_uuid_decodes_the_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/container/{UUID}/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(container_json("web-1")))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let container = client
            .containers()
            .fetch_by_uuid(UUID)
            .await
            .expect("should fetch")
            .expect("should exist");
        assert_eq!(container.name, "web-1");
        assert_eq!(container.uuid.to_string(), UUID);
    }

    #[tokio::test]
    async fn fetch_by_uuid_maps_404_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/container/{UUID}/")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let fetched = client
            .containers()
            .fetch_by_uuid(UUID)
            .await
            .expect("404 is not an error here");
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn list_by_uuid_prefix_sends_startswith_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/container/"))
            .and(query_param("uuid__startswith", "7a4c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [container_json("web-1")],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let matches = client
            .containers()
            .list(LookupFilter::UuidPrefix("7a4c"))
            .await
            .expect("should list");
        assert_eq!(matches.len(), 1);
    }

    #[tokio::test]
    async fn list_by_name_sends_exact_name_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/service/"))
            .and(query_param("name", "web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let matches = client
            .services()
            .list(LookupFilter::Name("web"))
            .await
            .expect("should list");
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn resolver_runs_against_the_live_handles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/container/"))
            .and(query_param("uuid__startswith", "web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [],
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/container/"))
            .and(query_param("name", "web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [container_json("web")],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let container = resolve(&client.containers(), "web")
            .await
            .expect("should resolve");
        assert_eq!(container.name, "web");
    }

    #[tokio::test]
    async fn resolver_passes_api_errors_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/node/"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": "maintenance",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = resolve(&client.nodes(), "7a4c")
            .await
            .expect_err("should fail");
        match err {
            ResolveError::Api(ApiError::Status { status, message, .. }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected api error passthrough, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolver_reports_not_found_for_empty_listings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/nodecluster/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = resolve(&client.node_clusters(), "ghost")
            .await
            .expect_err("should fail");
        assert!(matches!(
            err,
            ResolveError::Failed(ResolveFailure::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn scale_posts_the_target_container_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/service/{UUID}/scale/")))
            .and(body_json(serde_json::json!({"target_num_containers": 3})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let uuid = UUID.parse().expect("valid uuid");
        client
            .services()
            .scale(&uuid, 3)
            .await
            .expect("should scale");
    }

    #[tokio::test]
    async fn cluster_scale_posts_the_target_node_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/nodecluster/{UUID}/scale/")))
            .and(body_json(serde_json::json!({"target_num_nodes": 5})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let uuid = UUID.parse().expect("valid uuid");
        client
            .node_clusters()
            .scale(&uuid, 5)
            .await
            .expect("should scale");
    }

    #[tokio::test]
    async fn run_posts_the_definition_and_decodes_the_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/container/"))
            .and(body_json(serde_json::json!({
                "image": "nginx:latest",
                "name": "web-1",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(container_json("web-1")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let definition = ContainerDefinition {
            image: "nginx:latest".into(),
            name: Some("web-1".into()),
            ..ContainerDefinition::default()
        };
        let container = client
            .containers()
            .run(&definition)
            .await
            .expect("should create");
        assert_eq!(container.name, "web-1");
    }

    #[tokio::test]
    async fn logs_unwraps_the_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/container/{UUID}/logs/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "logs": "hello from nginx\n",
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let uuid = UUID.parse().expect("valid uuid");
        let logs = client
            .containers()
            .logs(&uuid)
            .await
            .expect("should fetch logs");
        assert_eq!(logs, "hello from nginx\n");
    }

    #[tokio::test]
    async fn terminate_issues_a_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/api/v1/node/{UUID}/")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let uuid = UUID.parse().expect("valid uuid");
        client.nodes().terminate(&uuid).await.expect("should delete");
    }
}
