//! Command implementations.
//!
//! Single-object commands (`inspect`, `logs`, `scale`) resolve their
//! identifier strictly and abort on the first failure. Bulk lifecycle
//! commands (`start`, `stop`, `terminate`) resolve each identifier quietly,
//! report unresolvable ones to stderr, keep going, and finish with a
//! partial-failure error if anything was skipped. A platform API error
//! always aborts immediately.

mod container;
mod node;
mod node_cluster;
mod service;

pub use container::ContainerCommand;
pub use node::NodeCommand;
pub use node_cluster::NodeClusterCommand;
pub use service::ServiceCommand;

use longshore_api::ApiError;
use longshore_core::{resolve_quiet, Resolution, ResourceLookup};

use crate::error::CliError;

/// Resolve every token quietly, reporting failures to stderr as they
/// happen. Returns the resolved objects and the failure count; only an API
/// error aborts the loop.
pub(crate) async fn resolve_each<L>(
    lookup: &L,
    tokens: &[String],
) -> Result<(Vec<L::Object>, usize), CliError>
where
    L: ResourceLookup<Error = ApiError>,
{
    let mut resolved = Vec::with_capacity(tokens.len());
    let mut failed = 0;
    for token in tokens {
        match resolve_quiet(lookup, token).await? {
            Resolution::Found(object) => resolved.push(object),
            Resolution::Failed(failure) => {
                eprintln!("{failure}");
                failed += 1;
            }
        }
    }
    Ok((resolved, failed))
}

/// Turn the tally of a bulk command into its exit result.
pub(crate) fn finish_bulk(failed: usize, total: usize) -> Result<(), CliError> {
    if failed > 0 {
        Err(CliError::Partial { failed, total })
    } else {
        Ok(())
    }
}
