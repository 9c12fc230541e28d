use super::*;

/// Remote operations the reconciler needs from the cluster.
pub trait NodeApi: Send + Sync {
    /// Lists the nodes matching `selector`, in the order the server returns them.
    fn list_nodes(
        &self,
        selector: &FieldSelector,
    ) -> impl Future<Output = Result<Vec<NodeSnapshot>, NodeApiError>> + Send;

    /// Writes one annotation, failing with [`NodeApiError::VersionConflict`]
    /// when the node changed after `mutation.resource_version` was read.
    fn annotate_node(
        &self,
        mutation: &AnnotationMutation,
    ) -> impl Future<Output = Result<NodeSnapshot, NodeApiError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum NodeApiError {
    #[error("node API unavailable: {0}")]
    RemoteUnavailable(#[source] Box<dyn Error + Send + Sync>),

    #[error("node API request timed out after {0:?}")]
    Timeout(Duration),

    #[error("node {node} was modified after resource version {resource_version:?} was read")]
    VersionConflict {
        node: String,
        resource_version: Option<String>,
    },

    #[error("refusing to update node {node} without a resource version")]
    Unversioned { node: String },
}

impl NodeApiError {
    pub fn remote(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::RemoteUnavailable(err.into())
    }

    pub fn conflict(mutation: &AnnotationMutation) -> Self {
        Self::VersionConflict {
            node: mutation.node.clone(),
            resource_version: mutation.resource_version.clone(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}
