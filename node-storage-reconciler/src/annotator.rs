use super::*;

/// Marks a node as checked by writing a single annotation.
#[derive(Debug)]
pub struct NodeAnnotator<A> {
    api: Arc<A>,
    key: String,
    value: String,
}

impl<A: NodeApi> NodeAnnotator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            key: node_storage::CHECKED_ANNOTATION.to_string(),
            value: node_storage::CHECKED_VALUE.to_string(),
        }
    }

    pub fn with_annotation(self, key: impl ToString, value: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            ..self
        }
    }

    /// Sets the annotation on `node` and submits it guarded by the node's
    /// resource version.
    ///
    /// A [`NodeApiError::VersionConflict`] means somebody else changed the
    /// node after it was listed. Nothing is retried here. A snapshot without
    /// a resource version is never submitted, the write would be unconditional.
    pub async fn mark_checked(&self, node: &mut NodeSnapshot) -> Result<NodeSnapshot, NodeApiError> {
        if node.resource_version.is_none() {
            return Err(NodeApiError::Unversioned {
                node: node.name.clone(),
            });
        }
        let mutation = node.annotate(&self.key, &self.value);
        self.api.annotate_node(&mutation).await
    }
}
