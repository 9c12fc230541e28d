use super::*;

/// Fetches the nodes matching a fixed field selector.
#[derive(Debug)]
pub struct NodeLister<A> {
    api: Arc<A>,
    selector: FieldSelector,
}

impl<A: NodeApi> NodeLister<A> {
    pub fn new(api: Arc<A>, selector: FieldSelector) -> Self {
        Self { api, selector }
    }

    pub fn selector(&self) -> &FieldSelector {
        &self.selector
    }

    /// Single attempt, the poll cadence is the retry.
    pub async fn list(&self) -> Result<Vec<NodeSnapshot>, NodeApiError> {
        self.api.list_nodes(&self.selector).await
    }
}
