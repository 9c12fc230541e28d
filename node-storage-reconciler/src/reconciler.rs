use super::*;

/// What a single reconciliation pass did.
#[derive(Debug)]
pub struct CycleReport {
    /// `None` when the selector matched no node.
    pub annotation: Option<Result<NodeSnapshot, NodeApiError>>,
    pub observations: Vec<Observation>,
}

impl CycleReport {
    pub fn changed(&self) -> impl Iterator<Item = &Observation> {
        self.observations
            .iter()
            .filter(|observation| observation.changed)
    }
}

/// Owns the storage baseline together with the lister and annotator that
/// feed it.
#[derive(Debug)]
pub struct Reconciler<A> {
    lister: NodeLister<A>,
    annotator: NodeAnnotator<A>,
    accountant: StorageAccountant,
}

impl<A: NodeApi> Reconciler<A> {
    pub fn new(api: Arc<A>, selector: FieldSelector) -> Self {
        Self {
            lister: NodeLister::new(Arc::clone(&api), selector),
            annotator: NodeAnnotator::new(api),
            accountant: StorageAccountant::new(),
        }
    }

    pub fn with_annotation(self, key: impl ToString, value: impl ToString) -> Self {
        Self {
            annotator: self.annotator.with_annotation(key, value),
            ..self
        }
    }

    pub fn selector(&self) -> &FieldSelector {
        self.lister.selector()
    }

    pub fn accountant(&self) -> &StorageAccountant {
        &self.accountant
    }

    /// Lists the nodes, marks the first one and accounts image storage for
    /// all of them.
    ///
    /// Only a failed list aborts the pass. The annotation outcome never
    /// affects storage accounting.
    pub async fn reconcile(&mut self) -> Result<CycleReport, NodeApiError> {
        let mut nodes = self.lister.list().await.inspect_err(|err| {
            tracing::warn!(selector = %self.lister.selector(), error = %err, "Failed to poll the nodes");
        })?;

        let annotation = match nodes.first_mut() {
            Some(node) => Some(self.annotate(node).await),
            None => None,
        };

        let mut observations = Vec::with_capacity(nodes.len());
        for node in &nodes {
            observations.push(self.observe(node));
        }

        Ok(CycleReport {
            annotation,
            observations,
        })
    }

    async fn annotate(&self, node: &mut NodeSnapshot) -> Result<NodeSnapshot, NodeApiError> {
        self.annotator
            .mark_checked(node)
            .await
            .inspect(|updated| {
                tracing::info!(
                    node = %updated.name,
                    resource_version = ?updated.resource_version,
                    "node updated"
                );
            })
            .inspect_err(|err| {
                if err.is_conflict() {
                    tracing::warn!(node = %node.name, error = %err, "Node changed since it was listed, skipping update");
                } else {
                    tracing::warn!(node = %node.name, error = %err, "Failed to update the node");
                }
            })
    }

    fn observe(&mut self, node: &NodeSnapshot) -> Observation {
        let observation = self.accountant.observe(node);
        let Observation {
            node,
            aggregate,
            previous,
            changed,
        } = &observation;
        if *changed {
            tracing::info!(
                node = %node,
                old = previous,
                new = aggregate,
                "node {node} storage old={} new={}",
                HumanBytes(*previous),
                HumanBytes(*aggregate),
            );
        } else {
            tracing::info!(node = %node, "no change for {node}");
        }
        observation
    }
}
