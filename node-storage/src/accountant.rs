use super::*;

/// Last observed aggregate image storage per node name.
///
/// Lives only in process memory; a restart forgets every entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageBaseline {
    entries: HashMap<String, i64>,
}

impl StorageBaseline {
    pub fn get(&self, node: &str) -> Option<i64> {
        self.entries.get(node).copied()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.entries.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn record(&mut self, node: &str, aggregate: i64) -> Option<i64> {
        self.entries.insert(node.to_string(), aggregate)
    }
}

/// Outcome of observing one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    pub node: String,
    pub aggregate: i64,
    /// Baseline before this observation, 0 when the node was never seen.
    pub previous: i64,
    pub changed: bool,
}

/// Classifies each node observation against the in-process baseline.
#[derive(Debug, Default)]
pub struct StorageAccountant {
    baseline: StorageBaseline,
}

impl StorageAccountant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the node's aggregate image storage and compares it with the
    /// baseline, then stores the aggregate as the new baseline.
    ///
    /// A node seen for the first time is always `changed`, even when its
    /// aggregate is 0.
    pub fn observe(&mut self, node: &NodeSnapshot) -> Observation {
        let aggregate = node.image_storage();
        let previous = self.baseline.record(&node.name, aggregate);
        Observation {
            node: node.name.clone(),
            aggregate,
            previous: previous.unwrap_or_default(),
            changed: previous != Some(aggregate),
        }
    }

    pub fn baseline(&self) -> &StorageBaseline {
        &self.baseline
    }
}
