use super::*;

/// A cached container image as reported in a node's status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageRecord {
    pub names: Vec<String>,
    pub size_bytes: i64,
}

impl ImageRecord {
    pub fn new(size_bytes: i64) -> Self {
        Self {
            names: Vec::new(),
            size_bytes,
        }
    }

    pub fn named(name: impl ToString, size_bytes: i64) -> Self {
        Self {
            names: vec![name.to_string()],
            size_bytes,
        }
    }
}

/// Point-in-time copy of a cluster node, captured by a single list call.
///
/// `resource_version` is the optimistic concurrency token the node carried
/// when it was read. Any mutation derived from this snapshot is submitted
/// together with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub name: String,
    pub annotations: BTreeMap<String, String>,
    pub images: Vec<ImageRecord>,
    pub resource_version: Option<String>,
}

impl NodeSnapshot {
    pub fn new(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_images(self, images: impl IntoIterator<Item = ImageRecord>) -> Self {
        Self {
            images: images.into_iter().collect(),
            ..self
        }
    }

    pub fn with_resource_version(self, resource_version: impl ToString) -> Self {
        Self {
            resource_version: Some(resource_version.to_string()),
            ..self
        }
    }

    /// Sum of the sizes of every reported image.
    ///
    /// Records are not deduplicated: two entries for the same digest both count.
    pub fn image_storage(&self) -> i64 {
        self.images
            .iter()
            .map(|image| image.size_bytes)
            .fold(0, i64::saturating_add)
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    /// Sets `key` to `value` on this snapshot and returns the mutation that
    /// carries the change to the cluster.
    pub fn annotate(&mut self, key: impl ToString, value: impl ToString) -> AnnotationMutation {
        let mutation = AnnotationMutation {
            node: self.name.clone(),
            key: key.to_string(),
            value: value.to_string(),
            resource_version: self.resource_version.clone(),
        };
        self.annotations
            .insert(mutation.key.clone(), mutation.value.clone());
        mutation
    }
}

/// A single annotation write against one node, guarded by the resource
/// version captured at list time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationMutation {
    pub node: String,
    pub key: String,
    pub value: String,
    pub resource_version: Option<String>,
}

impl fmt::Display for AnnotationMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}={}", self.node, self.key, self.value)
    }
}
