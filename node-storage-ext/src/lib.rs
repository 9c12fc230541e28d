use std::collections::BTreeMap;
use std::fmt;

use node_storage::AnnotationMutation;
use node_storage::ImageRecord;
use node_storage::NodeSnapshot;

pub use k8s_openapi as openapi;
pub use k8s_openapi::api::core::v1 as corev1;
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;

pub use bytes::HumanBytes;

mod bytes;

pub trait NodeExt {
    fn snapshot(&self) -> NodeSnapshot;
    fn image_records(&self) -> Vec<ImageRecord>;
}

impl NodeExt for corev1::Node {
    fn snapshot(&self) -> NodeSnapshot {
        let metadata = &self.metadata;
        NodeSnapshot {
            name: metadata.name.clone().unwrap_or_default(),
            annotations: metadata.annotations.clone().unwrap_or_default(),
            images: self.image_records(),
            resource_version: metadata.resource_version.clone(),
        }
    }

    fn image_records(&self) -> Vec<ImageRecord> {
        self.status
            .iter()
            .flat_map(|status| status.images.iter().flatten())
            .map(ContainerImageExt::record)
            .collect()
    }
}

pub trait ContainerImageExt {
    fn record(&self) -> ImageRecord;
}

impl ContainerImageExt for corev1::ContainerImage {
    fn record(&self) -> ImageRecord {
        ImageRecord {
            names: self.names.clone().unwrap_or_default(),
            size_bytes: self.size_bytes.unwrap_or_default(),
        }
    }
}

pub trait AnnotationMutationExt {
    /// Partial node object suitable for a JSON merge patch.
    ///
    /// `metadata.resourceVersion` is included so the API server rejects the
    /// patch with 409 Conflict if the node moved on since it was listed.
    fn merge_patch(&self) -> corev1::Node;
}

impl AnnotationMutationExt for AnnotationMutation {
    fn merge_patch(&self) -> corev1::Node {
        let metadata = metav1::ObjectMeta::new(&self.node)
            .annotated(&self.key, &self.value)
            .versioned(self.resource_version.clone());
        corev1::Node {
            metadata,
            ..default()
        }
    }
}

pub trait ObjectMetaExt {
    fn new(name: impl ToString) -> Self;
    fn annotated(self, key: impl ToString, value: impl ToString) -> Self;
    fn versioned(self, resource_version: impl Into<Option<String>>) -> Self;
}

impl ObjectMetaExt for metav1::ObjectMeta {
    fn new(name: impl ToString) -> Self {
        let name = Some(name.to_string());
        Self { name, ..default() }
    }

    fn annotated(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
        self
    }

    fn versioned(self, resource_version: impl Into<Option<String>>) -> Self {
        Self {
            resource_version: resource_version.into(),
            ..self
        }
    }
}

pub fn default<T: Default>() -> T {
    T::default()
}
