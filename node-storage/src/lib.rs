use std::collections::BTreeMap;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use constcat::concat;

pub use accountant::Observation;
pub use accountant::StorageAccountant;
pub use accountant::StorageBaseline;
pub use api::NodeApi;
pub use api::NodeApiError;
pub use node::AnnotationMutation;
pub use node::ImageRecord;
pub use node::NodeSnapshot;
pub use selector::FieldSelector;
pub use selector::SelectorError;

pub const CHECKED_ANNOTATION: &str = "checked";
pub const CHECKED_VALUE: &str = "true";

pub const NODE_NAME_FIELD: &str = "metadata.name";
pub const DEFAULT_NODE_NAME: &str = "minikube";
pub const DEFAULT_FIELD_SELECTOR: &str = concat!(NODE_NAME_FIELD, "=", DEFAULT_NODE_NAME);

mod accountant;
mod api;
mod node;
mod selector;

#[cfg(test)]
mod tests;
