use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use node_storage::FieldSelector;
use node_storage::NodeApi;
use node_storage::NodeApiError;
use node_storage::NodeSnapshot;
use node_storage::Observation;
use node_storage::StorageAccountant;
use node_storage_ext::HumanBytes;
use time::ext::NumericalStdDuration as _;
use tokio::task::JoinError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub use annotator::NodeAnnotator;
pub use lister::NodeLister;
pub use reconciler::CycleReport;
pub use reconciler::Reconciler;
pub use scheduler::Scheduler;
pub use scheduler::SchedulerConfig;
pub use scheduler::SupervisorError;
pub use scheduler::supervise;

mod annotator;
mod lister;
mod reconciler;
mod scheduler;
