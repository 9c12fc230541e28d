use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use kube::api;
use kube::config::InClusterError;
use kube::config::KubeConfigOptions;
use kube::config::Kubeconfig;
use kube::config::KubeconfigError;
use node_storage::AnnotationMutation;
use node_storage::FieldSelector;
use node_storage::NodeApi;
use node_storage::NodeApiError;
use node_storage::NodeSnapshot;
use node_storage_ext as k8s;

use k8s::AnnotationMutationExt as _;
use k8s::NodeExt as _;
use k8s::corev1;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the cluster credentials come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClusterSource {
    /// Service account token and CA mounted into the pod.
    InCluster,
    /// An external kubeconfig file.
    Kubeconfig(PathBuf),
}

impl ClusterSource {
    /// No path means the process runs inside the cluster.
    pub fn from_kubeconfig(path: Option<PathBuf>) -> Self {
        path.map_or(Self::InCluster, Self::Kubeconfig)
    }

    /// Builds an authenticated client for this source.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), node_storage_kubeapi::AuthConfigError> {
    /// use node_storage_kubeapi::ClusterSource;
    ///
    /// let client = ClusterSource::Kubeconfig("/etc/kubernetes/admin.conf".into())
    ///     .client()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn client(&self) -> Result<kube::Client, AuthConfigError> {
        let config = match self {
            Self::InCluster => {
                tracing::info!("Using in cluster config");
                kube::Config::incluster()?
            }
            Self::Kubeconfig(path) => {
                tracing::info!(path = %path.display(), "Using out of cluster config");
                let kubeconfig =
                    Kubeconfig::read_from(path).map_err(|source| AuthConfigError::Kubeconfig {
                        path: path.clone(),
                        source,
                    })?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .map_err(|source| AuthConfigError::Kubeconfig {
                        path: path.clone(),
                        source,
                    })?
            }
        };
        kube::Client::try_from(config).map_err(AuthConfigError::Client)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthConfigError {
    #[error("failed to load in-cluster configuration")]
    InCluster(#[from] InClusterError),

    #[error("failed to load kubeconfig {}", path.display())]
    Kubeconfig {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    #[error("failed to create Kubernetes client")]
    Client(#[source] kube::Error),
}

pub struct KubeApi {
    patch_params: api::PatchParams,
    timeout: Duration,
    client: kube::Client,
}

impl KubeApi {
    /// Connects to the cluster described by `source`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn run() -> Result<(), node_storage_kubeapi::AuthConfigError> {
    /// use node_storage_kubeapi::{ClusterSource, KubeApi};
    ///
    /// let api = KubeApi::new(&ClusterSource::InCluster).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(source: &ClusterSource) -> Result<Self, AuthConfigError> {
        source.client().await.map(Self::with_client)
    }

    /// Create a KubeApi backed by the provided Kubernetes client, using
    /// [`DEFAULT_REQUEST_TIMEOUT`] for every request.
    pub fn with_client(client: kube::Client) -> Self {
        Self {
            patch_params: api::PatchParams::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            client,
        }
    }

    /// Bounds every list and patch request by `timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn nodes(&self) -> api::Api<corev1::Node> {
        api::Api::all(self.client.clone())
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = kube::Result<T>>,
    ) -> Result<kube::Result<T>, NodeApiError> {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| NodeApiError::Timeout(self.timeout))
    }
}

impl NodeApi for KubeApi {
    async fn list_nodes(&self, selector: &FieldSelector) -> Result<Vec<NodeSnapshot>, NodeApiError> {
        let lp = list_params(selector);
        let nodes = self.nodes();
        let list = self
            .bounded(nodes.list(&lp))
            .await?
            .map_err(NodeApiError::remote)?;
        Ok(list.items.iter().map(|node| node.snapshot()).collect())
    }

    async fn annotate_node(&self, mutation: &AnnotationMutation) -> Result<NodeSnapshot, NodeApiError> {
        let patch = api::Patch::Merge(mutation.merge_patch());
        let nodes = self.nodes();
        let node = self
            .bounded(nodes.patch(&mutation.node, &self.patch_params, &patch))
            .await?
            .map_err(|err| classify(err, mutation))?;
        Ok(node.snapshot())
    }
}

impl fmt::Debug for KubeApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KubeApi")
            .field("patch_params", &self.patch_params)
            .field("timeout", &self.timeout)
            .field("client", &"<kube::Client>")
            .finish()
    }
}

fn list_params(selector: &FieldSelector) -> api::ListParams {
    let lp = api::ListParams::default();
    if selector.is_empty() {
        lp
    } else {
        lp.fields(&selector.to_string())
    }
}

/// 409 Conflict is the API server rejecting a stale `resourceVersion`.
fn classify(err: kube::Error, mutation: &AnnotationMutation) -> NodeApiError {
    match err {
        kube::Error::Api(status) if status.code == 409 => NodeApiError::conflict(mutation),
        err => NodeApiError::remote(err),
    }
}
