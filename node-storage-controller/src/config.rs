use super::*;

#[derive(Clone, Debug, Parser)]
#[command(about, version)]
pub(crate) struct Config {
    /// Path to a kubeconfig file. The in-cluster service account is used when unset.
    #[arg(long, env = "NODE_STORAGE_KUBECONFIG")]
    pub(crate) kubeconfig: Option<PathBuf>,

    /// Field selector choosing the watched nodes. The first match gets annotated.
    /// An empty selector matches every node.
    #[arg(
        long,
        env = "NODE_STORAGE_FIELD_SELECTOR",
        default_value = node_storage::DEFAULT_FIELD_SELECTOR
    )]
    pub(crate) field_selector: FieldSelector,

    /// Pause between two poll cycles
    #[arg(long, env = "NODE_STORAGE_POLL_INTERVAL", default_value = "10s", value_parser = parse_duration)]
    pub(crate) poll_interval: Duration,

    /// Heartbeat period of the foreground supervisor
    #[arg(long, env = "NODE_STORAGE_LIVENESS_INTERVAL", default_value = "5s", value_parser = parse_duration)]
    pub(crate) liveness_interval: Duration,

    /// Upper bound for a single list or update request
    #[arg(long, env = "NODE_STORAGE_REQUEST_TIMEOUT", default_value = "30s", value_parser = parse_duration)]
    pub(crate) request_timeout: Duration,

    #[arg(
        long,
        env = "NODE_STORAGE_ANNOTATION_KEY",
        default_value = node_storage::CHECKED_ANNOTATION
    )]
    pub(crate) annotation_key: String,

    #[arg(
        long,
        env = "NODE_STORAGE_ANNOTATION_VALUE",
        default_value = node_storage::CHECKED_VALUE
    )]
    pub(crate) annotation_value: String,
}

impl Config {
    pub(crate) fn cluster_source(&self) -> ClusterSource {
        ClusterSource::from_kubeconfig(self.kubeconfig.clone())
    }

    pub(crate) fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            poll_interval: self.poll_interval,
            liveness_interval: self.liveness_interval,
        }
    }
}

/// Parses Go style durations such as `10s` or `1m30s`.
fn parse_duration(text: &str) -> Result<Duration, String> {
    let nanos = go_parse_duration::parse_duration(text)
        .map_err(|err| format!("invalid duration {text:?}: {err:?}"))?;
    match u64::try_from(nanos) {
        Ok(nanos) if nanos > 0 => Ok(Duration::from_nanos(nanos)),
        _ => Err(format!("duration {text:?} must be positive")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIN: &str = "node-storage-controller";

    #[test]
    fn defaults() {
        let config = Config::try_parse_from([BIN]).unwrap();
        assert_eq!(config.cluster_source(), ClusterSource::InCluster);
        assert_eq!(config.field_selector, FieldSelector::node_name("minikube"));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.liveness_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.annotation_key, "checked");
        assert_eq!(config.annotation_value, "true");
        assert_eq!(config.scheduler(), SchedulerConfig::default());
    }

    #[test]
    fn overrides() {
        let config = Config::try_parse_from([
            BIN,
            "--kubeconfig",
            "/home/dev/.kube/config",
            "--field-selector",
            "metadata.name=worker-7",
            "--poll-interval",
            "1m30s",
            "--liveness-interval",
            "1m",
            "--request-timeout",
            "500ms",
        ])
        .unwrap();
        assert_eq!(
            config.cluster_source(),
            ClusterSource::Kubeconfig(PathBuf::from("/home/dev/.kube/config"))
        );
        assert_eq!(config.field_selector, FieldSelector::node_name("worker-7"));
        assert_eq!(
            config.scheduler(),
            SchedulerConfig {
                poll_interval: Duration::from_secs(90),
                liveness_interval: Duration::from_secs(60),
            }
        );
        assert_eq!(config.request_timeout, Duration::from_millis(500));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::try_parse_from([BIN, "--poll-interval", "0s"]).is_err());
        assert!(Config::try_parse_from([BIN, "--poll-interval", "soon"]).is_err());
        assert!(Config::try_parse_from([BIN, "--field-selector", "metadata.name!=a"]).is_err());
    }

    #[test]
    fn parses_go_durations() {
        assert_eq!(parse_duration("10s"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
        assert!(parse_duration("-5s").is_err());
    }
}
