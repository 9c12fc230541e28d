use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Pause between two poll cycles, also applied after a failed list.
    pub poll_interval: Duration,
    /// Heartbeat period of the foreground supervisor.
    pub liveness_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: 10.std_seconds(),
            liveness_interval: 5.std_seconds(),
        }
    }
}

/// Drives a [`Reconciler`] at a fixed cadence until cancelled.
#[derive(Debug)]
pub struct Scheduler<A> {
    reconciler: Reconciler<A>,
    config: SchedulerConfig,
    token: CancellationToken,
}

impl<A> Scheduler<A>
where
    A: NodeApi + 'static,
{
    pub fn new(reconciler: Reconciler<A>, config: SchedulerConfig, token: CancellationToken) -> Self {
        Self {
            reconciler,
            config,
            token,
        }
    }

    /// Spawns the poll loop and supervises it from the calling task until
    /// `shutdown` resolves or the loop dies.
    pub async fn run_supervised(
        self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<Reconciler<A>, SupervisorError> {
        let token = self.token.clone();
        let liveness_interval = self.config.liveness_interval;
        supervise(self.spawn(), token, liveness_interval, shutdown).await
    }

    /// Runs the poll loop on its own task. The handle yields the reconciler
    /// back once the loop has been cancelled.
    pub fn spawn(self) -> JoinHandle<Reconciler<A>> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) -> Reconciler<A> {
        tracing::info!(
            selector = %self.reconciler.selector(),
            interval = ?self.config.poll_interval,
            "Starting node poll loop"
        );

        loop {
            tokio::select! {
                biased;
                () = self.token.cancelled() => break,
                // failures are logged by the reconciler and retried next cycle
                _ = self.reconciler.reconcile() => {}
            }

            tokio::select! {
                biased;
                () = self.token.cancelled() => break,
                () = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }

        tracing::info!("Node poll loop stopped");
        self.reconciler
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("node poll loop exited without being cancelled")]
    Exited,

    #[error("node poll loop terminated abnormally")]
    Crashed(#[from] JoinError),
}

/// Keeps the foreground alive while the poll loop runs and watches it.
///
/// Resolving `shutdown` cancels `token` and waits for the loop to wind down.
/// Any other termination of the loop is reported as an error so the process
/// can exit instead of idling forever.
pub async fn supervise<T>(
    mut poll: JoinHandle<T>,
    token: CancellationToken,
    liveness_interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<T, SupervisorError> {
    let mut liveness = tokio::time::interval(liveness_interval);
    liveness.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut shutdown = pin!(shutdown);

    loop {
        tokio::select! {
            joined = &mut poll => {
                let value = joined?;
                return if token.is_cancelled() {
                    Ok(value)
                } else {
                    Err(SupervisorError::Exited)
                };
            }
            () = &mut shutdown, if !token.is_cancelled() => {
                tracing::info!("Shutdown requested, stopping node poll loop");
                token.cancel();
            }
            _ = liveness.tick() => tracing::trace!("alive"),
        }
    }
}
