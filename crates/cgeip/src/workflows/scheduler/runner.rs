use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// One unit of periodic work. Implementations log their own failures.
pub trait ScheduledTick: Send + Sync + 'static {
    fn name(&self) -> &'static str;
    fn tick(&self) -> impl Future<Output = ()> + Send;
}

struct Running {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Idle/running wrapper arming a repeating timer around a [`ScheduledTick`].
///
/// The first tick fires one full period after `start`. `stop` only prevents
/// the next tick; a tick already in flight runs to completion.
pub struct PeriodicTask<T> {
    task: Arc<T>,
    period: Duration,
    running: Option<Running>,
}

impl<T: ScheduledTick> PeriodicTask<T> {
    pub fn new(task: Arc<T>, period: Duration) -> Self {
        Self {
            task,
            period,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn task(&self) -> &Arc<T> {
        &self.task
    }

    /// Arm the timer. Returns `false` when it was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        let (shutdown, receiver) = watch::channel(false);
        let handle = tokio::spawn(drive(self.task.clone(), self.period, receiver));
        self.running = Some(Running { shutdown, handle });
        info!(task = self.task.name(), period_secs = self.period.as_secs(), "scheduler started");
        true
    }

    /// Disarm the timer. Returns `false` when it was already idle.
    pub fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };
        // The loop also exits once the sender is dropped.
        let _ = running.shutdown.send(true);
        info!(task = self.task.name(), "scheduler stopped");
        true
    }

    /// Stop, swap the period, start again. Leaves the timer running.
    pub fn set_interval(&mut self, period: Duration) {
        self.stop();
        self.period = period;
        self.start();
    }
}

async fn drive<T: ScheduledTick>(task: Arc<T>, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                debug!(task = task.name(), "scheduler tick");
                task.tick().await;
            }
        }
    }
}
