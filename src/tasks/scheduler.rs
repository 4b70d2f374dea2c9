//! Job Scheduler
//!
//! Background loop driving the media sync and token refresh jobs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::tasks::ScheduledJob;

/// Longest accepted job period. Longer periods are clamped.
pub const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Shortest accepted job period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

// == Scheduler State ==
/// Lifecycle of a scheduler. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

// == Scheduler ==
/// Two periodic jobs sharing one cancellation signal.
pub struct Scheduler {
    sync_job: Arc<dyn ScheduledJob>,
    sync_period: Duration,
    refresh_job: Arc<dyn ScheduledJob>,
    refresh_period: Duration,
    state: watch::Sender<SchedulerState>,
}

impl Scheduler {
    /// Creates an idle scheduler. Periods are clamped to
    /// `[1ms, MAX_PERIOD]`.
    ///
    /// # Arguments
    /// * `sync_job` / `sync_period` - Media sync and its period
    /// * `refresh_job` / `refresh_period` - Token refresh check and its period
    pub fn new(
        sync_job: Arc<dyn ScheduledJob>,
        sync_period: Duration,
        refresh_job: Arc<dyn ScheduledJob>,
        refresh_period: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SchedulerState::Idle);
        Self {
            sync_job,
            sync_period: sync_period.clamp(MIN_PERIOD, MAX_PERIOD),
            refresh_job,
            refresh_period: refresh_period.clamp(MIN_PERIOD, MAX_PERIOD),
            state,
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Spawns the scheduler loop.
    ///
    /// Both jobs fire once immediately, then on their own period until
    /// `cancel` is triggered. Each firing is a detached task: cancellation
    /// stops new ticks but does not wait for, or abort, jobs already running.
    pub fn start(self, cancel: CancellationToken) -> SchedulerHandle {
        let Scheduler {
            sync_job,
            sync_period,
            refresh_job,
            refresh_period,
            state,
        } = self;

        state.send_replace(SchedulerState::Running);
        let state_rx = state.subscribe();
        let loop_cancel = cancel.clone();

        let join = tokio::spawn(async move {
            info!(
                sync_secs = sync_period.as_secs(),
                refresh_secs = refresh_period.as_secs(),
                "Starting scheduler"
            );

            // run once on startup
            fire(&sync_job);
            fire(&refresh_job);

            let now = Instant::now();
            let mut sync_ticker = interval_at(now + sync_period, sync_period);
            let mut refresh_ticker = interval_at(now + refresh_period, refresh_period);
            sync_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            refresh_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = loop_cancel.cancelled() => {
                        info!("Stopping scheduler");
                        break;
                    }
                    _ = sync_ticker.tick() => fire(&sync_job),
                    _ = refresh_ticker.tick() => fire(&refresh_job),
                }
            }

            state.send_replace(SchedulerState::Stopped);
        });

        SchedulerHandle {
            cancel,
            state: state_rx,
            join,
        }
    }
}

fn fire(job: &Arc<dyn ScheduledJob>) {
    let job = Arc::clone(job);
    debug!(job = job.name(), "Tick");
    tokio::spawn(async move { job.run().await });
}

// == Scheduler Handle ==
/// Control handle for a running scheduler.
pub struct SchedulerHandle {
    cancel: CancellationToken,
    state: watch::Receiver<SchedulerState>,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Signals the loop to stop. No further ticks fire afterwards.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the loop to exit. In-flight jobs are not awaited.
    pub async fn stopped(self) {
        let _ = self.join.await;
    }
}
