//! Background Tasks Module
//!
//! Contains the periodic jobs and the scheduler that drives them.
//!
//! # Tasks
//! - Media sync: refreshes the media cache from the Graph API, with retries
//! - Token refresh: renews the access token once it nears expiry

mod jobs;
mod scheduler;

pub use jobs::{MediaSync, RetryPolicy, ScheduledJob, TokenRefresher};
pub use scheduler::{Scheduler, SchedulerHandle, SchedulerState, MAX_PERIOD};
