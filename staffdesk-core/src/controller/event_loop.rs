//! src/controller/event_loop.rs
//! ============================================================================
//! # Event Loop: terminal input, task completions and ticks
//!
//! Merges the three event sources the application reacts to into a single
//! stream of [`LoopEvent`]s. The caller owns the state and handles each event
//! to completion before asking for the next one.

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc,
    time::{self, Interval, MissedTickBehavior},
};
use tracing::{info, trace, warn};

use crate::api::client::ApiError;
use crate::model::employee::{Employee, EmployeeId};

/// Which write a save task performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOp {
    Create,
    Update(EmployeeId),
}

/// Completion report from a background request.
#[derive(Debug)]
pub enum TaskResult {
    /// Outcome of a plain collection read.
    Fetched(Result<Vec<Employee>, ApiError>),

    /// The write succeeded; `refreshed` is the follow-up read.
    Saved {
        op: SaveOp,
        refreshed: Result<Vec<Employee>, ApiError>,
    },

    SaveFailed {
        op: SaveOp,
        error: ApiError,
    },

    /// The delete succeeded; `refreshed` is the follow-up read.
    Deleted {
        id: EmployeeId,
        refreshed: Result<Vec<Employee>, ApiError>,
    },

    DeleteFailed {
        id: EmployeeId,
        error: ApiError,
    },
}

#[derive(Debug)]
pub enum LoopEvent {
    Terminal(TermEvent),
    Task(TaskResult),
    Tick,
    /// Every source has closed.
    Closed,
}

pub struct EventLoop {
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    event_stream: EventStream,
    ticker: Interval,
    event_count: u64,
}

impl EventLoop {
    pub fn new(task_rx: mpsc::UnboundedReceiver<TaskResult>, tick_rate: Duration) -> Self {
        info!(tick_ms = tick_rate.as_millis() as u64, "Initializing event loop");

        let mut ticker = time::interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            task_rx,
            event_stream: EventStream::new(),
            ticker,
            event_count: 0,
        }
    }

    /// Waits for the next event from any source.
    pub async fn next_event(&mut self) -> LoopEvent {
        let event = tokio::select! {
            maybe_term = self.event_stream.next() => match maybe_term {
                Some(Ok(ev)) => LoopEvent::Terminal(ev),
                Some(Err(e)) => {
                    warn!("Terminal event error: {}", e);
                    LoopEvent::Tick
                }
                None => LoopEvent::Closed,
            },

            maybe_task = self.task_rx.recv() => match maybe_task {
                Some(result) => LoopEvent::Task(result),
                None => LoopEvent::Closed,
            },

            _ = self.ticker.tick() => LoopEvent::Tick,
        };

        self.event_count += 1;
        trace!(count = self.event_count, "Event received");
        event
    }

    #[inline]
    pub fn event_count(&self) -> u64 {
        self.event_count
    }
}
