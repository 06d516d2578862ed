//! Clocks and helpers shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Backoff, Poll, TimeSource, WaitPolicy};

#[derive(Clone, Debug)]
pub struct MockTime {
    pub millis: u64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

/// Replays `values`, advancing one step per read and sticking at the last.
pub struct StepTime {
    values: Vec<u64>,
    index: AtomicUsize,
}

impl StepTime {
    pub fn new(values: Vec<u64>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }
}

impl TimeSource for StepTime {
    fn current_millis(&self) -> u64 {
        let i = self.index.fetch_add(1, Ordering::Relaxed);
        self.values[i.min(self.values.len() - 1)]
    }
}

pub fn no_wait(_: u64) {}

pub const NO_WAIT: WaitPolicy = WaitPolicy::unbounded(Backoff::With(no_wait));

pub trait PollExt<T> {
    fn unwrap_ready(self) -> T;
    fn unwrap_pending(self) -> u64;
}

impl<T: core::fmt::Debug> PollExt<T> for Poll<T> {
    fn unwrap_ready(self) -> T {
        match self {
            Poll::Ready { value } => value,
            Poll::Pending { yield_for } => panic!("unexpected pending (yield for: {yield_for})"),
        }
    }

    fn unwrap_pending(self) -> u64 {
        match self {
            Poll::Ready { value } => panic!("unexpected ready ({value:?})"),
            Poll::Pending { yield_for } => yield_for,
        }
    }
}
