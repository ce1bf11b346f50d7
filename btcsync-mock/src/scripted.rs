use std::collections::VecDeque;
use std::sync::{Mutex as StdMutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use btcsync_core::{PricePoint, PriceSource, SeriesStore, SyncError};

/// Instruction for how the next `daily_closes` call should behave.
pub enum SourceBehavior {
    /// Return the provided points immediately.
    Return(Vec<PricePoint>),
    /// Fail immediately with the provided error.
    Fail(SyncError),
    /// Hang indefinitely (simulate a network stall).
    Hang,
}

/// One recorded `daily_closes` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCall {
    /// Requested symbol.
    pub symbol: String,
    /// Inclusive window start.
    pub start: NaiveDate,
    /// Exclusive window end.
    pub end_exclusive: NaiveDate,
}

#[derive(Default)]
struct ScriptedState {
    queue: VecDeque<SourceBehavior>,
    calls: Vec<SourceCall>,
}

/// Price source driven from the outside: tests queue per-call behaviors and
/// inspect the recorded invocations afterwards.
#[derive(Default)]
pub struct ScriptedSource {
    state: Mutex<ScriptedState>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the behavior for the next unanswered call.
    pub async fn enqueue(&self, behavior: SourceBehavior) {
        self.state.lock().await.queue.push_back(behavior);
    }

    /// Convenience: queue a successful response.
    pub async fn enqueue_points(&self, points: Vec<PricePoint>) {
        self.enqueue(SourceBehavior::Return(points)).await;
    }

    /// All invocations recorded so far, in call order.
    pub async fn calls(&self) -> Vec<SourceCall> {
        self.state.lock().await.calls.clone()
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "btcsync-scripted"
    }

    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> Result<Vec<PricePoint>, SyncError> {
        let behavior = {
            let mut state = self.state.lock().await;
            state.calls.push(SourceCall {
                symbol: symbol.to_string(),
                start,
                end_exclusive,
            });
            state.queue.pop_front()
        };
        match behavior {
            Some(SourceBehavior::Return(points)) => Ok(points),
            Some(SourceBehavior::Fail(err)) => Err(err),
            Some(SourceBehavior::Hang) => std::future::pending().await,
            None => Err(SyncError::source(
                "btcsync-scripted",
                format!("no scripted response for {symbol}"),
            )),
        }
    }
}

#[derive(Default)]
struct MemoryState {
    points: Option<Vec<PricePoint>>,
    writes: usize,
}

/// In-memory series store: absent until the first write, with a write
/// counter so tests can assert that no-op runs skip persistence.
#[derive(Default)]
pub struct MemoryStore {
    state: StdMutex<MemoryState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds the given rows.
    #[must_use]
    pub fn seeded(points: Vec<PricePoint>) -> Self {
        Self {
            state: StdMutex::new(MemoryState {
                points: Some(points),
                writes: 0,
            }),
        }
    }

    /// Number of `write_all` calls observed.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Current stored rows (empty when absent).
    #[must_use]
    pub fn snapshot(&self) -> Vec<PricePoint> {
        self.lock().points.clone().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SeriesStore for MemoryStore {
    fn exists(&self) -> bool {
        self.lock().points.is_some()
    }

    fn load(&self) -> Result<Vec<PricePoint>, SyncError> {
        Ok(self.snapshot())
    }

    fn write_all(&self, points: &[PricePoint]) -> Result<(), SyncError> {
        let mut state = self.lock();
        state.points = Some(points.to_vec());
        state.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
