use serde::{Deserialize, Serialize};

/// Gracefully stop a spawned task, consuming its handle.
///
/// Implemented by task handles (eg/ `SimulatorHandle`) whose [`Self::Result`] hands back the
/// state the task owned, so it can be inspected once the task has stopped.
pub trait AsyncShutdown {
    type Result;
    fn shutdown(self) -> impl Future<Output = Self::Result>;
}

/// Signal sent to a running task over its `oneshot` channel to request it stops.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
pub struct Shutdown;
