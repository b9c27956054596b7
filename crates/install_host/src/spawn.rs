//! Task-spawning contract for the single-threaded event loop.

use std::{future::Future, pin::Pin};

/// Boxed local future accepted by [`TaskSpawner`].
pub type SpawnedTask = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Host service running a future to completion on the event loop without blocking the caller.
pub trait TaskSpawner {
    /// Schedules `task` for execution.
    fn spawn(&self, task: SpawnedTask);
}

#[derive(Debug, Clone, Copy, Default)]
/// Spawner that drops every task, for unsupported targets.
pub struct NoopTaskSpawner;

impl TaskSpawner for NoopTaskSpawner {
    fn spawn(&self, _task: SpawnedTask) {}
}

#[derive(Debug, Clone, Copy, Default)]
/// Spawner that drives each task to completion inline, for tests.
///
/// Only suitable for futures that never wait on a real timer or I/O; the fake host adapters
/// resolve immediately, which keeps test flows fully synchronous.
pub struct BlockingTaskSpawner;

impl TaskSpawner for BlockingTaskSpawner {
    fn spawn(&self, task: SpawnedTask) {
        futures::executor::block_on(task);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn blocking_spawner_runs_the_task_inline() {
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        BlockingTaskSpawner.spawn(Box::pin(async move { flag.set(true) }));
        assert!(ran.get());
    }
}
