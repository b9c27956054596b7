//! Browser event-loop task spawner.

use install_host::{SpawnedTask, TaskSpawner};

#[derive(Debug, Clone, Copy, Default)]
/// Spawner scheduling futures onto the browser microtask queue.
pub struct WebTaskSpawner;

impl TaskSpawner for WebTaskSpawner {
    fn spawn(&self, task: SpawnedTask) {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = task;
        }
    }
}
