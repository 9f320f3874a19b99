use std::collections::HashMap;
use std::future::Future;

use tokio::task::JoinHandle;

/// Registers named background tasks with the host runtime and cancels
/// them at shutdown. Opaque to the engine otherwise — the engine never
/// inspects its own registration.
#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `future` as a named task. Replacing an existing name aborts
    /// the previous task first.
    pub fn register<F>(&mut self, name: impl Into<String>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        if let Some(previous) = self.tasks.remove(&name) {
            previous.abort();
        }
        self.tasks.insert(name, tokio::spawn(future));
    }

    /// Cancels every registered task by name.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.keys().map(String::as_str).collect()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn shutdown_cancels_registered_tasks() {
        let ran_to_completion = Arc::new(AtomicBool::new(false));
        let flag = ran_to_completion.clone();

        let mut manager = TaskManager::new();
        manager.register("slow", async move {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            flag.store(true, Ordering::SeqCst);
        });

        assert_eq!(manager.task_names(), vec!["slow"]);
        manager.shutdown();
        tokio::task::yield_now().await;
        assert!(!ran_to_completion.load(Ordering::SeqCst));
    }
}
