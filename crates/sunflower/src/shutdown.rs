use std::sync::atomic::{AtomicU8, Ordering};

/// First Ctrl+C asks everything to wind down; a second forces an immediate
/// exit in case a driver is wedged mid-iteration.
pub struct ShutdownController {
    forced: AtomicU8,
}

impl ShutdownController {
    pub fn new() -> Self {
        Self {
            forced: AtomicU8::new(0),
        }
    }

    fn bump_forced(&self) -> u8 {
        self.forced.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on the first Ctrl+C. If a second arrives before the caller has
/// finished tearing down, the process exits immediately instead of waiting.
pub async fn wait_for_shutdown_signal(controller: &ShutdownController) {
    loop {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        if controller.bump_forced() == 1 {
            return;
        }
        tracing::warn!("second interrupt received, exiting immediately");
        std::process::exit(130);
    }
}
