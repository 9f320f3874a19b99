#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

//! The Mirroring Engine: the three cooperating periodic tasks (mirror,
//! partial integrity check, full integrity check), the difference
//! computation, the batched concurrent fetch/store pipeline, the
//! identity-preprocessing rule, the integrity-check state machine, and
//! the mutual exclusion between the three tasks expressed as Status
//! Record flags.

mod batch;
mod clock;
mod differences;
mod driver;
mod engine;
mod integrity;
mod mirror;
mod pipeline;
mod preprocess;
mod status;
mod task_manager;

pub use batch::split;
pub use clock::now;
pub use differences::differences;
pub use engine::MirroringEngine;
pub use pipeline::{process_in_jobs, LOCAL_CONCURRENT_SIZE, REMOTE_CONCURRENT_SIZE};
pub use preprocess::preprocess;
pub use status::MirroringStatus;
pub use task_manager::TaskManager;
