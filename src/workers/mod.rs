pub mod actions;
pub mod core;
pub mod refresher;

pub use actions::{ActionRunner, CallOutcome};
pub use core::{EventSender, WorkerConfig};
pub use refresher::{Refresher, refresh_loop};
