pub mod event_store;
pub mod optimistic_lock;
pub mod repositories;

pub use event_store::*;
pub use optimistic_lock::*;
pub use repositories::*;
