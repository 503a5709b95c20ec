pub mod code;
pub mod errors;
pub mod event_stream;
pub mod events;
pub mod feedback;
pub mod game;
pub mod identifiers;
pub mod repository;

pub use code::*;
pub use errors::*;
pub use event_stream::*;
pub use events::*;
pub use feedback::*;
pub use game::*;
pub use identifiers::*;
pub use repository::*;
