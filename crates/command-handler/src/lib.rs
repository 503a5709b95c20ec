pub mod commands;
pub mod handler;
pub mod requests;
pub mod responses;

pub use commands::*;
pub use handler::*;
pub use requests::*;
pub use responses::*;
