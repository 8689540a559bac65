pub mod commands;
pub mod console;
pub mod context;
pub mod gateway;
pub mod handler;
pub mod logo;
pub mod schema;

pub use context::Context;
pub use gateway::Gateway;
pub use handler::Handler;
