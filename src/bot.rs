mod tree;
mod filters;
mod handlers;
mod router;
pub mod commands;

pub use tree::build_handler;
pub use handlers::make_callback_kb;
pub use router::Gatekeeper;
