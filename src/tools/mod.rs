//! MCP tools: argument types, handlers and the dispatching registry

pub mod args;
pub mod handlers;
pub mod registry;

pub use handlers::ToolHandlers;
pub use registry::ToolRegistry;
