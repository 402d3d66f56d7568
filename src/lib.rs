// TVU MCP Server - Library root for integration tests

pub mod api;
pub mod config;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod utils;
