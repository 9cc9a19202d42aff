// Library exports for the light-cycle bot
// This allows the server, the replay tool and the tests to share the core logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod decision;
pub mod error;
pub mod grid;
pub mod handler;
pub mod moves;
pub mod replay;
pub mod search;
pub mod types;
