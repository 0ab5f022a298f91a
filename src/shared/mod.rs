pub mod config;
pub mod error;
pub mod identity;
pub mod schema;
pub mod state;
pub mod utils;
pub mod validators;
