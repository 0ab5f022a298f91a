mod cache;
mod client;
mod comarch;
mod handlers;
mod migration;

pub use cache::*;
pub use client::*;
pub use comarch::*;
pub use handlers::*;
pub use migration::*;
