pub mod bootstrap;
pub mod server;

pub use bootstrap::{build_services, Services};
pub use server::{AppState, HttpServer};
