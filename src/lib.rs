pub mod chain;
pub mod config;
pub mod handlers;
pub mod landing;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;
pub mod wizard;
