pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod terminal;
#[cfg(test)]
pub mod test_helpers;
