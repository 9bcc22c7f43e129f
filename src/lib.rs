pub mod app;
pub mod cli;
pub mod config;
pub mod loader;
pub mod map;
pub mod model;
pub mod output;
pub mod session;
pub mod stats;
pub mod view;

#[cfg(test)]
mod tests;
