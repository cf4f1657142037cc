pub mod aggregator;
pub mod chain;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod contracts;
pub mod detail;
pub mod family;
pub mod fetcher;
pub mod pages;
pub mod params;
pub mod registry;
pub mod telemetry;
pub mod token;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
