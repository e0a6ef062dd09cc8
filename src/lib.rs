pub mod cli;
pub mod config;
pub mod data;
pub mod monitoring;
pub mod normalizer;
pub mod render;
pub mod tags;
