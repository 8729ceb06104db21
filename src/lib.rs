// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod extract;
pub mod model;
pub mod progress;
pub mod runner;
