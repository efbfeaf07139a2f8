//! Tune Seeder Library
//!
//! This library exposes modules for integration testing

pub mod config;
pub mod db;
pub mod error;
pub mod fingerprint;
pub mod fixtures;
pub mod metadata;
pub mod scanner;
pub mod tasks;
pub mod test_utils;
