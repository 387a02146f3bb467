//! Command line entry points
//!
//! - `serve`: run the HTTP API
//! - `hash-key`: print the stored form of an API key

pub mod serve;

use clap::{Parser, Subcommand};

use crate::infrastructure::api_key::hash_key;

/// Book Records API - validated CRUD over book records
#[derive(Parser)]
#[command(name = "book-records-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Print the hash to store in `api_key.key_hash` for a raw key
    HashKey {
        /// Raw API key as clients will send it
        key: String,
    },
}

/// Run `hash-key`
pub fn print_key_hash(key: &str) {
    println!("{}", hash_key(key));
}
