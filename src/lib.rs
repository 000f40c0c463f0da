pub mod config;
pub mod fetch;
pub mod load;
pub mod output;
pub mod parser;
pub mod stats;
pub mod traffic;
