#![doc = include_str!("../README.md")]

pub mod books;
pub mod config;
pub mod credentials;
pub mod translate;
pub mod vocabulary;

#[cfg(feature = "server")]
pub mod server;
