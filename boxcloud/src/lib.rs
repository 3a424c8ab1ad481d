#![doc = include_str!("../README.md")]
#![warn(
    unreachable_pub,
    missing_debug_implementations,
    missing_docs,
    clippy::pedantic
)]

pub mod api;
mod client;
pub mod errors;
pub mod items;
pub mod users;
pub mod webhooks;

pub(crate) type Result<T> = core::result::Result<T, errors::Error>;

pub use client::*;
pub use errors::{Error, ErrorKind};
pub use reqwest::{Method, StatusCode};
