//! In-memory time store served over HTTP.
//!
//! A single timestamp can be read with `GET /time` and replaced with
//! `POST /time`. The value is owned by one background task ([`TimeStore`]);
//! request handlers reach it only through message passing.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod store;
pub mod timestamp;

pub use client::TimeClient;
pub use config::Config;
pub use error::{Error, Result};
pub use store::{StoreError, TimeStore};
pub use timestamp::Timestamp;
