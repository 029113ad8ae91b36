//! HTTP endpoint layer for the time store.
//!
//! Exposes `GET /time` and `POST /time`, both backed by a [`TimeStore`]
//! injected through [`ApiState`].
//!
//! [`TimeStore`]: crate::store::TimeStore

mod server;
mod state;
mod time;

pub use server::{router, start_http_server};
pub use state::ApiState;
