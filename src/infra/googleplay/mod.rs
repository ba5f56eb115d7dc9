//! Google Play review client.
//!
//! Reviews are served by the Play Store web UI's `batchexecute` endpoint
//! under the `UsvDTd` RPC id. Responses are a JSON envelope prefixed with an
//! XSSI guard whose third field is itself a JSON-encoded string.

mod client;
mod parse;

pub use client::GooglePlayClient;
pub use parse::parse_reviews_page;
