// Portal API module
// Endpoint descriptor table and the authenticated client

mod client;
mod endpoints;

pub use client::{Credentials, Session, TvuClient};
