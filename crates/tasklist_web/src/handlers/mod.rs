//! Route handlers.
//!
//! `pages` serves the browser form flows, `api` the JSON endpoints.

pub mod api;
pub mod pages;
