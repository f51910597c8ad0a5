//! Engine tests, run against the in-memory store backend.

mod common;

mod executives;
mod requests;
