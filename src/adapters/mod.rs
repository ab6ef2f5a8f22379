//! Adapters implementing domain ports.

pub mod github;
