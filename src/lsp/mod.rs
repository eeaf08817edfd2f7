//! LSP Protocol Implementation
//!
//! Host-side glue: document sync, settings propagation and diagnostic
//! publishing around the validation engine.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
