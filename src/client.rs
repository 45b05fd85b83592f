//! Transfer client: one request per operation, one normalized result back.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;

pub use builder::TransferClientBuilder;
pub use core::TransferClient;
