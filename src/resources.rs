//! Typed wrappers over the built-in endpoints.
//!
//! Each helper validates its input before any network call, dispatches through
//! [`Client::call`](crate::Client::call), and overwrites the generic system code of a
//! failed call with a domain-specific one.

pub mod contacts;
pub mod events;

pub use contacts::*;
pub use events::*;
