//! Concrete [`ScrollHost`](crate::traits::ScrollHost) implementations.
//!
//! Nothing outside this module should depend on a particular host.

pub mod headless;
