//! **jumpscroll** — interruptible, eased scroll-to animations.
//!
//! A jump animates the vertical scroll offset of a document viewport (or of
//! a nested scrollable container) from where it is now to a target: a
//! relative pixel delta, an element, or a selector.  Each render tick the
//! animator samples an easing function at the elapsed time, writes the
//! result, and either schedules the next tick or snaps to the exact end
//! position, focuses the target for accessibility and fires a callback.
//!
//! # Architecture
//!
//! The crate is organised around one trait and one state machine:
//!
//! * [`traits::ScrollHost`] — abstracts the UI environment (selector lookup,
//!   element geometry, scroll offsets, the render-tick scheduler and focus)
//!   so the animation logic is not coupled to any specific toolkit.
//! * [`jumper::Jumper`] — owns a host and at most one in-flight jump;
//!   [`resolver`] turns each request into a fixed [`resolver::JumpPlan`].
//!
//! A deterministic in-memory host lives in [`host::headless`].

pub mod config;
pub mod easing;
pub mod host;
pub mod jumper;
pub mod options;
pub mod resolver;
pub mod target;
pub mod traits;

pub use easing::Easing;
pub use jumper::{CancelHandle, JumpError, Jumper};
pub use options::{JumpDefaults, JumpDuration, JumpOptions};
pub use target::{ContainerRef, JumpTarget};
pub use traits::ScrollHost;
