//! The host abstraction that decouples jumpscroll from any specific UI
//! environment.
//!
//! Every concrete backend (a browser binding, a toolkit's scrolled window, the
//! in-memory [`HeadlessHost`](crate::host::headless::HeadlessHost), a test
//! double, …) implements [`ScrollHost`].  The
//! [`Jumper`](crate::jumper::Jumper) only depends on this trait.

use std::fmt::Debug;

/// Abstraction over the UI environment a scroll animation runs in.
///
/// The host owns the element tree, the scroll positions of the document
/// viewport and of any nested scrollable containers, and the render-tick
/// scheduler.  None of these operations may fail from the animator's point
/// of view: a host that cannot honour a call should log it and carry on.
///
/// # Frame contract
///
/// [`schedule_frame`](ScrollHost::schedule_frame) registers interest in the
/// next render tick and returns a handle.  When the tick fires, the host (or
/// whatever drives it) must call
/// [`Jumper::frame`](crate::jumper::Jumper::frame) with that handle and a
/// monotonic timestamp in milliseconds.  A handle passed to
/// [`cancel_scheduled_frame`](ScrollHost::cancel_scheduled_frame) must never
/// be delivered.
pub trait ScrollHost {
    /// Reference to an element, used both for jump targets and for
    /// scrollable containers.
    type Element: Clone + Debug;

    /// Identifies one scheduled render-tick callback.
    type FrameHandle: Copy + PartialEq + Debug;

    /// Resolve a selector to the first matching element, or `None` if
    /// nothing matches.
    fn resolve_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Viewport-relative top offset of `element`, in pixels.
    fn vertical_offset_of(&self, element: &Self::Element) -> f64;

    /// Current vertical scroll offset of `container`, or of the document
    /// viewport when `container` is `None`.
    fn current_scroll_offset(&self, container: Option<&Self::Element>) -> f64;

    /// Write the vertical scroll offset of `container`, or of the document
    /// viewport when `container` is `None`.
    fn set_scroll_offset(&mut self, container: Option<&Self::Element>, y: f64);

    /// Request a one-shot callback on the next render tick.
    fn schedule_frame(&mut self) -> Self::FrameHandle;

    /// Drop a previously scheduled callback if it has not run yet.
    fn cancel_scheduled_frame(&mut self, handle: Self::FrameHandle);

    /// Make `element` programmatically focusable (`tabindex="-1"` on the web).
    fn mark_focusable(&mut self, element: &Self::Element);

    /// Move keyboard focus to `element`.
    fn focus_element(&mut self, element: &Self::Element);
}
