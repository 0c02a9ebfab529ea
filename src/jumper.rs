//! The animation loop that drives a single in-flight jump.
//!
//! [`Jumper`] owns the host and the state of at most one animation.  A call
//! to [`Jumper::jump`] resolves the request into a
//! [`JumpPlan`](crate::resolver::JumpPlan), supersedes whatever was running
//! and schedules the first frame.  From then on the host delivers ticks via
//! [`Jumper::frame`] until the jump finishes or is cancelled.
//!
//! # States
//!
//! ```text
//!             jump()                first frame
//!   Idle ───────────────▶ (pending) ───────────────▶ Animating ──┐
//!    ▲                       │                          │  ▲     │ elapsed < duration
//!    │        cancel()       │                          │  └─────┘
//!    ├───────────────────────┘            cancel()      │
//!    ├──────────────────────────────────────────────────┤
//!    │                  elapsed >= duration: finalize   │
//!    └──────────────────────────────────────────────────┘
//! ```
//!
//! `time_start` is the liveness flag: it is set on the first processed
//! frame and cleared on finalize or cancel.

use crate::options::{Callback, JumpDefaults, JumpOptions};
use crate::resolver::{self, JumpPlan};
use crate::target::JumpTarget;
use crate::traits::ScrollHost;
use log::{debug, info, trace};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub use crate::resolver::JumpError;

/// Mutable state of one animator.  Overwritten by every jump.
struct JumpState<H: ScrollHost> {
    host: H,
    defaults: JumpDefaults,
    plan: Option<JumpPlan<H::Element>>,
    callback: Option<Callback>,
    /// Timestamp of the first processed frame (ms).  `None` while idle.
    time_start: Option<f64>,
    time_elapsed: f64,
    /// Frame the loop is waiting for.  Any other handle is stale.
    request: Option<H::FrameHandle>,
    /// Bumped on every jump so finalize can tell whether its callback
    /// started a new one.
    generation: u64,
}

impl<H: ScrollHost> JumpState<H> {
    /// Stop the loop and hand back the callback that will now never run.
    /// The caller drops it once the state is no longer borrowed.
    fn cancel(&mut self) -> Option<Callback> {
        if self.time_start.take().is_some() {
            debug!("jump cancelled after {}ms", self.time_elapsed);
        }
        if let Some(handle) = self.request.take() {
            debug!("dropping scheduled frame {:?}", handle);
            self.host.cancel_scheduled_frame(handle);
        }
        self.callback.take()
    }
}

/// Animates the scroll offset of a [`ScrollHost`] towards a target.
///
/// The animator is single-threaded and cheap to clone: clones share the
/// same state, so a clone can be moved into a completion callback to chain
/// jumps.  Independent animations need independent `Jumper`s.
///
/// Easing functions run while the animator is borrowed and must not call
/// back into it.  Duration closures may query it but must not start or
/// cancel jumps.
///
/// # Typical usage
///
/// ```ignore
/// let jumper = Jumper::new(host);
/// let cancel = jumper.jump("#chapter-3", JumpOptions::new().a11y(true))?;
/// // … host calls jumper.frame(handle, now) on every render tick …
/// cancel.cancel();
/// ```
pub struct Jumper<H: ScrollHost> {
    inner: Rc<RefCell<JumpState<H>>>,
}

impl<H: ScrollHost> Clone for Jumper<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: ScrollHost> Jumper<H> {
    /// Create an idle animator with the built-in defaults.
    pub fn new(host: H) -> Self {
        Self::with_defaults(host, JumpDefaults::default())
    }

    /// Create an idle animator whose unset per-call options fall back to
    /// `defaults`.
    pub fn with_defaults(host: H, defaults: JumpDefaults) -> Self {
        Self {
            inner: Rc::new(RefCell::new(JumpState {
                host,
                defaults,
                plan: None,
                callback: None,
                time_start: None,
                time_elapsed: 0.0,
                request: None,
                generation: 0,
            })),
        }
    }

    /// Replace the defaults used by subsequent jumps.
    pub fn set_defaults(&self, defaults: JumpDefaults) {
        self.inner.borrow_mut().defaults = defaults;
    }

    pub fn defaults(&self) -> JumpDefaults {
        self.inner.borrow().defaults.clone()
    }

    /// Start a jump, superseding any jump in flight.
    ///
    /// The previous jump's pending frame is cancelled and its callback is
    /// dropped without being called.  Returns a handle that cancels the
    /// animator, or [`JumpError`] if `target` cannot be resolved; a
    /// rejected request leaves the animator untouched.
    pub fn jump(
        &self,
        target: impl Into<JumpTarget<H::Element>>,
        mut options: JumpOptions<H::Element>,
    ) -> Result<CancelHandle<H>, JumpError> {
        let target = target.into();
        let label = target.describe();
        let callback = options.callback.take();

        // Shared borrow only: duration closures may query the animator.
        let resolved = {
            let state = self.inner.borrow();
            let resolved = resolver::resolve(&state.host, target, options, &state.defaults);
            resolved
        };
        let plan = resolved?;

        let mut guard = self.inner.borrow_mut();
        let state = &mut *guard;

        if let Some(stale) = state.request.take() {
            debug!("superseding pending frame {:?}", stale);
            state.host.cancel_scheduled_frame(stale);
        }

        info!(
            "jump to {}: {} -> {} ({:+}px over {}ms)",
            label,
            plan.start,
            plan.end(),
            plan.distance,
            plan.duration
        );

        state.plan = Some(plan);
        let superseded = std::mem::replace(&mut state.callback, callback);
        state.time_start = None;
        state.time_elapsed = 0.0;
        state.generation = state.generation.wrapping_add(1);
        state.request = Some(state.host.schedule_frame());
        drop(guard);
        drop(superseded);

        Ok(CancelHandle {
            inner: Rc::downgrade(&self.inner),
        })
    }

    /// Advance the animation for the render tick identified by `handle`.
    ///
    /// `time_current` is the tick's timestamp in milliseconds.  Ticks for
    /// any handle other than the one currently awaited are ignored.
    pub fn frame(&self, handle: H::FrameHandle, time_current: f64) {
        let mut guard = self.inner.borrow_mut();
        let state = &mut *guard;

        if state.request != Some(handle) {
            debug!("ignoring stale frame {:?}", handle);
            return;
        }
        state.request = None;

        let Some(plan) = state.plan.as_ref() else {
            return;
        };

        let time_start = *state.time_start.get_or_insert(time_current);
        state.time_elapsed = time_current - time_start;

        if state.time_elapsed < plan.duration {
            let next = plan
                .easing
                .apply(state.time_elapsed, plan.start, plan.distance, plan.duration);
            trace!("t={}ms y={}", state.time_elapsed, next);
            state.host.set_scroll_offset(plan.container.as_ref(), next);
            state.request = Some(state.host.schedule_frame());
            return;
        }

        // Snap to the exact end; the last eased sample may have drifted.
        state.host.set_scroll_offset(plan.container.as_ref(), plan.end());

        if plan.a11y {
            if let Some(element) = plan.element.as_ref() {
                state.host.mark_focusable(element);
                state.host.focus_element(element);
            }
        }

        info!("jump finished at {} after {}ms", plan.end(), state.time_elapsed);

        let callback = state.callback.take();
        let generation = state.generation;
        drop(guard);

        if let Some(callback) = callback {
            callback();
        }

        // The callback may have started another jump; leave that one alone.
        let mut state = self.inner.borrow_mut();
        if state.generation == generation {
            state.time_start = None;
        }
    }

    /// Stop the animation where it is.  No snapping, no focus, no callback.
    ///
    /// Calling this while idle, or repeatedly, is a no-op.
    pub fn cancel(&self) {
        let dropped = self.inner.borrow_mut().cancel();
        drop(dropped);
    }

    /// Whether a jump is in flight, i.e. its first frame has been processed
    /// and it has neither finished nor been cancelled.
    #[doc(alias = "is_jumping")]
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().time_start.is_some()
    }

    /// Milliseconds elapsed in the current (or last) jump as of its most
    /// recent frame.
    pub fn elapsed(&self) -> f64 {
        self.inner.borrow().time_elapsed
    }

    /// The plan of the current (or last) jump.
    pub fn plan(&self) -> Option<JumpPlan<H::Element>> {
        self.inner.borrow().plan.clone()
    }

    /// Run `f` with mutable access to the host, e.g. to pump its frame
    /// queue.  `f` must not call back into this animator.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.inner.borrow_mut().host)
    }
}

/// Cancels the animator a jump was started on.
///
/// Equivalent to [`Jumper::cancel`]: it stops whatever jump is in flight at
/// the time it is called.  Does nothing once the animator has been dropped.
pub struct CancelHandle<H: ScrollHost> {
    inner: Weak<RefCell<JumpState<H>>>,
}

impl<H: ScrollHost> CancelHandle<H> {
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            let dropped = inner.borrow_mut().cancel();
            drop(dropped);
        }
    }
}

impl<H: ScrollHost> Clone for CancelHandle<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

//  Tests
