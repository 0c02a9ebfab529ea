//! Per-call jump options and the animator-wide defaults they fall back to.

use crate::easing::Easing;
use crate::target::ContainerRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Invoked once after a jump completes normally.  Never invoked after a
/// cancellation.
pub type Callback = Box<dyn FnOnce()>;

/// How long a jump takes.
#[derive(Clone)]
pub enum JumpDuration {
    /// A fixed duration in milliseconds, used as-is.
    Millis(f64),
    /// Computed from the signed scroll distance (px) once it is known.
    Computed(Rc<dyn Fn(f64) -> f64>),
}

impl JumpDuration {
    /// Wrap a closure `distance -> ms`.
    pub fn computed(f: impl Fn(f64) -> f64 + 'static) -> Self {
        JumpDuration::Computed(Rc::new(f))
    }

    /// Resolve to milliseconds for a jump covering `distance` pixels.
    pub fn resolve(&self, distance: f64) -> f64 {
        match self {
            JumpDuration::Millis(ms) => *ms,
            JumpDuration::Computed(f) => f(distance),
        }
    }
}

impl fmt::Debug for JumpDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JumpDuration::Millis(ms) => write!(f, "Millis({})", ms),
            JumpDuration::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

impl From<f64> for JumpDuration {
    fn from(ms: f64) -> Self {
        JumpDuration::Millis(ms)
    }
}

/// Animator-wide fallbacks for any option a call leaves unset.
///
/// These are the only values that persist from one jump to the next.
///
/// # Example
///
/// ```json
/// { "duration_ms": 600, "offset": -20, "easing": "ease-out-cubic", "a11y": true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpDefaults {
    /// Duration used when a call does not set one (ms).
    pub duration_ms: f64,
    /// Pixel adjustment added to every jump's distance.
    pub offset: f64,
    /// Easing used when a call does not set one.
    pub easing: Easing,
    /// Whether element targets receive focus on completion.
    pub a11y: bool,
}

impl Default for JumpDefaults {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            offset: 0.0,
            easing: Easing::EaseInOutQuad,
            a11y: false,
        }
    }
}

/// Options for a single jump.  Every field is optional; unset fields fall
/// back to the animator's [`JumpDefaults`].
///
/// ```ignore
/// let opts = JumpOptions::new()
///     .duration(JumpDuration::computed(|d| d.abs() * 2.0))
///     .offset(-64.0)
///     .a11y(true)
///     .container("#sidebar")
///     .callback(|| println!("landed"));
/// ```
pub struct JumpOptions<E> {
    pub duration: Option<JumpDuration>,
    pub offset: Option<f64>,
    pub callback: Option<Callback>,
    pub easing: Option<Easing>,
    pub a11y: Option<bool>,
    pub container: Option<ContainerRef<E>>,
}

impl<E> Default for JumpOptions<E> {
    fn default() -> Self {
        Self {
            duration: None,
            offset: None,
            callback: None,
            easing: None,
            a11y: None,
            container: None,
        }
    }
}

impl<E> JumpOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, duration: impl Into<JumpDuration>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn offset(mut self, px: f64) -> Self {
        self.offset = Some(px);
        self
    }

    pub fn callback(mut self, f: impl FnOnce() + 'static) -> Self {
        self.callback = Some(Box::new(f));
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn a11y(mut self, enabled: bool) -> Self {
        self.a11y = Some(enabled);
        self
    }

    pub fn container(mut self, container: impl Into<ContainerRef<E>>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Use a scrollable element the caller already holds as the scroll root.
    pub fn container_element(mut self, element: E) -> Self {
        self.container = Some(ContainerRef::Element(element));
        self
    }
}

impl<E: fmt::Debug> fmt::Debug for JumpOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JumpOptions")
            .field("duration", &self.duration)
            .field("offset", &self.offset)
            .field("callback", &self.callback.as_ref().map(|_| ".."))
            .field("easing", &self.easing)
            .field("a11y", &self.a11y)
            .field("container", &self.container)
            .finish()
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_variants_resolve() {
        assert_eq!(JumpDuration::Millis(250.0).resolve(999.0), 250.0);
        let per_px = JumpDuration::computed(|d| d * 2.0);
        assert_eq!(per_px.resolve(150.0), 300.0);
        assert_eq!(JumpDuration::from(0.0).resolve(150.0), 0.0);
    }

    #[test]
    fn builder_sets_fields() {
        let opts: JumpOptions<u32> = JumpOptions::new()
            .duration(400.0)
            .offset(-10.0)
            .a11y(true)
            .container("#pane")
            .callback(|| {});
        assert!(matches!(opts.duration, Some(JumpDuration::Millis(ms)) if ms == 400.0));
        assert_eq!(opts.offset, Some(-10.0));
        assert_eq!(opts.a11y, Some(true));
        assert_eq!(opts.container, Some(ContainerRef::Selector("#pane".into())));
        assert!(opts.callback.is_some());
        assert!(opts.easing.is_none());
    }

    #[test]
    fn defaults_deserialize_partially() {
        let d: JumpDefaults = serde_json::from_str(r#"{ "duration_ms": 300 }"#).unwrap();
        assert_eq!(d.duration_ms, 300.0);
        assert_eq!(d.offset, 0.0);
        assert!(!d.a11y);
        assert!(matches!(d.easing, Easing::EaseInOutQuad));
    }

    #[test]
    fn debug_hides_closures() {
        let opts: JumpOptions<u32> = JumpOptions::new()
            .duration(JumpDuration::computed(|d| d))
            .callback(|| {});
        let s = format!("{:?}", opts);
        assert!(s.contains("Computed(..)"));
        assert!(s.contains("\"..\""));
    }
}
