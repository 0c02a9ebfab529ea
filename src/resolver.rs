//! Request resolution: turns a target plus options into a concrete
//! [`JumpPlan`].
//!
//! Resolution reads the host (selector lookup, element offset, current
//! scroll offset) but never writes to it.

use crate::easing::Easing;
use crate::options::{JumpDefaults, JumpOptions};
use crate::target::{ContainerRef, JumpTarget};
use crate::traits::ScrollHost;
use log::warn;

/// Errors a jump request can be rejected with.
///
/// Rejection is non-fatal: the animator's state, including any animation
/// already in flight, is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JumpError {
    /// A selector target matched no element.
    #[error("no element matches target selector {selector:?}")]
    UnresolvedTarget { selector: String },
}

/// A fully resolved jump, fixed once the animation starts.
#[derive(Debug, Clone)]
pub struct JumpPlan<E> {
    /// Element to focus on completion, if the target was an element.
    pub element: Option<E>,
    /// Alternate scroll root; `None` scrolls the document viewport.
    pub container: Option<E>,
    /// Scroll offset when the jump was requested (px).
    pub start: f64,
    /// Absolute target offset before the user offset is applied (px).
    pub stop: f64,
    /// User adjustment folded into `distance` (px).
    pub offset: f64,
    /// Signed `stop - start + offset` (px).
    pub distance: f64,
    /// Planned animation time (ms).
    pub duration: f64,
    pub easing: Easing,
    /// Focus `element` on completion.  Always `false` without an element.
    pub a11y: bool,
}

impl<E> JumpPlan<E> {
    /// The exact offset the jump lands on: `start + distance`.
    pub fn end(&self) -> f64 {
        self.start + self.distance
    }
}

/// Resolve `target` and `options` against `host`, falling back to
/// `defaults` for unset options.
///
/// The callback is not part of the plan; the caller takes it out of
/// `options` beforehand.
pub fn resolve<H: ScrollHost>(
    host: &H,
    target: JumpTarget<H::Element>,
    options: JumpOptions<H::Element>,
    defaults: &JumpDefaults,
) -> Result<JumpPlan<H::Element>, JumpError> {
    let container = match options.container {
        None => None,
        Some(ContainerRef::Element(el)) => Some(el),
        Some(ContainerRef::Selector(sel)) => {
            let resolved = host.resolve_selector(&sel);
            if resolved.is_none() {
                warn!("container {:?} not found, scrolling the viewport instead", sel);
            }
            resolved
        }
    };

    let start = host.current_scroll_offset(container.as_ref());
    let mut a11y = options.a11y.unwrap_or(defaults.a11y);

    let (element, stop) = match target {
        JumpTarget::Delta(px) => {
            // nothing to focus
            a11y = false;
            (None, start + px)
        }
        JumpTarget::Element(el) => {
            let stop = start + host.vertical_offset_of(&el);
            (Some(el), stop)
        }
        JumpTarget::Selector(selector) => {
            let el = host
                .resolve_selector(&selector)
                .ok_or(JumpError::UnresolvedTarget { selector })?;
            let stop = start + host.vertical_offset_of(&el);
            (Some(el), stop)
        }
    };

    let offset = options.offset.unwrap_or(defaults.offset);
    let distance = stop - start + offset;
    let duration = match options.duration {
        Some(d) => d.resolve(distance),
        None => defaults.duration_ms,
    };

    Ok(JumpPlan {
        element,
        container,
        start,
        stop,
        offset,
        distance,
        duration,
        easing: options.easing.unwrap_or_else(|| defaults.easing.clone()),
        a11y,
    })
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::JumpDuration;
    use std::collections::HashMap;

    /// Read-only host double: elements by selector, per-container offsets.
    #[derive(Debug, Default)]
    struct StaticHost {
        viewport: f64,
        tops: HashMap<&'static str, f64>,
        containers: HashMap<&'static str, f64>,
    }

    impl ScrollHost for StaticHost {
        type Element = &'static str;
        type FrameHandle = ();

        fn resolve_selector(&self, selector: &str) -> Option<&'static str> {
            self.tops
                .keys()
                .chain(self.containers.keys())
                .find(|k| **k == selector)
                .copied()
        }

        fn vertical_offset_of(&self, element: &&'static str) -> f64 {
            self.tops.get(element).copied().unwrap_or_default()
        }

        fn current_scroll_offset(&self, container: Option<&&'static str>) -> f64 {
            match container {
                Some(c) => self.containers.get(c).copied().unwrap_or_default(),
                None => self.viewport,
            }
        }

        fn set_scroll_offset(&mut self, _: Option<&&'static str>, _: f64) {}
        fn schedule_frame(&mut self) {}
        fn cancel_scheduled_frame(&mut self, _: ()) {}
        fn mark_focusable(&mut self, _: &&'static str) {}
        fn focus_element(&mut self, _: &&'static str) {}
    }

    fn host() -> StaticHost {
        let mut h = StaticHost {
            viewport: 200.0,
            ..Default::default()
        };
        h.tops.insert("#intro", 50.0);
        h.tops.insert("#above", -120.0);
        h.containers.insert("#pane", 30.0);
        h
    }

    #[test]
    fn delta_target_is_relative_to_current_offset() {
        let plan = resolve(&host(), JumpTarget::Delta(100.0), JumpOptions::new(), &JumpDefaults::default())
            .unwrap();
        assert_eq!(plan.start, 200.0);
        assert_eq!(plan.stop, 300.0);
        assert_eq!(plan.distance, 100.0);
        assert!(plan.element.is_none());
    }

    #[test]
    fn delta_target_adds_offset_to_distance() {
        let opts = JumpOptions::new().offset(-20.0);
        let plan = resolve(&host(), JumpTarget::Delta(100.0), opts, &JumpDefaults::default()).unwrap();
        assert_eq!(plan.stop, 300.0);
        assert_eq!(plan.distance, 80.0);
        assert_eq!(plan.end(), 280.0);
    }

    #[test]
    fn delta_target_forces_a11y_off() {
        let opts = JumpOptions::new().a11y(true);
        let plan = resolve(&host(), JumpTarget::Delta(100.0), opts, &JumpDefaults::default()).unwrap();
        assert!(!plan.a11y);
    }

    #[test]
    fn element_target_uses_viewport_relative_top() {
        let opts = JumpOptions::new().a11y(true);
        let plan = resolve(
            &host(),
            JumpTarget::Element("#intro"),
            opts,
            &JumpDefaults::default(),
        )
        .unwrap();
        assert_eq!(plan.stop, 250.0);
        assert_eq!(plan.distance, 50.0);
        assert_eq!(plan.element, Some("#intro"));
        assert!(plan.a11y);
    }

    #[test]
    fn selector_target_matches_element_target() {
        let by_sel = resolve(&host(), "#above".into(), JumpOptions::new(), &JumpDefaults::default())
            .unwrap();
        assert_eq!(by_sel.element, Some("#above"));
        assert_eq!(by_sel.stop, 80.0);
        assert_eq!(by_sel.distance, -120.0);
    }

    #[test]
    fn unresolved_selector_is_reported() {
        let err = resolve(&host(), "#nope".into(), JumpOptions::new(), &JumpDefaults::default())
            .unwrap_err();
        assert_eq!(
            err,
            JumpError::UnresolvedTarget {
                selector: "#nope".into()
            }
        );
    }

    #[test]
    fn container_selector_changes_start() {
        let opts = JumpOptions::new().container("#pane");
        let plan = resolve(&host(), JumpTarget::Delta(10.0), opts, &JumpDefaults::default()).unwrap();
        assert_eq!(plan.container, Some("#pane"));
        assert_eq!(plan.start, 30.0);
        assert_eq!(plan.stop, 40.0);
    }

    #[test]
    fn unknown_container_falls_back_to_viewport() {
        let opts = JumpOptions::new().container("#gone");
        let plan = resolve(&host(), JumpTarget::Delta(10.0), opts, &JumpDefaults::default()).unwrap();
        assert!(plan.container.is_none());
        assert_eq!(plan.start, 200.0);
    }

    #[test]
    fn duration_function_receives_distance() {
        let opts = JumpOptions::new()
            .offset(50.0)
            .duration(JumpDuration::computed(|d| d * 2.0));
        let plan = resolve(&host(), JumpTarget::Delta(100.0), opts, &JumpDefaults::default()).unwrap();
        assert_eq!(plan.distance, 150.0);
        assert_eq!(plan.duration, 300.0);
    }

    #[test]
    fn zero_duration_is_kept() {
        let opts = JumpOptions::new().duration(0.0);
        let plan = resolve(&host(), JumpTarget::Delta(100.0), opts, &JumpDefaults::default()).unwrap();
        assert_eq!(plan.duration, 0.0);
    }

    #[test]
    fn unset_options_use_defaults() {
        let defaults = JumpDefaults {
            duration_ms: 450.0,
            offset: 5.0,
            easing: Easing::Linear,
            a11y: true,
        };
        let plan = resolve(&host(), JumpTarget::Element("#intro"), JumpOptions::new(), &defaults)
            .unwrap();
        assert_eq!(plan.duration, 450.0);
        assert_eq!(plan.distance, 55.0);
        assert!(matches!(plan.easing, Easing::Linear));
        assert!(plan.a11y);
    }

    #[test]
    fn builtin_defaults() {
        let plan = resolve(&host(), JumpTarget::Delta(1.0), JumpOptions::new(), &JumpDefaults::default())
            .unwrap();
        assert_eq!(plan.duration, 1000.0);
        assert_eq!(plan.offset, 0.0);
        assert!(matches!(plan.easing, Easing::EaseInOutQuad));
    }
}
