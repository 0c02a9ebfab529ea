//! An in-memory [`ScrollHost`] with a simulated frame clock.
//!
//! The headless document has a viewport, any number of named scrollable
//! containers and named elements at fixed positions, either in the document
//! or inside one container.  Container boxes sit at the top of the viewport,
//! so an element's viewport-relative offset is its top minus the scroll
//! offset of whatever it lives in.  Frames are
//! queued by [`schedule_frame`](ScrollHost::schedule_frame) and delivered by
//! [`run_until_idle`], each one `frame_ms` after the previous.  Every scroll
//! write is recorded in a trace.

use crate::config::DocumentConfig;
use crate::jumper::Jumper;
use crate::traits::ScrollHost;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// An element (or container) of the headless document, named by its
/// selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(pub String);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a queued frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// One recorded scroll write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollWrite {
    /// Clock time of the write (ms).
    pub t: f64,
    /// Offset written (px).
    pub y: f64,
    /// Container written to; absent for the viewport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ElementId>,
}

/// Headless document and frame scheduler.
#[derive(Debug)]
pub struct HeadlessHost {
    scroll_top: f64,
    /// Top of each element within its parent (document or container).
    elements: HashMap<String, f64>,
    /// `element -> container` for elements that live inside a container.
    parents: HashMap<String, String>,
    /// Scroll offset of each container.
    containers: HashMap<String, f64>,
    focusable: HashSet<ElementId>,
    focused: Option<ElementId>,
    pending: VecDeque<FrameId>,
    next_frame: u64,
    now_ms: f64,
    frame_ms: f64,
    trace: Vec<ScrollWrite>,
}

impl HeadlessHost {
    /// An empty document scrolled to the top, ticking every `frame_ms`.
    pub fn new(frame_ms: f64) -> Self {
        Self {
            scroll_top: 0.0,
            elements: HashMap::new(),
            parents: HashMap::new(),
            containers: HashMap::new(),
            focusable: HashSet::new(),
            focused: None,
            pending: VecDeque::new(),
            next_frame: 0,
            now_ms: 0.0,
            frame_ms,
            trace: Vec::new(),
        }
    }

    /// Build a document from its configuration.
    pub fn from_config(config: &DocumentConfig) -> Self {
        let mut host = Self::new(config.frame_ms);
        host.scroll_top = config.scroll_top;
        host.elements = config.elements.clone();
        host.containers = config.containers.clone();
        for (container, children) in &config.nested {
            for (selector, top) in children {
                host = host.with_element_in(container, selector, *top);
            }
        }
        host
    }

    /// Add an element at document-absolute position `top`.
    pub fn with_element(mut self, selector: &str, top: f64) -> Self {
        self.elements.insert(selector.to_string(), top);
        self
    }

    /// Add an element at position `top` inside `container`'s scrolled
    /// content.
    pub fn with_element_in(mut self, container: &str, selector: &str, top: f64) -> Self {
        self.elements.insert(selector.to_string(), top);
        self.parents.insert(selector.to_string(), container.to_string());
        self
    }

    /// Add a scrollable container scrolled to `scroll_top`.
    pub fn with_container(mut self, selector: &str, scroll_top: f64) -> Self {
        self.containers.insert(selector.to_string(), scroll_top);
        self
    }

    /// Set the viewport's scroll offset without recording a write.
    pub fn with_scroll_top(mut self, y: f64) -> Self {
        self.scroll_top = y;
        self
    }

    /// Current viewport offset.
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Current offset of a container, if it exists.
    pub fn container_scroll_top(&self, selector: &str) -> Option<f64> {
        self.containers.get(selector).copied()
    }

    pub fn focused(&self) -> Option<&ElementId> {
        self.focused.as_ref()
    }

    pub fn is_focusable(&self, selector: &str) -> bool {
        self.focusable.contains(&ElementId(selector.to_string()))
    }

    /// Simulated clock (ms).
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Number of frames waiting to be delivered.
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    pub fn trace(&self) -> &[ScrollWrite] {
        &self.trace
    }

    /// Take the recorded writes, leaving the trace empty.
    pub fn take_trace(&mut self) -> Vec<ScrollWrite> {
        std::mem::take(&mut self.trace)
    }

    /// Advance the clock by one frame and pop the oldest queued frame.
    pub fn next_frame(&mut self) -> Option<(FrameId, f64)> {
        let id = self.pending.pop_front()?;
        self.now_ms += self.frame_ms;
        Some((id, self.now_ms))
    }
}

impl ScrollHost for HeadlessHost {
    type Element = ElementId;
    type FrameHandle = FrameId;

    fn resolve_selector(&self, selector: &str) -> Option<ElementId> {
        (self.elements.contains_key(selector) || self.containers.contains_key(selector))
            .then(|| ElementId(selector.to_string()))
    }

    /// Viewport-relative, like a bounding client rect.
    fn vertical_offset_of(&self, element: &ElementId) -> f64 {
        let scrolled_by = match self.parents.get(&element.0) {
            Some(container) => self.containers.get(container).copied().unwrap_or_default(),
            None => self.scroll_top,
        };
        match self.elements.get(&element.0) {
            Some(top) => top - scrolled_by,
            None => {
                warn!("{} is not laid out, assuming offset 0", element);
                0.0
            }
        }
    }

    fn current_scroll_offset(&self, container: Option<&ElementId>) -> f64 {
        match container {
            Some(c) => self.containers.get(&c.0).copied().unwrap_or_default(),
            None => self.scroll_top,
        }
    }

    fn set_scroll_offset(&mut self, container: Option<&ElementId>, y: f64) {
        match container {
            Some(c) => {
                self.containers.insert(c.0.clone(), y);
            }
            None => self.scroll_top = y,
        }
        self.trace.push(ScrollWrite {
            t: self.now_ms,
            y,
            container: container.cloned(),
        });
    }

    fn schedule_frame(&mut self) -> FrameId {
        self.next_frame += 1;
        let id = FrameId(self.next_frame);
        self.pending.push_back(id);
        id
    }

    fn cancel_scheduled_frame(&mut self, handle: FrameId) {
        self.pending.retain(|id| *id != handle);
    }

    fn mark_focusable(&mut self, element: &ElementId) {
        self.focusable.insert(element.clone());
    }

    fn focus_element(&mut self, element: &ElementId) {
        debug!("focus {}", element);
        self.focused = Some(element.clone());
    }
}

/// Deliver queued frames to `jumper` until none remain or `max_frames` have
/// been delivered.  Returns the number of frames delivered.
pub fn run_until_idle(jumper: &Jumper<HeadlessHost>, max_frames: usize) -> usize {
    let mut delivered = 0;
    while delivered < max_frames {
        let Some((id, now)) = jumper.with_host(|h| h.next_frame()) else {
            break;
        };
        jumper.frame(id, now);
        delivered += 1;
    }
    if delivered == max_frames && jumper.with_host(|h| h.pending_frames() > 0) {
        warn!("stopped after {} frames with work still queued", max_frames);
    }
    delivered
}

//  Tests
