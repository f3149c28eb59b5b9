//! Overflow detection for rendered text

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Visible and content extent of a rendered element
pub trait Measurable: Send + Sync {
    fn offset_width(&self) -> f64;
    fn offset_height(&self) -> f64;
    fn scroll_width(&self) -> f64;
    fn scroll_height(&self) -> f64;
}

/// A measured snapshot of an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementExtent {
    pub offset_width: f64,
    pub offset_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

impl Measurable for ElementExtent {
    fn offset_width(&self) -> f64 {
        self.offset_width
    }

    fn offset_height(&self) -> f64 {
        self.offset_height
    }

    fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }
}

/// Which overflow directions count as truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackAxes {
    #[serde(rename = "trackVertical")]
    pub vertical: bool,
    #[serde(rename = "trackHorizontal")]
    pub horizontal: bool,
}

impl Default for TrackAxes {
    fn default() -> Self {
        Self {
            vertical: false,
            horizontal: true,
        }
    }
}

/// Whether `element`'s content exceeds its visible extent on a tracked axis
pub fn is_truncated(element: &dyn Measurable, axes: TrackAxes) -> bool {
    let vertical = axes.vertical && element.scroll_height() > element.offset_height();
    let horizontal = axes.horizontal && element.scroll_width() > element.offset_width();
    vertical || horizontal
}

/// Slot the host attaches its rendered element to
#[derive(Clone, Default)]
pub struct TruncationRef {
    element: Arc<RwLock<Option<Arc<dyn Measurable>>>>,
}

impl TruncationRef {
    pub fn attach(&self, element: Arc<dyn Measurable>) {
        *self.element.write() = Some(element);
    }

    pub fn detach(&self) {
        *self.element.write() = None;
    }

    pub fn is_attached(&self) -> bool {
        self.element.read().is_some()
    }

    fn current(&self) -> Option<Arc<dyn Measurable>> {
        self.element.read().clone()
    }
}

impl std::fmt::Debug for TruncationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TruncationRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Tracks whether an element is truncated, re-measured after each render
#[derive(Debug, Default)]
pub struct TruncationTracker {
    axes: TrackAxes,
    handle: TruncationRef,
    truncated: AtomicBool,
}

impl TruncationTracker {
    pub fn new(axes: TrackAxes) -> Self {
        Self {
            axes,
            ..Self::default()
        }
    }

    pub fn axes(&self) -> TrackAxes {
        self.axes
    }

    /// Handle to attach the measured element to
    pub fn handle(&self) -> TruncationRef {
        self.handle.clone()
    }

    /// Measure `element` and remember the result
    pub fn measure(&self, element: &dyn Measurable) -> bool {
        let truncated = is_truncated(element, self.axes);
        self.truncated.store(truncated, Ordering::Relaxed);
        truncated
    }

    /// Re-measure the attached element. Nothing attached means not truncated.
    pub fn on_render(&self) -> bool {
        match self.handle.current() {
            Some(element) => self.measure(element.as_ref()),
            None => {
                self.truncated.store(false, Ordering::Relaxed);
                false
            }
        }
    }

    /// Result of the last measurement
    pub fn is_truncated(&self) -> bool {
        self.truncated.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(offset_width: f64, scroll_width: f64) -> ElementExtent {
        ElementExtent {
            offset_width,
            offset_height: 20.0,
            scroll_width,
            scroll_height: 20.0,
        }
    }

    #[test]
    fn test_shrinking_content_clears_truncation() {
        let tracker = TruncationTracker::new(TrackAxes::default());
        assert!(tracker.measure(&extent(100.0, 150.0)));
        assert!(tracker.is_truncated());

        assert!(!tracker.measure(&extent(100.0, 90.0)));
        assert!(!tracker.is_truncated());
    }

    #[test]
    fn test_vertical_ignored_unless_tracked() {
        let tall = ElementExtent {
            offset_width: 100.0,
            offset_height: 20.0,
            scroll_width: 100.0,
            scroll_height: 60.0,
        };
        assert!(!is_truncated(&tall, TrackAxes::default()));
        assert!(is_truncated(
            &tall,
            TrackAxes {
                vertical: true,
                horizontal: false
            }
        ));
    }

    #[test]
    fn test_on_render_uses_attached_element() {
        let tracker = TruncationTracker::new(TrackAxes::default());
        assert!(!tracker.on_render());

        tracker.handle().attach(Arc::new(extent(100.0, 150.0)));
        assert!(tracker.on_render());

        tracker.handle().detach();
        assert!(!tracker.on_render());
    }

    #[test]
    fn test_axes_from_camel_case() {
        let axes: TrackAxes = serde_json::from_str(r#"{"trackVertical":true}"#).unwrap();
        assert!(axes.vertical);
        assert!(axes.horizontal);
    }
}
