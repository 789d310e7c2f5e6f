use super::*;

/// Axis-aligned box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlap of two boxes; `None` when they only touch or are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    pub(crate) fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Caller-supplied document-space boxes standing in for a layout engine.
#[derive(Debug, Clone, Default)]
pub(crate) struct LayoutState {
    boxes: HashMap<NodeId, Rect>,
}

impl LayoutState {
    pub(crate) fn set(&mut self, node: NodeId, rect: Rect) {
        self.boxes.insert(node, rect);
    }

    pub(crate) fn get(&self, node: NodeId) -> Option<Rect> {
        self.boxes.get(&node).copied()
    }

    /// `getBoundingClientRect()`: viewport-relative, zero-sized when the node has no box.
    pub(crate) fn bounding_client_rect(&self, node: NodeId, scroll_y: f64) -> Rect {
        self.get(node)
            .map(|rect| rect.translated(0.0, -scroll_y))
            .unwrap_or_default()
    }
}
