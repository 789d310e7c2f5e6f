use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ObserverEntry {
    pub(crate) target: NodeId,
    pub(crate) ratio: f64,
    pub(crate) is_intersecting: bool,
}

/// IntersectionObserver stand-in driven by the layout mock.
///
/// `poll` reports a target the first time it is seen and then whenever its
/// intersecting state flips, which is when a browser would queue an entry.
#[derive(Debug, Clone)]
pub(crate) struct RevealObserver {
    threshold: f64,
    bottom_margin: f64,
    targets: Vec<NodeId>,
    last_state: HashMap<NodeId, bool>,
}

impl RevealObserver {
    pub(crate) fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
            targets: Vec::new(),
            last_state: HashMap::new(),
        }
    }

    pub(crate) fn observe(&mut self, node: NodeId) {
        if !self.targets.contains(&node) {
            self.targets.push(node);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.targets.len()
    }

    pub(crate) fn poll(&mut self, layout: &LayoutState, window: &WindowState) -> Vec<ObserverEntry> {
        let root = decisions::reveal_root(
            window.scroll_y,
            window.inner_width,
            window.inner_height,
            self.bottom_margin,
        );

        let mut entries = Vec::new();
        for target in &self.targets {
            let ratio = layout
                .get(*target)
                .map(|rect| decisions::intersection_ratio(&rect, &root))
                .unwrap_or(0.0);
            let is_intersecting = decisions::reveal_should_fire(ratio, self.threshold);
            if self.last_state.insert(*target, is_intersecting) != Some(is_intersecting) {
                entries.push(ObserverEntry {
                    target: *target,
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }
}
