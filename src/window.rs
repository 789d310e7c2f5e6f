use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// One programmatic `window.scrollTo` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone)]
pub(crate) struct WindowState {
    pub(crate) scroll_y: f64,
    pub(crate) inner_width: f64,
    pub(crate) inner_height: f64,
    pub(crate) pathname: String,
    pub(crate) hash: String,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            inner_width: 1280.0,
            inner_height: 800.0,
            pathname: "/".to_string(),
            hash: String::new(),
            scroll_requests: Vec::new(),
        }
    }
}

impl WindowState {
    /// Records the request and jumps there; smooth scrolls settle immediately on the virtual clock.
    pub(crate) fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest { top, behavior });
        self.scroll_y = top.max(0.0);
    }

    pub(crate) fn set_location(&mut self, path: &str) {
        let (before_hash, hash) = match path.split_once('#') {
            Some((before, after)) => (before, format!("#{after}")),
            None => (path, String::new()),
        };
        let pathname = before_hash.split('?').next().unwrap_or_default();
        self.pathname = if pathname.starts_with('/') {
            pathname.to_string()
        } else {
            format!("/{pathname}")
        };
        self.hash = hash;
    }
}
