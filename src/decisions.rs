//! Pure decision rules behind the page behaviors.
//!
//! Nothing here touches a document; the controller feeds in measurements and
//! applies the answers.

use crate::Rect;

/// Sticky header state. The comparison is strict: sitting exactly on the
/// threshold is not scrolled.
pub fn header_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn scroll_top_is_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Mobile layout, where nav-link clicks close the menu and dropdowns toggle on click.
pub fn is_narrow_viewport(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}

pub fn should_close_menu_after_resize(width: f64, breakpoint: f64) -> bool {
    width > breakpoint
}

/// Whether an in-page anchor takes the smooth-scroll path.
///
/// `#` and `#!` are placeholders for script-driven links, and anything that
/// mentions `http` is treated as leaving the page.
pub fn smooth_scroll_href(href: &str) -> bool {
    href.starts_with('#') && href != "#" && href != "#!" && !href.contains("http")
}

/// Document offset that lands `target_top` (viewport-relative) just below the fixed header.
pub fn anchor_scroll_top(target_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    target_top + scroll_y - header_offset
}

/// Final path segment, `index.html` for the site root.
pub fn current_page(pathname: &str) -> String {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => "index.html".to_string(),
    }
}

pub fn nav_link_is_current(href: &str, page: &str) -> bool {
    href == page
}

/// Visible viewport in document space, with the bottom edge pulled in by `bottom_margin`.
pub fn reveal_root(scroll_y: f64, width: f64, height: f64, bottom_margin: f64) -> Rect {
    Rect::new(0.0, scroll_y, width, (height - bottom_margin).max(0.0))
}

/// Fraction of `target` inside `root`.
///
/// A zero-area target counts as fully visible when its top edge lies within the root.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    let area = target.area();
    if area == 0.0 {
        let inside = target.top() >= root.top()
            && target.top() < root.bottom()
            && target.left() >= root.left()
            && target.left() <= root.right();
        return if inside { 1.0 } else { 0.0 };
    }
    target
        .intersection(root)
        .map(|overlap| (overlap.area() / area).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

pub fn reveal_should_fire(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}
