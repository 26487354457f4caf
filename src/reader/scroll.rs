/// Scroll state of the text container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

/// New scroll offset that keeps a word at `offset_top` inside the visible band,
/// or `None` when the container can stay where it is.
///
/// Words closer than `margin` to the bottom edge pull the view down so the word
/// sits `margin` above the bottom. Words above the top edge (after the user
/// scrolled past them) snap the view straight up to the word.
pub fn follow(viewport: Viewport, offset_top: f64, margin: f64) -> Option<f64> {
    if offset_top > viewport.scroll_top + viewport.height - margin {
        Some(offset_top - viewport.height + margin)
    } else if offset_top < viewport.scroll_top {
        Some(offset_top)
    } else {
        None
    }
}
