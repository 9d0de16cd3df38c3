use crate::element::Element;
use crate::layout::LayoutResult;

/// Find the deepest clickable element at the given coordinates.
/// Returns None if no clickable element contains the point.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    hit_test_where(layout, root, x, y, &|element| element.clickable)
}

/// Find the focusable element at the given coordinates.
/// Returns None if no focusable element contains the point.
pub fn hit_test_focusable(
    layout: &LayoutResult,
    root: &Element,
    x: u16,
    y: u16,
) -> Option<String> {
    hit_test_where(layout, root, x, y, &|element| element.focusable)
}

fn hit_test_where(
    layout: &LayoutResult,
    element: &Element,
    x: u16,
    y: u16,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    if element.hidden {
        return None;
    }

    let rect = layout.get(&element.id)?;
    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    for child in element.children().iter().rev() {
        if let Some(id) = hit_test_where(layout, child, x, y, accept) {
            return Some(id);
        }
    }

    accept(element).then(|| element.id.clone())
}
