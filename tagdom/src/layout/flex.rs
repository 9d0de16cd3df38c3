use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Direction, Size, Wrap};

pub type LayoutResult = HashMap<String, Rect>;

pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    layout_element(element, available, &mut result);
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    if element.hidden {
        return;
    }

    // Apply margin - shrink available space and offset position
    let margin = &element.margin;
    let after_margin = available.shrink(margin.top, margin.right, margin.bottom, margin.left);

    let width = resolve_size(element.width, after_margin.width, element, true);
    let height = resolve_size(element.height, after_margin.height, element, false);
    let rect = Rect::new(after_margin.x, after_margin.y, width, height);
    result.insert(element.id.clone(), rect);

    layout_children(element, rect, result);
}

/// Area inside border and padding.
fn inner_rect(element: &Element, rect: Rect) -> Rect {
    let border = element.style.border.size();
    rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    )
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let flow: Vec<&Element> = element.children().iter().filter(|c| !c.hidden).collect();
    if flow.is_empty() {
        return;
    }

    let inner = inner_rect(element, rect);

    if element.direction == Direction::Row && element.wrap == Wrap::Wrap {
        layout_wrapped(element, &flow, inner, result);
    } else {
        layout_linear(element, &flow, inner, result);
    }
}

fn layout_linear(element: &Element, flow: &[&Element], inner: Rect, result: &mut LayoutResult) {
    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };
    let gap_total = element.gap * flow.len().saturating_sub(1) as u16;

    // First pass: fixed sizes and fill count
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    for child in flow {
        let margin_main = main_margin(child, is_row);
        match main_axis(child, is_row) {
            Size::Fixed(n) => fixed_total += n + margin_main,
            Size::Auto => fixed_total += estimate_size(child, is_row) + margin_main,
            Size::Fill => fill_count += 1,
        }
    }

    let remaining = main_size.saturating_sub(fixed_total + gap_total);
    let fill_size = if fill_count > 0 { remaining / fill_count } else { 0 };

    // Second pass: assign rects
    let mut offset = 0u16;
    for child in flow {
        let (margin_before, margin_after) = if is_row {
            (child.margin.left, child.margin.right)
        } else {
            (child.margin.top, child.margin.bottom)
        };
        let (cross_before, cross_after) = if is_row {
            (child.margin.top, child.margin.bottom)
        } else {
            (child.margin.left, child.margin.right)
        };

        let main = match main_axis(child, is_row) {
            Size::Fixed(n) => n,
            Size::Auto => estimate_size(child, is_row),
            Size::Fill => fill_size,
        };

        let available_cross = cross_size.saturating_sub(cross_before + cross_after);
        let cross = match cross_axis(child, is_row) {
            Size::Fixed(n) => n,
            Size::Fill => available_cross,
            Size::Auto => estimate_size(child, !is_row),
        }
        .min(available_cross);

        let clamped_main = main.min(main_size.saturating_sub(offset + margin_before));

        let child_rect = if is_row {
            Rect::new(
                inner.x + offset + margin_before,
                inner.y + cross_before,
                clamped_main,
                cross,
            )
        } else {
            Rect::new(
                inner.x + cross_before,
                inner.y + offset + margin_before,
                cross,
                clamped_main,
            )
        };

        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, result);

        offset = offset.saturating_add(margin_before + main + margin_after + element.gap);
    }
}

/// Row layout that starts a new line when the next child does not fit.
/// `gap` separates children on a line and lines from each other.
fn layout_wrapped(element: &Element, flow: &[&Element], inner: Rect, result: &mut LayoutResult) {
    let mut x = 0u16;
    let mut y = 0u16;
    let mut line_height = 0u16;

    for child in flow {
        let width = match child.width {
            Size::Fixed(n) => n,
            Size::Auto => estimate_size(child, true),
            Size::Fill => inner.width,
        }
        .min(inner.width);
        let height = match child.height {
            Size::Fixed(n) => n,
            Size::Auto | Size::Fill => estimate_size(child, false),
        };
        let outer_width = width + child.margin.horizontal_total();
        let outer_height = height + child.margin.vertical_total();

        if x > 0 && x + outer_width > inner.width {
            y = y.saturating_add(line_height + element.gap);
            x = 0;
            line_height = 0;
        }

        let child_rect = Rect::new(
            inner.x + x + child.margin.left,
            inner.y.saturating_add(y) + child.margin.top,
            width,
            height.min(inner.height.saturating_sub(y + child.margin.top)),
        );

        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, result);

        x = x.saturating_add(outer_width + element.gap);
        line_height = line_height.max(outer_height);
    }
}

fn main_axis(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.width
    } else {
        element.height
    }
}

fn cross_axis(element: &Element, is_row: bool) -> Size {
    main_axis(element, !is_row)
}

fn main_margin(element: &Element, is_row: bool) -> u16 {
    if is_row {
        element.margin.horizontal_total()
    } else {
        element.margin.vertical_total()
    }
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill => available,
        Size::Auto => estimate_size(element, is_width).min(available),
    }
}

fn estimate_size(element: &Element, is_width: bool) -> u16 {
    if element.hidden {
        return 0;
    }

    let border_size = element.style.border.size() * 2;
    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content_size = match &element.content {
        Content::Text(text) => {
            if is_width {
                text.lines().map(display_width).max().unwrap_or(0) as u16
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::TextInput {
            value, placeholder, ..
        } => {
            if is_width {
                let shown = if value.is_empty() {
                    placeholder.as_deref().unwrap_or("")
                } else {
                    value
                };
                // One extra cell for the cursor at the end
                display_width(shown) as u16 + 1
            } else {
                1
            }
        }
        Content::Children(children) => {
            let visible: Vec<&Element> = children.iter().filter(|c| !c.hidden).collect();
            let along_main = (element.direction == Direction::Row) == is_width;
            if visible.is_empty() {
                0
            } else if along_main {
                let gap_total = element.gap * (visible.len() - 1) as u16;
                visible
                    .iter()
                    .map(|c| estimate_size(c, is_width))
                    .sum::<u16>()
                    + gap_total
            } else {
                visible
                    .iter()
                    .map(|c| estimate_size(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::None | Content::Value(_) => 0,
    };

    content_size + padding + border_size
}
