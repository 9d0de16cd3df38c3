use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::{char_width, display_width, truncate_to_width};
use crate::types::{Border, Rgb, TextStyle};

pub fn render_to_buffer(element: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    render_element(element, layout, buf);
}

fn render_element(element: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    if element.hidden {
        return;
    }
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };

    if let Some(bg) = &element.style.background {
        fill_rect(buf, rect, bg.to_rgb());
    }

    render_border(element, rect, buf);

    let inner = inner_rect(element, rect);
    match &element.content {
        Content::None | Content::Value(_) => {}
        Content::Text(text) => {
            for (row, line) in text.lines().enumerate() {
                let Ok(row) = u16::try_from(row) else { break };
                if row >= inner.height {
                    break;
                }
                let line = truncate_to_width(line, inner.width as usize);
                write_str(buf, element, inner, row, &line, element.style.text_style);
            }
        }
        Content::TextInput {
            value,
            cursor,
            selection,
            placeholder,
            focused,
        } => render_text_input(
            buf,
            element,
            inner,
            TextInputView {
                value,
                cursor: *cursor,
                selection: *selection,
                placeholder: placeholder.as_deref(),
                focused: *focused,
            },
        ),
        Content::Children(children) => {
            for child in children {
                render_element(child, layout, buf);
            }
        }
    }
}

fn inner_rect(element: &Element, rect: Rect) -> Rect {
    let border = element.style.border.size();
    rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    )
}

struct TextInputView<'a> {
    value: &'a str,
    cursor: usize,
    selection: Option<(usize, usize)>,
    placeholder: Option<&'a str>,
    focused: bool,
}

fn render_text_input(buf: &mut Buffer, element: &Element, inner: Rect, view: TextInputView) {
    if inner.is_empty() {
        return;
    }

    if view.value.is_empty() {
        if let Some(placeholder) = view.placeholder {
            let shown = truncate_to_width(placeholder, inner.width as usize);
            write_str(buf, element, inner, 0, &shown, TextStyle::new().dim());
        }
        if view.focused {
            write_cell(buf, element, inner.x, inner.y, ' ', TextStyle::new().reverse());
        }
        return;
    }

    // Scroll horizontally so the cursor stays visible
    let visible_width = inner.width as usize;
    let chars: Vec<char> = view.value.chars().collect();
    let cursor = view.cursor.min(chars.len());
    let mut start = 0;
    while start < cursor
        && display_width(&chars[start..cursor].iter().collect::<String>()) >= visible_width
    {
        start += 1;
    }

    let mut x = inner.x;
    for (idx, ch) in chars.iter().enumerate().skip(start) {
        let width = char_width(*ch).max(1) as u16;
        if x + width > inner.right() {
            break;
        }
        let selected = view.selection.is_some_and(|(s, e)| idx >= s && idx < e);
        let at_cursor = view.focused && idx == cursor;
        let style = if selected || at_cursor {
            element.style.text_style.reverse()
        } else {
            element.style.text_style
        };
        write_cell(buf, element, x, inner.y, *ch, style);
        x += width;
    }

    if view.focused && cursor == chars.len() && x < inner.right() {
        write_cell(buf, element, x, inner.y, ' ', TextStyle::new().reverse());
    }
}

fn write_str(buf: &mut Buffer, element: &Element, inner: Rect, row: u16, text: &str, style: TextStyle) {
    let y = inner.y + row;
    let mut x = inner.x;
    for ch in text.chars() {
        let width = char_width(ch) as u16;
        if width == 0 {
            continue;
        }
        if x + width > inner.right() {
            break;
        }
        write_cell(buf, element, x, y, ch, style);
        if width == 2 {
            if let Some(cell) = buf.get_mut(x + 1, y) {
                cell.wide_continuation = true;
            }
        }
        x += width;
    }
}

fn write_cell(buf: &mut Buffer, element: &Element, x: u16, y: u16, ch: char, style: TextStyle) {
    let fg = element
        .style
        .foreground
        .as_ref()
        .map(|c| c.to_rgb())
        .unwrap_or(Rgb::WHITE);

    // Preserve existing background if no explicit background set
    let bg = element
        .style
        .background
        .as_ref()
        .map(|c| c.to_rgb())
        .or_else(|| buf.get(x, y).map(|c| c.bg))
        .unwrap_or(Rgb::BLACK);

    buf.set(x, y, Cell::new(ch).with_fg(fg).with_bg(bg).with_style(style));
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb) {
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = bg;
            }
        }
    }
}

fn render_border(element: &Element, rect: Rect, buf: &mut Buffer) {
    let (tl, tr, bl, br, h, v) = match element.style.border {
        Border::None => return,
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
    };

    if rect.width < 2 || rect.height < 2 {
        return;
    }

    let fg = element
        .style
        .foreground
        .as_ref()
        .map(|c| c.to_rgb())
        .unwrap_or(Rgb::WHITE);

    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    set_char(buf, rect.x, rect.y, tl, fg);
    set_char(buf, right, rect.y, tr, fg);
    set_char(buf, rect.x, bottom, bl, fg);
    set_char(buf, right, bottom, br, fg);

    for x in (rect.x + 1)..right {
        set_char(buf, x, rect.y, h, fg);
        set_char(buf, x, bottom, h, fg);
    }
    for y in (rect.y + 1)..bottom {
        set_char(buf, rect.x, y, v, fg);
        set_char(buf, right, y, v, fg);
    }
}

fn set_char(buf: &mut Buffer, x: u16, y: u16, ch: char, fg: Rgb) {
    if let Some(cell) = buf.get_mut(x, y) {
        cell.char = ch;
        cell.fg = fg;
    }
}
