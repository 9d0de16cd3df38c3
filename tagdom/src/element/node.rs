use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::{Direction, Edges, Size, Style, Wrap};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    /// Class markers used to select groups of elements (e.g. every chip).
    pub classes: Vec<String>,

    // Content
    pub content: Content,

    // Layout (box model)
    pub width: Size,
    pub height: Size,
    pub padding: Edges,
    pub margin: Edges,

    // Flex container
    pub direction: Direction,
    pub gap: u16,
    pub wrap: Wrap,

    // Visual
    pub style: Style,
    /// Hidden elements keep their content but take no space, are not
    /// rendered and never receive clicks.
    pub hidden: bool,

    // Interaction
    pub focusable: bool,
    pub clickable: bool,
    /// When true, this element captures keyboard input (for text fields).
    pub captures_input: bool,

    // Custom data storage (tag values, handler ids, ...)
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            classes: Vec::new(),
            content: Content::None,
            width: Size::Auto,
            height: Size::Auto,
            padding: Edges::default(),
            margin: Edges::default(),
            direction: Direction::Column,
            gap: 0,
            wrap: Wrap::NoWrap,
            style: Style::default(),
            hidden: false,
            focusable: false,
            clickable: false,
            captures_input: false,
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            direction: Direction::Column,
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            id: generate_id("row"),
            direction: Direction::Row,
            ..Default::default()
        }
    }

    /// Create a text input element.
    pub fn text_input(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self {
            id: generate_id("input"),
            content: Content::TextInput {
                value,
                cursor,
                selection: None,
                placeholder: None,
                focused: false,
            },
            focusable: true,
            captures_input: true,
            ..Default::default()
        }
    }

    /// Create a hidden field holding a value, the way a form carries data
    /// that is never shown.
    pub fn hidden_field(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("hidden"),
            content: Content::Value(value.into()),
            hidden: true,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    // Layout
    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    // Visual
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    // Interaction
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn captures_input(mut self, captures: bool) -> Self {
        self.captures_input = captures;
        self
    }

    // Text input methods

    /// Set the placeholder text for a text input.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        if let Content::TextInput { placeholder, .. } = &mut self.content {
            *placeholder = Some(text.into());
        }
        self
    }

    /// Set all text input state from TextInputData.
    pub fn input_state(mut self, data: &crate::text_input::TextInputData, is_focused: bool) -> Self {
        if let Content::TextInput {
            value,
            cursor,
            selection,
            focused,
            ..
        } = &mut self.content
        {
            *value = data.text.clone();
            *cursor = data.cursor;
            *selection = data.selection();
            *focused = is_focused;
        }
        self
    }

    /// Current value of a text input or hidden field.
    pub fn value(&self) -> Option<&str> {
        match &self.content {
            Content::TextInput { value, .. } | Content::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Overwrite the value of a text input or hidden field.
    /// Returns false if the element holds no value.
    pub fn set_value(&mut self, new_value: impl Into<String>) -> bool {
        match &mut self.content {
            Content::TextInput { value, cursor, selection, .. } => {
                *value = new_value.into();
                *cursor = value.chars().count();
                *selection = None;
                true
            }
            Content::Value(value) => {
                *value = new_value.into();
                true
            }
            _ => false,
        }
    }

    /// Text of a text element.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn children_from(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.append_child(child);
        }
        self
    }

    /// Direct children, empty for leaf elements.
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Append a child in place. Leaf content is replaced by the child list.
    pub fn append_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Remove the direct child with the given id, returning it.
    pub fn remove_child(&mut self, id: &str) -> Option<Element> {
        let Content::Children(children) = &mut self.content else {
            return None;
        };
        let index = children.iter().position(|child| child.id == id)?;
        Some(children.remove(index))
    }
}
