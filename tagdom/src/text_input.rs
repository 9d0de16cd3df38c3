use std::collections::HashMap;

use crate::element::{find_element, Element};
use crate::event::{Event, Key, Modifiers};

/// Data for a single text input: text content and cursor state.
///
/// `cursor` and `anchor` are character indices, not byte offsets.
#[derive(Debug, Clone, Default)]
pub struct TextInputData {
    pub text: String,
    pub cursor: usize,
    /// Anchor position for selection. When Some and != cursor, text is selected.
    pub anchor: Option<usize>,
}

impl TextInputData {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            anchor: None,
        }
    }

    /// Get the selection range as (start, end) where start <= end.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        (anchor != self.cursor).then(|| (anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    /// Clear the selection anchor.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select all text.
    pub fn select_all(&mut self) {
        if !self.text.is_empty() {
            self.anchor = Some(0);
            self.cursor = self.char_count();
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Remove the characters in `start..end`, leaving the cursor at `start`.
    fn remove_range(&mut self, start: usize, end: usize) {
        let from = char_to_byte_index(&self.text, start);
        let to = char_to_byte_index(&self.text, end);
        self.text.replace_range(from..to, "");
        self.cursor = start;
        self.clear_selection();
    }

    fn insert_char(&mut self, c: char) {
        if let Some((start, end)) = self.selection() {
            self.remove_range(start, end);
        }
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    /// Delete character before cursor or delete selection.
    /// Returns true if text changed.
    fn delete_back(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            self.remove_range(start, end);
            true
        } else if self.cursor > 0 {
            self.remove_range(self.cursor - 1, self.cursor);
            true
        } else {
            false
        }
    }

    /// Delete character after cursor or delete selection.
    /// Returns true if text changed.
    fn delete_forward(&mut self) -> bool {
        if let Some((start, end)) = self.selection() {
            self.remove_range(start, end);
            true
        } else if self.cursor < self.char_count() {
            self.remove_range(self.cursor, self.cursor + 1);
            true
        } else {
            false
        }
    }

    /// Move the cursor to `target`, extending or collapsing the selection.
    fn move_to(&mut self, target: usize, extend_selection: bool) {
        if extend_selection {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.clear_selection();
        }
        self.cursor = target.min(self.char_count());
    }

    fn move_by(&mut self, delta: isize, extend_selection: bool) {
        // Without shift, an arrow collapses the selection to its edge
        if !extend_selection {
            if let Some((start, end)) = self.selection() {
                self.cursor = if delta < 0 { start } else { end };
                self.clear_selection();
                return;
            }
        }
        let target = self.cursor.saturating_add_signed(delta);
        self.move_to(target, extend_selection);
    }
}

/// Tracks text input state for multiple elements.
#[derive(Debug, Default)]
pub struct TextInputState {
    inputs: HashMap<String, TextInputData>,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text value for an input.
    pub fn get(&self, id: &str) -> &str {
        self.inputs
            .get(id)
            .map(|d| d.text.as_str())
            .unwrap_or("")
    }

    /// Get the full input data (text, cursor, selection).
    pub fn get_data(&self, id: &str) -> Option<&TextInputData> {
        self.inputs.get(id)
    }

    /// Get mutable access to input data.
    pub fn get_data_mut(&mut self, id: &str) -> &mut TextInputData {
        self.inputs.entry(id.to_string()).or_default()
    }

    /// Set the text value for an input, placing cursor at end.
    pub fn set(&mut self, id: &str, text: impl Into<String>) {
        self.inputs.insert(id.to_string(), TextInputData::new(text));
    }

    /// Process events and handle text input.
    ///
    /// Keys aimed at an element that captures input are applied to its text.
    /// Every such key is followed by `KeyRelease`, so listeners observe the
    /// entry after the key took effect. `Change` and `Submit` are emitted
    /// before the release. All other events pass through unchanged.
    pub fn process_events(&mut self, events: &[Event], root: &Element) -> Vec<Event> {
        let mut output = Vec::new();

        for event in events {
            let Event::Key {
                target: Some(target),
                key,
                modifiers,
            } = event
            else {
                output.push(event.clone());
                continue;
            };

            let captures = find_element(root, target).is_some_and(|el| el.captures_input);
            if !captures {
                output.push(event.clone());
                continue;
            }

            match self.handle_key(target, *key, *modifiers) {
                TextEditResult::Changed => output.push(Event::Change {
                    target: target.clone(),
                    text: self.get(target).to_string(),
                }),
                TextEditResult::Submitted => output.push(Event::Submit {
                    target: target.clone(),
                }),
                TextEditResult::Handled => {}
                TextEditResult::Ignored => output.push(event.clone()),
            }

            output.push(Event::KeyRelease {
                target: target.clone(),
                key: *key,
                modifiers: *modifiers,
            });
        }

        output
    }

    /// Handle a key press for text editing.
    pub fn handle_key(&mut self, id: &str, key: Key, modifiers: Modifiers) -> TextEditResult {
        let data = self.get_data_mut(id);

        match key {
            Key::Char('a') if modifiers.ctrl => {
                data.select_all();
                TextEditResult::Handled
            }

            Key::Char(c) if !modifiers.ctrl && !modifiers.alt => {
                data.insert_char(c);
                TextEditResult::Changed
            }

            Key::Backspace if modifiers.none() => changed_or_handled(data.delete_back()),

            Key::Delete if modifiers.none() => changed_or_handled(data.delete_forward()),

            Key::Left if !modifiers.ctrl => {
                data.move_by(-1, modifiers.shift);
                TextEditResult::Handled
            }

            Key::Right if !modifiers.ctrl => {
                data.move_by(1, modifiers.shift);
                TextEditResult::Handled
            }

            Key::Home if !modifiers.ctrl => {
                data.move_to(0, modifiers.shift);
                TextEditResult::Handled
            }

            Key::End if !modifiers.ctrl => {
                data.move_to(usize::MAX, modifiers.shift);
                TextEditResult::Handled
            }

            Key::Enter => TextEditResult::Submitted,

            _ => TextEditResult::Ignored,
        }
    }
}

fn changed_or_handled(changed: bool) -> TextEditResult {
    if changed {
        TextEditResult::Changed
    } else {
        TextEditResult::Handled
    }
}

/// Result of handling a text editing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Text was modified.
    Changed,
    /// Enter was pressed.
    Submitted,
    /// Key was handled but text didn't change (e.g., cursor movement).
    Handled,
    /// Key was not handled, should be passed through.
    Ignored,
}

/// Convert character index to byte index in a string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
