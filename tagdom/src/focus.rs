use crossterm::event::{Event as CrosstermEvent, KeyEventKind, MouseEventKind};

use crate::element::Element;
use crate::event::{Event, Key, Modifiers};
use crate::hit::{hit_test, hit_test_focusable};
use crate::layout::LayoutResult;

/// Tracks which element is currently focused and processes events.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let next = match self.current_index(&focusable) {
            Some(i) => focusable.get((i + 1) % focusable.len()),
            None => focusable.first(),
        }?;
        self.move_to(next.clone())
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, root: &Element) -> Option<String> {
        let focusable = collect_focusable(root);
        let prev = match self.current_index(&focusable) {
            Some(0) | None => focusable.last(),
            Some(i) => focusable.get(i - 1),
        }?;
        self.move_to(prev.clone())
    }

    fn current_index(&self, focusable: &[String]) -> Option<usize> {
        let current = self.focused.as_ref()?;
        focusable.iter().position(|id| id == current)
    }

    fn move_to(&mut self, id: String) -> Option<String> {
        if self.focused.as_ref() == Some(&id) {
            return None;
        }
        self.focused = Some(id.clone());
        Some(id)
    }

    /// Push Blur/Focus events for a focus change away from `old`.
    fn push_change(events: &mut Vec<Event>, old: Option<String>, new: Option<String>) {
        let Some(new) = new else { return };
        if let Some(old) = old {
            events.push(Event::Blur { target: old });
        }
        events.push(Event::Focus { target: new });
    }

    /// Process raw crossterm events and produce high-level events.
    pub fn process_events(
        &mut self,
        raw: &[CrosstermEvent],
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        for raw_event in raw {
            match raw_event {
                CrosstermEvent::Key(key_event) => {
                    // Only process key press events (not release/repeat on some terminals)
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }

                    let key: Key = key_event.code.into();
                    let modifiers: Modifiers = key_event.modifiers.into();

                    match key {
                        Key::Tab => {
                            let old = self.focused.clone();
                            let new = self.focus_next(root);
                            Self::push_change(&mut events, old, new);
                        }
                        Key::BackTab => {
                            let old = self.focused.clone();
                            let new = self.focus_prev(root);
                            Self::push_change(&mut events, old, new);
                        }
                        // Escape blurs focused element; only emits key event if nothing focused
                        Key::Escape if self.focused.is_some() => {
                            if let Some(old) = self.focused.take() {
                                events.push(Event::Blur { target: old });
                            }
                        }
                        _ => events.push(Event::Key {
                            target: self.focused.clone(),
                            key,
                            modifiers,
                        }),
                    }
                }

                CrosstermEvent::Mouse(mouse_event) => {
                    let MouseEventKind::Down(button) = mouse_event.kind else {
                        continue;
                    };
                    let (x, y) = (mouse_event.column, mouse_event.row);

                    // Click to focus
                    if let Some(target) = hit_test_focusable(layout, root, x, y) {
                        if self.focused.as_ref() != Some(&target) {
                            log::debug!("[focus] click moves focus from {:?} to {}", self.focused, target);
                            let old = self.focused.take();
                            self.focused = Some(target.clone());
                            Self::push_change(&mut events, old, Some(target));
                        }
                    }

                    events.push(Event::Click {
                        target: hit_test(layout, root, x, y),
                        x,
                        y,
                        button: button.into(),
                    });
                }

                CrosstermEvent::Resize(width, height) => {
                    events.push(Event::Resize {
                        width: *width,
                        height: *height,
                    });
                }

                _ => {}
            }
        }

        events
    }
}

/// Collect all focusable element IDs in tree order.
pub fn collect_focusable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_focusable_recursive(element, &mut result);
    result
}

fn collect_focusable_recursive(element: &Element, result: &mut Vec<String>) {
    if element.hidden {
        return;
    }
    if element.focusable {
        result.push(element.id.clone());
    }
    for child in element.children() {
        collect_focusable_recursive(child, result);
    }
}
