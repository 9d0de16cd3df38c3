use tagdom::{Color, Edges, Element, Event, Key, MouseButton, Size, Style, TextInputState};

use crate::limits::TagLimits;
use crate::tag_list::TagList;

/// Class marker carried by every chip.
pub const TAG_CLASS: &str = "tag";
/// Element data key holding a chip's tag value.
pub const TAG_DATA_KEY: &str = "tag";

/// Tag entry widget.
///
/// Owns the accepted tags, the container holding one chip per tag and the
/// hidden output field. The entry element itself belongs to the host page;
/// the widget only knows its id and reads and clears it through
/// [`TextInputState`].
#[derive(Debug)]
pub struct TagWidget {
    tags: TagList,
    entry_id: String,
    container: Element,
    output: Element,
    next_chip: u64,
}

impl TagWidget {
    /// Build the widget around its page elements. Any children already in
    /// `container` are dropped so chips and tags start out in step.
    pub fn new(
        entry_id: impl Into<String>,
        mut container: Element,
        mut output: Element,
        limits: TagLimits,
    ) -> Self {
        container.content = tagdom::Content::Children(Vec::new());
        output.set_value("");
        Self {
            tags: TagList::new(limits),
            entry_id: entry_id.into(),
            container,
            output,
            next_chip: 0,
        }
    }

    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// Chip container, for placing in the page tree.
    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Hidden output field, for placing in the page tree.
    pub fn output(&self) -> &Element {
        &self.output
    }

    /// Current value of the hidden output field.
    pub fn output_value(&self) -> &str {
        self.output.value().unwrap_or_default()
    }

    /// React to a key released in the entry whose text is now `entry_text`.
    ///
    /// Only a space with non-blank entry text does anything: every
    /// space-separated token is checked against the list as it stands after
    /// the tokens before it, valid ones become chips, the rest are dropped.
    /// Returns true when the entry should be cleared.
    pub fn handle_keystroke(&mut self, key: Key, entry_text: &str) -> bool {
        if key != Key::Char(' ') || entry_text.trim().is_empty() {
            return false;
        }

        for token in entry_text.split(' ') {
            match self.tags.try_push(token) {
                Ok(()) => {
                    log::debug!("[hashtag] accepted {token:?}");
                    let chip = self.chip(token);
                    self.container.append_child(chip);
                }
                // Empty tokens come from the separator itself
                Err(rejection) if !token.is_empty() => {
                    log::debug!("[hashtag] dropped {token:?}: {rejection}");
                }
                Err(_) => {}
            }
        }

        self.sync_output();
        true
    }

    /// Remove the chip with element id `target` and its tag.
    /// Returns the removed tag, or None if `target` is not one of our chips.
    pub fn handle_click(&mut self, target: &str) -> Option<String> {
        let tag = self
            .container
            .children()
            .iter()
            .find(|chip| chip.id == target && chip.has_class(TAG_CLASS))
            .and_then(|chip| chip.get_data(TAG_DATA_KEY))
            .cloned()?;

        self.container.remove_child(target);
        self.tags.remove(&tag);
        self.sync_output();
        log::debug!("[hashtag] removed {tag:?}");
        Some(tag)
    }

    /// Consume the events meant for this widget and pass the rest through.
    ///
    /// Key releases on the entry drive [`TagWidget::handle_keystroke`] and
    /// left clicks on chips drive [`TagWidget::handle_click`].
    pub fn process_events(&mut self, events: &[Event], inputs: &mut TextInputState) -> Vec<Event> {
        let mut output = Vec::new();

        for event in events {
            match event {
                Event::KeyRelease { target, key, .. } if *target == self.entry_id => {
                    let text = inputs.get(&self.entry_id).to_string();
                    if self.handle_keystroke(*key, &text) {
                        inputs.set(&self.entry_id, "");
                        continue;
                    }
                }
                Event::Click {
                    target: Some(target),
                    button: MouseButton::Left,
                    ..
                } => {
                    if self.handle_click(target).is_some() {
                        continue;
                    }
                }
                _ => {}
            }
            output.push(event.clone());
        }

        output
    }

    fn chip(&mut self, tag: &str) -> Element {
        let id = format!("{}-tag-{}", self.container.id, self.next_chip);
        self.next_chip += 1;

        Element::text(tag)
            .id(id)
            .class(TAG_CLASS)
            .data(TAG_DATA_KEY, tag)
            .clickable(true)
            .width(Size::Auto)
            .height(Size::Auto)
            .padding(Edges::horizontal(1))
            .style(
                Style::new()
                    .background(Color::oklch(0.45, 0.12, 250.0))
                    .foreground(Color::oklch(0.95, 0.02, 250.0)),
            )
    }

    fn sync_output(&mut self) {
        self.output.set_value(self.tags.joined());
    }
}
