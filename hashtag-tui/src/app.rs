use std::io;

use crossterm::event::Event as CrosstermEvent;
use hashtag::{TagLimits, TagWidget};
use tagdom::{
    Border, Color, Edges, Element, Event, FocusState, Key, LayoutResult, Size, Style,
    Terminal, TextInputState, Wrap,
};

use crate::config::AppConfig;

pub const ENTRY_ID: &str = "hashtags";
pub const CONTAINER_ID: &str = "tag-container";
pub const OUTPUT_ID: &str = "get-tags";

const HELP: &str = "space adds tags · click a tag to remove it · esc leaves the entry, esc again or ctrl+q quits";

/// The hashtag entry page and its event loop state.
pub struct HashtagApp {
    widget: TagWidget,
    focus: FocusState,
    inputs: TextInputState,
    placeholder: String,
    running: bool,
}

impl HashtagApp {
    pub fn new(config: &AppConfig) -> Self {
        let mut focus = FocusState::new();
        focus.focus(ENTRY_ID);

        Self {
            widget: TagWidget::new(ENTRY_ID, tag_container(), hidden_output(), config.limits),
            focus,
            inputs: TextInputState::new(),
            placeholder: config.placeholder.clone(),
            running: true,
        }
    }

    pub fn widget(&self) -> &TagWidget {
        &self.widget
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Text currently typed into the entry.
    pub fn entry_text(&self) -> &str {
        self.inputs.get(ENTRY_ID)
    }

    /// Build the page for the current state.
    pub fn element(&self) -> Element {
        let data = self.inputs.get_data(ENTRY_ID).cloned().unwrap_or_default();
        let entry_focused = self.focus.focused() == Some(ENTRY_ID);
        let limits = self.widget.tags().limits();

        let entry = Element::text_input("")
            .id(ENTRY_ID)
            .placeholder(self.placeholder.as_str())
            .input_state(&data, entry_focused)
            .height(Size::Auto)
            .padding(Edges::horizontal(1))
            .style(Style::new().border(Border::Rounded));

        Element::col()
            .width(Size::Fill)
            .height(Size::Fill)
            .padding(Edges::symmetric(1, 2))
            .gap(1)
            .style(Style::new().background(Color::oklch(0.18, 0.02, 250.0)))
            .child(line("Hashtags", Style::new().bold()))
            .child(entry)
            .child(line(counter(self.widget.tags().len(), limits), Style::new().dim()))
            .child(self.widget.container().clone())
            .child(self.widget.output().clone())
            .child(line(HELP, Style::new().dim()))
    }

    /// Run raw terminal events through focus, text entry and the widget.
    pub fn dispatch(&mut self, raw: &[CrosstermEvent], root: &Element, layout: &LayoutResult) {
        let events = self.focus.process_events(raw, root, layout);
        let events = self.inputs.process_events(&events, root);
        let events = self.widget.process_events(&events, &mut self.inputs);

        for event in events {
            match event {
                Event::Key {
                    target: None,
                    key: Key::Escape,
                    ..
                } => self.quit(),
                Event::Key {
                    key: Key::Char('q'),
                    modifiers,
                    ..
                } if modifiers.ctrl => self.quit(),
                Event::Resize { width, height } => {
                    log::debug!("[app] resized to {width}x{height}");
                }
                _ => {}
            }
        }
    }

    /// Render and dispatch until the user quits.
    pub fn run(&mut self, term: &mut Terminal) -> io::Result<()> {
        while self.running {
            let root = self.element();
            term.render(&root)?;
            let raw = term.poll(None)?;
            self.dispatch(&raw, &root, term.layout());
        }
        Ok(())
    }

    fn quit(&mut self) {
        log::info!("[app] quitting with {} tags", self.widget.tags().len());
        self.running = false;
    }
}

fn tag_container() -> Element {
    Element::row()
        .id(CONTAINER_ID)
        .class("tag-container")
        .wrap(Wrap::Wrap)
        .gap(1)
        .width(Size::Fill)
        .height(Size::Fill)
}

fn hidden_output() -> Element {
    Element::hidden_field("").id(OUTPUT_ID)
}

fn line(text: impl Into<String>, style: Style) -> Element {
    Element::text(text).height(Size::Auto).style(style)
}

fn counter(len: usize, limits: TagLimits) -> String {
    format!("{len}/{} tags", limits.max_tags)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use tagdom::Rect;

    use super::*;

    fn layout_of(root: &Element) -> LayoutResult {
        tagdom::layout::layout(root, Rect::from_size(80, 24))
    }

    fn press(app: &mut HashtagApp, code: KeyCode, modifiers: KeyModifiers) {
        let root = app.element();
        let layout = layout_of(&root);
        let raw = [CrosstermEvent::Key(KeyEvent::new(code, modifiers))];
        app.dispatch(&raw, &root, &layout);
    }

    fn type_text(app: &mut HashtagApp, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    fn click_chip(app: &mut HashtagApp, tag: &str) {
        let root = app.element();
        let layout = layout_of(&root);
        let chip = app
            .widget()
            .container()
            .children()
            .iter()
            .find(|chip| chip.text_content() == Some(tag))
            .expect("chip");
        let rect = layout[&chip.id];
        let raw = [CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::NONE,
        })];
        app.dispatch(&raw, &root, &layout);
    }

    #[test]
    fn test_typing_adds_tags_and_clears_entry() {
        let mut app = HashtagApp::new(&AppConfig::default());

        type_text(&mut app, "alpha beta ");

        assert_eq!(app.widget().output_value(), "alpha beta");
        assert_eq!(app.entry_text(), "");
    }

    #[test]
    fn test_partial_word_stays_in_entry() {
        let mut app = HashtagApp::new(&AppConfig::default());

        type_text(&mut app, "alpha be");

        assert_eq!(app.widget().output_value(), "alpha");
        assert_eq!(app.entry_text(), "be");
    }

    #[test]
    fn test_clicking_chip_removes_it() {
        let mut app = HashtagApp::new(&AppConfig::default());
        type_text(&mut app, "alpha beta ");

        click_chip(&mut app, "beta");

        assert_eq!(app.widget().output_value(), "alpha");
        assert_eq!(app.widget().container().children().len(), 1);
    }

    #[test]
    fn test_configured_limits_apply() {
        let config = AppConfig {
            limits: TagLimits {
                max_tag_len: 4,
                max_tags: 2,
            },
            ..AppConfig::default()
        };
        let mut app = HashtagApp::new(&config);

        type_text(&mut app, "one three two four ");

        assert_eq!(app.widget().output_value(), "one two");
    }

    #[test]
    fn test_escape_twice_quits() {
        let mut app = HashtagApp::new(&AppConfig::default());

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.is_running());

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.is_running());
    }

    #[test]
    fn test_ctrl_q_quits_from_entry() {
        let mut app = HashtagApp::new(&AppConfig::default());
        type_text(&mut app, "ab");

        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);

        assert!(!app.is_running());
        assert_eq!(app.entry_text(), "ab");
    }

    #[test]
    fn test_page_places_output_but_hides_it() {
        let app = HashtagApp::new(&AppConfig::default());
        let root = app.element();

        let output = tagdom::find_element(&root, OUTPUT_ID).expect("output");
        assert!(output.hidden);
        assert!(tagdom::find_element(&root, CONTAINER_ID).is_some());
        assert!(!layout_of(&root).contains_key(OUTPUT_ID));
    }
}
