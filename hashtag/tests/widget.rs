use hashtag::{TAG_CLASS, TAG_DATA_KEY, TagLimits, TagWidget};
use tagdom::{
    Element, Event, Key, Modifiers, MouseButton, TextInputState, find_by_class, find_element,
};

const ENTRY: &str = "hashtags";

fn widget() -> TagWidget {
    TagWidget::new(
        ENTRY,
        Element::row().id("tag-container"),
        Element::hidden_field("").id("get-tags"),
        TagLimits::default(),
    )
}

/// Type `text` into a fresh entry and release the final key.
fn submit(widget: &mut TagWidget, text: &str) -> bool {
    let last = text.chars().last().map(Key::Char).unwrap_or(Key::Enter);
    widget.handle_keystroke(last, text)
}

fn chip_values(widget: &TagWidget) -> Vec<String> {
    find_by_class(widget.container(), TAG_CLASS)
        .iter()
        .filter_map(|chip| chip.get_data(TAG_DATA_KEY).cloned())
        .collect()
}

fn chip_id(widget: &TagWidget, tag: &str) -> String {
    widget
        .container()
        .children()
        .iter()
        .find(|chip| chip.get_data(TAG_DATA_KEY).map(String::as_str) == Some(tag))
        .map(|chip| chip.id.clone())
        .expect("chip for tag")
}

fn release(key: Key) -> Event {
    Event::KeyRelease {
        target: ENTRY.to_string(),
        key,
        modifiers: Modifiers::new(),
    }
}

fn click(target: &str) -> Event {
    Event::Click {
        target: Some(target.to_string()),
        x: 0,
        y: 0,
        button: MouseButton::Left,
    }
}

// ============================================================================
// Keystrokes
// ============================================================================

#[test]
fn test_two_tags_then_space() {
    let mut widget = widget();

    assert!(submit(&mut widget, "alpha beta "));

    assert_eq!(widget.tags().as_slice(), ["alpha", "beta"]);
    assert_eq!(widget.output_value(), "alpha beta");
    assert_eq!(chip_values(&widget), vec!["alpha", "beta"]);
}

#[test]
fn test_duplicate_in_same_batch_dropped() {
    let mut widget = widget();

    submit(&mut widget, "alpha alpha ");

    assert_eq!(widget.tags().as_slice(), ["alpha"]);
    assert_eq!(chip_values(&widget), vec!["alpha"]);
}

#[test]
fn test_resubmitting_existing_tag_is_noop() {
    let mut widget = widget();
    submit(&mut widget, "alpha ");

    assert!(submit(&mut widget, "alpha "));

    assert_eq!(widget.tags().as_slice(), ["alpha"]);
    assert_eq!(widget.container().children().len(), 1);
    assert_eq!(widget.output_value(), "alpha");
}

#[test]
fn test_non_space_keys_ignored() {
    let mut widget = widget();

    assert!(!widget.handle_keystroke(Key::Char('a'), "alpha"));
    assert!(!widget.handle_keystroke(Key::Enter, "alpha "));
    assert!(!widget.handle_keystroke(Key::Backspace, "alpha "));

    assert!(widget.tags().is_empty());
    assert_eq!(widget.output_value(), "");
}

#[test]
fn test_blank_entry_ignored() {
    let mut widget = widget();

    assert!(!widget.handle_keystroke(Key::Char(' '), " "));
    assert!(!widget.handle_keystroke(Key::Char(' '), "   "));

    assert!(widget.tags().is_empty());
}

#[test]
fn test_length_boundary_in_batch() {
    let mut widget = widget();
    let ok = "a".repeat(30);
    let too_long = "b".repeat(31);

    submit(&mut widget, &format!("{ok} {too_long} "));

    assert_eq!(widget.tags().as_slice(), [ok.clone()]);
    assert_eq!(widget.output_value(), ok);
}

#[test]
fn test_fifty_first_tag_rejected() {
    let mut widget = widget();
    let text: String = (0..51).map(|i| format!("t{i} ")).collect();

    submit(&mut widget, &text);

    assert_eq!(widget.tags().len(), 50);
    assert_eq!(widget.container().children().len(), 50);
    assert!(!widget.tags().contains("t50"));
    assert!(!widget.output_value().contains("t50"));
}

#[test]
fn test_consecutive_spaces_yield_no_empty_tags() {
    let mut widget = widget();

    submit(&mut widget, "  alpha   beta ");

    assert_eq!(widget.output_value(), "alpha beta");
}

#[test]
fn test_only_single_spaces_split() {
    let mut widget = widget();

    submit(&mut widget, "a\tb c ");

    assert_eq!(widget.tags().as_slice(), ["a\tb", "c"]);
}

#[test]
fn test_mixed_valid_and_invalid_preserve_order() {
    let mut widget = widget();
    let long = "x".repeat(40);

    submit(&mut widget, &format!("one {long} two one three "));

    assert_eq!(widget.output_value(), "one two three");
    assert_eq!(chip_values(&widget), vec!["one", "two", "three"]);
}

// ============================================================================
// Chip Removal
// ============================================================================

#[test]
fn test_click_chip_removes_tag() {
    let mut widget = widget();
    submit(&mut widget, "alpha beta ");

    let id = chip_id(&widget, "beta");
    assert_eq!(widget.handle_click(&id), Some("beta".to_string()));

    assert_eq!(widget.tags().as_slice(), ["alpha"]);
    assert_eq!(widget.output_value(), "alpha");
    assert!(find_element(widget.container(), &id).is_none());
}

#[test]
fn test_click_middle_chip_keeps_order() {
    let mut widget = widget();
    submit(&mut widget, "a b c ");

    let id = chip_id(&widget, "b");
    widget.handle_click(&id);

    assert_eq!(widget.output_value(), "a c");
    assert_eq!(chip_values(&widget), vec!["a", "c"]);
}

#[test]
fn test_click_on_unknown_target_ignored() {
    let mut widget = widget();
    submit(&mut widget, "alpha ");

    assert_eq!(widget.handle_click("tag-container"), None);
    assert_eq!(widget.handle_click("nothing"), None);
    assert_eq!(widget.tags().len(), 1);
}

#[test]
fn test_removed_tag_can_be_added_again() {
    let mut widget = widget();
    submit(&mut widget, "alpha beta ");

    let id = chip_id(&widget, "alpha");
    widget.handle_click(&id);
    submit(&mut widget, "alpha ");

    assert_eq!(widget.output_value(), "beta alpha");
    // New chip, new id
    assert_ne!(chip_id(&widget, "alpha"), id);
}

#[test]
fn test_construction_clears_container_and_output() {
    let widget = TagWidget::new(
        ENTRY,
        Element::row().child(Element::text("stale")),
        Element::hidden_field("stale"),
        TagLimits::default(),
    );

    assert!(widget.container().children().is_empty());
    assert_eq!(widget.output_value(), "");
}

// ============================================================================
// Event Processing
// ============================================================================

#[test]
fn test_space_release_accepts_and_clears_entry() {
    let mut widget = widget();
    let mut inputs = TextInputState::new();
    inputs.set(ENTRY, "alpha beta ");

    let rest = widget.process_events(&[release(Key::Char(' '))], &mut inputs);

    assert!(rest.is_empty());
    assert_eq!(inputs.get(ENTRY), "");
    assert_eq!(widget.output_value(), "alpha beta");
}

#[test]
fn test_other_release_passes_through_and_keeps_entry() {
    let mut widget = widget();
    let mut inputs = TextInputState::new();
    inputs.set(ENTRY, "alph");

    let rest = widget.process_events(&[release(Key::Char('h'))], &mut inputs);

    assert_eq!(rest, vec![release(Key::Char('h'))]);
    assert_eq!(inputs.get(ENTRY), "alph");
}

#[test]
fn test_release_on_other_entry_ignored() {
    let mut widget = widget();
    let mut inputs = TextInputState::new();
    inputs.set("search", "alpha ");
    let event = Event::KeyRelease {
        target: "search".to_string(),
        key: Key::Char(' '),
        modifiers: Modifiers::new(),
    };

    let rest = widget.process_events(&[event.clone()], &mut inputs);

    assert_eq!(rest, vec![event]);
    assert!(widget.tags().is_empty());
}

#[test]
fn test_typing_through_text_input_state() {
    let root = Element::col().child(Element::text_input("").id(ENTRY));
    let mut widget = widget();
    let mut inputs = TextInputState::new();

    for ch in "rust tui ".chars() {
        let key = Event::Key {
            target: Some(ENTRY.to_string()),
            key: Key::Char(ch),
            modifiers: Modifiers::new(),
        };
        let events = inputs.process_events(&[key], &root);
        widget.process_events(&events, &mut inputs);
    }

    // Each space closes the word typed before it
    assert_eq!(widget.output_value(), "rust tui");
    assert_eq!(inputs.get(ENTRY), "");
}

#[test]
fn test_chip_click_event_consumed() {
    let mut widget = widget();
    let mut inputs = TextInputState::new();
    submit(&mut widget, "alpha beta ");
    let id = chip_id(&widget, "alpha");

    let rest = widget.process_events(&[click(&id), click("elsewhere")], &mut inputs);

    assert_eq!(rest, vec![click("elsewhere")]);
    assert_eq!(widget.output_value(), "beta");
}

#[test]
fn test_right_click_does_not_remove() {
    let mut widget = widget();
    let mut inputs = TextInputState::new();
    submit(&mut widget, "alpha ");
    let id = chip_id(&widget, "alpha");
    let event = Event::Click {
        target: Some(id),
        x: 0,
        y: 0,
        button: MouseButton::Right,
    };

    widget.process_events(&[event], &mut inputs);

    assert_eq!(widget.output_value(), "alpha");
}

// ============================================================================
// Output Field Invariant
// ============================================================================

#[test]
fn test_output_always_matches_tags_and_chips() {
    let mut widget = widget();
    let batches = ["a b c ", "b d ", "e  f ", "a "];

    for batch in batches {
        submit(&mut widget, batch);
        assert_eq!(widget.output_value(), widget.tags().joined());
        assert_eq!(chip_values(&widget), widget.tags().as_slice());
    }

    for tag in ["c", "a", "f"] {
        let id = chip_id(&widget, tag);
        widget.handle_click(&id);
        assert_eq!(widget.output_value(), widget.tags().joined());
        assert_eq!(chip_values(&widget), widget.tags().as_slice());
    }

    assert_eq!(widget.output_value(), "b d e");
}
