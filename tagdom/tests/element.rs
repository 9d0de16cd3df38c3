use tagdom::{find_by_class, find_element, Content, Element, TextInputData};

// ============================================================================
// Tree Mutation
// ============================================================================

#[test]
fn test_append_child_in_order() {
    let mut container = Element::row().id("container");
    container.append_child(Element::text("a").id("a"));
    container.append_child(Element::text("b").id("b"));

    let ids: Vec<&str> = container.children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_append_child_replaces_leaf_content() {
    let mut element = Element::text("leaf");
    element.append_child(Element::text("child").id("child"));

    assert_eq!(element.children().len(), 1);
    assert_eq!(element.text_content(), None);
}

#[test]
fn test_remove_child_removes_exactly_one() {
    let mut container = Element::row()
        .child(Element::text("a").id("a"))
        .child(Element::text("b").id("b"))
        .child(Element::text("c").id("c"));

    let removed = container.remove_child("b");

    assert_eq!(removed.map(|e| e.id), Some("b".to_string()));
    let ids: Vec<&str> = container.children().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert!(container.remove_child("b").is_none());
}

#[test]
fn test_remove_child_only_looks_at_direct_children() {
    let mut outer = Element::col().child(Element::row().id("inner").child(Element::text("x").id("x")));

    assert!(outer.remove_child("x").is_none());
    assert!(find_element(&outer, "x").is_some());
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_find_by_class_in_tree_order() {
    let root = Element::col()
        .child(Element::text("one").id("one").class("tag"))
        .child(
            Element::row()
                .child(Element::text("two").id("two").class("tag"))
                .child(Element::text("other").class("label")),
        )
        .child(Element::text("three").id("three").class("tag"));

    let ids: Vec<&str> = find_by_class(&root, "tag").iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["one", "two", "three"]);
}

#[test]
fn test_class_is_not_duplicated() {
    let element = Element::text("x").class("tag").class("tag");
    assert_eq!(element.classes, vec!["tag".to_string()]);
    assert!(element.has_class("tag"));
    assert!(!element.has_class("chip"));
}

#[test]
fn test_data_round_trips() {
    let element = Element::text("rust").data("tag", "rust");
    assert_eq!(element.get_data("tag").map(String::as_str), Some("rust"));
    assert_eq!(element.get_data("missing"), None);
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_hidden_field_value() {
    let mut field = Element::hidden_field("").id("get-tags");
    assert!(field.hidden);
    assert_eq!(field.value(), Some(""));

    assert!(field.set_value("alpha beta"));
    assert_eq!(field.value(), Some("alpha beta"));
}

#[test]
fn test_set_value_on_text_input_moves_cursor_to_end() {
    let mut input = Element::text_input("abc");
    assert!(input.set_value("日本"));

    match &input.content {
        Content::TextInput { value, cursor, .. } => {
            assert_eq!(value, "日本");
            assert_eq!(*cursor, 2);
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[test]
fn test_set_value_on_text_fails() {
    let mut text = Element::text("label");
    assert!(!text.set_value("x"));
    assert_eq!(text.value(), None);
}

#[test]
fn test_input_state_snapshot() {
    let mut data = TextInputData::new("hello");
    data.anchor = Some(1);

    let input = Element::text_input("").input_state(&data, true);

    match &input.content {
        Content::TextInput {
            value,
            cursor,
            selection,
            focused,
            ..
        } => {
            assert_eq!(value, "hello");
            assert_eq!(*cursor, 5);
            assert_eq!(*selection, Some((1, 5)));
            assert!(*focused);
        }
        other => panic!("unexpected content: {other:?}"),
    }
}
