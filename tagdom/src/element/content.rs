#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
    /// Single-line text entry. The editing state itself lives in
    /// `TextInputState`; this is the snapshot used for layout and rendering.
    TextInput {
        value: String,
        cursor: usize,
        selection: Option<(usize, usize)>,
        placeholder: Option<String>,
        focused: bool,
    },
    /// Value of a hidden field. Never laid out or rendered.
    Value(String),
}
