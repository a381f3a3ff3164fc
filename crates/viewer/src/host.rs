/// Settings the viewer mounts the editor with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EditorOptions {
    pub value: String,
    pub read_only: bool,
    pub line_wrapping: bool,
    pub fold_gutter: bool,
    /// Whether the editor should ask the viewer for hover info.
    pub hover_info: bool,
}

/// Text editor widget that displays the result document.
pub trait EditorHost {
    fn mount(&mut self, options: &EditorOptions);

    fn set_value(&mut self, value: &str);

    fn unmount(&mut self) {}
}
