//! Pango markup rendering of the workspace list

use i3span_config::FormatConfig;

use crate::store::WorkspaceStore;

/// Render the store as one line of Pango markup
///
/// Each workspace expands its template's `{name}` placeholder, focused
/// workspaces using the focused template. Names are markup-escaped so a
/// workspace called `<tv>` cannot corrupt the bar.
pub fn render(store: &WorkspaceStore, format: &FormatConfig) -> String {
    let mut out = String::new();

    for (i, workspace) in store.iter().enumerate() {
        if i > 0 {
            out.push_str(&format.separator);
        }

        let template = if workspace.focused {
            &format.focused
        } else {
            &format.unfocused
        };
        out.push_str(&template.replace("{name}", &escape_markup(&workspace.name)));
    }

    out
}

/// Escape the characters Pango markup treats specially
fn escape_markup(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
