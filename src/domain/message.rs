/// Puts every sentence of a free-form message on its own line.
///
/// Each `". "` becomes `".\n"`, and a message ending with a period gets a
/// trailing line break.
pub fn format_message(text: &str) -> String {
    let mut formatted = text.replace(". ", ".\n");
    if formatted.ends_with('.') {
        formatted.push('\n');
    }
    formatted
}
