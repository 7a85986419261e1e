use crate::Span;

/// Maps byte offsets back to source text for diagnostic rendering: every
/// stage error carries a [`Span`], and this is what turns that into the
/// `file --> line:col` / caret-underline block shown to the user.
pub struct SourceMap<'a> {
    source_code: &'a str,
    file_name: &'a str,
}

impl<'a> SourceMap<'a> {
    pub fn new(file_name: &'a str, source_code: &'a str) -> Self {
        Self {
            source_code,
            file_name,
        }
    }

    /// Formats an error message with source context.
    ///
    /// ```text
    /// file.c --> line 3:5
    ///      |
    ///    3 | let x = 10;
    ///      |     ^~~ Error message
    /// ```
    pub fn format_message(&self, message: &str, span: Span) -> String {
        let line_text = self.get_line_text(span.start);
        let column = span.start_loc.column.max(1) as usize;

        let mut marker_line = String::new();
        let marker_start = column.saturating_sub(1);
        let marker_len = (span.end.saturating_sub(span.start)).max(1);

        for i in 0..=line_text.len() {
            if i == marker_start {
                marker_line.push('^');
                for _ in 1..marker_len {
                    marker_line.push('~');
                }
                marker_line.push(' ');
                marker_line.push_str(message);
                break;
            } else if line_text.as_bytes().get(i) == Some(&b'\t') {
                marker_line.push('\t');
            } else {
                marker_line.push(' ');
            }
        }

        format!(
            "{} --> line {}:{}\n     |\n{:>4} | {}\n     | {}\n",
            self.file_name, span.start_loc.line, column, span.start_loc.line, line_text, marker_line
        )
    }

    /// Short-form rendering used by the `"<kind> error: <loc> <message>"`
    /// one-liner, as opposed to `format_message`'s multi-line form.
    pub fn format_oneline(&self, message: &str, span: Span) -> String {
        format!("{} {}", span.start_loc, message)
    }

    fn get_line_text(&self, offset: usize) -> &str {
        let offset = offset.min(self.source_code.len());
        let start = self.source_code[..offset]
            .rfind('\n')
            .map_or(0, |pos| pos + 1);
        let end = self.source_code[offset..]
            .find('\n')
            .map_or(self.source_code.len(), |pos| offset + pos);

        &self.source_code[start..end]
    }

    pub fn get_file_name(&self) -> &'a str {
        self.file_name
    }

    pub fn get_source_code(&self) -> &'a str {
        self.source_code
    }
}
