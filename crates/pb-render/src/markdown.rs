//! GFM markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Render a markdown source string to an HTML fragment.
///
/// Uses GitHub-flavored markdown extensions (tables, strikethrough,
/// tasklists). The output carries no surrounding layout; callers embed it
/// into whatever template context they are building.
///
/// Rendering is pure: the same input always produces the same output.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    let parser = Parser::new_ext(source, options);

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_heading_and_paragraph() {
        let html = render_markdown("# Usage\n\nUse sparingly.");

        assert_eq!(html, "<h1>Usage</h1>\n<p>Use sparingly.</p>\n");
    }

    #[test]
    fn test_render_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = "# Button\n\n- one\n- two\n\n**bold**";

        assert_eq!(render_markdown(source), render_markdown(source));
    }

    #[test]
    fn test_render_empty_source() {
        assert_eq!(render_markdown(""), "");
    }
}
