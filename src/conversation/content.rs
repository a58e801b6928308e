//! Content-safety transforms applied before messages are stored

use pulldown_cmark::{html, Event, Options, Parser};

/// HTML-escape user-supplied text
pub fn sanitize_user_text(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Render an AI reply from markdown to HTML.
///
/// Raw HTML embedded in the reply is emitted as escaped text rather than
/// markup.
pub fn render_ai_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_escapes_markup() {
        assert_eq!(sanitize_user_text("<script>"), "&lt;script&gt;");
        assert_eq!(
            sanitize_user_text("a & b \"quoted\""),
            "a &amp; b &quot;quoted&quot;"
        );
        assert_eq!(sanitize_user_text("plain text"), "plain text");
    }

    #[test]
    fn test_sanitize_leaves_paths_alone() {
        assert_eq!(sanitize_user_text("a/b"), "a/b");
        assert_eq!(
            sanitize_user_text("see src/main.rs and https://x.dev/a?b=1"),
            "see src/main.rs and https://x.dev/a?b=1"
        );
        assert_eq!(sanitize_user_text("it's"), "it&#x27;s");
    }

    #[test]
    fn test_markdown_bold() {
        let html = render_ai_markdown("**bold**");
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_markdown_lists_and_code() {
        let html = render_ai_markdown("- one\n- two\n\n`x = 1`");
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<code>x = 1</code>"));
    }

    #[test]
    fn test_markdown_tables() {
        let html = render_ai_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_in_reply_is_escaped() {
        let html = render_ai_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let block = render_ai_markdown("<div onclick=\"x()\">hi</div>\n");
        assert!(!block.contains("<div"));
    }
}
