use pulldown_cmark::{Event, Options, Parser, escape::escape_html, html};

/// Renders model output (CommonMark with GFM tables, strikethrough and task
/// lists) to HTML. Raw HTML in the input is escaped and shown as text.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

/// HTML-escapes plain text
pub fn escape_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    // writing into a String cannot fail
    let _ = escape_html(&mut output, text);
    output
}
