//! Plain-text projection of the backend homepage fragment.
//!
//! The homepage arrives as raw markup from the backend. Rather than trust it
//! verbatim, the UI only ever displays the output of [`plain_text`]: tags
//! stripped, script/style contents dropped, common entities decoded and
//! whitespace collapsed.

/// Reduce a markup fragment to displayable plain text.
pub fn plain_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        text.push(' ');

        let tail = &rest[open + 1..];
        let Some(close) = tail.find('>') else {
            // dangling '<' with no closing '>': nothing renderable remains
            rest = "";
            break;
        };
        let tag = tail[..close].trim();
        rest = &tail[close + 1..];

        // script and style bodies are not content; skip to the closing tag
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '>')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        if !tag.starts_with('/') && (name == "script" || name == "style") {
            let closer = format!("</{name}");
            match rest.to_ascii_lowercase().find(&closer) {
                Some(end) => rest = &rest[end..],
                None => {
                    rest = "";
                    break;
                }
            }
        }
    }
    text.push_str(rest);

    let decoded = decode_entities(&text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

// `&amp;` last, so it cannot manufacture new entities
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_keeps_text() {
        assert_eq!(
            plain_text("<h1>Featured</h1><p>MSFT is <b>up</b> today</p>"),
            "Featured MSFT is up today"
        );
    }

    #[test]
    fn drops_script_and_style_bodies() {
        assert_eq!(
            plain_text("<p>hi</p><script>alert('xss')</script><style>p{}</style>bye"),
            "hi bye"
        );
        assert_eq!(plain_text("<SCRIPT>evil()</SCRIPT>ok"), "ok");
    }

    #[test]
    fn decodes_common_entities() {
        assert_eq!(plain_text("Fish &amp; Chips &lt;daily&gt;"), "Fish & Chips <daily>");
        assert_eq!(plain_text("it&#39;s&nbsp;fine"), "it's fine");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(plain_text("a\n\n   b\t c"), "a b c");
    }

    #[test]
    fn tolerates_malformed_markup() {
        assert_eq!(plain_text("text <unclosed"), "text");
        assert_eq!(plain_text("<script>never closed"), "");
        assert_eq!(plain_text(""), "");
    }
}
