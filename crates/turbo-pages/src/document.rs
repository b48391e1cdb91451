//! Server-rendered HTML document carrying the page envelope.
//!
//! The root element holds the escaped envelope in `data-page` so the
//! client transport can hydrate page state from the served document.

use html_escape::decode_html_entities;

use crate::config::PagesConfig;
use crate::envelope::PageEnvelope;
use crate::error::PageError;
use crate::view::ViewTree;

/// Generate the HTML shell for a bound page.
pub fn render_document(
    tree: &ViewTree,
    envelope: &PageEnvelope,
    config: &PagesConfig,
) -> Result<String, PageError> {
    let css_link = config
        .css_path
        .as_deref()
        .map(|p| format!(r#"<link rel="stylesheet" href="{}">"#, escape_html(p)))
        .unwrap_or_default();
    let data_page = envelope.to_data_attribute()?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    {css_link}
    <title>{title}</title>
</head>
<body>
    <div id="{root}" data-component="{component}" data-page="{data_page}"></div>
</body>
</html>"#,
        css_link = css_link,
        title = escape_html(&config.title),
        root = escape_html(&config.root_element_id),
        component = escape_html(&tree.component),
        data_page = data_page,
    ))
}

/// Read the page envelope back out of a served document.
///
/// The root is the first opening tag whose `id` attribute equals
/// `root_element_id`; its `data-page` may appear anywhere in that tag.
pub fn extract_envelope(html: &str, root_element_id: &str) -> Result<PageEnvelope, PageError> {
    let attributes = find_root_tag(html, root_element_id).ok_or_else(|| {
        PageError::Envelope(format!("Root element #{} not found", root_element_id))
    })?;

    let data_page = attributes
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("data-page"))
        .map(|(_, value)| *value)
        .ok_or_else(|| PageError::Envelope("Root element has no data-page attribute".to_string()))?;

    PageEnvelope::from_data_attribute(data_page)
}

/// Attributes of the first opening tag with a matching `id`.
fn find_root_tag<'a>(html: &'a str, root_element_id: &str) -> Option<Vec<(&'a str, &'a str)>> {
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];
        if let Some(comment) = rest.strip_prefix("!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }

        let end = tag_end(rest)?;
        let attributes = tag_attributes(&rest[..end]);
        let is_root = attributes.iter().any(|(name, value)| {
            name.eq_ignore_ascii_case("id") && decode_html_entities(value) == root_element_id
        });
        if is_root {
            return Some(attributes);
        }
        rest = &rest[end + 1..];
    }
    None
}

/// Offset of the `>` closing a tag, skipping quoted attribute values.
fn tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, byte) in tag.bytes().enumerate() {
        match (quote, byte) {
            (None, b'"' | b'\'') => quote = Some(byte),
            (Some(q), _) if q == byte => quote = None,
            (None, b'>') => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split the text between `<` and `>` into `(name, raw value)` pairs.
fn tag_attributes(tag: &str) -> Vec<(&str, &str)> {
    let bytes = tag.as_bytes();
    let skip_whitespace = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    let mut attributes = Vec::new();
    let mut i = bytes
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b'/' {
            i += 1;
            continue;
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && bytes[i] != b'='
            && bytes[i] != b'/'
        {
            i += 1;
        }
        let name = &tag[name_start..i];

        i = skip_whitespace(i);
        if bytes.get(i) != Some(&b'=') {
            attributes.push((name, ""));
            continue;
        }
        i = skip_whitespace(i + 1);

        let value = match bytes.get(i) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let start = i + 1;
                let end = tag[start..]
                    .find(quote as char)
                    .map_or(bytes.len(), |offset| start + offset);
                i = end + 1;
                &tag[start..end]
            }
            _ => {
                let start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &tag[start..i]
            }
        };
        attributes.push((name, value));
    }
    attributes
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn envelope() -> PageEnvelope {
        let props = match json!({ "unique_permalink": "a<b>&\"c\"", "count": 2 }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        PageEnvelope::new("Products/Edit", props).with_url("/products/abc/edit")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_decode_reverses_escape() {
        let text = r#"Tom & "Jerry" <'s> &amp; literal"#;
        assert_eq!(decode_html_entities(&escape_html(text)), text);
    }

    #[test]
    fn test_render_document_shell() {
        let tree = ViewTree::component("ProductEditPage", Map::new());
        let config = PagesConfig::new("Shop")
            .with_title("Edit <product>")
            .with_css("/pkg/style.css");

        let html = render_document(&tree, &envelope(), &config).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Edit &lt;product&gt;</title>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="/pkg/style.css">"#));
        assert!(html.contains(r#"<div id="app" data-component="ProductEditPage" data-page=""#));
    }

    #[test]
    fn test_render_document_without_css() {
        let tree = ViewTree::component("ProductEditPage", Map::new());
        let html = render_document(&tree, &envelope(), &PagesConfig::default()).unwrap();
        assert!(!html.contains("stylesheet"));
    }

    #[test]
    fn test_extract_envelope_from_rendered_document() {
        let tree = ViewTree::component("ProductEditPage", Map::new());
        let config = PagesConfig::default().with_root_element("root");
        let html = render_document(&tree, &envelope(), &config).unwrap();

        let extracted = extract_envelope(&html, "root").unwrap();
        assert_eq!(extracted, envelope());
    }

    #[test]
    fn test_extract_envelope_missing_root() {
        let result = extract_envelope("<html><body></body></html>", "app");
        assert!(matches!(result, Err(PageError::Envelope(_))));
    }

    #[test]
    fn test_extract_envelope_missing_attribute() {
        let result = extract_envelope(r#"<div id="app"></div>"#, "app");
        assert!(matches!(result, Err(PageError::Envelope(_))));
    }

    // === Root Lookup Tests ===

    #[test]
    fn test_extract_envelope_skips_lookalike_attribute() {
        let html = r#"<body><nav data-testid="app">menu</nav><div id="app" data-page="{&quot;component&quot;:&quot;Products/Edit&quot;,&quot;props&quot;:{}}"></div></body>"#;

        let extracted = extract_envelope(html, "app").unwrap();
        assert_eq!(extracted.component.as_str(), "Products/Edit");
    }

    #[test]
    fn test_extract_envelope_lookalike_without_root() {
        let html = r#"<nav data-testid="app" data-page="{}"></nav>"#;
        let err = extract_envelope(html, "app").unwrap_err();
        assert!(matches!(err, PageError::Envelope(ref msg) if msg == "Root element #app not found"));
    }

    #[test]
    fn test_extract_envelope_data_page_before_id() {
        let html = r#"<main data-page='{"component":"Products/Edit","props":{"id":"abc"}}' class="shell" id='app'></main>"#;

        let extracted = extract_envelope(html, "app").unwrap();
        assert_eq!(extracted.props.get("id"), Some(&json!("abc")));
    }

    #[test]
    fn test_extract_envelope_ignores_markup_in_values_and_comments() {
        let html = concat!(
            r#"<!-- <div id="app" data-page="{}"> -->"#,
            r##"<a title="x > y" href="#app">skip</a>"##,
            r#"<div class="a" id="app" data-page="{&quot;component&quot;:&quot;Products/Edit&quot;,&quot;props&quot;:{&quot;n&quot;:1}}"></div>"#,
        );

        let extracted = extract_envelope(html, "app").unwrap();
        assert_eq!(extracted.props.get("n"), Some(&json!(1)));
    }

    // === Entity Decoding Tests ===

    #[test]
    fn test_extract_envelope_numeric_entities() {
        let html = r#"<div id="app" data-page="{&#34;component&#34;:&#34;Products/Edit&#34;,&#34;props&#34;:{&#34;name&#34;:&#34;Tom&#039;s&#34;,&#34;note&#34;:&#34;&#x27;hi&#x27; &#x3c;b&#x3e;&#34;}}"></div>"#;

        let extracted = extract_envelope(html, "app").unwrap();
        assert_eq!(extracted.component.as_str(), "Products/Edit");
        assert_eq!(extracted.props.get("name"), Some(&json!("Tom's")));
        assert_eq!(extracted.props.get("note"), Some(&json!("'hi' <b>")));
    }

    #[test]
    fn test_extract_envelope_decodes_root_id() {
        let html = r#"<div id="app&#45;root" data-page="{&#34;component&#34;:&#34;Products/Edit&#34;,&#34;props&#34;:{}}"></div>"#;
        assert!(extract_envelope(html, "app-root").is_ok());
    }
}
