// * Text projection and whitespace canonicalisation.
// * Every matcher in the refinery runs on text produced here, so pattern
// * positions never depend on how the source HTML was indented.

use scraper::{ElementRef, Html};

// * Elements whose text never renders
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Collapses every whitespace run to a single space and trims both ends
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element: text nodes trimmed, empties skipped, joined by spaces
pub fn element_text(element: ElementRef<'_>) -> String {
    let parts: Vec<&str> = element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect();

    normalize(&parts.join(" "))
}

/// Normalized visible text of a whole document
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    element_text(document.root_element())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("  Acme \n\t Corp   Gold  "), "Acme Corp Gold");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("a\u{00a0} b\r\n c");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_visible_text_joins_nodes() {
        let html = r#"
            <html><body>
                <h1>Acme</h1><span>Gold</span>
                <p>12
                   References</p>
            </body></html>
        "#;
        assert_eq!(visible_text(html), "Acme Gold 12 References");
    }

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let html = r#"
            <html><head><style>.x { color: red }</style></head>
            <body><script>var Gold = 1;</script><p>Visible</p></body></html>
        "#;
        assert_eq!(visible_text(html), "Visible");
    }
}
