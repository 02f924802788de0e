// * Anchor projection for listing pages: visible text plus link target.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::refinery::text::element_text;

static SELECTOR_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("Invalid anchor selector"));

/// One `<a>` element as the listing parser sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

/// Extracts every anchor in document order
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    document
        .select(&SELECTOR_ANCHOR)
        .map(|a| Anchor {
            text: element_text(a),
            href: a.value().attr("href").map(str::to_string),
        })
        .collect()
}
