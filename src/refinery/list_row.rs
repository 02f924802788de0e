// * List-Row Parser
// * Turns one listing anchor's visible text into a partner row draft.
// * Input shape: "<Name> <Tier> ... <n> References ... <n> Certified Experts ... % <Location> Average Project: ..."

use regex::Regex;
use std::sync::LazyLock;

use crate::config::constants::{PLACEHOLDER_NAME, UNKNOWN_LOCATION};
use crate::persistence::record::{PartnerDraft, Tier};
use crate::refinery::text::normalize;

static PATTERN_TIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(Gold|Silver|Ready)\b").expect("Invalid tier regex"));

static PATTERN_REFERENCES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]+)\s+References?\b").expect("Invalid references regex")
});

static PATTERN_EXPERTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]+)\s+Certified Experts?\b").expect("Invalid experts regex")
});

// * Location sits between the rating percentage and the project size
static PATTERN_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)%\s+(.+?)\s+Average Project:").expect("Invalid location regex")
});

/// Cheap pre-filter: non-empty text mentioning a tier keyword
pub fn is_candidate(raw_text: &str) -> bool {
    !raw_text.trim().is_empty() && PATTERN_TIER.is_match(raw_text)
}

/// True for the UI control text that mimics a partner row
pub fn is_placeholder_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(PLACEHOLDER_NAME)
}

/// Parses one anchor's text. `None` means "not a partner row".
pub fn parse_candidate(raw_text: &str) -> Option<PartnerDraft> {
    let text = normalize(raw_text);

    let tier_match = PATTERN_TIER.captures(&text)?;
    let tier_span = tier_match.get(1)?;
    let tier: Tier = tier_span.as_str().parse().ok()?;

    let name = text[..tier_span.start()].trim();
    if name.is_empty() || is_placeholder_name(name) {
        return None;
    }

    let location = PATTERN_LOCATION
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches(|c| c == ' ' || c == ','))
        .unwrap_or(UNKNOWN_LOCATION);

    let references = first_count(&PATTERN_REFERENCES, &text);
    let certified_experts = first_count(&PATTERN_EXPERTS, &text);

    // * Decorative anchors carry a tier word and nothing else
    if location == UNKNOWN_LOCATION && references == "0" && certified_experts == "0" {
        tracing::trace!(text = %text, "Rejected uninformative tier anchor");
        return None;
    }

    Some(PartnerDraft::new(
        name.to_string(),
        tier,
        location.to_string(),
        references,
        certified_experts,
    ))
}

fn first_count(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_row() {
        let text = "Acme Corp Gold 12 References 5 Certified Experts 40 % Springfield Average Project: $5k";
        let draft = parse_candidate(text).expect("partner row");

        assert_eq!(draft.name, "Acme Corp");
        assert_eq!(draft.tier, Tier::Gold);
        assert_eq!(draft.location, "Springfield");
        assert_eq!(draft.references, "12");
        assert_eq!(draft.certified_experts, "5");
        assert!(draft.profile_url.is_empty());
    }

    #[test]
    fn test_no_tier_keyword() {
        assert!(parse_candidate("Acme Corp 12 References").is_none());
        // * Tier keywords are whole, case-sensitive words
        assert!(parse_candidate("Acme Golden 12 References").is_none());
        assert!(parse_candidate("Acme gold 12 References").is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(parse_candidate("Gold 12 References").is_none());
        assert!(parse_candidate("   Silver 3 Certified Experts").is_none());
    }

    #[test]
    fn test_placeholder_rejected() {
        assert!(parse_candidate("Find Best Match Gold 4 References").is_none());
        assert!(parse_candidate("find best match Ready 4 References").is_none());
    }

    #[test]
    fn test_uninformative_anchor_rejected() {
        assert!(parse_candidate("Become a Gold Partner").is_none());
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let draft = parse_candidate("Solo Dev Ready 1 Reference").unwrap();
        assert_eq!(draft.tier, Tier::Ready);
        assert_eq!(draft.location, UNKNOWN_LOCATION);
        assert_eq!(draft.references, "1");
        assert_eq!(draft.certified_experts, "0");

        let draft = parse_candidate("Nordic ERP Silver 80 % Oslo, Norway, Average Project: € 10k").unwrap();
        assert_eq!(draft.location, "Oslo, Norway");
        assert_eq!(draft.references, "0");
    }

    #[test]
    fn test_blank_location_segment_stays_empty() {
        let draft = parse_candidate("Blank Co Silver 90 % , Average Project: 1k").unwrap();
        assert_eq!(draft.location, "");
        assert_eq!(draft.references, "0");
        assert_eq!(draft.certified_experts, "0");
    }

    #[test]
    fn test_first_tier_keyword_wins() {
        let draft = parse_candidate("Silverline Ltd Silver 2 References Gold").unwrap();
        assert_eq!(draft.name, "Silverline Ltd");
        assert_eq!(draft.tier, Tier::Silver);
    }

    #[test]
    fn test_multiline_source_text() {
        let text = "Acme\n   Corp\nGold\n 7 References\n 90 %\n Lyon,\n France\n Average Project: 20k";
        let draft = parse_candidate(text).unwrap();
        assert_eq!(draft.name, "Acme Corp");
        assert_eq!(draft.location, "Lyon, France");
        assert_eq!(draft.references, "7");
    }

    #[test]
    fn test_is_candidate() {
        assert!(is_candidate("Acme Gold"));
        assert!(!is_candidate(""));
        assert!(!is_candidate("Contact us"));
    }
}
