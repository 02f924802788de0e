// * Profile Extractor
// * Reads certified versions, reference statistics and reference industries
// * from a partner profile page.
// *
// * Two phases:
// * 1. Locate landmark phrases in the normalized text.
// * 2. Run each field matcher only on the slice its landmark bounds.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use crate::refinery::catalog::{catalog, is_word_char, IndustryCounts};
use crate::refinery::text::{normalize, visible_text};

static PATTERN_CERTIFIED_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([0-9]+)\s+Certified\s+v([0-9]+)\b").expect("Invalid certified version regex")
});

static PATTERN_REFERENCES_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bReferences\s*-\s*([0-9]+)\b").expect("Invalid references total regex")
});

static PATTERN_RETENTION_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bCustomer\s+Retention\b").expect("Invalid retention anchor regex")
});

static PATTERN_RETENTION_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{1,3})\s*%?\b").expect("Invalid retention value regex")
});

static PATTERN_SIZES_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bReferences\s+Sizes\b").expect("Invalid sizes anchor regex")
});

static PATTERN_LARGEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bLargest:\s*~?\s*([0-9]+)\s*\+?\s*users?\b").expect("Invalid largest regex")
});

static PATTERN_AVERAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bAverage:\s*~?\s*([0-9]+)\s*\+?\s*users?\b").expect("Invalid average regex")
});

// * Any of these ends the reference-industries block
static PATTERN_STOP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bReferences\s+Sizes\b|\bCustomer\s+Retention\b|\bCertified\s+Experts?\b|\bAverage\s+Project\b|\bIndustries\b|\bAbout\b|\bGold\b|\bSilver\b|\bReady\b",
    )
    .expect("Invalid stop marker regex")
});

// * Industry counts are at most six digits
const MAX_COUNT_DIGITS: usize = 6;

/// Certified consultants for one Odoo version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCount {
    pub version: u32,
    pub count: u64,
}

/// Renders versions as `v19:1; v18:4`
pub fn render_versions(versions: &[VersionCount]) -> String {
    versions
        .iter()
        .map(|v| format!("v{}:{}", v.version, v.count))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses the `v19:1; v18:4` rendering back. Malformed parts are skipped.
pub fn parse_versions(rendered: &str) -> Vec<VersionCount> {
    rendered
        .split(';')
        .filter_map(|part| {
            let (version, count) = part.trim().strip_prefix('v')?.split_once(':')?;
            Some(VersionCount {
                version: version.trim().parse().ok()?,
                count: count.trim().parse().ok()?,
            })
        })
        .collect()
}

/// Everything a profile page contributes to a partner record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileExtras {
    /// Descending by version
    pub certified_versions: Vec<VersionCount>,
    pub references_total: Option<u64>,
    /// Not range-checked; values above 100 pass through
    pub customer_retention: Option<u32>,
    pub largest_reference_users: Option<u64>,
    pub average_reference_users: Option<u64>,
    pub industries: IndustryCounts,
    /// Matched industries in first-seen order
    pub industry_order: Vec<&'static str>,
}

impl ProfileExtras {
    pub fn certified_versions_display(&self) -> String {
        render_versions(&self.certified_versions)
    }

    /// `"<label> <count>"` pairs in first-seen order
    pub fn reference_industries_display(&self) -> String {
        self.industry_order
            .iter()
            .map(|label| format!("{} {}", label, self.industries.get(label).unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// * Phase 1 output: where each landmark sits in the text
#[derive(Debug, Default)]
struct Landmarks<'t> {
    references_total: Option<(Range<usize>, &'t str)>,
    retention_end: Option<usize>,
    sizes_end: Option<usize>,
}

impl<'t> Landmarks<'t> {
    fn locate(text: &'t str) -> Self {
        let references_total = PATTERN_REFERENCES_TOTAL.captures(text).and_then(|caps| {
            let whole = caps.get(0)?;
            let digits = caps.get(1)?;
            Some((whole.range(), digits.as_str()))
        });

        Self {
            references_total,
            retention_end: PATTERN_RETENTION_ANCHOR.find(text).map(|m| m.end()),
            sizes_end: PATTERN_SIZES_ANCHOR.find(text).map(|m| m.end()),
        }
    }
}

/// Extracts profile extras from a raw profile page
pub fn extract_from_html(html: &str) -> ProfileExtras {
    extract(&visible_text(html))
}

/// Extracts profile extras from profile text. Misses fall back to defaults.
pub fn extract(profile_text: &str) -> ProfileExtras {
    let text = normalize(profile_text);
    let landmarks = Landmarks::locate(&text);

    let mut extras = ProfileExtras {
        certified_versions: certified_versions(&text),
        ..Default::default()
    };

    if let Some(start) = landmarks.retention_end {
        extras.customer_retention = capture_number_at(&PATTERN_RETENTION_VALUE, &text, start);
    }

    if let Some(start) = landmarks.sizes_end {
        extras.largest_reference_users = capture_number_at(&PATTERN_LARGEST, &text, start);
        extras.average_reference_users = capture_number_at(&PATTERN_AVERAGE, &text, start);
    }

    // * Industries only exist relative to the "References - N" anchor
    let Some((total_span, total_digits)) = landmarks.references_total else {
        return extras;
    };
    // * An unreadable total means the anchor is not trusted for industries either
    let Ok(total) = total_digits.parse::<u64>() else {
        return extras;
    };
    extras.references_total = Some(total);

    let block = industry_block(&text, total_span.end);
    let pairs = pair_industries(block);

    for (idx, count) in pairs {
        let label = catalog().entries()[idx].label;
        match extras.industries.get_at(idx) {
            Some(existing) if extras.industry_order.contains(&label) => {
                // ? Max rather than sum: repeated labels are treated as overlapping matches
                extras.industries.set_at(idx, existing.max(count));
            }
            _ => {
                extras.industry_order.push(label);
                extras.industries.set_at(idx, count);
            }
        }
    }

    tracing::trace!(
        references_total = ?extras.references_total,
        industries = extras.industry_order.len(),
        "Profile extracted"
    );

    extras
}

fn certified_versions(text: &str) -> Vec<VersionCount> {
    let mut per_version: BTreeMap<u32, u64> = BTreeMap::new();

    for caps in PATTERN_CERTIFIED_VERSION.captures_iter(text) {
        let (Some(count), Some(version)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let (Ok(count), Ok(version)) = (count.as_str().parse::<u64>(), version.as_str().parse::<u32>())
        else {
            continue;
        };
        *per_version.entry(version).or_insert(0) += count;
    }

    per_version
        .into_iter()
        .rev()
        .map(|(version, count)| VersionCount { version, count })
        .collect()
}

fn capture_number_at<T: std::str::FromStr>(pattern: &Regex, text: &str, start: usize) -> Option<T> {
    pattern
        .captures_at(text, start)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

// * Tail after the references anchor, cut at the first stop marker
fn industry_block(text: &str, start: usize) -> &str {
    let end = PATTERN_STOP_MARKER
        .find_at(text, start)
        .map(|m| m.start())
        .unwrap_or(text.len());
    text[start..end].trim()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Count(u32),
    Industry(usize),
}

#[derive(Debug, Clone, Copy)]
struct Spanned {
    token: Token,
    start: usize,
    end: usize,
}

// * Splits a block into counts and catalog labels, skipping everything else.
// * Tokens only start on a word boundary; labels are matched longest first.
fn tokenize(block: &str) -> Vec<Spanned> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = block[pos..].chars().next() {
        let at_boundary = block[..pos].chars().next_back().map_or(true, |prev| !is_word_char(prev));

        if at_boundary && !ch.is_whitespace() {
            let rest = &block[pos..];
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();

            if digits > 0 {
                let followed_by_word = rest[digits..].chars().next().is_some_and(is_word_char);
                if digits <= MAX_COUNT_DIGITS && !followed_by_word {
                    if let Ok(count) = rest[..digits].parse() {
                        tokens.push(Spanned {
                            token: Token::Count(count),
                            start: pos,
                            end: pos + digits,
                        });
                    }
                }
                pos += digits;
                continue;
            }

            if let Some(idx) = catalog().match_prefix(rest) {
                let len = catalog().entries()[idx].label.len();
                tokens.push(Spanned {
                    token: Token::Industry(idx),
                    start: pos,
                    end: pos + len,
                });
                pos += len;
                continue;
            }
        }

        pos += ch.len_utf8();
    }

    tokens
}

// * Pairs adjacent count/label tokens separated only by whitespace.
// * `count_first` selects "<n> <label>" versus "<label> <n>".
fn pair_tokens(block: &str, tokens: &[Spanned], count_first: bool) -> Vec<(usize, u32)> {
    let mut pairs = Vec::new();
    let mut i = 0;

    while i + 1 < tokens.len() {
        let (a, b) = (tokens[i], tokens[i + 1]);
        let gap = &block[a.end..b.start];
        let separated = !gap.is_empty() && gap.chars().all(char::is_whitespace);

        let pair = match (a.token, b.token) {
            (Token::Count(n), Token::Industry(idx)) if count_first => Some((idx, n)),
            (Token::Industry(idx), Token::Count(n)) if !count_first => Some((idx, n)),
            _ => None,
        };

        match pair {
            Some(pair) if separated => {
                pairs.push(pair);
                i += 2;
            }
            _ => i += 1,
        }
    }

    pairs
}

// * Profiles list either "<n> <label>" or "<label> <n>"; the layout that
// * explains more of the block wins, ties go to count-first.
fn pair_industries(block: &str) -> Vec<(usize, u32)> {
    let tokens = tokenize(block);
    let count_first = pair_tokens(block, &tokens, true);
    let label_first = pair_tokens(block, &tokens, false);

    if label_first.len() > count_first.len() {
        label_first
    } else {
        count_first
    }
}
