use std::time::Duration;

use partner_scout::config::ScrapeConfig;
use partner_scout::engine::pipeline::ScrapeRun;
use partner_scout::engine::profile_cache::ProfileCache;
use partner_scout::network::source::InMemorySource;
use partner_scout::persistence::export::{read_csv, write_csv};
use partner_scout::persistence::assembler::normalize_rows;
use partner_scout::persistence::record::Tier;

// * End-to-end runs against canned listing and profile pages

const ACME_URL: &str = "https://www.odoo.com/partners/acme-corp-1";
const BETA_URL: &str = "https://www.odoo.com/partners/beta-ltd-2";
const GONE_URL: &str = "https://www.odoo.com/partners/gone-3";

fn listing(rows: &[(&str, &str)]) -> String {
    let anchors: String = rows
        .iter()
        .map(|(href, body)| format!(r#"<a href="{href}">{body}</a>"#))
        .collect();
    format!("<html><body><nav><a href=\"/partners\">Find Best Match Gold</a></nav>{anchors}</body></html>")
}

fn acme_row() -> (&'static str, &'static str) {
    (
        "/partners/acme-corp-1",
        "<h4>Acme Corp</h4><span>Gold</span><span>12 References</span>\
         <span>5 Certified Experts</span><span>40 %</span><span>Springfield, </span>\
         <span>Average Project: $5k</span>",
    )
}

fn acme_profile() -> &'static str {
    r#"<html><body>
        <p>2 Certified v17</p><p>1 Certified v18</p><p>1 Certified v17</p>
        <section><h3>References - 3</h3>
            <ul><li>Agriculture 2</li><li>Education 1</li></ul>
        </section>
        <section><h3>Customer Retention</h3><span>85%</span></section>
        <section><h3>References Sizes</h3>
            <p>Largest: ~50+ users</p><p>Average: ~10+ users</p>
        </section>
    </body></html>"#
}

fn config(end: u32) -> ScrapeConfig {
    ScrapeConfig {
        page_start: 1,
        page_end: end,
        page_delay: Duration::ZERO,
        profile_concurrency: 4,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_listing_and_profile_merge_into_table() {
    let source = InMemorySource::new()
        .with_page(1, listing(&[acme_row()]))
        .with_profile(ACME_URL, acme_profile());

    let cache = ProfileCache::new();
    let outcome = ScrapeRun::new(config(1)).run(&source, &cache).await;
    assert_eq!(outcome.stats.pages_fetched, 1);
    assert_eq!(outcome.stats.drafts, 1);

    let table = outcome.into_table();
    assert_eq!(table.len(), 1);

    let acme = &table.records()[0];
    assert_eq!(acme.name, "Acme Corp");
    assert_eq!(acme.tier, Tier::Gold);
    assert_eq!(acme.location, "Springfield");
    assert_eq!(acme.references, 12);
    assert_eq!(acme.certified_experts, 5);
    assert_eq!(acme.profile_url, ACME_URL);
    assert_eq!(acme.references_total, Some(3));
    assert_eq!(acme.customer_retention, Some(85));
    assert_eq!(acme.largest_reference_users, Some(50));
    assert_eq!(acme.average_reference_users, Some(10));
    assert_eq!(acme.reference_industries, "Agriculture 2 Education 1");
    assert_eq!(acme.industries.get("Agriculture"), Some(2));
    assert_eq!(acme.industries.get("Education"), Some(1));
    assert_eq!(acme.industries.total(), 3);

    let versions: Vec<(u32, u64)> = acme
        .certified_versions
        .iter()
        .map(|v| (v.version, v.count))
        .collect();
    assert_eq!(versions, vec![(18, 1), (17, 3)]);
}

#[tokio::test]
async fn test_missing_pages_and_profiles_degrade() {
    let source = InMemorySource::new()
        .with_page(
            1,
            listing(&[
                acme_row(),
                ("/partners/gone-3", "Gone Inc Ready 2 References 10 % Rome Average Project: 1k"),
            ]),
        )
        // * page 2 is missing
        .with_page(3, listing(&[("https://elsewhere.test/x", "Loose Silver 4 References")]))
        .with_profile(ACME_URL, acme_profile());

    let cache = ProfileCache::new();
    let outcome = ScrapeRun::new(config(3)).run(&source, &cache).await;

    assert_eq!(outcome.stats.pages_fetched, 2);
    assert_eq!(outcome.stats.pages_failed, 1);
    assert_eq!(outcome.stats.profile_failures, 1);
    assert_eq!(outcome.stats.drafts_without_profile, 1);

    let table = outcome.into_table();
    let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Acme Corp", "Gone Inc", "Loose"]);

    let gone = &table.records()[1];
    assert_eq!(gone.profile_url, GONE_URL);
    assert_eq!(gone.references_total, None);
    assert!(gone.industries.is_all_zero());
    assert_eq!(gone.industries.len(), 22);

    let loose = &table.records()[2];
    assert_eq!(loose.profile_url, "");
    assert_eq!(loose.location, "N/A");
}

#[tokio::test]
async fn test_shared_profile_fetched_once() {
    let beta_rows = [
        ("/partners/beta-ltd-2", "Beta Ltd Silver 3 References 50 % Oslo Average Project: 2k"),
        ("/partners/beta-ltd-2#reviews", "Beta Ltd Silver 3 References 50 % Bergen Average Project: 2k"),
    ];
    let source = InMemorySource::new()
        .with_page(1, listing(&beta_rows))
        .with_page(2, listing(&beta_rows[..1]))
        .with_profile(BETA_URL, "<h3>References - 1</h3><p>1 NGO</p>")
        .with_latency(Duration::from_millis(20));

    let cache = ProfileCache::new();
    let outcome = ScrapeRun::new(config(2)).run(&source, &cache).await;

    assert_eq!(source.profile_hits(BETA_URL), 1);
    assert_eq!(outcome.stats.profile_fetches, 1);
    assert_eq!(outcome.stats.profile_cache_hits, 2);
    assert!(outcome
        .drafts
        .iter()
        .all(|d| d.extras.industries.get("NGO") == Some(1)));

    // * Oslo repeats on page 2 and collapses; Bergen is a different key
    let table = outcome.into_table();
    let locations: Vec<&str> = table.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(locations, vec!["Oslo", "Bergen"]);
}

#[tokio::test]
async fn test_exported_csv_reimports_unchanged() {
    let source = InMemorySource::new()
        .with_page(
            1,
            listing(&[
                acme_row(),
                ("/partners/beta-ltd-2", "Beta Ltd Silver 3 References 50 % Oslo Average Project: 2k"),
            ]),
        )
        .with_profile(ACME_URL, acme_profile())
        .with_profile(BETA_URL, "<h3>References - 1</h3><p>1 NGO</p>");

    let cache = ProfileCache::new();
    let table = ScrapeRun::new(config(1)).run(&source, &cache).await.into_table();

    let mut buf = Vec::new();
    write_csv(&table, &mut buf).unwrap();
    let reimported = normalize_rows(read_csv(buf.as_slice()).unwrap());

    assert_eq!(reimported, table);
}
