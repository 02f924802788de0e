use partner_scout::network::identity::BrowserHeaders;
use reqwest::header::HeaderMap;

#[test]
fn test_desktop_chrome_structure() {
    let profile = BrowserHeaders::desktop_chrome();
    assert_eq!(profile.chrome_version, "122");
    assert!(profile.user_agent.contains("Chrome/122.0"));
    assert!(profile.user_agent.starts_with("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"));
}

#[test]
fn test_apply_to_headers_integrity() {
    let profile = BrowserHeaders::desktop_chrome();
    let mut headers = HeaderMap::new();
    profile.apply_to_headers(&mut headers).unwrap();

    let ua = headers.get("User-Agent").unwrap().to_str().unwrap();
    assert_eq!(ua, profile.user_agent);

    assert_eq!(headers.get("Accept-Language").unwrap(), "en-US,en;q=0.9");
    assert_eq!(headers.get("Connection").unwrap(), "keep-alive");
    assert!(headers
        .get("Accept")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
}

#[test]
fn test_header_map_has_four_entries() {
    let headers = BrowserHeaders::default().to_header_map().unwrap();
    assert_eq!(headers.len(), 4);
}
