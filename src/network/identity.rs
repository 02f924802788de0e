use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};

use crate::network::errors::NetworkError;

// * BrowserHeaders is the static header set sent with every request.
pub struct BrowserHeaders {
    pub chrome_version: &'static str,
    pub user_agent: String,
    pub accept: &'static str,
    pub accept_language: &'static str,
}

impl BrowserHeaders {
    // * Desktop Chrome 122 on Windows, the profile the directory serves full markup to.
    pub fn desktop_chrome() -> Self {
        let major_version = "122";

        Self {
            chrome_version: major_version,
            user_agent: format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0 Safari/537.36",
                major_version
            ),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            accept_language: "en-US,en;q=0.9",
        }
    }

    // * Applies the header set to a mutable HeaderMap.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> Result<(), NetworkError> {
        let ua = HeaderValue::from_str(&self.user_agent)
            .map_err(|_| NetworkError::InvalidHeader("User-Agent"))?;
        headers.insert(USER_AGENT, ua);
        headers.insert(ACCEPT, HeaderValue::from_static(self.accept));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(self.accept_language));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        Ok(())
    }

    pub fn to_header_map(&self) -> Result<HeaderMap, NetworkError> {
        let mut headers = HeaderMap::new();
        self.apply_to_headers(&mut headers)?;
        Ok(headers)
    }
}

impl Default for BrowserHeaders {
    fn default() -> Self {
        Self::desktop_chrome()
    }
}
