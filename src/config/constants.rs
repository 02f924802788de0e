// * Configuration Constants
// * Central location for the site layout, default run bounds and timeouts

// * Site root used to resolve relative profile links
pub const BASE_URL: &str = "https://www.odoo.com";

// * Listing page template, `{}` is replaced by the page number
pub const PAGE_URL_TEMPLATE: &str = "https://www.odoo.com/partners/page/{}?country_all=True";

// * Default inclusive page range
pub const DEFAULT_PAGE_START: u32 = 1;
pub const DEFAULT_PAGE_END: u32 = 188;

// * Delay between successive listing page fetches
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1_000;

// * Delay after each profile fetch (0 = none)
pub const DEFAULT_PROFILE_DELAY_MS: u64 = 0;

// * Profile pages fetched at once for a single listing page
pub const DEFAULT_PROFILE_CONCURRENCY: usize = 1;

// * Per-request network timeout in milliseconds
pub const REQUEST_TIMEOUT_MS: u64 = 30_000;

// * Anchor text that looks like a partner row but is a UI control
pub const PLACEHOLDER_NAME: &str = "Find Best Match";

// * Location value when the listing row carries no location segment
pub const UNKNOWN_LOCATION: &str = "N/A";

// * Prefix for the per-industry output columns
pub const INDUSTRY_COLUMN_PREFIX: &str = "RI_";

// * Default output file stem (extensions are added per format)
pub const DEFAULT_OUTPUT_STEM: &str = "odoo_partners_full_list_clean";
