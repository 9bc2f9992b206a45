// src/integrations/hmall/client.rs
//
// Product page scraper
//
// ARCHITECTURE:
// - Fetches the public product page for a code
// - Extracts {name, brand, price} with regex captures over the HTML
// - Maps external data → plain ProductInfo (NO domain mutation)
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Any failure resolves to None; the core never sees an error from here

use regex::Regex;
use reqwest::blocking::Client;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::integrations::{ProductInfo, ProductInfoProvider};

const DEFAULT_BASE_URL: &str = "https://www.hmall.com/p/pda/itemPtc.do";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36";

/// Rate limiter state
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - Duration::from_secs(60),
            min_interval,
        }
    }

    fn wait_if_needed(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            std::thread::sleep(self.min_interval - elapsed);
        }
        self.last_request = Instant::now();
    }
}

/// Product page client
pub struct HmallClient {
    base_url: String,
    http_client: Client,
    rate_limiter: Mutex<RateLimiter>,
    name_re: Regex,
    brand_re: Regex,
    price_re: Regex,
}

impl HmallClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against an explicit endpoint (tests, mirrors)
    pub fn with_base_url(base_url: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self {
            base_url,
            http_client,
            rate_limiter: Mutex::new(RateLimiter::new(Duration::from_millis(500))),
            // og:title carries "name : brand" on product pages
            name_re: Regex::new(r#"<meta\s+property="og:title"\s+content="([^"]+)""#).unwrap(),
            brand_re: Regex::new(r#""brandNm"\s*:\s*"([^"]*)""#).unwrap(),
            price_re: Regex::new(r#""sellPrc"\s*:\s*"?([0-9]+)"?"#).unwrap(),
        }
    }

    fn fetch_page(&self, code: &str) -> Option<String> {
        {
            let mut limiter = self.rate_limiter.lock().ok()?;
            limiter.wait_if_needed();
        }

        let url = format!("{}?slitmCd={}", self.base_url, code);
        let response = self
            .http_client
            .get(&url)
            .send()
            .map_err(|e| log::warn!("Product page request failed for {}: {}", code, e))
            .ok()?;

        if !response.status().is_success() {
            log::warn!(
                "Product page returned {} for code {}",
                response.status(),
                code
            );
            return None;
        }

        response.text().ok()
    }

    fn extract(&self, html: &str) -> Option<ProductInfo> {
        let raw_title = self.name_re.captures(html)?.get(1)?.as_str().trim();
        if raw_title.is_empty() {
            return None;
        }

        // Strip a trailing " : brand" suffix when the page appends one
        let name = raw_title
            .split(" : ")
            .next()
            .unwrap_or(raw_title)
            .trim()
            .to_string();

        let brand = self
            .brand_re
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        let price = self
            .price_re
            .captures(html)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0);

        Some(ProductInfo { name, brand, price })
    }
}

impl Default for HmallClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductInfoProvider for HmallClient {
    fn resolve(&self, code: &str) -> Option<ProductInfo> {
        if code.trim().is_empty() {
            return None;
        }

        let html = self.fetch_page(code)?;
        let info = self.extract(&html);
        if info.is_none() {
            log::warn!("No product metadata found in page for code {}", code);
        }
        info
    }
}
