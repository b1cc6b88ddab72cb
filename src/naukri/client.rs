use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::naukri::source::PageSource;
use crate::naukri::throttle::PageThrottle;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fetches search results pages over HTTP.
pub struct NaukriClient {
    client: Client,
    throttle: PageThrottle,
    page_delay: Duration,
    base_url: String,
    role_slug: String,
    max_retries: u32,
}

impl NaukriClient {
    pub fn new(base_url: &str, job_role: &str, page_delay: Duration, max_retries: u32) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert(header::USER_AGENT, header::HeaderValue::from_str(USER_AGENT)?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            throttle: PageThrottle::new(page_delay),
            page_delay,
            base_url: base_url.trim_end_matches('/').to_string(),
            role_slug: role_slug(job_role),
            max_retries,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.job_role,
            config.page_delay(),
            config.max_retries,
        )
    }

    pub fn page_url(&self, page: u32) -> String {
        format!("{}/{}-jobs-{}", self.base_url, self.role_slug, page)
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        self.throttle.wait().await;
        tracing::debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;
        check_status(response, self.page_delay).await?.text().await.map_err(Error::from)
    }
}

#[async_trait]
impl PageSource for NaukriClient {
    async fn fetch_page(&self, page: u32) -> Result<String> {
        let url = self.page_url(page);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Ok(html) => return Ok(html),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = match e {
                        Error::RateLimited(secs) => secs,
                        _ => 2u64.pow(attempt),
                    };
                    tracing::warn!(
                        "Page {} failed ({}), retry {}/{} in {}s",
                        page,
                        e,
                        attempt,
                        self.max_retries,
                        backoff
                    );
                    self.throttle.back_off(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &str {
        "naukri"
    }
}

/// Maps non-2xx responses to errors; a 429 without `Retry-After` waits `page_delay`.
async fn check_status(response: Response, page_delay: Duration) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| page_delay.as_secs());
        return Err(Error::RateLimited(retry_after));
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Http {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    })
}

/// URL path segment for a job role: lowercase, whitespace runs as `-`.
pub fn role_slug(job_role: &str) -> String {
    job_role
        .split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_role_slug() {
        assert_eq!(role_slug("SDET"), "sdet");
        assert_eq!(role_slug("  Data   Engineer "), "data-engineer");
    }

    #[test]
    fn test_page_url() {
        let client = NaukriClient::new("https://www.naukri.com/", "QA Lead", Duration::ZERO, 0).unwrap();
        assert_eq!(client.page_url(0), "https://www.naukri.com/qa-lead-jobs-0");
        assert_eq!(client.page_url(3), "https://www.naukri.com/qa-lead-jobs-3");
    }

    #[tokio::test]
    async fn test_fetch_page_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sdet-jobs-0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = NaukriClient::new(&server.uri(), "SDET", Duration::ZERO, 0).unwrap();
        assert_eq!(client.fetch_page(0).await.unwrap(), "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = NaukriClient::new(&server.uri(), "SDET", Duration::ZERO, 3).unwrap();
        let err = client.fetch_page(0).await.unwrap_err();
        assert!(matches!(err, Error::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_rate_limit_without_retry_after_uses_page_delay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let client = NaukriClient::new(&server.uri(), "SDET", Duration::from_secs(3), 0).unwrap();
        let err = client.fetch_page(0).await.unwrap_err();
        assert!(matches!(err, Error::RateLimited(3)));
    }

    #[tokio::test]
    async fn test_rate_limited_page_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("second"))
            .mount(&server)
            .await;

        let client = NaukriClient::new(&server.uri(), "SDET", Duration::ZERO, 2).unwrap();
        assert_eq!(client.fetch_page(0).await.unwrap(), "second");
    }
}
