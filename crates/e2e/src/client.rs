//! HTTP client for the `/pet` collection

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use petstore_common::{Error, Pet, Result, SuiteConfig};

/// One request/response pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub method: String,
    pub path: String,
    pub request_body: Option<String>,
    pub status: u16,
    pub response_body: String,
    pub duration_ms: u64,
}

impl Exchange {
    /// `POST /pet`, `GET /pet/2`, ...
    pub fn step(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Decode the response body as a pet
    pub fn pet(&self) -> Result<Pet> {
        serde_json::from_str(&self.response_body).map_err(Error::from)
    }

    /// Fail unless the status equals `expected`
    pub fn expect_status(&self, expected: u16) -> Result<&Self> {
        if self.status != expected {
            return Err(Error::UnexpectedStatus {
                step: self.step(),
                expected,
                actual: self.status,
                body: self.response_body.clone(),
            });
        }
        Ok(self)
    }

    /// Fail unless the body decodes to a pet equal to `expected`
    pub fn expect_pet(&self, expected: &Pet) -> Result<&Self> {
        let actual = self.pet()?;
        if &actual != expected {
            return Err(Error::BodyMismatch {
                step: self.step(),
                expected: format!("{:?}", expected),
                actual: format!("{:?}", actual),
            });
        }
        Ok(self)
    }
}

/// Client for a pet-store service root such as `https://petstore.swagger.io/v2`
#[derive(Debug, Clone)]
pub struct PetStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl PetStoreClient {
    /// Create a client with the HTTP library's default timeouts
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn from_config(config: &SuiteConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::InvalidUrl(base_url.to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /pet`
    pub async fn create(&self, pet: &Pet) -> Result<Exchange> {
        self.send(Method::POST, "/pet".to_string(), Some(pet)).await
    }

    /// `GET /pet/{id}`
    pub async fn get(&self, id: i64) -> Result<Exchange> {
        self.send(Method::GET, format!("/pet/{}", id), None).await
    }

    /// `PUT /pet`
    pub async fn update(&self, pet: &Pet) -> Result<Exchange> {
        self.send(Method::PUT, "/pet".to_string(), Some(pet)).await
    }

    /// `DELETE /pet/{id}`
    pub async fn delete(&self, id: i64) -> Result<Exchange> {
        self.send(Method::DELETE, format!("/pet/{}", id), None).await
    }

    async fn send(&self, method: Method, path: String, body: Option<&Pet>) -> Result<Exchange> {
        let url = format!("{}{}", self.base_url, path);
        let request_body = body.map(serde_json::to_string).transpose()?;

        debug!(
            "--> {} {} {}",
            method,
            url,
            request_body.as_deref().unwrap_or("")
        );

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request_body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        // Single attempt; transport errors end the case.
        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let response_body = response.text().await?;
        let duration_ms = started.elapsed().as_millis() as u64;

        debug!(
            "<-- {} {} {} ({} ms) {}",
            status, method, url, duration_ms, response_body
        );

        Ok(Exchange {
            method: method.to_string(),
            path,
            request_body,
            status,
            response_body,
            duration_ms,
        })
    }
}
