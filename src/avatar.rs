//! Avatar images. Fetching is best effort: any failure leaves the
//! placeholder in place and is only logged.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client as HttpClient;
use url::Url;

use crate::error::{ChatError, Result};

/// Largest avatar body we are willing to buffer.
pub const MAX_AVATAR_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AvatarLoader {
    http: HttpClient,
    limit: u64,
}

impl AvatarLoader {
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self::with_client(http, MAX_AVATAR_BYTES))
    }

    pub fn with_client(http: HttpClient, limit: u64) -> Self {
        Self { http, limit }
    }

    /// Downloads the raw image bytes behind `url`, giving up as soon as the
    /// body is known to exceed the size limit.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChatError::AvatarScheme(url.clone()));
        }
        let mut resp = self.http.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(ChatError::AvatarStatus(resp.status().as_u16()));
        }
        if resp.content_length().is_some_and(|len| len > self.limit) {
            return Err(ChatError::AvatarTooLarge { limit: self.limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            if (body.len() + chunk.len()) as u64 > self.limit {
                return Err(ChatError::AvatarTooLarge { limit: self.limit });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSlot<T> {
    Pending,
    Ready(T),
    Failed,
}

/// Decoded avatars keyed by URL, so each image is fetched once per run.
#[derive(Debug, Clone)]
pub struct AvatarCache<T> {
    slots: HashMap<Url, AvatarSlot<T>>,
}

impl<T> Default for AvatarCache<T> {
    fn default() -> Self {
        Self { slots: HashMap::new() }
    }
}

impl<T> AvatarCache<T> {
    /// Marks `url` as pending. Returns false if it was already requested.
    pub fn request(&mut self, url: &Url) -> bool {
        if self.slots.contains_key(url) {
            return false;
        }
        self.slots.insert(url.clone(), AvatarSlot::Pending);
        true
    }

    pub fn resolve(&mut self, url: &Url, image: Option<T>) {
        let slot = match image {
            Some(img) => AvatarSlot::Ready(img),
            None => AvatarSlot::Failed,
        };
        self.slots.insert(url.clone(), slot);
    }

    pub fn ready(&self, url: &Url) -> Option<&T> {
        match self.slots.get(url) {
            Some(AvatarSlot::Ready(img)) => Some(img),
            _ => None,
        }
    }

    pub fn slot(&self, url: &Url) -> Option<&AvatarSlot<T>> {
        self.slots.get(url)
    }
}
