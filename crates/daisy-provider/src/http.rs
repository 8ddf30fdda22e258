//! HTTP implementation of [`PlantDataProvider`].

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use daisy_core::{
    config::{ApiKeys, Config},
    Catalog, PlantDataProvider, PlantRecord, ProviderError,
};

use crate::{
    extract::extract_json_array,
    prompt, schema,
    types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageSearchResponse},
};

/// Longest slice of an error body kept in [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Endpoints, model parameters, and credentials for [`HttpProvider`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Full URL of the chat completions endpoint.
    pub completions_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Applied both as the connect timeout and the whole-request timeout.
    pub timeout: Duration,
    /// Full URL of the image-search endpoint.
    pub image_search_url: String,
    pub image_engine: String,
    pub api_key: String,
    /// Image lookups are skipped when this is empty.
    pub image_api_key: String,
}

impl ProviderConfig {
    pub fn from_config(config: &Config, keys: &ApiKeys) -> Self {
        Self {
            completions_url: config.provider.completions_url.clone(),
            model: config.provider.model.clone(),
            max_tokens: config.provider.max_tokens,
            timeout: config.provider_timeout(),
            image_search_url: config.provider.image_search_url.clone(),
            image_engine: config.provider.image_engine.clone(),
            api_key: keys.api_key.clone(),
            image_api_key: keys.s_api_key.clone(),
        }
    }
}

/// Chat-completions plus image-search provider.
pub struct HttpProvider {
    client: Client,
    config: ProviderConfig,
}

impl HttpProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Config(format!("failed to create HTTP client: {e}")))?;

        info!(
            url = %config.completions_url,
            model = %config.model,
            images = !config.image_api_key.is_empty(),
            "provider: initialized"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Send one system prompt and return the first choice's content.
    async fn complete(&self, prompt: String) -> Result<String, ProviderError> {
        if self.config.api_key.trim().is_empty() {
            return Err(ProviderError::Config("API_KEY is not set".to_string()));
        }

        debug!(model = %self.config.model, prompt_len = prompt.len(), "provider: requesting completion");

        let request = ChatCompletionRequest {
            messages: vec![ChatMessage::system(prompt)],
            max_tokens: self.config.max_tokens,
            model: self.config.model.clone(),
        };

        let response = self
            .client
            .post(&self.config.completions_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(floor_char_boundary(&body, MAX_ERROR_BODY));
            return Err(ProviderError::Status { status: status.as_u16(), body });
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::format(format!("completion is not valid JSON: {e}")))?;

        let choices = result
            .choices
            .ok_or_else(|| ProviderError::format("response has no 'choices'"))?;
        let content = choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::format("'choices' is empty"))?
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| ProviderError::format("first choice has no message content"))?;

        debug!(content_len = content.len(), "provider: completion received");
        Ok(content)
    }

    /// Thumbnail for `scientific_name`, or `None` on any failure.
    async fn lookup_image(&self, scientific_name: &str) -> Option<String> {
        let query = prompt::image_query(scientific_name);
        let response = self
            .client
            .get(&self.config.image_search_url)
            .query(&[
                ("engine", self.config.image_engine.as_str()),
                ("q", query.as_str()),
                ("ijn", "0"),
                ("api_key", self.config.image_api_key.as_str()),
            ])
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!(status = %r.status(), %scientific_name, "provider: image search rejected");
                return None;
            }
            Err(e) => {
                warn!(error = %e, %scientific_name, "provider: image search failed");
                return None;
            }
        };

        match response.json::<ImageSearchResponse>().await {
            Ok(body) => body.images_results.into_iter().next().and_then(|r| r.thumbnail),
            Err(e) => {
                warn!(error = %e, %scientific_name, "provider: image search response unreadable");
                None
            }
        }
    }

    async fn synthesize(
        &self,
        catalog: Catalog,
        prompt: String,
    ) -> Result<Vec<PlantRecord>, ProviderError> {
        let content = self.complete(prompt).await?;
        let array = extract_json_array(&content)?;
        let records = schema::parse_records(catalog, array)?;

        if self.config.image_api_key.trim().is_empty() {
            debug!("provider: no image key, skipping thumbnails");
            return Ok(records);
        }

        let mut enriched = Vec::with_capacity(records.len());
        for record in records {
            let url = self.lookup_image(&record.scientific_name).await;
            enriched.push(record.with_image_url(url));
        }
        Ok(enriched)
    }
}

#[async_trait]
impl PlantDataProvider for HttpProvider {
    async fn fetch_by_query(
        &self,
        catalog: Catalog,
        term: &str,
    ) -> Result<Vec<PlantRecord>, ProviderError> {
        info!(%catalog, %term, "provider: fetch by query");
        self.synthesize(catalog, prompt::by_query(catalog, term)).await
    }

    async fn fetch_common(&self, catalog: Catalog) -> Result<Vec<PlantRecord>, ProviderError> {
        info!(%catalog, "provider: fetch common");
        self.synthesize(catalog, prompt::common(catalog)).await
    }
}

fn network_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Network(format!("request timed out: {e}"))
    } else {
        ProviderError::Network(e.to_string())
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
