use crate::core::history::HistoryFetcher;
use crate::core::series::RateSeries;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Used currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("HTTP error: {status} for currency pair: {base}/{target}")]
    Http {
        status: StatusCode,
        base: String,
        target: String,
    },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse history response: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    rates: HashMap<String, HashMap<String, Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Pulls the currency code out of messages like `Base 'USDA' is not supported.`
/// or `Symbols 'BRLL' are invalid.`
fn unsupported_currency(message: &str) -> Option<String> {
    let rest = message
        .strip_prefix("Base '")
        .or_else(|| message.strip_prefix("Symbols '"))?;
    let (code, tail) = rest.split_once('\'')?;
    matches!(tail, " is not supported." | " are invalid.").then(|| code.to_string())
}

fn parse_rates(body: &str) -> Result<RateSeries, ProviderError> {
    let data: HistoryResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    data.rates
        .into_iter()
        .map(|(date, rates)| {
            NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map(|date| (date, rates))
                .map_err(|e| ProviderError::Parse(format!("invalid date '{date}': {e}")))
        })
        .collect()
}

/// History client for exchangeratesapi.io compatible services.
pub struct ExchangeRatesApiProvider {
    base_url: String,
}

impl ExchangeRatesApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRatesApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn history_url(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        base: &str,
        target: &str,
    ) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/history", self.base_url),
            &[
                ("start_at", start.to_string()),
                ("end_at", end.to_string()),
                ("base", base.to_string()),
                ("symbols", target.to_string()),
            ],
        )
        .with_context(|| format!("Invalid provider URL: {}", self.base_url))
    }
}

#[async_trait]
impl HistoryFetcher for ExchangeRatesApiProvider {
    #[instrument(name = "ExchangeRatesApiHistory", skip(self))]
    async fn fetch(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        base: &str,
        target: &str,
    ) -> Result<RateSeries> {
        let url = self.history_url(start, end, base, target)?;
        debug!("Requesting rate history from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("fxreport/1.0")
            .build()
            .map_err(ProviderError::Request)?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(ProviderError::Request)?;

        let status = response.status();
        let text = response.text().await.map_err(ProviderError::Request)?;
        debug!(%status, body = %text, "Received history response");

        if !status.is_success() {
            if status == StatusCode::BAD_REQUEST {
                if let Some(code) = serde_json::from_str::<ErrorResponse>(&text)
                    .ok()
                    .and_then(|e| unsupported_currency(&e.error))
                {
                    return Err(ProviderError::UnsupportedCurrency(code).into());
                }
            }
            return Err(ProviderError::Http {
                status,
                base: base.to_string(),
                target: target.to_string(),
            }
            .into());
        }

        Ok(parse_rates(&text)?)
    }
}
