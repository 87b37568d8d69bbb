use crate::errors::UpstreamError;
use crate::wire::{
    GameDetail, ScheduleGame, ScheduleResponse, SkaterLeadersResponse, StandingEntry,
    StandingsResponse,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of NHL data, implemented by the HTTP client and by test fakes.
#[async_trait]
pub trait NhlApi: Send + Sync {
    /// Games scheduled on `date`.
    async fn schedule(&self, date: NaiveDate) -> Result<Vec<ScheduleGame>, UpstreamError>;

    /// Live/final detail for one game: period, clock, shots and scoring.
    async fn game_detail(&self, game_id: i64) -> Result<GameDetail, UpstreamError>;

    /// Current league standings.
    async fn standings(&self) -> Result<Vec<StandingEntry>, UpstreamError>;

    /// League-wide skater leaders for goals, assists and points.
    async fn skater_leaders(&self, limit: usize) -> Result<SkaterLeadersResponse, UpstreamError>;
}

/// Client for the public NHL web API.
#[derive(Debug, Clone)]
pub struct HttpNhlApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpNhlApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("nhl_scores/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout,
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        debug!(url, "upstream request");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| UpstreamError::Unreachable {
                url: url.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Unreachable {
                url: url.to_owned(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| UpstreamError::Malformed {
            url: url.to_owned(),
            source,
        })
    }
}

#[async_trait]
impl NhlApi for HttpNhlApi {
    async fn schedule(&self, date: NaiveDate) -> Result<Vec<ScheduleGame>, UpstreamError> {
        let day = date.format("%Y-%m-%d").to_string();
        let url = format!("{}/schedule/{day}", self.base_url);
        let response: ScheduleResponse = self.get(&url).await?;
        Ok(response.games_on(&day))
    }

    async fn game_detail(&self, game_id: i64) -> Result<GameDetail, UpstreamError> {
        let landing = format!("{}/gamecenter/{game_id}/landing", self.base_url);
        match self.get::<GameDetail>(&landing).await {
            Ok(detail) => Ok(detail),
            Err(err) => {
                warn!(game_id, error = %err, "landing failed, trying boxscore");
                let boxscore = format!("{}/gamecenter/{game_id}/boxscore", self.base_url);
                self.get(&boxscore).await
            }
        }
    }

    async fn standings(&self) -> Result<Vec<StandingEntry>, UpstreamError> {
        let url = format!("{}/standings/now", self.base_url);
        let response: StandingsResponse = self.get(&url).await?;
        Ok(response.standings)
    }

    async fn skater_leaders(&self, limit: usize) -> Result<SkaterLeadersResponse, UpstreamError> {
        let url = format!(
            "{}/skater-stats-leaders/current?categories=goals,assists,points&limit={limit}",
            self.base_url
        );
        self.get(&url).await
    }
}
