//! HTTP client for the Lichess bot API

use super::error::{ApiError, ApiResult};
use super::types::{parse_event_line, Challenge, ChallengeRequest, ExplorerResponse, OpeningMove};
use super::{EventStream, GameApi};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::time::Duration;
use tracing::{debug, info};
use url::{form_urlencoded, Url};

const USER_AGENT: &str = concat!("xfchess-bot/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct Account {
    id: String,
}

/// Blocking client for the bot, challenge and opening-explorer endpoints
pub struct LichessClient {
    http: Client,
    /// No overall timeout: game streams stay open for the whole game
    stream_http: Client,
    host: Url,
    explorer_host: Url,
    token: String,
}

impl LichessClient {
    pub fn new(host: &str, explorer_host: &str, token: &str) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let stream_http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Option::<Duration>::None)
            .build()?;

        Ok(Self {
            http,
            stream_http,
            host: parse_base(host)?,
            explorer_host: parse_base(explorer_host)?,
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.host
            .join(path)
            .map_err(|e| ApiError::Decode(format!("invalid endpoint {path}: {e}")))
    }

    fn post(&self, url: Url, form: Option<String>) -> ApiResult<Response> {
        let endpoint = url.path().to_string();
        let mut request = self.http.post(url).bearer_auth(&self.token);
        if let Some(body) = form {
            request = request
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
        }
        check_status(request.send()?, &endpoint)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let endpoint = url.path().to_string();
        let response = self.http.get(url).bearer_auth(&self.token).send()?;
        let body = check_status(response, &endpoint)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn parse_base(raw: &str) -> ApiResult<Url> {
    let mut url = Url::parse(raw).map_err(|e| ApiError::Decode(format!("invalid host {raw}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Map non-success responses to [`ApiError`]
fn check_status(response: Response, endpoint: &str) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited {
            endpoint: endpoint.to_string(),
        });
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
        body,
    })
}

impl GameApi for LichessClient {
    fn account_id(&self) -> ApiResult<String> {
        let account: Account = self.get_json(self.endpoint("api/account")?)?;
        Ok(account.id)
    }

    fn create_challenge(&self, request: &ChallengeRequest) -> ApiResult<Challenge> {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("level", &request.level.to_string())
            .append_pair("clock.limit", &request.clock_limit.to_string())
            .append_pair("clock.increment", &request.clock_increment.to_string())
            .append_pair("variant", &request.variant)
            .append_pair("color", request.color.as_str())
            .finish();

        let response = self.post(self.endpoint("api/challenge/ai")?, Some(form))?;
        let challenge: Challenge = serde_json::from_str(&response.text()?)?;
        info!(
            "[API] Challenge created: {} (level {}, {})",
            challenge.id, request.level, request.color
        );
        Ok(challenge)
    }

    fn stream_game(&self, game_id: &str) -> ApiResult<EventStream> {
        let url = self.endpoint(&format!("api/bot/game/stream/{game_id}"))?;
        let endpoint = url.path().to_string();
        let response = self
            .stream_http
            .get(url)
            .bearer_auth(&self.token)
            .send()?;
        let response = check_status(response, &endpoint)?;
        debug!("[API] Streaming game {}", game_id);

        let events = BufReader::new(response).lines().map(|line| match line {
            Ok(line) => parse_event_line(&line),
            Err(e) => Err(ApiError::Transport(e.to_string())),
        });
        Ok(Box::new(events))
    }

    fn submit_move(&self, game_id: &str, uci: &str) -> ApiResult<()> {
        self.post(
            self.endpoint(&format!("api/bot/game/{game_id}/move/{uci}"))?,
            None,
        )?;
        Ok(())
    }

    fn resign(&self, game_id: &str) -> ApiResult<()> {
        self.post(self.endpoint(&format!("api/bot/game/{game_id}/resign"))?, None)?;
        Ok(())
    }

    fn opening_statistics(&self, fen: &str) -> ApiResult<Vec<OpeningMove>> {
        let base = self
            .explorer_host
            .join("masters")
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = Url::parse_with_params(base.as_str(), &[("fen", fen)])
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let response: ExplorerResponse = self.get_json(url)?;
        Ok(response.moves)
    }
}
