//! Narrative service client
//!
//! POSTs the game's movetext to the themed narration endpoint and returns the
//! story text. The HTTP client carries a fixed 60s timeout so a hung service
//! can never wedge a request permanently; callers run `generate` off the main
//! thread and receive the result over a channel.

use crate::narrative::error::NarrativeError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on a story request, end to end.
pub const STORY_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable overriding the service base URL.
pub const STORY_API_URL_VAR: &str = "STORY_API_URL";

const DEFAULT_BASE_URL: &str = "https://the-bard-gambit-production.up.railway.app";

/// How much of a malformed body is quoted back in error messages.
const ERROR_PREVIEW_LEN: usize = 200;

/// Prompt theme the service narrates the game in. Rendered into the endpoint
/// path as a slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryTheme {
    #[default]
    MedievalKingdom,
    SpaceOpera,
    NoirDetective,
    HighSeas,
}

impl StoryTheme {
    pub const ALL: [StoryTheme; 4] = [
        StoryTheme::MedievalKingdom,
        StoryTheme::SpaceOpera,
        StoryTheme::NoirDetective,
        StoryTheme::HighSeas,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            StoryTheme::MedievalKingdom => "medieval_kingdom",
            StoryTheme::SpaceOpera => "space_opera",
            StoryTheme::NoirDetective => "noir_detective",
            StoryTheme::HighSeas => "high_seas",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StoryTheme::MedievalKingdom => "Medieval Kingdom",
            StoryTheme::SpaceOpera => "Space Opera",
            StoryTheme::NoirDetective => "Noir Detective",
            StoryTheme::HighSeas => "High Seas",
        }
    }
}

/// Request body for the narration endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    pub event_name: String,
    pub white_player: String,
    pub black_player: String,
    pub pgn: String,
}

impl StoryRequest {
    /// The payload for an over-the-board game in this app.
    pub fn for_current_game(pgn: String) -> StoryRequest {
        StoryRequest {
            event_name: "User Game".to_string(),
            white_player: "White".to_string(),
            black_player: "Black".to_string(),
            pgn,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StoryResponse {
    story: Option<String>,
    error: Option<String>,
}

/// Blocking HTTP client for the narrative service.
#[derive(Resource, Clone)]
pub struct NarrativeClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl NarrativeClient {
    pub fn new(base_url: impl Into<String>) -> Result<NarrativeClient, NarrativeError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(STORY_TIMEOUT)
            .build()?;
        Ok(NarrativeClient {
            base_url: base_url.into(),
            http,
        })
    }

    /// Client against `STORY_API_URL`, or the production host when unset.
    pub fn from_env() -> Result<NarrativeClient, NarrativeError> {
        let base_url =
            std::env::var(STORY_API_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        NarrativeClient::new(base_url)
    }

    /// Generate a themed story for the given game. Blocks up to
    /// [`STORY_TIMEOUT`]; run off the main thread.
    pub fn generate(
        &self,
        theme: StoryTheme,
        request: &StoryRequest,
    ) -> Result<String, NarrativeError> {
        let url = format!(
            "{}/narrate/current_game/{}",
            self.base_url.trim_end_matches('/'),
            theme.slug()
        );
        debug!("[STORY] POST {}", url);

        let response = self.http.post(url).json(request).send()?;
        let status = response.status();
        let body = response.text()?;

        // Non-JSON bodies (proxy error pages and the like) are surfaced
        // truncated rather than parsed further
        let parsed: StoryResponse =
            serde_json::from_str(&body).map_err(|_| NarrativeError::UnexpectedResponse {
                preview: preview(&body),
            })?;

        if !status.is_success() {
            return Err(NarrativeError::Service {
                status: status.as_u16(),
                message: parsed.error.unwrap_or_else(|| preview(&body)),
            });
        }

        match parsed.story {
            Some(story) if !story.trim().is_empty() => Ok(story),
            _ => Err(NarrativeError::MissingStory),
        }
    }
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= ERROR_PREVIEW_LEN {
        trimmed.to_string()
    } else {
        let mut end = ERROR_PREVIEW_LEN;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &trimmed[..end])
    }
}
