//! Boundary with the external recommendation service
//!
//! The service receives the five questionnaire answers plus the closed list of
//! course areas and replies (as a stream of JSON lines) with a JSON object
//! carrying area weights, keywords and a one-sentence summary. Everything here
//! is best-effort: a failed or garbled reply must leave ranking working on the
//! answers alone.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::warn;

/// Maximum number of keywords kept from a profile
pub const MAX_KEYWORDS: usize = 20;

/// Profile inferred from the questionnaire by the recommendation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    /// Relevance of each course area, in [0, 1]
    #[serde(default, alias = "areaWeights")]
    pub area_weights: BTreeMap<String, f64>,
    /// Keywords describing the student's interests, most relevant first
    #[serde(default)]
    pub keywords: Vec<String>,
    /// One-sentence description of the student
    #[serde(default)]
    pub summary: String,
}

impl AiProfile {
    /// Weight of an area; 0 for areas the profile does not mention
    #[must_use]
    pub fn area_weight(&self, area: &str) -> f64 {
        self.area_weights.get(area).copied().unwrap_or(0.0)
    }

    /// Whether the profile carries neither weights nor keywords
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.area_weights.is_empty() && self.keywords.is_empty()
    }

    /// Parse a service reply, falling back to an empty profile on any failure
    #[must_use]
    pub fn from_response_or_empty(text: &str) -> Self {
        parse_ai_response(text).unwrap_or_else(|err| {
            warn!("Discarding recommendation reply: {err}");
            Self::default()
        })
    }

    /// Clamp weights into [0, 1], drop non-finite ones, and tidy keywords
    fn sanitize(mut self) -> Self {
        self.area_weights.retain(|_, w| w.is_finite());
        for weight in self.area_weights.values_mut() {
            *weight = weight.clamp(0.0, 1.0);
        }
        self.keywords = self
            .keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .take(MAX_KEYWORDS)
            .collect();
        self.summary = self.summary.trim().to_string();
        self
    }
}

/// Why a service reply could not be turned into a profile
#[derive(Debug)]
pub enum ProfileParseError {
    /// The reply contains no `{ ... }` object
    NoJsonObject,
    /// The object is not valid profile JSON
    InvalidJson(serde_json::Error),
}

impl fmt::Display for ProfileParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoJsonObject => write!(f, "no JSON object in response"),
            Self::InvalidJson(err) => write!(f, "invalid profile JSON: {err}"),
        }
    }
}

impl Error for ProfileParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoJsonObject => None,
            Self::InvalidJson(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ProfileParseError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Extract and parse the profile object from a free-text service reply.
///
/// The object spans from the first `{` to the last `}`, so prose or markdown
/// around it is ignored. Missing fields default to empty, keywords are capped
/// at [`MAX_KEYWORDS`] and weights are clamped to [0, 1].
///
/// # Errors
/// Returns [`ProfileParseError`] when no object is present or it is not valid JSON.
pub fn parse_ai_response(text: &str) -> Result<AiProfile, ProfileParseError> {
    let start = text.find('{').ok_or(ProfileParseError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(ProfileParseError::NoJsonObject)?;
    if end < start {
        return Err(ProfileParseError::NoJsonObject);
    }
    let profile: AiProfile = serde_json::from_str(&text[start..=end])?;
    Ok(profile.sanitize())
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamEvent {
    Token {
        #[serde(default)]
        content: String,
    },
    Done,
    #[serde(other)]
    Other,
}

/// Concatenate the `token` events of a newline-delimited JSON reply.
///
/// Reading stops at the first `done` event. Blank, malformed and unknown lines
/// are skipped.
#[must_use]
pub fn collect_stream_tokens(ndjson: &str) -> String {
    let mut full = String::new();
    for line in ndjson.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<StreamEvent>(line) {
            Ok(StreamEvent::Token { content }) => full.push_str(&content),
            Ok(StreamEvent::Done) => break,
            Ok(StreamEvent::Other) | Err(_) => {}
        }
    }
    full
}

/// The five free-text questionnaire answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    /// What the student enjoys doing
    #[serde(default)]
    pub interests: String,
    /// Preferred working environment
    #[serde(default)]
    pub environment: String,
    /// Preference for working with people or alone
    #[serde(default)]
    pub social: String,
    /// Favourite school subjects
    #[serde(default)]
    pub subjects: String,
    /// What the student values in a career
    #[serde(default, alias = "careerValues")]
    pub career_values: String,
}

impl QuestionnaireAnswers {
    /// All answers joined into one query text, skipping blanks
    #[must_use]
    pub fn combined_text(&self) -> String {
        [
            &self.interests,
            &self.environment,
            &self.social,
            &self.subjects,
            &self.career_values,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Whether every answer is blank
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combined_text().is_empty()
    }
}

/// Build the request prompt sent to the recommendation service.
#[must_use]
pub fn build_prompt(answers: &QuestionnaireAnswers, areas: &[&str]) -> String {
    format!(
        "Analisa o perfil deste estudante português e responde APENAS com um objeto JSON válido \
(sem markdown, sem explicações).

RESPOSTAS DO QUESTIONÁRIO:
1. Interesses: \"{}\"
2. Ambiente de trabalho: \"{}\"
3. Preferência social: \"{}\"
4. Disciplinas: \"{}\"
5. Valores de carreira: \"{}\"

ÁREAS DISPONÍVEIS: {}

Responde com este JSON exato:
{{\"areaWeights\":{{\"{}\":0.8}},\"keywords\":[\"...\"],\"summary\":\"Uma frase sobre o perfil do estudante.\"}}",
        answers.interests,
        answers.environment,
        answers.social,
        answers.subjects,
        answers.career_values,
        areas.join(", "),
        areas.first().copied().unwrap_or("Área"),
    )
}

/// Source of AI profiles. Implementations must not fail loudly: `None` means
/// ranking proceeds on the answers alone.
pub trait RecommendationSource {
    /// Produce a profile for the answers, restricted to the given areas
    fn recommend(&self, answers: &QuestionnaireAnswers, areas: &[&str]) -> Option<AiProfile>;
}

/// Reads a previously captured service reply from disk.
///
/// The file may hold the raw NDJSON stream or the assembled text; stream files
/// are detected by their `"type"` events.
#[derive(Debug, Clone)]
pub struct FileProfileSource {
    path: PathBuf,
}

impl FileProfileSource {
    /// Source backed by the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecommendationSource for FileProfileSource {
    fn recommend(&self, _answers: &QuestionnaireAnswers, areas: &[&str]) -> Option<AiProfile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Cannot read profile {}: {err}", self.path.display());
                return None;
            }
        };

        let text = if raw.contains("\"type\"") {
            collect_stream_tokens(&raw)
        } else {
            raw
        };

        match parse_ai_response(&text) {
            Ok(mut profile) => {
                if !areas.is_empty() {
                    profile
                        .area_weights
                        .retain(|area, _| areas.contains(&area.as_str()));
                }
                Some(profile)
            }
            Err(err) => {
                warn!("Ignoring profile {}: {err}", self.path.display());
                None
            }
        }
    }
}
