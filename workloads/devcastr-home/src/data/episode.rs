//! Episode records: the API shape and the view shape.

use serde::{Deserialize, Serialize};

use super::format::{format_duration, format_published_at, parse_published_at};

/// Episode as returned by the episodes API. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawEpisode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub published_at: String,
    pub thumbnail: String,
    pub file: EpisodeFile,
}

/// Media file attached to an episode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeFile {
    pub url: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    pub duration: RawDuration,
}

/// Duration in seconds, as the API happens to encode it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Whole(u64),
    Number(f64),
    Text(String),
}

impl RawDuration {
    /// Decode to whole, non-negative seconds.
    pub fn seconds(&self) -> Result<u64, String> {
        match self {
            Self::Whole(seconds) => Ok(*seconds),
            Self::Number(value) => whole_seconds(*value),
            Self::Text(text) => {
                let text = text.trim();
                match text.parse::<u64>() {
                    Ok(seconds) => Ok(seconds),
                    Err(_) => text
                        .parse::<f64>()
                        .map_err(|_| format!("{:?} is not a number", text))
                        .and_then(whole_seconds),
                }
            }
        }
    }
}

fn whole_seconds(value: f64) -> Result<u64, String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} is not a non-negative number", value));
    }
    if value.fract() != 0.0 {
        return Err(format!("{} is not a whole number of seconds", value));
    }
    if value >= u64::MAX as f64 {
        return Err(format!("{} is out of range", value));
    }
    Ok(value as u64)
}

/// A raw episode that cannot be shown.
#[derive(Debug, thiserror::Error)]
pub enum EpisodeError {
    #[error("episode {id}: invalid publication date {value:?}")]
    InvalidDate { id: String, value: String },

    #[error("episode {id}: invalid duration: {reason}")]
    InvalidDuration { id: String, reason: String },
}

/// Episode as rendered by the home page.
///
/// Built only from a [`RawEpisode`], so `duration_as_string` always matches
/// `duration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    id: String,
    title: String,
    thumbnail: String,
    members: String,
    published_at: String,
    duration: u64,
    duration_as_string: String,
    url: String,
}

impl Episode {
    /// Map an API record into its view shape.
    pub fn from_raw(raw: RawEpisode) -> Result<Self, EpisodeError> {
        let published = parse_published_at(&raw.published_at).ok_or_else(|| {
            EpisodeError::InvalidDate {
                id: raw.id.clone(),
                value: raw.published_at.clone(),
            }
        })?;

        let duration = raw
            .file
            .duration
            .seconds()
            .map_err(|reason| EpisodeError::InvalidDuration {
                id: raw.id.clone(),
                reason,
            })?;

        Ok(Self {
            id: raw.id,
            title: raw.title,
            thumbnail: raw.thumbnail,
            members: raw.members,
            published_at: format_published_at(&published),
            duration,
            duration_as_string: format_duration(duration),
            url: raw.file.url,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    pub fn members(&self) -> &str {
        &self.members
    }

    /// Localized short publication date.
    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    /// Duration in seconds.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn duration_as_string(&self) -> &str {
        &self.duration_as_string
    }

    /// Audio file URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A raw episode as the API would send it.
    pub fn raw(id: &str, title: &str, published_at: &str, duration: serde_json::Value) -> RawEpisode {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "members": "Diego e Richard",
            "published_at": published_at,
            "thumbnail": format!("https://cdn.test/{id}.jpg"),
            "description": "ignored",
            "file": {
                "url": format!("https://cdn.test/{id}.m4a"),
                "type": "audio/x-m4a",
                "duration": duration,
            }
        }))
        .unwrap()
    }

    pub fn episode(id: &str, title: &str) -> Episode {
        Episode::from_raw(raw(id, title, "2021-05-10T00:00:00Z", serde_json::json!(60))).unwrap()
    }
}
