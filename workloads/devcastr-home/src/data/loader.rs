//! Page data loading for the home page.

use std::time::Duration;

use edge_sdk::edge_core::RequestId;
use edge_sdk::edge_data::{FetchClient, FetchError, Transport};
use serde::Serialize;

use super::episode::{Episode, EpisodeError, RawEpisode};
use crate::config::SiteConfig;

/// Path of the episodes collection on the API.
pub const EPISODES_PATH: &str = "/episodes";

/// Sent upstream as `user-agent`.
pub const USER_AGENT: &str = concat!("devcastr-home/", env!("CARGO_PKG_VERSION"));

/// Client for the episodes API, tagged with this request's ID.
pub fn api_client<T: Transport>(
    transport: T,
    config: &SiteConfig,
    request_id: RequestId,
) -> FetchClient<T> {
    FetchClient::new(transport, config.api_base_url.as_str())
        .with_request_id(request_id)
        .with_default_header("user-agent", USER_AGENT)
}

/// Props of the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeProps {
    /// Every fetched episode, newest first.
    pub all_episodes: Vec<Episode>,
    /// The first few of `all_episodes`.
    pub latest_episodes: Vec<Episode>,
}

impl HomeProps {
    /// Split out the `latest_count` newest episodes.
    pub fn new(all_episodes: Vec<Episode>, latest_count: usize) -> Self {
        let latest_episodes = all_episodes.iter().take(latest_count).cloned().collect();
        Self {
            all_episodes,
            latest_episodes,
        }
    }
}

/// Props together with how long the page built from them stays fresh.
#[derive(Debug, Clone)]
pub struct StaticProps<P> {
    pub props: P,
    pub revalidate: Duration,
}

/// Why the home page props could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch episodes")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Episode(#[from] EpisodeError),
}

/// Fetch the newest episodes and map them for display.
///
/// Any failure aborts the whole load. There are no partial lists.
pub async fn load_home_props<T: Transport>(
    client: &FetchClient<T>,
    config: &SiteConfig,
) -> Result<StaticProps<HomeProps>, LoadError> {
    let limit = config.episode_limit.to_string();
    let raw: Vec<RawEpisode> = client
        .get_json(
            EPISODES_PATH,
            &[
                ("_limit", limit.as_str()),
                ("_sort", "published_at"),
                ("_order", "desc"),
            ],
        )
        .await?;

    let all_episodes = raw
        .into_iter()
        .map(Episode::from_raw)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StaticProps {
        props: HomeProps::new(all_episodes, config.latest_count),
        revalidate: config.revalidate,
    })
}
