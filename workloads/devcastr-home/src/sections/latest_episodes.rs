//! Latest releases highlight.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::data::Episode;

/// Render one card per latest episode.
///
/// Play buttons carry the episode's position in `all`, the list the client
/// side player queues from.
pub fn render_latest_episodes(latest: &[Episode], all: &[Episode]) -> String {
    let cards: String = latest
        .iter()
        .enumerate()
        .map(|(i, episode)| {
            let index = all
                .iter()
                .position(|candidate| candidate.id() == episode.id())
                .unwrap_or(i);
            render_card(episode, index)
        })
        .collect();

    format!(
        r#"<section class="latestEpisodes" data-section="latest">
    <h2>Últimos lançamentos</h2>
    <ul>
{}    </ul>
</section>"#,
        cards
    )
}

fn render_card(episode: &Episode, index: usize) -> String {
    let title = encode_double_quoted_attribute(episode.title());
    format!(
        r#"        <li>
            <img width="192" height="192" src="{thumbnail}" alt="{title}">
            <div class="episodeDetails">
                <a href="/episodes/{id}">{title_text}</a>
                <p>{members}</p>
                <span>{published_at}</span>
                <span>{duration}</span>
            </div>
            <button type="button" data-play-index="{index}" title="Tocar episódio">
                <img src="/play-green.svg" alt="Tocar episódio">
            </button>
        </li>
"#,
        thumbnail = encode_double_quoted_attribute(episode.thumbnail()),
        title = title,
        id = encode_double_quoted_attribute(episode.id()),
        title_text = encode_text(episode.title()),
        members = encode_text(episode.members()),
        published_at = encode_text(episode.published_at()),
        duration = encode_text(episode.duration_as_string()),
        index = index,
    )
}
