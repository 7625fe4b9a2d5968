//! Full episode table.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::data::Episode;

/// Render every episode as a table row.
pub fn render_all_episodes(all: &[Episode]) -> String {
    let rows: String = all
        .iter()
        .enumerate()
        .map(|(index, episode)| render_row(episode, index))
        .collect();

    format!(
        r#"<section class="allEpisodes" data-section="all">
    <h2>Todos episódios</h2>
    <table cellspacing="0">
        <thead>
            <tr>
                <th></th>
                <th>Podcast</th>
                <th>Integrantes</th>
                <th>Data</th>
                <th>Duração</th>
                <th></th>
            </tr>
        </thead>
        <tbody>
{}        </tbody>
    </table>
</section>"#,
        rows
    )
}

fn render_row(episode: &Episode, index: usize) -> String {
    format!(
        r#"            <tr>
                <td style="width: 72px"><img width="120" height="120" src="{thumbnail}" alt="{title}"></td>
                <td><a href="/episodes/{id}">{title_text}</a></td>
                <td>{members}</td>
                <td style="width: 100px">{published_at}</td>
                <td>{duration}</td>
                <td><button type="button" data-play-index="{index}" title="Tocar episódio"><img src="/play-green.svg" alt="Tocar episódio"></button></td>
            </tr>
"#,
        thumbnail = encode_double_quoted_attribute(episode.thumbnail()),
        title = encode_double_quoted_attribute(episode.title()),
        id = encode_double_quoted_attribute(episode.id()),
        title_text = encode_text(episode.title()),
        members = encode_text(episode.members()),
        published_at = encode_text(episode.published_at()),
        duration = encode_text(episode.duration_as_string()),
        index = index,
    )
}
