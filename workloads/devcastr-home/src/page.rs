//! The home page: document shell plus streamed sections.

use edge_sdk::edge_streaming::{HeadContent, Shell};

use crate::data::{Episode, HomeProps};
use crate::player::{PlayerLayout, EPISODES_DATA_ID};
use crate::sections::{render_all_episodes, render_latest_episodes, render_toggle};

pub const TITLE: &str = "Devcastr";
pub const DESCRIPTION: &str = "Hear your favorite podcasts";
pub const FAVICON: &str = "/favicon.png";
pub const FAVICON_TYPE: &str = "image/x-png";

/// A named chunk of the page body, streamed after the shell. Every section
/// but the last ends with a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSection {
    pub name: &'static str,
    pub html: String,
}

/// The rendered home page.
///
/// A pure function of its props. Sections are streamed in order after
/// [`HomePage::shell_opening`]; the last one closes the document.
#[derive(Debug, Clone)]
pub struct HomePage {
    shell: Shell,
    sections: Vec<PageSection>,
}

impl HomePage {
    pub fn new(props: &HomeProps, player: &dyn PlayerLayout) -> Self {
        let shell = create_shell(player);

        let closing = format!(
            "{}\n{}",
            episodes_data_script(&props.all_episodes),
            shell.render_closing()
        );

        let sections = vec![
            PageSection {
                name: "toggle",
                html: format!("{}\n", render_toggle(player)),
            },
            PageSection {
                name: "latest",
                html: format!(
                    "{}\n",
                    render_latest_episodes(&props.latest_episodes, &props.all_episodes)
                ),
            },
            PageSection {
                name: "all",
                html: format!("{}\n", render_all_episodes(&props.all_episodes)),
            },
            PageSection {
                name: "closing",
                html: closing,
            },
        ];

        Self { shell, sections }
    }

    /// Document metadata.
    pub fn head(&self) -> &HeadContent {
        &self.shell.head
    }

    /// Everything up to and including the opening of the content wrapper.
    pub fn shell_opening(&self) -> String {
        self.shell.render_opening()
    }

    pub fn sections(&self) -> &[PageSection] {
        &self.sections
    }

    /// The whole document in one string, byte for byte what streaming the
    /// shell and then every section produces.
    pub fn render(&self) -> String {
        let mut html = self.shell_opening();
        for section in &self.sections {
            html.push_str(&section.html);
        }
        html
    }
}

fn create_shell(player: &dyn PlayerLayout) -> Shell {
    let mut head = HeadContent::new(TITLE)
        .with_meta("viewport", "width=device-width, initial-scale=1")
        .with_meta("description", DESCRIPTION)
        .with_icon(FAVICON, FAVICON_TYPE)
        .with_style(HOME_STYLES);

    if let Some(script) = player.bootstrap_script() {
        head = head.with_script(&script);
    }

    Shell::new(head)
        .with_lang("pt-BR")
        .with_body_start("<body>\n<div class=\"content\">\n")
        .with_body_end("</div>\n</body>\n</html>")
}

/// Episode list for the client-side player, as inert JSON.
fn episodes_data_script(episodes: &[Episode]) -> String {
    let json = serde_json::to_string(episodes).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"<script type="application/json" id="{}">{}</script>"#,
        EPISODES_DATA_ID,
        json.replace('<', "\\u003c")
    )
}

const HOME_STYLES: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: Inter, sans-serif; background: #f7f8fa; color: #494d4b; }
body[data-player-position="hidden"] .content { padding-right: 3rem; }
.content { padding: 0 4rem; height: 100vh; overflow-y: scroll; }
.hideButton { position: fixed; top: 2rem; right: 2rem; width: 2.5rem; height: 2.5rem;
    border: 0; border-radius: 0.5rem; background: #8257e5; color: #fff; font-size: 1.25rem; cursor: pointer; }
.latestEpisodes ul { list-style: none; display: grid; grid-template-columns: repeat(2, 1fr); gap: 1.5rem; }
.latestEpisodes li { background: #fff; border: 1px solid #e6e8eb; padding: 1.25rem; border-radius: 1.5rem;
    position: relative; display: flex; align-items: center; }
.latestEpisodes li img { width: 6rem; height: 6rem; border-radius: 1rem; object-fit: cover; }
.episodeDetails { flex: 1; margin-left: 1rem; }
.episodeDetails a { display: block; color: #494d4b; font-weight: 600; text-decoration: none; line-height: 1.4rem; }
.latestEpisodes li button, .allEpisodes td button { width: 2.5rem; height: 2.5rem; background: #fff;
    border: 1px solid #e6e8eb; border-radius: 0.675rem; cursor: pointer; }
.allEpisodes { padding-bottom: 2rem; }
.allEpisodes table { width: 100%; }
.allEpisodes th, .allEpisodes td { padding: 0.75rem 1rem; border-bottom: 1px solid #e6e8eb; }
.allEpisodes th { color: #808080; text-transform: uppercase; font: 500 0.75rem Lexend, sans-serif; text-align: left; }
.allEpisodes td { font-size: 0.875rem; }
.allEpisodes td img { width: 2.5rem; height: 2.5rem; border-radius: 0.5rem; object-fit: cover; }
"#;
