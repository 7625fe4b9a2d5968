//! Player layout context.
//!
//! The player lives in the browser. The page never owns its state: it only
//! wires buttons to the context's client-side operations.

/// Shared player layout state, as seen from the server-rendered page.
pub trait PlayerLayout {
    /// Client-side expression that flips the default player position.
    ///
    /// Bound to the toggle button. Takes no arguments, and its result is
    /// ignored.
    fn toggle_player_position_default_call(&self) -> String;

    /// Script that installs the context in the browser, if the page has to
    /// ship it.
    fn bootstrap_script(&self) -> Option<String> {
        None
    }
}

/// Player context installed on a global object, `window.playerContext` by
/// default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerContext {
    global: String,
}

impl Default for PlayerContext {
    fn default() -> Self {
        Self::new("window.playerContext")
    }
}

impl PlayerContext {
    pub fn new(global: impl Into<String>) -> Self {
        Self {
            global: global.into(),
        }
    }

    /// Expression naming the global context object.
    pub fn global(&self) -> &str {
        &self.global
    }
}

impl PlayerLayout for PlayerContext {
    fn toggle_player_position_default_call(&self) -> String {
        format!("{}.togglePlayerPositionDefault()", self.global)
    }

    fn bootstrap_script(&self) -> Option<String> {
        Some(format!(
            r#"(function () {{
    var STORAGE_KEY = 'devcastr:player-position';
    var ctx = {global} || {{}};
    try {{ ctx.position = localStorage.getItem(STORAGE_KEY) || 'default'; }} catch (e) {{ ctx.position = 'default'; }}

    function apply() {{
        document.body.setAttribute('data-player-position', ctx.position);
    }}

    ctx.togglePlayerPositionDefault = function () {{
        ctx.position = ctx.position === 'default' ? 'hidden' : 'default';
        try {{ localStorage.setItem(STORAGE_KEY, ctx.position); }} catch (e) {{}}
        apply();
    }};

    ctx.play = function (episodes, index) {{
        document.dispatchEvent(new CustomEvent('devcastr:play', {{
            detail: {{ episodes: episodes, index: index }}
        }}));
    }};

    {global} = ctx;

    document.addEventListener('click', function (event) {{
        var button = event.target.closest('[data-play-index]');
        if (!button) return;
        var data = document.getElementById('{data_id}');
        var episodes = data ? JSON.parse(data.textContent) : [];
        ctx.play(episodes, Number(button.getAttribute('data-play-index')));
    }});

    if (document.body) {{
        apply();
    }} else {{
        document.addEventListener('DOMContentLoaded', apply);
    }}
}})();"#,
            global = self.global,
            data_id = EPISODES_DATA_ID,
        ))
    }
}

/// Id of the `<script type="application/json">` element holding the episode
/// list the play buttons index into.
pub const EPISODES_DATA_ID: &str = "devcastr-episodes";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_call() {
        let player = PlayerContext::default();
        assert_eq!(player.global(), "window.playerContext");
        assert_eq!(
            player.toggle_player_position_default_call(),
            "window.playerContext.togglePlayerPositionDefault()"
        );
    }

    #[test]
    fn test_bootstrap_installs_context() {
        let script = PlayerContext::new("window.player").bootstrap_script().unwrap();
        assert!(script.starts_with("(function () {"));
        assert!(script.contains("var ctx = window.player || {};"));
        assert!(script.contains("window.player = ctx;"));
        assert!(script.contains("ctx.togglePlayerPositionDefault = function () {"));
        assert!(script.contains("'data-player-position'"));
        assert!(script.contains("new CustomEvent('devcastr:play'"));
        assert!(script.contains("getElementById('devcastr-episodes')"));
    }

    #[test]
    fn test_layouts_ship_no_script_by_default() {
        struct Inline;
        impl PlayerLayout for Inline {
            fn toggle_player_position_default_call(&self) -> String {
                "toggle()".to_string()
            }
        }
        assert_eq!(Inline.bootstrap_script(), None);
    }
}
