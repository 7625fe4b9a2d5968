//! Player toggle button.

use html_escape::encode_double_quoted_attribute;

use crate::player::PlayerLayout;

/// Render the button that flips the default player position.
pub fn render_toggle(player: &dyn PlayerLayout) -> String {
    format!(
        r#"<button type="button" class="hideButton" onclick="{}" title="Ver player">&lt;</button>"#,
        encode_double_quoted_attribute(&player.toggle_player_position_default_call())
    )
}
