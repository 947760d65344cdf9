//! Platform layer
//!
//! Browser bindings live in `web` (wasm32 only):
//! - Sprite loading into the canvas surface
//! - Keyboard input
//! - DOM HUD (hearts, win / game-over modals, start and replay buttons)
//!
//! Markup helpers here are plain string builders so they can be tested on
//! native targets.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Inline style for a HUD heart icon
pub const HEART_STYLE: &str =
    "font-size: 20px; color: rgb(255, 55, 55); letter-spacing: 2px; display: inline-block;";

/// Shown in the lives bar when the last heart goes
pub const GAME_OVER_IMAGE: &str = "images/gameover.gif";
/// Shown in the win modal
pub const WIN_IMAGE: &str = "images/thumbsup.gif";

/// `<li>` heart list for the lives bar
pub fn hearts_list_html(lives: u8) -> String {
    (0..lives)
        .map(|_| format!(r#"<li><i class="fa fa-heart" style="{}"></i></li>"#, HEART_STYLE))
        .collect()
}

/// Bare heart icons for the win modal
pub fn modal_hearts_html(lives: u8) -> String {
    (0..lives)
        .map(|_| r#"<i class="fa fa-heart" style="font-size: 20px; color: #ff3737;"></i>"#)
        .collect()
}
