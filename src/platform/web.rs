//! Browser DOM bindings

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlImageElement};

use super::{GAME_OVER_IMAGE, WIN_IMAGE, hearts_list_html, modal_hearts_html};
use crate::assets::{AssetCache, Sprite};
use crate::driver::UiSink;
use crate::renderer::CanvasSurface;
use crate::sim::GameEvent;

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// First element matching `selector`, if any
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hide");
}

pub fn hide(el: &Element) {
    let _ = el.class_list().add_1("hide");
}

pub fn toggle(el: &Element) {
    let _ = el.class_list().toggle("hide");
}

/// Start fetching every sprite. Each `onload` marks the sprite in `assets`;
/// the image elements are handed to the canvas surface for drawing.
pub fn load_sprites(
    assets: &Rc<RefCell<AssetCache>>,
    surface: &mut CanvasSurface,
) -> Result<(), JsValue> {
    let fresh = assets.borrow_mut().load(&Sprite::ALL);

    for sprite in fresh {
        let image = HtmlImageElement::new()?;

        let onload = {
            let assets = assets.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                assets.borrow_mut().mark_loaded(sprite);
            })
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let onerror = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            log::error!("Failed to load {}", sprite.path());
        });
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        image.set_src(sprite.path());
        surface.insert_image(sprite, image);
    }

    Ok(())
}

/// HUD backed by the page's hearts bar and modals
pub struct DomHud {
    document: Document,
    show_fps: bool,
}

impl DomHud {
    pub fn new(document: Document, show_fps: bool) -> Self {
        Self { document, show_fps }
    }

    fn set_hearts(&self, lives: u8) {
        if let Some(el) = query(&self.document, ".hearts") {
            el.set_inner_html(&hearts_list_html(lives));
        }
    }

    fn set_image(&self, selector: &str, src: &str) {
        if let Some(el) = query(&self.document, selector) {
            let _ = el.set_attribute("src", src);
        }
    }

    /// Reveal the board and HUD, hide the start panel
    pub fn reveal_board(&self) {
        for selector in [".hearts", ".footer", ".lives-info"] {
            if let Some(el) = query(&self.document, selector) {
                show(&el);
            }
        }
        if let Some(el) = query(&self.document, ".start-panel") {
            hide(&el);
        }
        if let Some(el) = query(&self.document, ".canvas-bg") {
            toggle(&el);
        }
    }

    pub fn update_fps(&self, fps: u32) {
        if !self.show_fps {
            return;
        }
        if let Some(el) = query(&self.document, "#hud-fps") {
            el.set_text_content(Some(&fps.to_string()));
        }
    }
}

impl UiSink for DomHud {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::LifeLost { lives_remaining } => {
                self.set_image(".heartlost", "");
                self.set_hearts(lives_remaining);
            }
            GameEvent::GameOver => {
                self.set_image(".heartlost", GAME_OVER_IMAGE);
                if let Some(el) = query(&self.document, ".game-over") {
                    show(&el);
                }
            }
            GameEvent::Won { lives_remaining } => {
                self.set_image(".thumbup", WIN_IMAGE);
                if let Some(el) = query(&self.document, ".modal-heart") {
                    el.set_inner_html(&modal_hearts_html(lives_remaining));
                }
                if let Some(el) = query(&self.document, ".game-win") {
                    show(&el);
                }
            }
        }
    }

    fn lives_reset(&mut self, lives: u8) {
        self.set_hearts(lives);
        self.set_image(".heartlost", "");
        self.set_image(".thumbup", "");
        for selector in [".game-win", ".game-over"] {
            if let Some(el) = query(&self.document, selector) {
                hide(&el);
            }
        }
    }
}
