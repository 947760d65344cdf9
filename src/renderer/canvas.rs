//! 2D canvas render surface (web only)

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::RenderSurface;
use crate::assets::Sprite;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Canvas context plus the decoded sprite images
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    images: HashMap<Sprite, HtmlImageElement>,
}

impl CanvasSurface {
    /// Size the canvas to the board and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("not a 2d context"))?;

        Ok(Self {
            ctx,
            width: CANVAS_WIDTH as f64,
            height: CANVAS_HEIGHT as f64,
            images: HashMap::new(),
        })
    }

    /// Register the image element backing a sprite
    pub fn insert_image(&mut self, sprite: Sprite, image: HtmlImageElement) {
        self.images.insert(sprite, image);
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_image(&mut self, sprite: Sprite, x: f32, y: f32) {
        let Some(image) = self.images.get(&sprite) else {
            log::warn!("No image registered for {}", sprite.path());
            return;
        };
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element(image, x as f64, y as f64)
        {
            log::warn!("drawImage failed for {}: {:?}", sprite.path(), e);
        }
    }
}
