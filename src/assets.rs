//! Sprite manifest and load gate
//!
//! The game must not tick until every sprite is decoded. The browser
//! side feeds load notifications into [`AssetCache`]; ready callbacks are
//! run once, after the last sprite arrives.

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    StoneBlock,
    WaterBlock,
    GrassBlock,
    EnemyBug,
    CharBoy,
}

impl Sprite {
    /// Everything that must be loaded before the first frame
    pub const ALL: [Sprite; 5] = [
        Sprite::StoneBlock,
        Sprite::WaterBlock,
        Sprite::GrassBlock,
        Sprite::EnemyBug,
        Sprite::CharBoy,
    ];

    /// Asset URL relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::CharBoy => "images/char-boy.png",
        }
    }
}

type ReadyCallback = Box<dyn FnOnce()>;

/// Tracks which sprites have finished loading
#[derive(Default)]
pub struct AssetCache {
    requested: Vec<Sprite>,
    loaded: Vec<Sprite>,
    ready_callbacks: Vec<ReadyCallback>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register sprites to wait for. Returns the ones not yet requested,
    /// which the caller should start fetching.
    pub fn load(&mut self, sprites: &[Sprite]) -> Vec<Sprite> {
        let mut fresh = Vec::new();
        for &sprite in sprites {
            if !self.requested.contains(&sprite) {
                self.requested.push(sprite);
                fresh.push(sprite);
            }
        }
        log::debug!("Requested {} sprites ({} new)", sprites.len(), fresh.len());
        fresh
    }

    /// Record a finished load; fires pending callbacks when the set is complete
    pub fn mark_loaded(&mut self, sprite: Sprite) {
        if !self.requested.contains(&sprite) || self.loaded.contains(&sprite) {
            return;
        }
        self.loaded.push(sprite);
        log::debug!("Loaded {} ({}/{})", sprite.path(), self.loaded.len(), self.requested.len());

        if self.is_ready() {
            log::info!("All {} sprites ready", self.loaded.len());
            for callback in self.ready_callbacks.drain(..) {
                callback();
            }
        }
    }

    /// True once every requested sprite has loaded
    pub fn is_ready(&self) -> bool {
        self.requested.iter().all(|s| self.loaded.contains(s))
    }

    /// Run `callback` once everything is loaded (immediately if already so)
    pub fn on_ready(&mut self, callback: impl FnOnce() + 'static) {
        if self.is_ready() && !self.requested.is_empty() {
            callback();
        } else {
            self.ready_callbacks.push(Box::new(callback));
        }
    }
}
