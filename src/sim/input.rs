//! Directional input commands
//!
//! Input sources (keyboard, touch, scripted) translate their events into
//! [`Direction`] values and queue them on the game state. The queue is
//! drained at the start of each running tick.

use std::collections::VecDeque;

/// One discrete player step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Map a host key name to a direction. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" | "left" => Some(Direction::Left),
            "ArrowUp" | "Up" | "up" => Some(Direction::Up),
            "ArrowRight" | "Right" | "right" => Some(Direction::Right),
            "ArrowDown" | "Down" | "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// FIFO of directions waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    pub fn push(&mut self, direction: Direction) {
        self.pending.push_back(direction);
    }

    /// Queue a raw key name; returns false if the key isn't a direction
    pub fn push_key(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => {
                self.push(direction);
                true
            }
            None => false,
        }
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Direction> + '_ {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
