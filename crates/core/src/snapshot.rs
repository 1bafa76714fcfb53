use serde::{Deserialize, Serialize};

use crate::game_state::ActivePiece;
use crate::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

pub type CellGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub x: i8,
    pub y: i8,
    pub width: u8,
    pub height: u8,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind,
            x: value.pos.x,
            y: value.pos.y,
            width: value.shape.width(),
            height: value.shape.height(),
        }
    }
}

/// Render-ready view of a game: locked cells with the active piece merged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cells: CellGrid,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c != EMPTY).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            score: 0,
            lines: 0,
            game_over: false,
        }
    }
}
