//! Legacy side-scrolling mode: one box-shaped player on a tile grid.
//!
//! Physics here is frame-based. Every constant is "per frame", and a frame
//! is one call to [`Platformer::step`], independent of wall-clock time.

use crate::error::LevelError;
use crate::spatial::Axis;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TILE_SIZE: f32 = 40.0;
pub const PLAYER_SIZE: f32 = 40.0;
const RUN_SPEED: f32 = 4.0;
const GRAVITY: f32 = 0.5;
const JUMP_VELOCITY: f32 = -10.0;
const START: (f32, f32) = (40.0, 520.0);
const RESPAWN: (f32, f32) = (40.0, 480.0);

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Solid,
    /// Touching it sends the player back to the respawn point.
    Hazard,
}

impl TileKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Empty),
            1 => Some(TileKind::Solid),
            2 => Some(TileKind::Hazard),
            _ => None,
        }
    }
}

/// Rectangular tile map, row-major, `TILE_SIZE` pixels per tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    rows: Vec<Vec<TileKind>>,
    columns: usize,
}

const DEFAULT_LEVEL: [[u8; 20]; 15] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

impl TileGrid {
    /// Build a grid from numeric tile codes (0 empty, 1 solid, 2 hazard).
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LevelError> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut grid = Vec::with_capacity(rows.len());
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != columns {
                return Err(LevelError::RaggedRow {
                    row,
                    len: codes.len(),
                    expected: columns,
                });
            }
            let tiles = codes
                .iter()
                .enumerate()
                .map(|(col, &code)| TileKind::from_code(code).ok_or(LevelError::UnknownTile { row, col, code }))
                .collect::<Result<Vec<_>, _>>()?;
            grid.push(tiles);
        }
        Ok(Self { rows: grid, columns })
    }

    /// Parse a JSON array of rows of tile codes.
    pub fn from_json(data: &str) -> Result<Self, LevelError> {
        let rows: Vec<Vec<u8>> = serde_json::from_str(data)?;
        Self::from_rows(&rows)
    }

    /// The stock 20x15 level: floating platforms over a floor with a
    /// hazard pit in the middle.
    pub fn default_level() -> Self {
        let rows = DEFAULT_LEVEL
            .iter()
            .map(|codes| codes.iter().filter_map(|&c| TileKind::from_code(c)).collect())
            .collect();
        Self {
            rows,
            columns: DEFAULT_LEVEL[0].len(),
        }
    }

    /// Tile at (`row`, `col`). Anything outside the grid is empty.
    pub fn tile(&self, row: i64, col: i64) -> TileKind {
        if row < 0 || col < 0 {
            return TileKind::Empty;
        }
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(TileKind::Empty)
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Width of the grid in pixels; the player cannot leave it sideways.
    pub fn pixel_width(&self) -> f32 {
        self.columns as f32 * TILE_SIZE
    }
}

/// Digital input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Player box. (`x`, `y`) is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformerPlayer {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
}

impl PlatformerPlayer {
    fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            vx: 0.0,
            vy: 0.0,
            grounded: false,
        }
    }
}

/// One player on one level, plus the death counter for the HUD.
#[derive(Debug, Clone)]
pub struct Platformer {
    grid: TileGrid,
    player: PlatformerPlayer,
    deaths: u32,
}

impl Default for Platformer {
    fn default() -> Self {
        Self::new(TileGrid::default_level())
    }
}

impl Platformer {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            player: PlatformerPlayer::at(START.0, START.1),
            deaths: 0,
        }
    }

    pub fn player(&self) -> &PlatformerPlayer {
        &self.player
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Advance one frame.
    pub fn step(&mut self, input: PlatformerInput) {
        let p = &mut self.player;
        p.vx = if input.left {
            -RUN_SPEED
        } else if input.right {
            RUN_SPEED
        } else {
            0.0
        };
        if input.jump && p.grounded {
            p.vy = JUMP_VELOCITY;
            p.grounded = false;
        }
        p.vy += GRAVITY;

        p.x += p.vx;
        self.resolve(Axis::Horizontal);
        self.player.y += self.player.vy;
        self.resolve(Axis::Vertical);
    }

    /// Push the player out of solid tiles along `axis`. The overlap range is
    /// taken once up front. Touching a hazard respawns immediately and
    /// skips the edge clamp.
    fn resolve(&mut self, axis: Axis) {
        let p = self.player;
        let left = (p.x / TILE_SIZE).floor() as i64;
        let right = ((p.x + p.width - 1.0) / TILE_SIZE).floor() as i64;
        let top = (p.y / TILE_SIZE).floor() as i64;
        let bottom = ((p.y + p.height - 1.0) / TILE_SIZE).floor() as i64;

        for row in top..=bottom {
            for col in left..=right {
                match self.grid.tile(row, col) {
                    TileKind::Empty => {}
                    TileKind::Hazard => {
                        self.respawn();
                        return;
                    }
                    TileKind::Solid => self.snap(axis, row, col),
                }
            }
        }

        let max_x = self.grid.pixel_width() - self.player.width;
        self.player.x = self.player.x.max(0.0).min(max_x);
    }

    fn snap(&mut self, axis: Axis, row: i64, col: i64) {
        let p = &mut self.player;
        let (vx, vy) = axis.project(p.vx, p.vy);
        match axis {
            Axis::Horizontal if vx > 0.0 => p.x = col as f32 * TILE_SIZE - p.width,
            Axis::Horizontal if vx < 0.0 => p.x = (col + 1) as f32 * TILE_SIZE,
            Axis::Vertical if vy > 0.0 => {
                p.y = row as f32 * TILE_SIZE - p.height;
                p.vy = 0.0;
                p.grounded = true;
            }
            Axis::Vertical if vy < 0.0 => {
                p.y = (row + 1) as f32 * TILE_SIZE;
                p.vy = 0.0;
            }
            _ => {}
        }
    }

    fn respawn(&mut self) {
        self.deaths += 1;
        self.player = PlatformerPlayer::at(RESPAWN.0, RESPAWN.1);
        debug!(deaths = self.deaths, "player hit a hazard");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: PlatformerInput = PlatformerInput {
        left: false,
        right: false,
        jump: false,
    };

    #[test]
    fn test_settles_on_floor() {
        let mut game = Platformer::default();
        game.step(IDLE);
        let p = game.player();
        assert_eq!(p.y, 480.0);
        assert!(p.grounded);
        assert_eq!(p.vy, 0.0);
        assert_eq!(game.deaths(), 0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut game = Platformer::default();
        game.step(IDLE);
        let jump = PlatformerInput { jump: true, ..IDLE };
        game.step(jump);
        assert_eq!(game.player().vy, -9.5);
        assert!(!game.player().grounded);

        // Mid-air jump does nothing beyond gravity.
        game.step(jump);
        assert_eq!(game.player().vy, -9.0);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut game = Platformer::default();
        game.step(IDLE);
        game.step(PlatformerInput {
            left: true,
            right: true,
            jump: false,
        });
        assert_eq!(game.player().x, 36.0);
    }

    #[test]
    fn test_clamped_to_left_edge() {
        let mut game = Platformer::default();
        game.step(IDLE);
        let left = PlatformerInput { left: true, ..IDLE };
        for _ in 0..40 {
            game.step(left);
        }
        assert_eq!(game.player().x, 0.0);
    }

    #[test]
    fn test_wall_snaps_horizontally() {
        let grid = TileGrid::from_rows(&[[0u8, 0, 1], [1, 1, 1]]).unwrap();
        let mut game = Platformer::new(grid);
        game.player = PlatformerPlayer::at(0.0, 0.0);
        game.step(IDLE);
        game.step(IDLE);
        assert_eq!(game.player().y, 0.0);
        assert!(game.player().grounded);

        let right = PlatformerInput { right: true, ..IDLE };
        for _ in 0..10 {
            game.step(right);
        }
        assert_eq!(game.player().x, 40.0);
    }

    #[test]
    fn test_head_bump_stops_rise() {
        let grid = TileGrid::from_rows(&[[1u8], [0], [0], [1]]).unwrap();
        let mut game = Platformer::new(grid);
        game.player = PlatformerPlayer::at(0.0, 42.0);
        game.player.vy = -5.0;
        game.step(IDLE);
        assert_eq!(game.player().y, 40.0);
        assert_eq!(game.player().vy, 0.0);
    }

    #[test]
    fn test_hazard_respawns_and_counts() {
        let mut game = Platformer::default();
        game.step(IDLE);
        // Walk right into the pit (columns 6..=12 of row 13).
        let right = PlatformerInput { right: true, ..IDLE };
        let mut frames = 0;
        while game.deaths() == 0 && frames < 200 {
            game.step(right);
            frames += 1;
        }
        assert_eq!(game.deaths(), 1);
        let p = game.player();
        assert_eq!((p.x, p.y, p.vx, p.vy), (40.0, 480.0, 0.0, 0.0));
        assert!(!p.grounded);
    }

    #[test]
    fn test_rejects_unknown_tile() {
        let err = TileGrid::from_rows(&[[0u8, 3]]).unwrap_err();
        assert!(matches!(err, LevelError::UnknownTile { row: 0, col: 1, code: 3 }));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let rows = vec![vec![0u8, 0], vec![0u8]];
        let err = TileGrid::from_rows(&rows).unwrap_err();
        assert!(matches!(err, LevelError::RaggedRow { row: 1, len: 1, expected: 2 }));
    }

    #[test]
    fn test_from_json_matches_default() {
        let json = serde_json::to_string(&DEFAULT_LEVEL.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap();
        assert_eq!(TileGrid::from_json(&json).unwrap(), TileGrid::default_level());
    }
}
