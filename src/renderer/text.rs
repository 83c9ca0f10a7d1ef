//! Character-grid renderer for terminals and logs

use glam::Vec2;

use super::Renderer;
use crate::consts::*;
use crate::sim::{GamePhase, Snapshot};

const PLAYER: char = '@';
const BARRIER: char = '#';
const SHOT: char = 'o';
const BOSS_SHOT: char = '*';
const POWER_UP: char = '+';
const BOSS: char = 'B';
const PARTICLE: char = '.';
const WATER: char = ' ';

/// Draws the playfield onto a fixed-size grid of characters
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
    status: String,
}

impl TextRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![WATER; cols * rows],
            status: String::new(),
        }
    }

    /// Convert playfield coordinates to a grid cell, if on screen
    pub fn game_to_cell(&self, pos: Vec2) -> Option<(usize, usize)> {
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= PLAYFIELD_WIDTH || pos.y >= PLAYFIELD_HEIGHT {
            return None;
        }
        let col = (pos.x / PLAYFIELD_WIDTH * self.cols as f32) as usize;
        let row = (pos.y / PLAYFIELD_HEIGHT * self.rows as f32) as usize;
        Some((col.min(self.cols - 1), row.min(self.rows - 1)))
    }

    fn plot(&mut self, pos: Vec2, glyph: char) {
        if let Some((col, row)) = self.game_to_cell(pos) {
            self.cells[row * self.cols + col] = glyph;
        }
    }

    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// Last frame as lines, status line last
    pub fn frame(&self) -> String {
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 3));
        let border: String = std::iter::repeat_n('-', self.cols).collect();
        out.push('+');
        out.push_str(&border);
        out.push_str("+\n");
        for row in self.cells.chunks(self.cols) {
            out.push('|');
            out.extend(row.iter());
            out.push_str("|\n");
        }
        out.push('+');
        out.push_str(&border);
        out.push_str("+\n");
        out.push_str(&self.status);
        out
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(40, 30)
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, frame: &Snapshot<'_>) {
        self.cells.fill(WATER);

        let cell_h = PLAYFIELD_HEIGHT / self.rows as f32;
        let cell_w = PLAYFIELD_WIDTH / self.cols as f32;
        for obstacle in frame.obstacles {
            let mut x = obstacle.x.max(0.0);
            while x < obstacle.trailing_edge() {
                let mut y = cell_h / 2.0;
                while y < PLAYFIELD_HEIGHT {
                    if y < obstacle.gap_top || y > obstacle.gap_bottom {
                        self.plot(Vec2::new(x, y), BARRIER);
                    }
                    y += cell_h;
                }
                x += cell_w;
            }
        }

        for particle in frame.particles {
            self.plot(particle.pos, PARTICLE);
        }
        for power_up in frame.power_ups {
            self.plot(power_up.pos, POWER_UP);
        }
        for shot in frame.projectiles {
            self.plot(shot.pos, SHOT);
        }
        if let Some(boss) = frame.boss {
            for shot in &boss.projectiles {
                self.plot(shot.pos, BOSS_SHOT);
            }
            self.plot(boss.pos, BOSS);
        }
        self.plot(frame.player.pos, PLAYER);

        let world = frame
            .world
            .as_ref()
            .map(|w| format!("{} / {}", w.name, w.level.name))
            .unwrap_or_default();
        let phase = match frame.phase {
            GamePhase::Ready => "READY",
            GamePhase::Playing => "PLAYING",
            GamePhase::GameOver => "GAME OVER",
            GamePhase::BossDefeatedInterlude => "BOSS DEFEATED",
        };
        let mut status = format!(
            "{} | score {} | best {} | {}",
            phase, frame.score, frame.high_score, world
        );
        if let Some(boss) = frame.boss {
            status.push_str(&format!(" | {} {}/{}", boss.name, boss.health, boss.max_health));
        }
        if frame.boost.active {
            status.push_str(" | BOOST");
        }
        if frame.ability.active {
            status.push_str(" | ABILITY");
        }
        self.status = status;
    }
}
