use crate::domain::model::{LocalizedTime, RenderMode};
use crate::domain::ports::DisplaySink;
use crate::utils::error::Result;
use std::f64::consts::TAU;
use std::io::Write;

const FACE_RADIUS: f64 = 10.0;
// terminal cells are roughly twice as tall as they are wide
const ASPECT: f64 = 2.0;

/// Renders the per-tick time to stdout, either as a single overwritten
/// digital line or as a repainted ASCII clock face.
pub struct TerminalDisplay {
    out: std::io::Stdout,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }

    fn render_digital(&mut self, time: &LocalizedTime) -> Result<()> {
        let mut handle = self.out.lock();
        write!(handle, "\r{} {}", time, time.zone)?;
        handle.flush()?;
        Ok(())
    }

    fn render_analog(&mut self, time: &LocalizedTime) -> Result<()> {
        let frame = analog_frame(time);
        let mut handle = self.out.lock();
        write!(handle, "\x1b[H\x1b[2J{}", frame)?;
        handle.flush()?;
        Ok(())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalDisplay {
    fn render(&mut self, time: &LocalizedTime, mode: RenderMode) -> Result<()> {
        match mode {
            RenderMode::Digital => self.render_digital(time),
            RenderMode::Analog => self.render_analog(time),
        }
    }
}

/// Character-grid clock face. Angles are measured clockwise from 12, and the
/// hour hand advances with the minute fraction like a real dial.
fn analog_frame(time: &LocalizedTime) -> String {
    let rows = FACE_RADIUS as usize * 2 + 1;
    let cols = (FACE_RADIUS * ASPECT) as usize * 2 + 1;
    let mut grid = vec![vec![' '; cols]; rows];

    for step in 0..60 {
        let angle = step as f64 * TAU / 60.0;
        let (row, col) = project(angle, FACE_RADIUS);
        grid[row][col] = if step % 5 == 0 { 'o' } else { '.' };
    }

    let hour_angle = ((time.hour % 12) as f64 + time.minute as f64 / 60.0) * TAU / 12.0;
    let minute_angle = (time.minute as f64 + time.second as f64 / 60.0) * TAU / 60.0;
    let second_angle = time.second as f64 * TAU / 60.0;

    // longest first so the shorter hands stay visible near the hub
    draw_hand(&mut grid, second_angle, FACE_RADIUS * 0.9, '\'');
    draw_hand(&mut grid, minute_angle, FACE_RADIUS * 0.8, '*');
    draw_hand(&mut grid, hour_angle, FACE_RADIUS * 0.5, '#');
    grid[FACE_RADIUS as usize][(FACE_RADIUS * ASPECT) as usize] = '+';

    let mut frame = String::with_capacity(rows * (cols + 1) + 32);
    for row in grid {
        frame.extend(row);
        frame.push('\n');
    }
    frame.push_str(&format!("{} {}\n", time, time.zone));
    frame
}

/// Maps (angle from 12 o'clock, radius) to a grid cell, stretching x for
/// the cell aspect ratio.
fn project(angle: f64, radius: f64) -> (usize, usize) {
    let col = FACE_RADIUS * ASPECT + radius * ASPECT * angle.sin();
    let row = FACE_RADIUS - radius * angle.cos();
    (row.round() as usize, col.round() as usize)
}

fn draw_hand(grid: &mut [Vec<char>], angle: f64, length: f64, glyph: char) {
    let steps = (length * 2.0).ceil() as usize;
    for step in 1..=steps {
        let radius = length * step as f64 / steps as f64;
        let (row, col) = project(angle, radius);
        grid[row][col] = glyph;
    }
}
