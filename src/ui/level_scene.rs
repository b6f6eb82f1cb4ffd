//! Renders the running level: sky, clouds, pipes, ground and the flyer.

use super::game_common::{create_game_layout, render_info_panel_frame, render_status_bar};
use super::HudState;
use flappy::level::{SegmentKind, SpawningLayer};
use flappy::{FlyerPhase, KeyValueStore, Level, Session};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// World units shown left of the flyer.
const VIEW_LEFT: f64 = -45.0;
/// World units shown right of the flyer; pipes enter just inside this edge.
const VIEW_RIGHT: f64 = 105.0;
/// Rows a cloud occupies.
const CLOUD_ROWS: f64 = 6.0;

/// Maps terminal cells to world coordinates and back.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Viewport {
    pub fn new(area: Rect, floor_y: f64, ceiling_y: f64) -> Self {
        Self {
            cols: area.width,
            rows: area.height,
            min_x: VIEW_LEFT,
            max_x: VIEW_RIGHT,
            min_y: floor_y,
            max_y: ceiling_y,
        }
    }

    fn cell_width(&self) -> f64 {
        (self.max_x - self.min_x) / f64::from(self.cols.max(1))
    }

    fn cell_height(&self) -> f64 {
        (self.max_y - self.min_y) / f64::from(self.rows.max(1))
    }

    /// World x at the centre of a column.
    pub fn world_x(&self, col: u16) -> f64 {
        self.min_x + (f64::from(col) + 0.5) * self.cell_width()
    }

    /// World y at the centre of a row. Row 0 is the ceiling.
    pub fn world_y(&self, row: u16) -> f64 {
        self.max_y - (f64::from(row) + 0.5) * self.cell_height()
    }

    /// Cell containing a world point, if it is on screen.
    pub fn cell_of(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if x < self.min_x || x >= self.max_x || y < self.min_y || y > self.max_y {
            return None;
        }
        let col = ((x - self.min_x) / self.cell_width()) as u16;
        let row = ((self.max_y - y) / self.cell_height()) as u16;
        Some((col.min(self.cols.saturating_sub(1)), row.min(self.rows.saturating_sub(1))))
    }
}

/// One character cell of the play area.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const SKY: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// Render the full level screen.
pub fn render_level<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S>,
    hud: &HudState,
) {
    let layout = create_game_layout(frame, area, " Flappy ", Color::Cyan, 24);

    render_play_area(frame, layout.content, session);
    render_status(frame, layout.status_bar, session, hud);
    render_info_panel(frame, layout.info_panel, session, hud);
}

fn render_play_area<S: KeyValueStore>(frame: &mut Frame, area: Rect, session: &Session<S>) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let level = session.level();
    let world = &session.config().world;
    let view = Viewport::new(area, world.floor_y(), world.ceiling_y());

    let mut grid = vec![vec![SKY; area.width as usize]; area.height as usize];
    paint_clouds(&mut grid, &view, level.clouds());
    paint_pipes(&mut grid, &view, level);
    paint_ground(&mut grid, &view, level);
    paint_flyer(&mut grid, &view, session);

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|c| Span::styled(c.glyph.to_string(), Style::default().fg(c.color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn paint_clouds(grid: &mut [Vec<Cell>], view: &Viewport, clouds: &SpawningLayer) {
    for segment in clouds.segments() {
        let SegmentKind::Cloud(variant) = segment.kind else {
            continue;
        };
        let half_width = variant.width() * 0.5;
        let half_height = CLOUD_ROWS * view.cell_height() * 0.5;
        for (row, line) in grid.iter_mut().enumerate() {
            let y = view.world_y(row as u16);
            if (y - segment.y).abs() > half_height {
                continue;
            }
            for (col, cell) in line.iter_mut().enumerate() {
                let x = view.world_x(col as u16);
                // Rounded ends: narrower on the outer rows.
                let taper = 1.0 - ((y - segment.y).abs() / half_height) * 0.4;
                if (x - segment.x).abs() <= half_width * taper {
                    *cell = Cell {
                        glyph: '░',
                        color: Color::White,
                    };
                }
            }
        }
    }
}

fn paint_pipes(grid: &mut [Vec<Cell>], view: &Viewport, level: &Level) {
    let world = &level.config().world;
    let head_half = world.pipe_head_height * 0.5;
    for pair in level.pipes() {
        let half_width = pair.width * 0.5;
        for piece in pair.pieces() {
            let body = pair.body_bounds(piece, world);
            if body.is_empty() {
                continue;
            }
            for (row, line) in grid.iter_mut().enumerate() {
                let y = view.world_y(row as u16);
                let in_head = (y - piece.head_y).abs() <= head_half;
                let in_body = y >= body.min_y && y <= body.max_y;
                if !in_head && !in_body {
                    continue;
                }
                for (col, cell) in line.iter_mut().enumerate() {
                    let x = view.world_x(col as u16);
                    if in_head && (x - pair.x()).abs() <= half_width + 1.5 {
                        *cell = Cell {
                            glyph: '▓',
                            color: Color::LightGreen,
                        };
                    } else if in_body && (x - pair.x()).abs() <= half_width {
                        *cell = Cell {
                            glyph: '█',
                            color: Color::Green,
                        };
                    }
                }
            }
        }
    }
}

/// The ground belt fills the bottom row. The pattern is keyed to each
/// segment's own offset so scrolling and recycling are visible.
fn paint_ground(grid: &mut [Vec<Cell>], view: &Viewport, level: &Level) {
    let Some(bottom) = grid.last_mut() else {
        return;
    };
    let ground = level.ground();
    let width = ground.segment_width();
    for (col, cell) in bottom.iter_mut().enumerate() {
        let x = view.world_x(col as u16);
        let covering = ground
            .segments()
            .iter()
            .find(|s| x >= s.x - width * 0.5 && x < s.x + width * 0.5);
        if let Some(segment) = covering {
            let offset = x - (segment.x - width * 0.5);
            let stripe = (offset / 4.0) as i64 % 2 == 0;
            *cell = Cell {
                glyph: if stripe { '▀' } else { '▔' },
                color: Color::Rgb(160, 120, 60),
            };
        }
    }
}

fn paint_flyer<S: KeyValueStore>(grid: &mut [Vec<Cell>], view: &Viewport, session: &Session<S>) {
    let flyer = session.flyer();
    let position = flyer.position();
    let Some((col, row)) = view.cell_of(position.x, position.y) else {
        return;
    };
    let velocity = flyer.vertical_velocity();
    let glyph = match flyer.phase {
        FlyerPhase::Dead => '✖',
        _ if velocity > 20.0 => '▲',
        _ if velocity < -60.0 => '▼',
        _ => '►',
    };
    let color = if flyer.phase == FlyerPhase::Dead {
        Color::Red
    } else {
        Color::Yellow
    };
    if let Some(cell) = grid
        .get_mut(row as usize)
        .and_then(|line| line.get_mut(col as usize))
    {
        *cell = Cell { glyph, color };
    }
}

fn render_status<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S>,
    hud: &HudState,
) {
    let controls = [("[Space/W/Up/Click]", "Jump"), ("[R]", "Retry"), ("[Q]", "Quit")];
    match session.flyer().phase {
        FlyerPhase::WaitingToStart => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            &controls,
        ),
        FlyerPhase::Playing => {
            let text = match &hud.notice {
                Some(notice) => notice.clone(),
                None => format!(
                    "Score: {}  |  {}  |  Best: {}",
                    session.level().pipes_passed_count(),
                    session.level().difficulty().tier().name(),
                    session.score().get_highscore()
                ),
            };
            render_status_bar(frame, area, &text, Color::Green, &controls)
        }
        FlyerPhase::Dead => render_status_bar(frame, area, "Crashed!", Color::Red, &controls),
    }
}

fn render_info_panel<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S>,
    hud: &HudState,
) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let level = session.level();
    let difficulty = level.difficulty();
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", difficulty.tier().name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                level.pipes_passed_count().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(
                session.score().get_highscore().to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Gap: ", label),
            Span::styled(
                format!("{:.0}", difficulty.gap_size()),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Interval: ", label),
            Span::styled(
                format!("{:.1}s", difficulty.spawn_interval_max()),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Spawned: ", label),
            Span::styled(
                level.pipes_spawned().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    if let Some(cue) = hud.last_cue {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Sound: ", label),
            Span::styled(cue.name(), Style::default().fg(Color::Magenta)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> Viewport {
        Viewport::new(Rect::new(0, 0, 150, 50), -50.0, 50.0)
    }

    #[test]
    fn test_viewport_cell_centres() {
        let v = view();
        assert!((v.world_x(0) - (-44.5)).abs() < 1e-9);
        assert!((v.world_y(0) - 49.0).abs() < 1e-9);
        assert!((v.world_y(49) - (-49.0)).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_round_trips_cells() {
        let v = view();
        for col in [0u16, 10, 75, 149] {
            for row in [0u16, 25, 49] {
                assert_eq!(v.cell_of(v.world_x(col), v.world_y(row)), Some((col, row)));
            }
        }
    }

    #[test]
    fn test_viewport_rejects_offscreen() {
        let v = view();
        assert_eq!(v.cell_of(-100.0, 0.0), None);
        assert_eq!(v.cell_of(200.0, 0.0), None);
        assert_eq!(v.cell_of(0.0, 60.0), None);
    }
}
