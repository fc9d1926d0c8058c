//! Snapshot rendering for fold grids
//!
//! Rasterizes grid snapshots with tiny-skia. Layout calculation is separate
//! from drawing so geometry can be tested without touching pixels.
//!
//! Visible cells are drawn as tiles shrunk by their fold depth; retired cells
//! are not drawn at all. Letters are marked with a disc whose radius grows
//! with the letter's alphabet position.

use std::path::Path;

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect as SkiaRect, Stroke, Transform};

use crate::domain::cell::{value_of, Cell};
use crate::domain::grid::Grid;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create {width}x{height} pixmap for rendering")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Failed to write PNG: {0}")]
    EncodingFailed(String),
}

/// Represents a single line segment of the grid frame
#[derive(Debug, Clone)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Color,
}

/// A visible cell placed on the canvas
#[derive(Debug, Clone)]
pub struct CellTile {
    pub row: usize,
    pub col: usize,
    pub letter: Option<char>,
    pub depth: u32,
    /// Tile rectangle after depth scaling, centred in its slot
    pub rect: SkiaRect,
    pub fill: Color,
}

impl CellTile {
    /// Draw order; shallower tiles sit on top
    pub fn z_index(&self) -> i64 {
        10 - i64::from(self.depth)
    }
}

/// Pre-calculated layout for one grid snapshot
#[derive(Debug, Clone)]
pub struct SnapshotLayout {
    pub lines: Vec<Line>,
    /// Visible tiles in draw order (deepest first)
    pub tiles: Vec<CellTile>,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl SnapshotLayout {
    /// Scale lost per fold depth
    pub const DEPTH_SHRINK: f32 = 0.08;
    /// Smallest scale a tile can shrink to
    pub const MIN_SCALE: f32 = 0.2;

    /// Create a layout from a grid snapshot
    ///
    /// `cell_size` is the slot size in logical pixels before DPI scaling.
    pub fn from_grid(grid: &Grid, cell_size: f32, dpi_scale: f32) -> Self {
        let slot = (cell_size * dpi_scale).max(1.0);
        let (rows, cols) = grid.dimensions();
        // A zero-row grid still gets a one-slot-tall canvas
        let mut layout = Self {
            lines: Vec::new(),
            tiles: Vec::new(),
            canvas_width: slot * cols.max(1) as f32,
            canvas_height: slot * rows.max(1) as f32,
        };

        layout.calculate_grid_lines(rows, cols, slot, dpi_scale);
        layout.calculate_tiles(grid, slot);

        layout
    }

    /// Scale factor for a tile at the given depth
    pub fn scale_for_depth(depth: u32) -> f32 {
        (1.0 - depth as f32 * Self::DEPTH_SHRINK).max(Self::MIN_SCALE)
    }

    fn calculate_grid_lines(&mut self, rows: usize, cols: usize, slot: f32, dpi_scale: f32) {
        let line_width = (1.0 * dpi_scale).max(1.0);
        let line_color = Color::from_rgba8(255, 255, 255, 40);

        for col in 1..cols {
            let x = col as f32 * slot;
            self.lines.push(Line {
                x1: x,
                y1: 0.0,
                x2: x,
                y2: self.canvas_height,
                width: line_width,
                color: line_color,
            });
        }

        for row in 1..rows {
            let y = row as f32 * slot;
            self.lines.push(Line {
                x1: 0.0,
                y1: y,
                x2: self.canvas_width,
                y2: y,
                width: line_width,
                color: line_color,
            });
        }
    }

    fn calculate_tiles(&mut self, grid: &Grid, slot: f32) {
        for (row, cells) in grid.iter_rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.visible {
                    continue;
                }

                let size = slot * Self::scale_for_depth(cell.depth);
                let inset = (slot - size) / 2.0;
                let Some(rect) = SkiaRect::from_xywh(
                    col as f32 * slot + inset,
                    row as f32 * slot + inset,
                    size,
                    size,
                ) else {
                    continue;
                };

                self.tiles.push(CellTile {
                    row,
                    col,
                    letter: cell.ch,
                    depth: cell.depth,
                    rect,
                    fill: tile_color(cell),
                });
            }
        }

        self.tiles.sort_by_key(CellTile::z_index);
    }
}

fn tile_color(cell: &Cell) -> Color {
    // Deeper tiles get brighter so merged cells stand out
    let boost = (cell.depth.min(6) * 25) as u8;
    if cell.is_letter() {
        Color::from_rgba8(37, 99u8.saturating_add(boost), 235, 200)
    } else {
        Color::from_rgba8(255, 255, 255, 13)
    }
}

/// Grid snapshot renderer using tiny-skia
#[derive(Debug, Default)]
pub struct SnapshotRenderer {
    background: Option<Color>,
}

impl SnapshotRenderer {
    /// Create a renderer with a transparent background
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that fills the canvas first
    pub fn with_background(color: Color) -> Self {
        Self {
            background: Some(color),
        }
    }

    /// Render a snapshot layout to a pixmap
    pub fn render_layout(&self, layout: &SnapshotLayout) -> Result<Pixmap, RendererError> {
        let width = layout.canvas_width.ceil() as u32;
        let height = layout.canvas_height.ceil() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RendererError::PixmapCreationFailed { width, height })?;

        pixmap.fill(self.background.unwrap_or(Color::TRANSPARENT));

        self.render_lines(&mut pixmap, &layout.lines);
        for tile in &layout.tiles {
            self.render_tile(&mut pixmap, tile);
        }

        Ok(pixmap)
    }

    /// Lay out and render a grid, then write it as PNG
    pub fn save_png(
        &self,
        grid: &Grid,
        cell_size: f32,
        path: impl AsRef<Path>,
    ) -> Result<(), RendererError> {
        let layout = SnapshotLayout::from_grid(grid, cell_size, 1.0);
        let pixmap = self.render_layout(&layout)?;
        pixmap
            .save_png(path)
            .map_err(|e| RendererError::EncodingFailed(e.to_string()))
    }

    fn render_lines(&self, pixmap: &mut Pixmap, lines: &[Line]) {
        for line in lines {
            let mut path_builder = PathBuilder::new();
            path_builder.move_to(line.x1, line.y1);
            path_builder.line_to(line.x2, line.y2);

            if let Some(path) = path_builder.finish() {
                let mut paint = Paint::default();
                paint.set_color(line.color);

                let stroke = Stroke {
                    width: line.width,
                    ..Stroke::default()
                };

                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn render_tile(&self, pixmap: &mut Pixmap, tile: &CellTile) {
        let mut paint = Paint::default();
        paint.set_color(tile.fill);
        pixmap.fill_rect(tile.rect, &paint, Transform::identity(), None);

        // Disc placeholder for the glyph
        let Some(position) = tile.letter.and_then(value_of) else {
            return;
        };
        let max_radius = tile.rect.width().min(tile.rect.height()) / 2.5;
        let radius = max_radius * (position as f32 / 26.0).max(0.15);

        let mut path_builder = PathBuilder::new();
        let center_x = tile.rect.x() + tile.rect.width() / 2.0;
        let center_y = tile.rect.y() + tile.rect.height() / 2.0;
        path_builder.push_circle(center_x, center_y, radius);

        if let Some(path) = path_builder.finish() {
            let mut paint = Paint::default();
            paint.set_color(Color::WHITE);
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}
