//! Grid layout for the exported board

use crate::rendering::ExportConfig;
use crate::MAX_SIZE;

/// Number of tiles per row; the board is always a square grid.
pub const COLUMNS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Shrink by `by` pixels on every side.
    pub fn inset(&self, by: u32) -> Rect {
        Rect {
            x: self.x + by as i32,
            y: self.y + by as i32,
            width: self.width.saturating_sub(by * 2),
            height: self.height.saturating_sub(by * 2),
        }
    }
}

/// Pixel size of the whole board region. Fixed regardless of card count.
pub fn board_size(cfg: &ExportConfig) -> (u32, u32) {
    let side = cfg.gap * (COLUMNS + 1) + cfg.tile_size * COLUMNS;
    (side, side)
}

/// Tile rectangles for the first `count` grid slots, row-major.
pub fn layout_board(count: usize, cfg: &ExportConfig) -> Vec<Rect> {
    (0..count.min(MAX_SIZE) as u32)
        .map(|slot| {
            let col = slot % COLUMNS;
            let row = slot / COLUMNS;
            Rect {
                x: (cfg.gap + col * (cfg.tile_size + cfg.gap)) as i32,
                y: (cfg.gap + row * (cfg.tile_size + cfg.gap)) as i32,
                width: cfg.tile_size,
                height: cfg.tile_size,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_fill_rows_left_to_right() {
        let cfg = ExportConfig {
            tile_size: 10,
            gap: 2,
            ..Default::default()
        };
        let rects = layout_board(4, &cfg);
        assert_eq!(rects.len(), 4);
        assert_eq!((rects[0].x, rects[0].y), (2, 2));
        assert_eq!((rects[1].x, rects[1].y), (14, 2));
        assert_eq!((rects[3].x, rects[3].y), (2, 14));
        assert_eq!(board_size(&cfg), (38, 38));
    }

    #[test]
    fn never_more_than_nine_slots() {
        let cfg = ExportConfig::default();
        assert_eq!(layout_board(20, &cfg).len(), MAX_SIZE);
        let (w, h) = board_size(&cfg);
        let last = layout_board(MAX_SIZE, &cfg)[MAX_SIZE - 1];
        assert!(last.x as u32 + last.width < w);
        assert!(last.y as u32 + last.height < h);
    }

    #[test]
    fn inset_shrinks_both_sides() {
        let r = Rect { x: 0, y: 0, width: 10, height: 4 }.inset(3);
        assert_eq!(r, Rect { x: 3, y: 3, width: 4, height: 0 });
    }
}
