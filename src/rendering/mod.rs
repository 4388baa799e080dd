//! Board export: lay out the grid, paint each card, rasterize, save as JPEG.

pub mod layout;
pub mod paint;
pub mod raster;

use std::path::{Path, PathBuf};

use image::RgbImage;
use log::info;

use crate::board::BoardState;
use crate::random::Rgb;
use crate::{Error, Result};

/// File name handed to the saver.
pub const EXPORT_FILE_NAME: &str = "mood-board.jpg";

/// Export appearance settings
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Edge length of one card tile in pixels
    pub tile_size: u32,
    /// Space between tiles and around the grid
    pub gap: u32,
    /// Inner padding between a tile edge and its caption
    pub padding: u32,
    /// Fill behind the tiles
    pub board_color: Rgb,
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            tile_size: 240,
            gap: 12,
            padding: 16,
            board_color: Rgb::new(245, 242, 235),
            quality: 90,
        }
    }
}

/// An encoded board image
#[derive(Debug, Clone)]
pub struct BoardImage {
    pub width: u32,
    pub height: u32,
    pub jpeg_data: Vec<u8>,
}

/// Where an exported file ends up ("save as" in a browser, a directory here).
pub trait FileSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes exports into a directory, creating it if needed.
pub struct DiskSaver {
    dir: PathBuf,
}

impl DiskSaver {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl FileSaver for DiskSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::ExportError(format!("Cannot create {}: {}", self.dir.display(), e)))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)
            .map_err(|e| Error::ExportError(format!("Cannot write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

/// Renders the board region to an image. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct BoardExporter {
    config: ExportConfig,
}

impl BoardExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Raw pixels of the board region. Fails on an empty board.
    pub fn rasterize(&self, board: &BoardState) -> Result<RgbImage> {
        if board.cards.is_empty() {
            return Err(Error::ExportError("board is empty".into()));
        }
        let (width, height) = layout::board_size(&self.config);
        let canvas = layout::Rect { x: 0, y: 0, width, height };
        let tiles = layout::layout_board(board.cards.len(), &self.config);
        let cmds = paint::paint_board(&board.cards, &tiles, canvas, &self.config);
        Ok(raster::rasterize(width, height, &cmds))
    }

    pub fn render(&self, board: &BoardState) -> Result<BoardImage> {
        let img = self.rasterize(board)?;
        Ok(BoardImage {
            width: img.width(),
            height: img.height(),
            jpeg_data: raster::encode_jpeg(&img, self.config.quality)?,
        })
    }

    /// Render the board and hand `mood-board.jpg` to `saver`.
    pub fn export_board(&self, board: &BoardState, saver: &dyn FileSaver) -> Result<PathBuf> {
        let image = self.render(board)?;
        let path = saver.save(EXPORT_FILE_NAME, &image.jpeg_data)?;
        info!(
            "exported {} cards ({}x{}) to {}",
            board.cards.len(),
            image.width,
            image.height,
            path.display()
        );
        Ok(path)
    }
}
