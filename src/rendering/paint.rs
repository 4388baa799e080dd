//! Display list for the exported board

use sha2::{Digest, Sha256};

use crate::card::{Background, Card};
use crate::random::Rgb;
use crate::rendering::layout::Rect;
use crate::rendering::ExportConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill `rect`, blending with what is below when `alpha < 255`.
    SolidRect { rect: Rect, rgb: Rgb, alpha: u8 },
}

// Approximate glyph box used to size the caption band.
const CHAR_WIDTH: u32 = 8;
const LINE_HEIGHT: u32 = 12;

/// Color painted for a card background. Photos are not downloaded; they get
/// a stable tint derived from their URL.
pub fn background_fill(background: &Background) -> Rgb {
    match background {
        Background::Color(fill) => fill.rgb,
        Background::Image(img) => {
            let digest = Sha256::digest(img.url.as_bytes());
            Rgb::new(digest[0], digest[1], digest[2])
        }
    }
}

/// Commands for one card: background, quote caption band, author strip.
pub fn paint_card(card: &Card, tile: Rect, cfg: &ExportConfig) -> Vec<PaintCommand> {
    let mut cmds = vec![PaintCommand::SolidRect {
        rect: tile,
        rgb: background_fill(card.background()),
        alpha: 255,
    }];

    let text_area = tile.inset(cfg.padding);
    if text_area.width < CHAR_WIDTH || text_area.height < LINE_HEIGHT * 2 {
        return cmds;
    }

    let chars_per_line = (text_area.width / CHAR_WIDTH).max(1);
    let chars = card.quote().text.chars().count() as u32;
    let max_lines = text_area.height / LINE_HEIGHT - 1;
    let lines = chars.div_ceil(chars_per_line).clamp(1, max_lines);
    let band_h = lines * LINE_HEIGHT;
    let band_y = text_area.y + ((text_area.height - band_h - LINE_HEIGHT) / 2) as i32;

    cmds.push(PaintCommand::SolidRect {
        rect: Rect {
            x: text_area.x,
            y: band_y,
            width: text_area.width,
            height: band_h,
        },
        rgb: Rgb::BLACK,
        alpha: 110,
    });

    let author_chars = card.quote().display_author().chars().count() as u32 + 1;
    cmds.push(PaintCommand::SolidRect {
        rect: Rect {
            x: text_area.x,
            y: band_y + band_h as i32 + (LINE_HEIGHT / 3) as i32,
            width: (author_chars * CHAR_WIDTH).min(text_area.width),
            height: LINE_HEIGHT / 2,
        },
        rgb: Rgb::WHITE,
        alpha: 200,
    });

    cmds
}

/// Full display list: board fill first, then every card in grid order.
pub fn paint_board(cards: &[Card], tiles: &[Rect], canvas: Rect, cfg: &ExportConfig) -> Vec<PaintCommand> {
    let mut cmds = vec![PaintCommand::SolidRect {
        rect: canvas,
        rgb: cfg.board_color,
        alpha: 255,
    }];
    for (card, tile) in cards.iter().zip(tiles) {
        cmds.extend(paint_card(card, *tile, cfg));
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardFactory, ColorFill, ImageRef, Quote};
    use crate::random::ColorGroup;

    fn tile() -> Rect {
        Rect { x: 0, y: 0, width: 200, height: 200 }
    }

    #[test]
    fn color_card_paints_its_own_color_first() {
        let mut f = CardFactory::new();
        let rgb = Rgb::new(10, 20, 30);
        let card = f
            .create(0, Quote::new("Hello", None), Background::Color(ColorFill { rgb, group: ColorGroup::Any }))
            .unwrap();
        let cmds = paint_card(&card, tile(), &ExportConfig::default());
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], PaintCommand::SolidRect { rect: tile(), rgb, alpha: 255 });
    }

    #[test]
    fn image_tint_is_stable_per_url() {
        let a = Background::Image(ImageRef { url: "https://img/a".into(), download_location: String::new() });
        let b = Background::Image(ImageRef { url: "https://img/b".into(), download_location: String::new() });
        assert_eq!(background_fill(&a), background_fill(&a.clone()));
        assert_ne!(background_fill(&a), background_fill(&b));
    }

    #[test]
    fn long_quotes_get_taller_bands_within_tile() {
        let mut f = CardFactory::new();
        let bg = Background::Color(ColorFill { rgb: Rgb::WHITE, group: ColorGroup::Any });
        let short = f.create(0, Quote::new("Hi", None), bg.clone()).unwrap();
        let long = f.create(1, Quote::new("word ".repeat(200), None), bg).unwrap();
        let cfg = ExportConfig::default();
        let band = |card: &Card| match &paint_card(card, tile(), &cfg)[1] {
            PaintCommand::SolidRect { rect, .. } => *rect,
        };
        let (s, l) = (band(&short), band(&long));
        assert!(l.height > s.height);
        assert!(l.y >= tile().inset(cfg.padding).y);
        assert!(l.y as u32 + l.height <= 200);
    }
}
