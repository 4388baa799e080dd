#![cfg(feature = "export")]

use std::fs;
use std::path::PathBuf;

use moodboard::rendering::{BoardExporter, ExportConfig};
use moodboard::{Background, BoardStore, ColorFill, ColorGroup, ImageRef, Quote, Rgb};
use sha2::{Digest, Sha256};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn fixture_board() -> BoardStore {
    let mut store = BoardStore::new();
    let backgrounds = [
        Background::Color(ColorFill { rgb: Rgb::new(244, 194, 194), group: ColorGroup::Pastel }),
        Background::Image(ImageRef {
            url: "https://images.test/photo-1.jpg".into(),
            download_location: "https://api.test/photos/1/download".into(),
        }),
        Background::Color(ColorFill { rgb: Rgb::new(90, 90, 90), group: ColorGroup::Gray }),
        Background::Color(ColorFill { rgb: Rgb::new(0, 255, 128), group: ColorGroup::Bright }),
    ];
    let quotes = [
        Quote::new("The best way out is always through.", Some("Robert Frost")),
        Quote::new("Simplicity is the ultimate sophistication.", None),
        Quote::new("Well done is better than well said.", Some("Benjamin Franklin")),
        Quote::new("Begin.", None),
    ];
    for (quote, bg) in quotes.into_iter().zip(backgrounds) {
        let card = store.create_card(quote, bg).expect("board has room");
        store.add(card);
    }
    store
}

#[test]
fn golden_board_pixels_match_fixture() {
    let exporter = BoardExporter::new(ExportConfig {
        tile_size: 96,
        gap: 8,
        padding: 8,
        ..Default::default()
    });
    let img = exporter.rasterize(fixture_board().state()).expect("rasterize");
    assert_eq!((img.width(), img.height()), (8 * 4 + 96 * 3, 8 * 4 + 96 * 3));

    // Digest raw pixels rather than JPEG bytes so encoder updates don't churn the golden
    let digest = hex::encode(Sha256::digest(img.as_raw()));

    let expected_path = golden_path("board1.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
        panic!(
            "missing golden {:?} ({}); run with UPDATE_GOLDENS=1 to create it",
            expected_path, e
        )
    });
    assert_eq!(digest, expected.trim());
}

#[test]
fn rendering_is_deterministic() {
    let exporter = BoardExporter::default();
    let board = fixture_board();
    let a = exporter.rasterize(board.state()).unwrap();
    let b = exporter.rasterize(board.state()).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());

    let jpeg = exporter.render(board.state()).unwrap();
    assert_eq!(&jpeg.jpeg_data[0..2], &[0xFF, 0xD8]);
    assert_eq!(jpeg.width, a.width());
}

#[test]
fn empty_slots_show_the_board_color() {
    let cfg = ExportConfig::default();
    let exporter = BoardExporter::new(cfg.clone());
    let img = exporter.rasterize(fixture_board().state()).unwrap();
    // Slot 8 (bottom right) is unused with four cards.
    let x = cfg.gap * 3 + cfg.tile_size * 2 + cfg.tile_size / 2;
    let y = x;
    assert_eq!(img.get_pixel(x, y).0, cfg.board_color.channels());
}
