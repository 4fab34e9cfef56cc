// Integration tests for SVG Color Shifter
// These tests drive the full pipeline through the public API: scan a file,
// repaint fills, save a copy, and convert the result to PNG.

use std::fs;
use std::path::{Path, PathBuf};

use svg_color_shifter::color::Rgb;
use svg_color_shifter::state::{ConvertQueue, Session};
use svg_color_shifter::transcode;

const ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="24">
  <rect x="0" y="0" width="24" height="24" fill="#ff0000"/>
  <rect x="24" y="0" width="24" height="24" fill="#FF0000"/>
  <circle cx="12" cy="12" r="6" fill="#00ff7f"/>
  <path d="M0 0h4v4H0z" fill="none" stroke="#123456"/>
</svg>"##;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "svg-color-shifter-integration-{tag}-{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_svg(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_recolor_and_save_round_trip() {
    let dir = temp_dir("round-trip");
    let source = write_svg(&dir, "icon.svg", ICON);

    let mut session = Session::new();
    session.load_file(&source).unwrap();

    {
        let doc = session.document().unwrap();
        assert_eq!(doc.palette().len(), 2);
        assert_eq!(doc.palette().entry(0).unwrap().original(), Rgb::new(255, 0, 0));
        assert_eq!(doc.palette().entry(0).unwrap().occurrence_count(), 2);
        assert_eq!(doc.selected_index(), Some(0));
    }

    let repaint = session.repaint_selected(Rgb::new(0x3F, 0xD2, 0xC7)).unwrap().unwrap();
    assert_eq!(repaint.occurrences, 2);

    let saved = session.document().unwrap().save_as("recolored").unwrap();
    assert_eq!(saved, dir.join("recolored.svg"));

    let saved_text = fs::read_to_string(&saved).unwrap();
    // Patching is length-preserving and only touches the repainted literals
    assert_eq!(saved_text.len(), ICON.len());
    assert_eq!(saved_text.matches(r##"fill="#3FD2C7""##).count(), 2);
    assert!(saved_text.contains(r##"fill="#00ff7f""##));
    assert!(saved_text.contains(r##"stroke="#123456""##));

    // The source file is untouched until it is saved over explicitly
    assert_eq!(fs::read_to_string(&source).unwrap(), ICON);
}

#[test]
fn test_recolored_file_converts_to_matching_png() {
    let dir = temp_dir("recolor-convert");
    let source = write_svg(&dir, "icon.svg", ICON);

    let mut session = Session::new();
    session.load_file(&source).unwrap();
    session.repaint_selected(Rgb::new(0, 0, 255)).unwrap().unwrap();

    let saved = session.document().unwrap().save_as("blue").unwrap();
    let png = transcode::convert_file(&saved, 1.0).unwrap();
    assert_eq!(png, dir.join("blue.png"));

    let decoded = image::open(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (48, 24));
    // Left rect was red, repainted blue; the circle kept its green
    assert_eq!(decoded.get_pixel(4, 4).0, [0, 0, 255, 255]);
    assert_eq!(decoded.get_pixel(12, 12).0, [0, 255, 127, 255]);
}

#[test]
fn test_reloading_the_same_file_discards_edits() {
    let dir = temp_dir("reload");
    let source = write_svg(&dir, "icon.svg", ICON);

    let mut session = Session::new();
    session.load_file(&source).unwrap();
    session.repaint_selected(Rgb::new(1, 2, 3)).unwrap().unwrap();
    assert_eq!(
        session.document().unwrap().palette().entry(0).unwrap().current(),
        Rgb::new(1, 2, 3)
    );

    assert!(session.is_current_file(&source));
    session.load_file(&source).unwrap();

    let doc = session.document().unwrap();
    assert_eq!(doc.palette().entry(0).unwrap().current(), Rgb::new(255, 0, 0));
    assert_eq!(doc.selected_index(), Some(0));
}

#[test]
fn test_batch_convert_keeps_going_after_failures() {
    let dir = temp_dir("batch");
    let good = write_svg(&dir, "good.svg", ICON);
    let broken = write_svg(&dir, "broken.svg", "<svg");
    let note = dir.join("note.txt");
    fs::write(&note, "not an svg").unwrap();

    let mut queue = ConvertQueue::new();
    let added = queue.enqueue(&[good.clone(), broken.clone(), note]);
    assert_eq!(added, 2);
    assert_eq!(queue.len(), 2);

    // Re-dropping already queued files adds nothing
    assert_eq!(queue.enqueue(&[good.clone()]), 0);

    let results = transcode::convert_all(&queue.paths(), 1.0);
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());

    queue.apply_results(
        results
            .into_iter()
            .map(|result| result.map_err(|err| err.to_string()))
            .collect(),
    );
    assert_eq!(queue.converted_count(), 1);
    assert_eq!(queue.failed_count(), 1);

    assert!(dir.join("good.png").exists());
    assert!(!dir.join("broken.png").exists());

    let decoded = image::open(dir.join("good.png")).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (48, 24));
}

#[test]
fn test_export_scale_multiplies_png_dimensions() {
    let dir = temp_dir("scale");
    let source = write_svg(&dir, "icon.svg", ICON);

    let png = transcode::convert_file(&source, 2.0).unwrap();
    let decoded = image::open(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (96, 48));
}

#[test]
fn test_file_without_solid_fills_still_saves() {
    let dir = temp_dir("no-fills");
    let source = write_svg(
        &dir,
        "plain.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8" fill="url(#grad)"/></svg>"##,
    );

    let mut session = Session::new();
    session.load_file(&source).unwrap();

    let doc = session.document().unwrap();
    assert!(doc.palette().is_empty());
    assert_eq!(doc.selected_index(), None);

    // Repainting with nothing selected is a no-op, saving still works
    assert_eq!(session.repaint_selected(Rgb::new(9, 9, 9)).unwrap(), None);
    let saved = session.document().unwrap().save_as("copy").unwrap();
    assert!(saved.exists());
}
