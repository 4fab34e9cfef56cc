/// Editing session state machine
///
/// One session owns at most one loaded SVG document. Loading a file replaces
/// the document wholesale and discards unsaved edits; there is no prompt and
/// no undo. All operations run synchronously on the caller's thread.
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::Rgb;
use crate::error::{DocumentError, PatchError, SaveError};
use crate::palette::{Palette, PaletteEntry};
use crate::patch;
use crate::sanitize::sanitize_file_name;
use crate::transcode::is_svg_path;

/// A loaded SVG document: source path, the full text buffer, and the color
/// occurrence index built from that buffer.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
    palette: Palette,
    selected: Option<usize>,
}

impl Document {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for titles and status lines.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&PaletteEntry> {
        self.selected.and_then(|index| self.palette.entry(index))
    }

    /// Write the current text under a user-chosen name into the source
    /// file's directory. The name is sanitized first; an empty result is a
    /// validation error and nothing is written. A missing `.svg` extension
    /// is appended.
    pub fn save_as(&self, name: &str) -> Result<PathBuf, SaveError> {
        let sanitized = sanitize_file_name(name);
        if sanitized.is_empty() {
            return Err(SaveError::EmptyFileName);
        }

        let file_name = if sanitized.to_ascii_lowercase().ends_with(".svg") {
            sanitized
        } else {
            format!("{sanitized}.svg")
        };

        let target = match self.path.parent() {
            Some(dir) => dir.join(&file_name),
            None => PathBuf::from(&file_name),
        };

        fs::write(&target, &self.text).map_err(|source| SaveError::WriteFailed {
            path: target.display().to_string(),
            source,
        })?;

        Ok(target)
    }
}

/// Outcome of one repaint, for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repaint {
    pub index: usize,
    pub previous: Rgb,
    pub color: Rgb,
    pub occurrences: usize,
}

/// `NoFileLoaded` until the first successful load, then exactly one
/// `Document` at a time.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<Document>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Load (or reload) an SVG file and rebuild the palette from disk
    /// content. The first palette entry is auto-selected. On failure the
    /// previously loaded document is left untouched.
    pub fn load_file(&mut self, path: &Path) -> Result<(), DocumentError> {
        if !is_svg_path(path) {
            return Err(DocumentError::NotSvg {
                path: path.display().to_string(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| DocumentError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        let palette = Palette::scan(&text);
        let selected = if palette.is_empty() { None } else { Some(0) };

        self.document = Some(Document {
            path: path.to_path_buf(),
            text,
            palette,
            selected,
        });
        Ok(())
    }

    /// Reload the current document from disk, discarding in-session edits.
    pub fn revert(&mut self) -> Result<(), DocumentError> {
        let path = self
            .document
            .as_ref()
            .map(|doc| doc.path.clone())
            .ok_or(DocumentError::NoFileLoaded)?;
        self.load_file(&path)
    }

    /// True when `path` is the currently loaded file.
    pub fn is_current_file(&self, path: &Path) -> bool {
        self.document
            .as_ref()
            .map(|doc| doc.path == path)
            .unwrap_or(false)
    }

    /// Select a palette entry by index. Out-of-range indices leave the
    /// selection unchanged and return false.
    pub fn select_color(&mut self, index: usize) -> bool {
        if let Some(doc) = self.document.as_mut() {
            if index < doc.palette.len() {
                doc.selected = Some(index);
                return true;
            }
        }
        false
    }

    /// Cycle the selection forward, wrapping at the end.
    pub fn select_next(&mut self) -> bool {
        self.cycle_selection(1)
    }

    /// Cycle the selection backward, wrapping at the start.
    pub fn select_previous(&mut self) -> bool {
        self.cycle_selection(-1)
    }

    fn cycle_selection(&mut self, step: isize) -> bool {
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        let len = doc.palette.len() as isize;
        if len == 0 {
            return false;
        }

        let current = doc.selected.unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        doc.selected = Some(next);
        true
    }

    /// Patch every occurrence of the selected color to `color` and update
    /// the entry in place. With no document or no selection this is a no-op
    /// returning `Ok(None)`.
    pub fn repaint_selected(&mut self, color: Rgb) -> Result<Option<Repaint>, PatchError> {
        let Some(doc) = self.document.as_mut() else {
            return Ok(None);
        };
        let Some(index) = doc.selected else {
            return Ok(None);
        };
        let Some(entry) = doc.palette.entry_mut(index) else {
            return Ok(None);
        };

        let previous = entry.current();
        patch::apply_at_offsets(&mut doc.text, entry.offsets(), color)?;
        entry.set_current(color);

        Ok(Some(Repaint {
            index,
            previous,
            color,
            occurrences: entry.occurrence_count(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "svg-color-shifter-session-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const THREE_FILLS: &str =
        r##"<svg><rect fill="#FF0000"/><rect fill="#00ff00"/><rect fill="#ff0000"/></svg>"##;

    fn write_svg(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_initial_state_has_no_document() {
        let session = Session::new();
        assert!(!session.is_loaded());
        assert!(session.document().is_none());
    }

    #[test]
    fn test_load_builds_palette_and_selects_first_color() {
        let dir = temp_dir("load");
        let path = write_svg(&dir, "shape.svg", THREE_FILLS);

        let mut session = Session::new();
        session.load_file(&path).unwrap();

        let doc = session.document().unwrap();
        assert_eq!(doc.palette().len(), 2);
        assert_eq!(doc.selected_index(), Some(0));
        assert_eq!(doc.selected_entry().unwrap().current(), Rgb::new(255, 0, 0));
        assert_eq!(doc.file_name(), "shape.svg");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_zero_color_file_yields_empty_selection() {
        let dir = temp_dir("empty");
        let path = write_svg(&dir, "plain.svg", "<svg><rect width=\"4\"/></svg>");

        let mut session = Session::new();
        session.load_file(&path).unwrap();

        let doc = session.document().unwrap();
        assert!(doc.palette().is_empty());
        assert_eq!(doc.selected_index(), None);

        // Repainting with nothing selected is a no-op
        let outcome = session.repaint_selected(Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(outcome, None);
        assert_eq!(session.document().unwrap().text(), "<svg><rect width=\"4\"/></svg>");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_load_leaves_previous_document_untouched() {
        let dir = temp_dir("untouched");
        let path = write_svg(&dir, "keep.svg", THREE_FILLS);

        let mut session = Session::new();
        session.load_file(&path).unwrap();

        let missing = dir.join("missing.svg");
        let err = session.load_file(&missing).unwrap_err();
        assert!(matches!(err, DocumentError::ReadFailed { .. }));

        let doc = session.document().unwrap();
        assert_eq!(doc.path(), path.as_path());
        assert_eq!(doc.text(), THREE_FILLS);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_non_svg_is_rejected_without_state_change() {
        let dir = temp_dir("boundary");
        let svg_path = write_svg(&dir, "good.svg", THREE_FILLS);
        let txt_path = write_svg(&dir, "notes.txt", "just text");

        let mut session = Session::new();

        // Rejected before any load happened
        assert!(matches!(
            session.load_file(&txt_path),
            Err(DocumentError::NotSvg { .. })
        ));
        assert!(!session.is_loaded());

        // Rejected after a load, existing document kept
        session.load_file(&svg_path).unwrap();
        assert!(matches!(
            session.load_file(&txt_path),
            Err(DocumentError::NotSvg { .. })
        ));
        assert_eq!(session.document().unwrap().path(), svg_path.as_path());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_repaint_updates_text_and_entry_in_place() {
        let dir = temp_dir("repaint");
        let path = write_svg(&dir, "shape.svg", THREE_FILLS);

        let mut session = Session::new();
        session.load_file(&path).unwrap();
        let before_len = session.document().unwrap().text().len();

        let outcome = session
            .repaint_selected(Rgb::new(0x12, 0x34, 0x56))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.previous, Rgb::new(255, 0, 0));
        assert_eq!(outcome.color, Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(outcome.occurrences, 2);

        let doc = session.document().unwrap();
        assert_eq!(doc.text().len(), before_len);
        assert_eq!(doc.text().matches("123456").count(), 2);
        assert!(doc.text().contains("00ff00"));
        assert_eq!(
            doc.selected_entry().unwrap().current(),
            Rgb::new(0x12, 0x34, 0x56)
        );
        assert_eq!(doc.selected_entry().unwrap().original(), Rgb::new(255, 0, 0));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_reloading_same_file_resets_edits() {
        let dir = temp_dir("reset");
        let path = write_svg(&dir, "shape.svg", THREE_FILLS);

        let mut session = Session::new();
        session.load_file(&path).unwrap();
        session.select_color(1);
        session.repaint_selected(Rgb::new(9, 9, 9)).unwrap();
        assert_ne!(session.document().unwrap().text(), THREE_FILLS);
        assert!(session.is_current_file(&path));

        session.load_file(&path).unwrap();
        let doc = session.document().unwrap();
        assert_eq!(doc.text(), THREE_FILLS);
        assert_eq!(doc.selected_index(), Some(0));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_revert_requires_a_document() {
        let mut session = Session::new();
        assert!(matches!(
            session.revert(),
            Err(DocumentError::NoFileLoaded)
        ));
    }

    #[test]
    fn test_revert_discards_edits() {
        let dir = temp_dir("revert");
        let path = write_svg(&dir, "shape.svg", THREE_FILLS);

        let mut session = Session::new();
        session.load_file(&path).unwrap();
        session.repaint_selected(Rgb::new(1, 1, 1)).unwrap();

        session.revert().unwrap();
        assert_eq!(session.document().unwrap().text(), THREE_FILLS);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_selection_bounds_and_cycling() {
        let dir = temp_dir("select");
        let path = write_svg(&dir, "shape.svg", THREE_FILLS);

        let mut session = Session::new();
        assert!(!session.select_color(0));
        assert!(!session.select_next());

        session.load_file(&path).unwrap();
        assert!(!session.select_color(2));
        assert!(session.select_color(1));
        assert_eq!(session.document().unwrap().selected_index(), Some(1));

        assert!(session.select_next());
        assert_eq!(session.document().unwrap().selected_index(), Some(0));
        assert!(session.select_previous());
        assert_eq!(session.document().unwrap().selected_index(), Some(1));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_as_writes_into_source_directory() {
        let dir = temp_dir("save");
        let path = write_svg(&dir, "shape.svg", THREE_FILLS);

        let mut session = Session::new();
        session.load_file(&path).unwrap();
        session.repaint_selected(Rgb::new(0, 0, 0)).unwrap();

        let doc = session.document().unwrap();
        let saved = doc.save_as("recolored").unwrap();
        assert_eq!(saved, dir.join("recolored.svg"));
        assert_eq!(fs::read_to_string(&saved).unwrap(), doc.text());

        // Hostile characters cannot escape the directory
        let saved = doc.save_as("../escape").unwrap();
        assert_eq!(saved, dir.join(".._escape.svg"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_with_blank_name_is_a_validation_error() {
        let dir = temp_dir("blank");
        let path = write_svg(&dir, "shape.svg", THREE_FILLS);

        let mut session = Session::new();
        session.load_file(&path).unwrap();

        let entries_before = fs::read_dir(&dir).unwrap().count();
        let doc = session.document().unwrap();

        assert!(matches!(doc.save_as(" "), Err(SaveError::EmptyFileName)));
        assert!(matches!(doc.save_as(""), Err(SaveError::EmptyFileName)));
        assert!(matches!(doc.save_as("\t  \n"), Err(SaveError::EmptyFileName)));

        assert_eq!(fs::read_dir(&dir).unwrap().count(), entries_before);

        fs::remove_dir_all(&dir).unwrap();
    }
}
