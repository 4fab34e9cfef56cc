use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::color::Rgb;
use crate::config::{Config, EXPORT_SCALE_MAX, EXPORT_SCALE_MIN};
use crate::render::{self, RenderedSvg, PREVIEW_BOX};
use crate::state::{AppState, Repaint};
use crate::transcode;

/// Shared handle the GUI talks to. Every mutation funnels through here; the
/// view only reads state snapshots.
#[derive(Clone)]
pub struct GuiController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    state: Arc<Mutex<AppState>>,
}

impl GuiController {
    pub fn new() -> Result<Self> {
        let mut state = AppState::default();
        match Config::load() {
            Ok(config) => state.config = config,
            Err(err) => warn!("Falling back to default config: {err:#}"),
        }

        Ok(Self {
            inner: Arc::new(ControllerInner {
                state: Arc::new(Mutex::new(state)),
            }),
        })
    }

    pub fn state(&self) -> Arc<Mutex<AppState>> {
        Arc::clone(&self.inner.state)
    }

    pub fn status_message(&self) -> String {
        self.inner.state.lock().status_message.clone()
    }

    pub fn set_status(&self, message: impl Into<String>) {
        self.inner.state.lock().status_message = message.into();
    }

    /// Directory the file dialogs should open in.
    pub fn dialog_dir(&self) -> Option<PathBuf> {
        self.inner.state.lock().config.last_open_dir.clone()
    }

    /// Load an SVG into the editor, replacing any current document. Unsaved
    /// edits are discarded without a prompt.
    pub fn load_file(&self, path: &Path) -> Result<()> {
        {
            let mut state = self.inner.state.lock();
            let reloading = state.session.is_current_file(path);
            state.session.load_file(path)?;

            let (file_name, colors, occurrences) = match state.session.document() {
                Some(doc) => (
                    doc.file_name(),
                    doc.palette().len(),
                    doc.palette().occurrence_count(),
                ),
                None => return Err(anyhow!("document missing after load")),
            };

            state.status_message = if reloading {
                format!("Reloaded {file_name} from disk, edits discarded")
            } else if colors == 0 {
                format!("Loaded {file_name}: no solid fill colors found")
            } else {
                format!("Loaded {file_name}: {colors} colors across {occurrences} fills")
            };
            state.config.remember_opened(path);
            info!(
                "Loaded {} ({} colors, {} fills)",
                path.display(),
                colors,
                occurrences
            );
        }
        self.save_config()
    }

    /// Reload the current file from disk, dropping in-session edits.
    pub fn revert_file(&self) -> Result<()> {
        let mut state = self.inner.state.lock();
        state.session.revert()?;
        let file_name = state
            .session
            .document()
            .map(|doc| doc.file_name())
            .unwrap_or_default();
        info!("Reloaded {file_name} from disk");
        state.status_message = format!("Reloaded {file_name} from disk");
        Ok(())
    }

    pub fn select_color(&self, index: usize) {
        let mut state = self.inner.state.lock();
        if state.session.select_color(index) {
            Self::report_selection(&mut state);
        }
    }

    pub fn select_next_color(&self) {
        let mut state = self.inner.state.lock();
        if state.session.select_next() {
            Self::report_selection(&mut state);
        }
    }

    pub fn select_previous_color(&self) {
        let mut state = self.inner.state.lock();
        if state.session.select_previous() {
            Self::report_selection(&mut state);
        }
    }

    fn report_selection(state: &mut AppState) {
        if let Some(entry) = state
            .session
            .document()
            .and_then(|doc| doc.selected_entry())
        {
            state.status_message = format!(
                "Selected {} ({} fills)",
                entry.current().to_css(),
                entry.occurrence_count()
            );
        }
    }

    /// Repaint every occurrence of the selected color. Returns what changed,
    /// or `None` when nothing is selected.
    pub fn repaint_selected(&self, color: Rgb) -> Result<Option<Repaint>> {
        let mut state = self.inner.state.lock();
        let outcome = state.session.repaint_selected(color)?;
        if let Some(repaint) = &outcome {
            state.status_message = format!(
                "Repainted {} fills {} -> {}",
                repaint.occurrences,
                repaint.previous.to_css(),
                repaint.color.to_css()
            );
        }
        Ok(outcome)
    }

    /// Reset the selected color back to the value found at load time.
    pub fn restore_selected_original(&self) -> Result<Option<Repaint>> {
        let original = {
            let state = self.inner.state.lock();
            state
                .session
                .document()
                .and_then(|doc| doc.selected_entry())
                .map(|entry| entry.original())
        };
        match original {
            Some(color) => self.repaint_selected(color),
            None => Ok(None),
        }
    }

    /// Save the edited document under a user-chosen name into the source
    /// file's directory.
    pub fn save_svg(&self, name: &str) -> Result<PathBuf> {
        let mut state = self.inner.state.lock();
        let doc = state
            .session
            .document()
            .ok_or_else(|| anyhow!("No file loaded"))?;
        let target = doc.save_as(name)?;
        info!("Saved SVG to {}", target.display());
        state.status_message = format!("Saved {}", target.display());
        Ok(target)
    }

    /// Render the current document at the configured export scale and write
    /// a PNG to `target`.
    pub fn export_png(&self, target: &Path) -> Result<PathBuf> {
        let (text, scale) = {
            let state = self.inner.state.lock();
            let doc = state
                .session
                .document()
                .ok_or_else(|| anyhow!("No file loaded"))?;
            (doc.text().to_string(), state.config.export_scale)
        };

        let rendered = render::rasterize(&text, scale)
            .with_context(|| format!("Failed to render {}", target.display()))?;
        fs::write(target, &rendered.png)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        info!(
            "Exported {}x{} PNG to {}",
            rendered.width,
            rendered.height,
            target.display()
        );

        let mut state = self.inner.state.lock();
        state.status_message = format!(
            "Exported {}x{} PNG to {}",
            rendered.width,
            rendered.height,
            target.display()
        );
        Ok(target.to_path_buf())
    }

    /// Rasterize the current document for the editor preview, fitted into
    /// the preview box.
    pub fn render_preview(&self) -> Result<RenderedSvg> {
        let text = {
            let state = self.inner.state.lock();
            state
                .session
                .document()
                .map(|doc| doc.text().to_string())
                .ok_or_else(|| anyhow!("No file loaded"))?
        };
        render::rasterize_to_fit(&text, PREVIEW_BOX).context("Failed to render preview")
    }

    /// Queue dropped paths for batch conversion. Non-SVG paths are skipped
    /// silently. Returns how many new items were queued.
    pub fn enqueue_convert_paths(&self, paths: &[PathBuf]) -> usize {
        let mut state = self.inner.state.lock();
        let added = state.convert_queue.enqueue(paths);
        let total = state.convert_queue.len();
        state.status_message = if added == 0 {
            "No new SVG files to queue".to_string()
        } else {
            format!("Queued {added} SVG files ({total} total)")
        };
        added
    }

    /// Convert every queued file to a PNG next to its source. Failures are
    /// recorded per file and never abort the rest of the batch.
    pub fn run_batch_convert(&self) -> Result<(usize, usize)> {
        let (inputs, scale) = {
            let state = self.inner.state.lock();
            (state.convert_queue.paths(), state.config.export_scale)
        };
        if inputs.is_empty() {
            return Err(anyhow!("Convert queue is empty"));
        }

        info!("Converting {} files at {}x scale", inputs.len(), scale);
        let outcomes = transcode::convert_all(&inputs, scale)
            .into_iter()
            .map(|result| result.map_err(|err| format!("{:#}", anyhow::Error::new(err))))
            .collect();

        let mut state = self.inner.state.lock();
        state.convert_queue.apply_results(outcomes);
        let converted = state.convert_queue.converted_count();
        let failed = state.convert_queue.failed_count();
        state.status_message = if failed == 0 {
            format!("Converted {converted} files")
        } else {
            format!("Converted {converted} files, {failed} failed")
        };
        Ok((converted, failed))
    }

    pub fn clear_convert_queue(&self) {
        let mut state = self.inner.state.lock();
        state.convert_queue.clear();
        state.status_message = "Convert queue cleared".to_string();
    }

    pub fn set_export_scale(&self, scale: f32) -> Result<()> {
        {
            let mut state = self.inner.state.lock();
            state.config.export_scale = scale.clamp(EXPORT_SCALE_MIN, EXPORT_SCALE_MAX);
            state.status_message =
                format!("Export scale set to {:.2}x", state.config.export_scale);
        }
        self.save_config()
    }

    pub fn open_config_folder(&self) -> Result<()> {
        let dir = Config::app_dir()?;
        open::that(&dir).with_context(|| format!("Failed to open {}", dir.display()))
    }

    pub fn open_logs_folder(&self) -> Result<()> {
        let dir = Config::app_dir()?.join("logs");
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        open::that(&dir).with_context(|| format!("Failed to open {}", dir.display()))
    }

    fn save_config(&self) -> Result<()> {
        let config = self.inner.state.lock().config.clone();
        config
            .save()
            .map_err(|err| anyhow!("failed to save config: {err}"))
    }
}
