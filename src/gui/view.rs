use std::path::PathBuf;
use std::sync::Arc;

use gpui::prelude::FluentBuilder;
use gpui::{
    div, img, px, AnyElement, AppContext, ClickEvent, Context, Entity, ExternalPaths, FocusHandle,
    Focusable, Hsla, Image as GpuiImage, ImageFormat, InteractiveElement, IntoElement, MouseButton,
    MouseDownEvent, ObjectFit, ParentElement, Render, Rgba, SharedString, Styled, StyledImage,
    Subscription, Window,
};
use gpui_component::{
    button::{Button, ButtonVariants},
    color_picker::{ColorPicker, ColorPickerEvent, ColorPickerState},
    input::{Input, InputState},
    scroll::ScrollbarAxis,
    slider::{Slider, SliderEvent, SliderState},
    ActiveTheme, Disableable, Selectable, StyledExt,
};

use super::actions::{self, *};
use super::controller::GuiController;
use super::state::AppTab;
use crate::color::Rgb;
use crate::config::{EXPORT_SCALE_MAX, EXPORT_SCALE_MIN};
use crate::palette::PaletteEntry;
use crate::state::{ConvertItem, ConvertStatus};

/// In-memory preview raster, regenerated after every document change.
struct PreviewImage {
    image: Arc<GpuiImage>,
    width: u32,
    height: u32,
}

pub struct MainView {
    controller: GuiController,
    focus_handle: FocusHandle,
    active_tab: AppTab,
    status_text: SharedString,
    file_name_input: Entity<InputState>,
    hex_input: Entity<InputState>,
    picker_state: Entity<ColorPickerState>,
    red_slider: Entity<SliderState>,
    green_slider: Entity<SliderState>,
    blue_slider: Entity<SliderState>,
    scale_slider: Entity<SliderState>,
    preview: Option<PreviewImage>,
    preview_generation: u32,
    subscriptions: Vec<Subscription>,
    // Rebuilt together with the color controls on every selection change
    color_subscriptions: Vec<Subscription>,
}

fn rgb_to_hsla(color: Rgb) -> Hsla {
    Rgba {
        r: color.r as f32 / 255.0,
        g: color.g as f32 / 255.0,
        b: color.b as f32 / 255.0,
        a: 1.0,
    }
    .into()
}

fn hsla_to_rgb(hsla: Hsla) -> Rgb {
    let rgba = hsla.to_rgb();
    Rgb::new(
        (rgba.r * 255.0).round().clamp(0.0, 255.0) as u8,
        (rgba.g * 255.0).round().clamp(0.0, 255.0) as u8,
        (rgba.b * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

impl MainView {
    pub fn new(window: &mut Window, cx: &mut Context<Self>, controller: GuiController) -> Self {
        let focus_handle = cx.focus_handle();
        let status_text: SharedString = controller.status_message().into();

        let export_scale = {
            let state = controller.state();
            let guard = state.lock();
            guard.config.export_scale
        };

        let file_name_input = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("File name for the recolored copy")
                .clean_on_escape()
        });
        let hex_input = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("RRGGBB")
                .clean_on_escape()
        });
        let picker_state = cx.new(|cx| ColorPickerState::new(window, cx));
        let red_slider = cx.new(|_| SliderState::new().min(0.).max(255.).step(1.).default_value(0.));
        let green_slider =
            cx.new(|_| SliderState::new().min(0.).max(255.).step(1.).default_value(0.));
        let blue_slider =
            cx.new(|_| SliderState::new().min(0.).max(255.).step(1.).default_value(0.));
        let scale_slider = cx.new(|_| {
            SliderState::new()
                .min(EXPORT_SCALE_MIN)
                .max(EXPORT_SCALE_MAX)
                .step(0.25)
                .default_value(export_scale)
        });

        let mut view = Self {
            controller,
            focus_handle,
            active_tab: AppTab::Editor,
            status_text,
            file_name_input,
            hex_input,
            picker_state,
            red_slider,
            green_slider,
            blue_slider,
            scale_slider,
            preview: None,
            preview_generation: 0,
            subscriptions: Vec::new(),
            color_subscriptions: Vec::new(),
        };

        view.register_scale_subscription(cx);
        view.register_color_subscriptions(cx);
        view
    }

    fn refresh_status(&mut self) {
        self.status_text = self.controller.status_message().into();
    }

    fn slider_value(&self, slider: &Entity<SliderState>, cx: &mut Context<Self>) -> f32 {
        slider.read(cx).value().start()
    }

    fn selected_entry_snapshot(&self) -> Option<PaletteEntry> {
        let state = self.controller.state();
        let guard = state.lock();
        guard
            .session
            .document()
            .and_then(|doc| doc.selected_entry().cloned())
    }

    fn register_scale_subscription(&mut self, cx: &mut Context<Self>) {
        let subscription = cx.subscribe(
            &self.scale_slider,
            |this, _, event: &SliderEvent, cx| match event {
                SliderEvent::Change(value) => {
                    if let Err(err) = this.controller.set_export_scale(value.start()) {
                        this.status_text = format!("{err:#}").into();
                    } else {
                        this.refresh_status();
                    }
                    cx.notify();
                }
            },
        );
        self.subscriptions.push(subscription);
    }

    fn register_color_subscriptions(&mut self, cx: &mut Context<Self>) {
        for slider in [&self.red_slider, &self.green_slider, &self.blue_slider] {
            let subscription =
                cx.subscribe(slider, |this, _, event: &SliderEvent, cx| match event {
                    SliderEvent::Change(_) => this.repaint_from_sliders(cx),
                });
            self.color_subscriptions.push(subscription);
        }

        let picker = cx.subscribe(
            &self.picker_state,
            |this, _, event: &ColorPickerEvent, cx| {
                if let ColorPickerEvent::Change(Some(hsla)) = event {
                    this.apply_repaint(hsla_to_rgb(*hsla), cx);
                }
            },
        );
        self.color_subscriptions.push(picker);
    }

    /// Replace the color control entities so they reflect the selected
    /// entry's current color. Slider states have no setter, so a selection
    /// change swaps in fresh ones and re-subscribes.
    fn rebuild_color_controls(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let color = self
            .selected_entry_snapshot()
            .map(|entry| entry.current())
            .unwrap_or(Rgb::new(0, 0, 0));

        self.color_subscriptions.clear();

        self.red_slider = cx.new(|_| {
            SliderState::new()
                .min(0.)
                .max(255.)
                .step(1.)
                .default_value(color.r as f32)
        });
        self.green_slider = cx.new(|_| {
            SliderState::new()
                .min(0.)
                .max(255.)
                .step(1.)
                .default_value(color.g as f32)
        });
        self.blue_slider = cx.new(|_| {
            SliderState::new()
                .min(0.)
                .max(255.)
                .step(1.)
                .default_value(color.b as f32)
        });
        self.picker_state =
            cx.new(|cx| ColorPickerState::new(window, cx).default_value(rgb_to_hsla(color)));
        self.hex_input
            .update(cx, |state, cx| state.set_value(color.to_hex(), window, cx));

        self.register_color_subscriptions(cx);
    }

    fn repaint_from_sliders(&mut self, cx: &mut Context<Self>) {
        let color = Rgb::new(
            self.slider_value(&self.red_slider, cx).round().clamp(0.0, 255.0) as u8,
            self.slider_value(&self.green_slider, cx).round().clamp(0.0, 255.0) as u8,
            self.slider_value(&self.blue_slider, cx).round().clamp(0.0, 255.0) as u8,
        );
        self.apply_repaint(color, cx);
    }

    fn apply_repaint(&mut self, color: Rgb, cx: &mut Context<Self>) {
        match self.controller.repaint_selected(color) {
            Ok(Some(_)) => {
                self.refresh_preview();
                self.refresh_status();
            }
            Ok(None) => {}
            Err(err) => {
                self.status_text = format!("{err:#}").into();
            }
        }
        cx.notify();
    }

    fn apply_hex_input(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let raw = self.hex_input.read(cx).value().trim().to_string();
        match Rgb::from_hex(&raw) {
            Ok(color) => {
                self.apply_repaint(color, cx);
                self.rebuild_color_controls(window, cx);
            }
            Err(err) => {
                self.status_text = format!("Invalid color '{raw}': {err}").into();
                cx.notify();
            }
        }
    }

    /// Re-render the preview raster. Render failures keep the previous
    /// image so a half-typed edit never blanks the panel.
    fn refresh_preview(&mut self) {
        let loaded = self.controller.state().lock().session.is_loaded();
        if !loaded {
            self.preview = None;
            return;
        }

        match self.controller.render_preview() {
            Ok(rendered) => {
                self.preview_generation = self.preview_generation.wrapping_add(1);
                self.preview = Some(PreviewImage {
                    image: Arc::new(GpuiImage::from_bytes(ImageFormat::Png, rendered.png)),
                    width: rendered.width,
                    height: rendered.height,
                });
            }
            Err(err) => {
                self.status_text = format!("{err:#}").into();
            }
        }
    }

    fn seed_file_name_input(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let stem = {
            let state = self.controller.state();
            let guard = state.lock();
            guard.session.document().map(|doc| {
                doc.path()
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("recolored")
                    .to_string()
            })
        };
        if let Some(stem) = stem {
            self.file_name_input
                .update(cx, |state, cx| state.set_value(stem, window, cx));
        }
    }

    fn load_path(&mut self, path: PathBuf, window: &mut Window, cx: &mut Context<Self>) {
        match self.controller.load_file(&path) {
            Ok(()) => {
                self.active_tab = AppTab::Editor;
                self.seed_file_name_input(window, cx);
                self.rebuild_color_controls(window, cx);
                self.refresh_preview();
                self.refresh_status();
            }
            Err(err) => {
                self.status_text = format!("{err:#}").into();
            }
        }
        cx.notify();
    }

    fn pick_and_load(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let mut dialog = rfd::FileDialog::new().add_filter("SVG Image", &["svg"]);
        if let Some(dir) = self.controller.dialog_dir() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_path(path, window, cx);
        }
        cx.notify();
    }

    // ============================================================================
    // Keyboard Shortcut Action Handlers
    // ============================================================================

    fn open_file(&mut self, _: &OpenFile, window: &mut Window, cx: &mut Context<Self>) {
        self.pick_and_load(window, cx);
    }

    fn save_svg(&mut self, _: &SaveSvg, _window: &mut Window, cx: &mut Context<Self>) {
        let name = self.file_name_input.read(cx).value().trim().to_string();
        match self.controller.save_svg(&name) {
            Ok(_) => self.refresh_status(),
            Err(err) => {
                self.status_text = format!("{err:#}").into();
            }
        }
        cx.notify();
    }

    fn export_png(&mut self, _: &ExportPng, _window: &mut Window, cx: &mut Context<Self>) {
        let seed = {
            let state = self.controller.state();
            let guard = state.lock();
            guard.session.document().map(|doc| {
                let stem = doc
                    .path()
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("export");
                (format!("{stem}.png"), doc.path().parent().map(PathBuf::from))
            })
        };

        let Some((default_name, dir)) = seed else {
            self.status_text = "Load an SVG before exporting".into();
            cx.notify();
            return;
        };

        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&default_name);
        if let Some(dir) = dir {
            dialog = dialog.set_directory(dir);
        }

        if let Some(target) = dialog.save_file() {
            match self.controller.export_png(&target) {
                Ok(_) => self.refresh_status(),
                Err(err) => {
                    self.status_text = format!("{err:#}").into();
                }
            }
        }
        cx.notify();
    }

    fn revert_file(&mut self, _: &RevertFile, window: &mut Window, cx: &mut Context<Self>) {
        match self.controller.revert_file() {
            Ok(()) => {
                self.seed_file_name_input(window, cx);
                self.rebuild_color_controls(window, cx);
                self.refresh_preview();
                self.refresh_status();
            }
            Err(err) => {
                self.status_text = format!("{err:#}").into();
            }
        }
        cx.notify();
    }

    fn run_batch_convert(
        &mut self,
        _: &RunBatchConvert,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match self.controller.run_batch_convert() {
            Ok(_) => self.refresh_status(),
            Err(err) => {
                self.status_text = format!("{err:#}").into();
            }
        }
        cx.notify();
    }

    fn clear_convert_queue(
        &mut self,
        _: &ClearConvertQueue,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.controller.clear_convert_queue();
        self.refresh_status();
        cx.notify();
    }

    fn next_color(&mut self, _: &NextColor, window: &mut Window, cx: &mut Context<Self>) {
        self.controller.select_next_color();
        self.rebuild_color_controls(window, cx);
        self.refresh_status();
        cx.notify();
    }

    fn previous_color(&mut self, _: &PreviousColor, window: &mut Window, cx: &mut Context<Self>) {
        self.controller.select_previous_color();
        self.rebuild_color_controls(window, cx);
        self.refresh_status();
        cx.notify();
    }

    fn next_tab(&mut self, _: &NextTab, _window: &mut Window, cx: &mut Context<Self>) {
        self.active_tab = self.active_tab.next();
        cx.notify();
    }

    fn previous_tab(&mut self, _: &PreviousTab, _window: &mut Window, cx: &mut Context<Self>) {
        self.active_tab = self.active_tab.previous();
        cx.notify();
    }

    fn open_help(&mut self, _: &OpenHelp, _window: &mut Window, cx: &mut Context<Self>) {
        self.active_tab = AppTab::Help;
        cx.notify();
    }

    fn open_settings(&mut self, _: &OpenSettings, _window: &mut Window, cx: &mut Context<Self>) {
        self.active_tab = AppTab::Settings;
        cx.notify();
    }

    // ============================================================================
    // Sidebar and footer
    // ============================================================================

    fn render_sidebar(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let loaded_summary = {
            let state = self.controller.state();
            let guard = state.lock();
            guard.session.document().map(|doc| {
                (
                    doc.file_name(),
                    doc.palette().len(),
                    doc.palette().occurrence_count(),
                )
            })
        };

        let open_button = Button::new("open-svg")
            .primary()
            .label(format!(
                "Open SVG ({})",
                format_keybinding("o", true, false, false)
            ))
            .w_full()
            .h(px(40.0))
            .on_click(cx.listener(|this, _event: &ClickEvent, window, cx| {
                this.pick_and_load(window, cx);
            }));

        let tab_buttons = AppTab::ALL
            .iter()
            .enumerate()
            .map(|(idx, tab)| {
                let tab_value = *tab;
                Button::new(("sidebar-tab", idx))
                    .ghost()
                    .selected(self.active_tab == tab_value)
                    .px_3()
                    .py_3()
                    .h(px(40.0))
                    .w_full()
                    .justify_start()
                    .when(self.active_tab == tab_value, |button| {
                        button.bg(cx.theme().tab_active)
                    })
                    .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                        this.active_tab = tab_value;
                        cx.notify();
                    }))
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_3()
                            .child(div().text_lg().child(tab_value.icon()))
                            .child(div().text_sm().font_semibold().child(tab_value.title())),
                    )
            })
            .collect::<Vec<_>>();

        let file_chip = match loaded_summary {
            Some((file_name, colors, occurrences)) => div()
                .p_3()
                .rounded_lg()
                .bg(cx.theme().group_box)
                .border_1()
                .border_color(cx.theme().border)
                .flex()
                .flex_col()
                .gap_1()
                .child(div().text_sm().font_semibold().text_ellipsis().child(file_name))
                .child(
                    div()
                        .text_xs()
                        .text_color(cx.theme().muted_foreground)
                        .child(format!("{colors} colors · {occurrences} fills")),
                )
                .into_any_element(),
            None => div()
                .text_xs()
                .text_color(cx.theme().muted_foreground)
                .child("No file loaded")
                .into_any_element(),
        };

        div()
            .flex()
            .flex_col()
            .gap_4()
            .p_5()
            .bg(cx.theme().sidebar)
            .text_color(cx.theme().sidebar_foreground)
            .min_w(px(230.0))
            .max_w(px(280.0))
            .flex_shrink()
            .h_full()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_2()
                            .child(div().text_lg().child("🎨"))
                            .child(div().text_lg().font_black().child("SVG Color Shifter")),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("v{}", env!("CARGO_PKG_VERSION"))),
                    ),
            )
            .child(open_button)
            .child(div().flex().flex_col().gap_1().children(tab_buttons))
            .child(div().flex_grow())
            .child(file_chip)
    }

    fn render_footer(&self, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_wrap()
            .justify_between()
            .gap_2()
            .text_sm()
            .text_color(cx.theme().muted_foreground)
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(div().w_2().h_2().rounded_full().bg(cx.theme().accent))
                    .child(self.status_text.clone()),
            )
            .child(div().child(format!(
                "{} open · {} save · {} export · {} convert",
                format_keybinding("o", true, false, false),
                format_keybinding("s", true, false, false),
                format_keybinding("e", true, false, false),
                format_keybinding("b", true, false, false),
            )))
    }

    // ============================================================================
    // Editor tab
    // ============================================================================

    fn render_editor_tab(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let snapshot = {
            let state = self.controller.state();
            let guard = state.lock();
            guard.session.document().map(|doc| {
                (
                    doc.file_name(),
                    doc.palette().entries().to_vec(),
                    doc.selected_index(),
                )
            })
        };

        let body = match snapshot {
            Some((file_name, entries, selected)) => self
                .render_editor_workspace(file_name, entries, selected, cx)
                .into_any_element(),
            None => self.render_editor_empty(cx).into_any_element(),
        };

        div()
            .size_full()
            .on_drop(cx.listener(|this, paths: &ExternalPaths, window, cx| {
                let Some(path) = paths.paths().first().cloned() else {
                    return;
                };
                this.load_path(path, window, cx);
            }))
            .drag_over::<ExternalPaths>(|style, _, _, cx| {
                style.bg(cx.theme().primary.opacity(0.06))
            })
            .child(body)
    }

    fn render_editor_empty(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let recents = {
            let state = self.controller.state();
            let guard = state.lock();
            guard.config.recent_files.clone()
        };

        let recent_rows = recents
            .iter()
            .take(6)
            .enumerate()
            .map(|(idx, path)| {
                let path_for_click = path.clone();
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Button::new(("recent-file", idx))
                    .ghost()
                    .label(name)
                    .w_full()
                    .justify_start()
                    .on_click(cx.listener(move |this, _event: &ClickEvent, window, cx| {
                        this.load_path(path_for_click.clone(), window, cx);
                    }))
            })
            .collect::<Vec<_>>();

        let drop_zone = div()
            .border_2()
            .border_dashed()
            .border_color(cx.theme().border)
            .rounded_lg()
            .bg(cx.theme().background.opacity(0.3))
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap_3()
            .h(px(320.0))
            .child(
                div()
                    .text_3xl()
                    .text_color(cx.theme().muted_foreground.opacity(0.4))
                    .child("🎨"),
            )
            .child(
                div()
                    .text_base()
                    .font_semibold()
                    .child("Drop an SVG file here"),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child("Solid fill colors are collected into a palette you can repaint."),
            )
            .child(
                Button::new("empty-browse")
                    .primary()
                    .label("Browse…")
                    .on_click(cx.listener(|this, _event: &ClickEvent, window, cx| {
                        this.pick_and_load(window, cx);
                    })),
            );

        div()
            .flex()
            .flex_col()
            .gap_4()
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .child(div().text_xl().font_semibold().child("Editor")),
            )
            .child(drop_zone)
            .when(!recent_rows.is_empty(), |this| {
                this.child(
                    div()
                        .border_1()
                        .border_color(cx.theme().border)
                        .rounded_lg()
                        .p_4()
                        .flex()
                        .flex_col()
                        .gap_2()
                        .child(div().text_lg().font_semibold().child("Recent Files"))
                        .child(div().flex().flex_col().gap_1().children(recent_rows)),
                )
            })
    }

    fn render_editor_workspace(
        &mut self,
        file_name: String,
        entries: Vec<PaletteEntry>,
        selected: Option<usize>,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let header = div()
            .flex()
            .justify_between()
            .items_center()
            .child(div().text_xl().font_semibold().child("Editor"))
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(file_name),
            );

        let palette_panel = self.render_palette_panel(&entries, selected, cx);
        let preview_panel = self.render_preview_panel(cx);
        let tools_panel = match selected.and_then(|index| entries.get(index).cloned()) {
            Some(entry) => self.render_tools_panel(&entry, cx),
            None => self.render_tools_empty(cx),
        };

        div()
            .flex()
            .flex_col()
            .gap_4()
            .size_full()
            .child(header)
            .child(
                div()
                    .flex()
                    .gap_4()
                    .items_start()
                    .child(palette_panel)
                    .child(preview_panel)
                    .child(tools_panel),
            )
    }

    fn render_palette_panel(
        &mut self,
        entries: &[PaletteEntry],
        selected: Option<usize>,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let rows = if entries.is_empty() {
            vec![div()
                .text_sm()
                .text_color(cx.theme().muted_foreground)
                .child("No solid fill colors in this file.")
                .into_any_element()]
        } else {
            let mut rows = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                rows.push(
                    self.render_palette_row(index, entry, selected == Some(index), cx)
                        .into_any_element(),
                );
            }
            rows
        };

        div()
            .w(px(260.0))
            .flex_shrink_0()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .bg(cx.theme().group_box)
            .p_4()
            .flex()
            .flex_col()
            .gap_3()
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .child(div().text_lg().font_semibold().child("Colors"))
                    .child(
                        div()
                            .px_2()
                            .py_1()
                            .rounded_full()
                            .bg(cx.theme().muted)
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("{}", entries.len())),
                    ),
            )
            .child(div().flex().flex_col().gap_2().children(rows))
            .into_any_element()
    }

    fn render_palette_row(
        &self,
        index: usize,
        entry: &PaletteEntry,
        is_selected: bool,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let color = entry.current();
        let repainted = entry.current() != entry.original();

        let handle_click = cx.listener(move |this, _event: &MouseDownEvent, window, cx| {
            this.controller.select_color(index);
            this.rebuild_color_controls(window, cx);
            this.refresh_status();
            cx.notify();
        });

        let detail = if repainted {
            format!(
                "{} fills · was {}",
                entry.occurrence_count(),
                entry.original().to_css()
            )
        } else {
            format!("{} fills", entry.occurrence_count())
        };

        div()
            .flex()
            .items_center()
            .gap_3()
            .p_2()
            .rounded_lg()
            .border_1()
            .border_color(if is_selected {
                cx.theme().primary
            } else {
                cx.theme().border
            })
            .when(is_selected, |row| row.bg(cx.theme().tab_active))
            .cursor_pointer()
            .on_mouse_down(MouseButton::Left, handle_click)
            .child(
                div()
                    .w(px(30.0))
                    .h(px(30.0))
                    .rounded_md()
                    .bg(gpui::rgb(color.to_u32()))
                    .border_1()
                    .border_color(cx.theme().border),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .child(div().text_sm().font_semibold().child(color.to_css()))
                    .child(
                        div()
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .child(detail),
                    ),
            )
    }

    fn render_preview_panel(&mut self, cx: &mut Context<Self>) -> AnyElement {
        let (preview_content, dimensions) = match &self.preview {
            Some(preview) => (
                img(preview.image.clone())
                    .id(("svg-preview", self.preview_generation))
                    .object_fit(ObjectFit::Contain)
                    .w_full()
                    .h(px(420.0))
                    .rounded_lg()
                    .into_any_element(),
                Some(format!("{} × {} px", preview.width, preview.height)),
            ),
            None => (
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .justify_center()
                    .gap_3()
                    .h(px(420.0))
                    .child(
                        div()
                            .text_3xl()
                            .text_color(cx.theme().muted_foreground.opacity(0.4))
                            .child("🖼"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child("Preview could not be rendered"),
                    )
                    .into_any_element(),
                None,
            ),
        };

        div()
            .flex_grow()
            .flex()
            .flex_col()
            .gap_2()
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .child(div().text_lg().font_semibold().child("Preview"))
                    .children(dimensions.map(|text| {
                        div()
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .child(text)
                    })),
            )
            .child(
                div()
                    .border_1()
                    .border_color(cx.theme().border)
                    .rounded_lg()
                    .bg(cx.theme().background.opacity(0.3))
                    .overflow_hidden()
                    .p_2()
                    .child(preview_content),
            )
            .into_any_element()
    }

    fn render_tools_panel(&mut self, entry: &PaletteEntry, cx: &mut Context<Self>) -> AnyElement {
        let current = entry.current();
        let original = entry.original();
        let label_color = if current.luminance() > 0.6 {
            gpui::black()
        } else {
            gpui::white()
        };

        let swatch = div()
            .h(px(64.0))
            .w_full()
            .rounded_lg()
            .bg(gpui::rgb(current.to_u32()))
            .border_1()
            .border_color(cx.theme().border)
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .text_base()
                    .font_semibold()
                    .text_color(label_color)
                    .child(current.to_css()),
            );

        let channel_rows = [
            ("R", &self.red_slider, current.r),
            ("G", &self.green_slider, current.g),
            ("B", &self.blue_slider, current.b),
        ]
        .into_iter()
        .map(|(label, slider, value)| {
            div()
                .flex()
                .items_center()
                .gap_2()
                .child(
                    div()
                        .w(px(14.0))
                        .text_sm()
                        .font_semibold()
                        .text_color(cx.theme().muted_foreground)
                        .child(label),
                )
                .child(div().flex_grow().child(Slider::new(slider)))
                .child(
                    div()
                        .min_w(px(32.0))
                        .text_sm()
                        .text_color(cx.theme().muted_foreground)
                        .child(format!("{value}")),
                )
        })
        .collect::<Vec<_>>();

        let hex_row = div()
            .flex()
            .items_center()
            .gap_2()
            .child(div().flex_grow().child(Input::new(&self.hex_input).cleanable(true)))
            .child(
                Button::new("apply-hex")
                    .label("Apply")
                    .on_click(cx.listener(|this, _event: &ClickEvent, window, cx| {
                        this.apply_hex_input(window, cx);
                    })),
            );

        let restore_row = div()
            .flex()
            .items_center()
            .gap_2()
            .child(
                div()
                    .w(px(22.0))
                    .h(px(22.0))
                    .rounded_md()
                    .bg(gpui::rgb(original.to_u32()))
                    .border_1()
                    .border_color(cx.theme().border),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!("Original {}", original.to_css())),
            )
            .child(div().flex_grow())
            .child(
                Button::new("restore-original")
                    .ghost()
                    .label("Restore")
                    .disabled(current == original)
                    .on_click(cx.listener(|this, _event: &ClickEvent, window, cx| {
                        match this.controller.restore_selected_original() {
                            Ok(Some(_)) => {
                                this.refresh_preview();
                                this.rebuild_color_controls(window, cx);
                                this.refresh_status();
                            }
                            Ok(None) => {}
                            Err(err) => {
                                this.status_text = format!("{err:#}").into();
                            }
                        }
                        cx.notify();
                    })),
            );

        let save_section = self.render_save_section(cx);

        div()
            .w(px(300.0))
            .flex_shrink_0()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .bg(cx.theme().group_box)
            .p_4()
            .flex()
            .flex_col()
            .gap_4()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .child(div().text_lg().font_semibold().child("Selected Color"))
                    .child(swatch)
                    .child(
                        div()
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("Applies to {} fills", entry.occurrence_count())),
                    ),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(ColorPicker::new(&self.picker_state))
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child("Pick a replacement color"),
                    ),
            )
            .child(div().flex().flex_col().gap_2().children(channel_rows))
            .child(hex_row)
            .child(restore_row)
            .child(save_section)
            .into_any_element()
    }

    /// Tools column for a file with nothing repaintable. Saving and export
    /// still work on such a file, so the save controls stay available.
    fn render_tools_empty(&mut self, cx: &mut Context<Self>) -> AnyElement {
        let save_section = self.render_save_section(cx);

        div()
            .w(px(300.0))
            .flex_shrink_0()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .bg(cx.theme().group_box)
            .p_4()
            .flex()
            .flex_col()
            .gap_4()
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child("Nothing to repaint. Saving and PNG export still work."),
            )
            .child(save_section)
            .into_any_element()
    }

    fn render_save_section(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap_2()
            .child(div().text_lg().font_semibold().child("Save"))
            .child(Input::new(&self.file_name_input).cleanable(true))
            .child(
                div()
                    .text_xs()
                    .text_color(cx.theme().muted_foreground)
                    .child("Written next to the source file; .svg is appended when missing."),
            )
            .child(
                div()
                    .flex()
                    .gap_2()
                    .child(
                        Button::new("save-svg")
                            .primary()
                            .label(format!(
                                "Save SVG ({})",
                                format_keybinding("s", true, false, false)
                            ))
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                let name =
                                    this.file_name_input.read(cx).value().trim().to_string();
                                match this.controller.save_svg(&name) {
                                    Ok(_) => this.refresh_status(),
                                    Err(err) => {
                                        this.status_text = format!("{err:#}").into();
                                    }
                                }
                                cx.notify();
                            })),
                    )
                    .child(
                        Button::new("export-png")
                            .ghost()
                            .label("Export PNG")
                            .on_click(cx.listener(|this, _event: &ClickEvent, window, cx| {
                                this.export_png(&ExportPng, window, cx);
                            })),
                    ),
            )
    }

    // ============================================================================
    // Convert tab
    // ============================================================================

    fn render_convert_tab(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let (items, converted, failed, scale) = {
            let state = self.controller.state();
            let guard = state.lock();
            (
                guard.convert_queue.items().to_vec(),
                guard.convert_queue.converted_count(),
                guard.convert_queue.failed_count(),
                guard.config.export_scale,
            )
        };
        let queue_empty = items.is_empty();

        let drop_card = div()
            .border_2()
            .border_dashed()
            .border_color(cx.theme().border)
            .rounded_lg()
            .bg(cx.theme().background.opacity(0.3))
            .p_6()
            .flex()
            .flex_col()
            .items_center()
            .gap_2()
            .child(
                div()
                    .text_3xl()
                    .text_color(cx.theme().muted_foreground.opacity(0.4))
                    .child("🖼"),
            )
            .child(
                div()
                    .text_base()
                    .font_semibold()
                    .child("Drop SVG files here to queue them"),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child("Each file becomes a PNG next to its source. Non-SVG files are skipped."),
            );

        let queue_rows = if queue_empty {
            vec![div()
                .text_sm()
                .text_color(cx.theme().muted_foreground)
                .child("Queue is empty.")
                .into_any_element()]
        } else {
            let mut rows = Vec::with_capacity(items.len());
            for item in &items {
                rows.push(self.render_queue_row(item, cx).into_any_element());
            }
            rows
        };

        let summary = if queue_empty {
            format!("Output scale {scale:.2}x (change in Settings)")
        } else {
            format!(
                "{} queued · {converted} converted · {failed} failed · scale {scale:.2}x",
                items.len()
            )
        };

        let actions_row = div()
            .flex()
            .items_center()
            .gap_2()
            .child(
                Button::new("convert-all")
                    .primary()
                    .label(format!(
                        "Convert All ({})",
                        format_keybinding("b", true, false, false)
                    ))
                    .disabled(queue_empty)
                    .on_click(cx.listener(|this, _event: &ClickEvent, window, cx| {
                        this.run_batch_convert(&RunBatchConvert, window, cx);
                    })),
            )
            .child(
                Button::new("clear-queue")
                    .ghost()
                    .label("Clear")
                    .disabled(queue_empty)
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.controller.clear_convert_queue();
                        this.refresh_status();
                        cx.notify();
                    })),
            )
            .child(div().flex_grow())
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(summary),
            );

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_4()
            .on_drop(cx.listener(|this, paths: &ExternalPaths, _window, cx| {
                this.controller.enqueue_convert_paths(paths.paths());
                this.refresh_status();
                cx.notify();
            }))
            .drag_over::<ExternalPaths>(|style, _, _, cx| {
                style.bg(cx.theme().primary.opacity(0.06))
            })
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .child(div().text_xl().font_semibold().child("Convert to PNG")),
            )
            .child(drop_card)
            .child(
                div()
                    .border_1()
                    .border_color(cx.theme().border)
                    .rounded_lg()
                    .bg(cx.theme().group_box)
                    .p_4()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .child(div().text_lg().font_semibold().child("Queue"))
                    .child(div().flex().flex_col().gap_2().children(queue_rows)),
            )
            .child(actions_row)
    }

    fn render_queue_row(&self, item: &ConvertItem, cx: &mut Context<Self>) -> impl IntoElement {
        let name = item
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| item.path().display().to_string());
        let directory = item
            .path()
            .parent()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();

        let status_chip = match item.status() {
            ConvertStatus::Pending => div()
                .px_2()
                .py_1()
                .rounded_full()
                .bg(cx.theme().muted)
                .text_xs()
                .text_color(cx.theme().muted_foreground)
                .child("Pending")
                .into_any_element(),
            ConvertStatus::Converted { output } => {
                let output_name = output
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| output.display().to_string());
                div()
                    .px_2()
                    .py_1()
                    .rounded_full()
                    .bg(cx.theme().success.opacity(0.15))
                    .text_xs()
                    .text_color(cx.theme().success)
                    .child(format!("→ {output_name}"))
                    .into_any_element()
            }
            ConvertStatus::Failed { message } => div()
                .px_2()
                .py_1()
                .rounded_full()
                .bg(cx.theme().danger.opacity(0.15))
                .text_xs()
                .text_color(cx.theme().danger)
                .text_ellipsis()
                .max_w(px(340.0))
                .child(message.clone())
                .into_any_element(),
        };

        div()
            .flex()
            .items_center()
            .justify_between()
            .gap_3()
            .p_2()
            .rounded_lg()
            .border_1()
            .border_color(cx.theme().border)
            .child(
                div()
                    .flex()
                    .flex_col()
                    .child(div().text_sm().font_semibold().child(name))
                    .child(
                        div()
                            .text_xs()
                            .text_color(cx.theme().muted_foreground)
                            .text_ellipsis()
                            .child(directory),
                    ),
            )
            .child(status_chip)
    }

    // ============================================================================
    // Settings tab
    // ============================================================================

    fn render_settings_tab(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let scale = self.slider_value(&self.scale_slider, cx);
        let config_path = crate::config::Config::config_path_display();

        let export_card = div()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .p_4()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().text_lg().font_semibold().child("🖼 PNG Export"))
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child("Raster scale for single exports and batch conversion."),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(div().flex_grow().child(Slider::new(&self.scale_slider)))
                    .child(
                        div()
                            .min_w(px(52.0))
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("{scale:.2}x")),
                    ),
            );

        let storage_card = div()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .p_4()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().text_lg().font_semibold().child("📁 Storage"))
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!("Config: {config_path}")),
            )
            .child(
                div()
                    .flex()
                    .flex_wrap()
                    .gap_2()
                    .child(
                        Button::new("open-config-folder")
                            .ghost()
                            .label("Open Config Folder")
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                if let Err(err) = this.controller.open_config_folder() {
                                    this.status_text = format!("{err:#}").into();
                                }
                                cx.notify();
                            })),
                    )
                    .child(
                        Button::new("open-logs-folder")
                            .ghost()
                            .label("Open Logs Folder")
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                if let Err(err) = this.controller.open_logs_folder() {
                                    this.status_text = format!("{err:#}").into();
                                }
                                cx.notify();
                            })),
                    ),
            );

        let format_card = div()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .p_4()
            .flex()
            .flex_col()
            .gap_2()
            .child(div().text_lg().font_semibold().child("🎨 Color Format"))
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(
                        "Repainted fills are written as uppercase #RRGGBB. Only the bare \
                         fill=\"#RRGGBB\" attribute form is recognized; style attributes, \
                         named colors and rgb() notation stay untouched.",
                    ),
            );

        div()
            .flex()
            .flex_col()
            .gap_4()
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .child(div().text_xl().font_semibold().child("Settings")),
            )
            .child(export_card)
            .child(storage_card)
            .child(format_card)
    }

    // ============================================================================
    // Help tab
    // ============================================================================

    fn render_help_tab(&mut self, cx: &mut Context<Self>) -> impl IntoElement {
        let quick_steps = [
            "Drop an SVG anywhere on the Editor tab, or browse with the Open button.",
            "Click a color in the palette, then repaint it with the picker, the sliders, or a hex value.",
            "Save a recolored copy; it lands next to the original file.",
            "Queue more SVGs on the Convert tab to produce PNGs in one run.",
        ];

        let quick_step_rows = quick_steps
            .iter()
            .map(|step| {
                div()
                    .flex()
                    .gap_2()
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child("•"),
                    )
                    .child(div().text_sm().child(*step))
            })
            .collect::<Vec<_>>();

        let quick_start_card = div()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .p_4()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().text_lg().font_semibold().child("🚀 Quick Start"))
            .child(div().flex().flex_col().gap_2().children(quick_step_rows));

        let shortcuts = [
            (format_keybinding("o", true, false, false), "Open an SVG file"),
            (format_keybinding("s", true, false, false), "Save the recolored SVG"),
            (format_keybinding("e", true, false, false), "Export the current file as PNG"),
            (format_keybinding("r", true, false, false), "Reload the file from disk"),
            (format_keybinding("b", true, false, false), "Run the batch convert queue"),
            (format_keybinding("⌫", true, false, false), "Clear the convert queue"),
            (format_keybinding("↓", true, false, false), "Select the next color"),
            (format_keybinding("↑", true, false, false), "Select the previous color"),
            (format_keybinding("→", true, false, true), "Next tab"),
            (format_keybinding("←", true, false, true), "Previous tab"),
            (format_keybinding(",", true, false, false), "Open Settings"),
            (format_keybinding("k", true, false, false), "Open Help"),
        ];

        let shortcut_rows = shortcuts
            .iter()
            .map(|(combo, desc)| {
                div()
                    .flex()
                    .justify_between()
                    .gap_2()
                    .child(
                        div()
                            .text_sm()
                            .font_semibold()
                            .text_color(cx.theme().primary)
                            .child(combo.clone()),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(cx.theme().foreground)
                            .child(*desc),
                    )
            })
            .collect::<Vec<_>>();

        let shortcuts_card = div()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .p_4()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().text_lg().font_semibold().child("⌨️ Keyboard Shortcuts"))
            .child(div().flex().flex_col().gap_2().children(shortcut_rows));

        let tips = [
            "Dropping a new file replaces the current one; unsaved repaints are discarded.",
            "Dropping the currently loaded file again resets it to the on-disk content.",
            "Colors are grouped by value, so #ff0000 and #FF0000 repaint together.",
            "Batch conversion keeps going when a file fails; check the per-file status chips.",
        ];

        let tip_rows = tips
            .iter()
            .map(|tip| {
                div()
                    .flex()
                    .gap_2()
                    .child(div().text_sm().text_color(cx.theme().accent).child("•"))
                    .child(div().text_sm().child(*tip))
            })
            .collect::<Vec<_>>();

        let tips_card = div()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .p_4()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().text_lg().font_semibold().child("💡 Tips"))
            .child(div().flex().flex_col().gap_2().children(tip_rows));

        let about_card = div()
            .border_1()
            .border_color(cx.theme().border)
            .rounded_lg()
            .p_4()
            .flex()
            .flex_col()
            .gap_2()
            .child(div().text_lg().font_semibold().child("ℹ️ About"))
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(format!(
                        "SVG Color Shifter v{}: repaint solid SVG fills and export PNGs.",
                        env!("CARGO_PKG_VERSION")
                    )),
            );

        div()
            .flex()
            .flex_col()
            .gap_4()
            .child(
                div()
                    .flex()
                    .justify_between()
                    .items_center()
                    .child(div().text_xl().font_semibold().child("Help")),
            )
            .child(
                div()
                    .flex()
                    .gap_4()
                    .items_start()
                    .child(div().flex_1().flex().flex_col().gap_4().child(quick_start_card).child(tips_card))
                    .child(div().flex_1().flex().flex_col().gap_4().child(shortcuts_card).child(about_card)),
            )
    }
}

impl Render for MainView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let content = match self.active_tab {
            AppTab::Editor => self.render_editor_tab(cx).into_any_element(),
            AppTab::Convert => self.render_convert_tab(cx).into_any_element(),
            AppTab::Settings => self.render_settings_tab(cx).into_any_element(),
            AppTab::Help => self.render_help_tab(cx).into_any_element(),
        };

        div()
            .track_focus(&self.focus_handle)
            .key_context("main_view")
            // File shortcuts
            .on_action(cx.listener(Self::open_file))
            .on_action(cx.listener(Self::save_svg))
            .on_action(cx.listener(Self::export_png))
            .on_action(cx.listener(Self::revert_file))
            // Batch conversion shortcuts
            .on_action(cx.listener(Self::run_batch_convert))
            .on_action(cx.listener(Self::clear_convert_queue))
            // Palette navigation shortcuts
            .on_action(cx.listener(Self::next_color))
            .on_action(cx.listener(Self::previous_color))
            // Navigation shortcuts
            .on_action(cx.listener(Self::next_tab))
            .on_action(cx.listener(Self::previous_tab))
            .on_action(cx.listener(Self::open_help))
            .on_action(cx.listener(Self::open_settings))
            .flex()
            .size_full()
            .bg(cx.theme().background)
            .relative()
            .child(
                div()
                    .absolute()
                    .inset_0()
                    .bg(cx.theme().primary.opacity(0.03)),
            )
            .text_color(cx.theme().foreground)
            .child(self.render_sidebar(cx))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_grow()
                    .min_w(px(360.0))
                    .h_full()
                    .gap_4()
                    .p_5()
                    .child(
                        div()
                            .pr(px(6.0))
                            .child(content)
                            .scrollable(ScrollbarAxis::Vertical)
                            .flex_grow(),
                    )
                    .child(self.render_footer(cx)),
            )
    }
}

impl Focusable for MainView {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}
