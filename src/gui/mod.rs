mod actions;
mod controller;
mod state;
mod theme;
mod view;

use actions::*;
use controller::GuiController;
use gpui::{
    px, size, App, AppContext, Application, Bounds, KeyBinding, WindowBounds, WindowOptions,
};
use view::MainView;

/// Register the fixed keyboard shortcuts. All bindings use the platform
/// primary modifier (cmd on macOS, ctrl elsewhere).
fn register_keybindings(cx: &mut App) {
    cx.bind_keys([
        // File handling
        KeyBinding::new(&primary_keystroke("o"), OpenFile, Some("main_view")),
        KeyBinding::new(&primary_keystroke("s"), SaveSvg, Some("main_view")),
        KeyBinding::new(&primary_keystroke("e"), ExportPng, Some("main_view")),
        KeyBinding::new(&primary_keystroke("r"), RevertFile, Some("main_view")),
        // Batch conversion
        KeyBinding::new(&primary_keystroke("b"), RunBatchConvert, Some("main_view")),
        KeyBinding::new(
            &primary_keystroke("backspace"),
            ClearConvertQueue,
            Some("main_view"),
        ),
        // Palette navigation
        KeyBinding::new(&primary_keystroke("down"), NextColor, Some("main_view")),
        KeyBinding::new(&primary_keystroke("up"), PreviousColor, Some("main_view")),
        // Tab navigation
        KeyBinding::new(&primary_keystroke("alt-right"), NextTab, Some("main_view")),
        KeyBinding::new(
            &primary_keystroke("alt-left"),
            PreviousTab,
            Some("main_view"),
        ),
        KeyBinding::new(&primary_keystroke("k"), OpenHelp, Some("main_view")),
        KeyBinding::new(&primary_keystroke(","), OpenSettings, Some("main_view")),
    ]);
}

pub fn run() -> anyhow::Result<()> {
    let controller = GuiController::new()?;

    let application = Application::new();

    application.run(move |cx: &mut App| {
        gpui_component::init(cx);
        theme::install(cx);

        // Keyboard shortcuts only work while the window is focused
        register_keybindings(cx);

        let bounds = Bounds::centered(None, size(px(1180.0), px(760.0)), cx);
        let controller = controller.clone();

        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                window_min_size: Some(size(px(1000.0), px(700.0))),
                ..Default::default()
            },
            move |window, cx| {
                let controller = controller.clone();
                let view = cx.new(|cx| MainView::new(window, cx, controller.clone()));
                cx.new(|cx| gpui_component::Root::new(view.into(), window, cx))
            },
        )
        .expect("failed to open GPUI window");

        cx.activate(true);
    });

    Ok(())
}
