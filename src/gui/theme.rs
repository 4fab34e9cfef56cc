use gpui::{px, rgb, App};
use gpui_component::theme::{self, Theme, ThemeColor, ThemeMode};

pub fn install(cx: &mut App) {
    theme::init(cx);

    // Start from gpui's default dark palette so every token has a sane value, then
    // override the hues we care about for the graphite-and-violet studio look.
    let mut colors = *ThemeColor::dark();
    // Core palette
    colors.background = rgb(0x141419).into();
    colors.foreground = rgb(0xf2f3f8).into();
    colors.primary = rgb(0x7C6CF4).into();
    colors.primary_hover = rgb(0x8F80FF).into();
    colors.primary_active = rgb(0x6455DB).into();
    colors.primary_foreground = rgb(0xffffff).into();
    // Accents and surfaces
    colors.accent = rgb(0x3FD2C7).into();
    colors.accent_foreground = rgb(0x06201d).into();
    colors.border = rgb(0x26262e).into();
    // Cards / panels
    colors.group_box = rgb(0x1c1c23).into();
    colors.group_box_foreground = colors.foreground;
    colors.muted = rgb(0x191920).into();
    colors.muted_foreground = rgb(0xaab1c2).into();
    colors.list = rgb(0x1c1c23).into();
    colors.list_even = rgb(0x20202a).into();
    colors.list_hover = rgb(0x272734).into();
    colors.list_active = rgb(0x2f2f3f).into();
    colors.list_head = rgb(0x1d1d26).into();
    colors.list_active_border = colors.primary;
    colors.slider_bar = rgb(0x272734).into();
    colors.slider_thumb = colors.primary;
    // Tabs
    colors.tab = rgb(0x191920).into();
    colors.tab_active = rgb(0x24242e).into();
    colors.tab_active_foreground = colors.foreground;
    colors.tab_foreground = rgb(0xb9bfce).into();
    colors.tab_bar = rgb(0x101015).into();
    // Selection and sidebar
    colors.selection = colors.primary;
    colors.sidebar = rgb(0x101015).into();
    colors.sidebar_foreground = colors.foreground;
    colors.sidebar_border = colors.border;
    colors.switch = rgb(0x272734).into();
    // Status tokens
    colors.warning = rgb(0xf6c343).into();
    colors.warning_foreground = rgb(0x281d08).into();
    colors.danger = rgb(0xf05d70).into();
    colors.danger_foreground = rgb(0x300006).into();
    colors.success = rgb(0x4ade80).into();
    colors.success_foreground = rgb(0x04130a).into();
    colors.info = rgb(0x4c9ef4).into();
    colors.info_foreground = rgb(0x041321).into();

    let mut theme = Theme::from(&colors);
    theme.mode = ThemeMode::Dark;
    theme.font_size = px(15.0);

    if cx.has_global::<Theme>() {
        *Theme::global_mut(cx) = theme;
    } else {
        cx.set_global(theme);
    }
}
