#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTab {
    Editor,
    Convert,
    Settings,
    Help,
}

impl AppTab {
    pub const ALL: [AppTab; 4] = [
        AppTab::Editor,
        AppTab::Convert,
        AppTab::Settings,
        AppTab::Help,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AppTab::Editor => "🎨 Editor",
            AppTab::Convert => "🖼 Convert",
            AppTab::Settings => "⚙️ Settings",
            AppTab::Help => "ℹ️ Help",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppTab::Editor => "Editor",
            AppTab::Convert => "Convert to PNG",
            AppTab::Settings => "Settings",
            AppTab::Help => "Help",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AppTab::Editor => "🎨",
            AppTab::Convert => "🖼",
            AppTab::Settings => "⚙️",
            AppTab::Help => "ℹ️",
        }
    }

    pub fn next(self) -> AppTab {
        match self {
            AppTab::Editor => AppTab::Convert,
            AppTab::Convert => AppTab::Settings,
            AppTab::Settings => AppTab::Help,
            AppTab::Help => AppTab::Editor,
        }
    }

    pub fn previous(self) -> AppTab {
        match self {
            AppTab::Editor => AppTab::Help,
            AppTab::Convert => AppTab::Editor,
            AppTab::Settings => AppTab::Convert,
            AppTab::Help => AppTab::Settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycling_covers_all_tabs() {
        let mut tab = AppTab::Editor;
        for _ in 0..AppTab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, AppTab::Editor);

        for expected in AppTab::ALL {
            assert_eq!(expected.next().previous(), expected);
        }
    }
}
