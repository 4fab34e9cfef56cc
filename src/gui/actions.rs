//! Keyboard actions for SVG Color Shifter
//!
//! This module defines all keyboard shortcuts using GPUI's action system.
//! Each action is a zero-sized type that can be dispatched through the focus chain.

use gpui::actions;

// Define all keyboard actions for the application
actions!(
    svg_color_shifter,
    [
        // File handling
        OpenFile,
        SaveSvg,
        ExportPng,
        RevertFile,

        // Batch conversion
        RunBatchConvert,
        ClearConvertQueue,

        // Palette navigation
        NextColor,
        PreviousColor,

        // Navigation
        NextTab,
        PreviousTab,
        OpenHelp,
        OpenSettings,
    ]
);

/// Keystroke string for a binding that uses the platform primary modifier.
/// Returns "cmd-<key>" on macOS, "ctrl-<key>" on other platforms.
pub fn primary_keystroke(key: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        format!("cmd-{key}")
    }
    #[cfg(not(target_os = "macos"))]
    {
        format!("ctrl-{key}")
    }
}

/// Get the platform-specific modifier name for display
/// Returns "⌘" on macOS, "Ctrl" on other platforms
pub fn platform_modifier_symbol() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "⌘"
    }
    #[cfg(not(target_os = "macos"))]
    {
        "Ctrl"
    }
}

/// Format a keybinding for display
/// Example: format_keybinding("s", true, false, false) -> "⌘S" on macOS, "Ctrl+S" on others
pub fn format_keybinding(key: &str, ctrl_cmd: bool, shift: bool, alt: bool) -> String {
    let mut parts = Vec::new();

    if ctrl_cmd {
        parts.push(platform_modifier_symbol().to_string());
    }

    if shift {
        parts.push("⇧".to_string());
    }

    if alt {
        #[cfg(target_os = "macos")]
        parts.push("⌥".to_string());
        #[cfg(not(target_os = "macos"))]
        parts.push("Alt".to_string());
    }

    parts.push(key.to_uppercase());

    // Use no separator on macOS (⌘S), use + on others (Ctrl+S)
    #[cfg(target_os = "macos")]
    {
        parts.join("")
    }
    #[cfg(not(target_os = "macos"))]
    {
        parts.join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_keybinding() {
        // Test basic keybinding
        let result = format_keybinding("s", true, false, false);
        #[cfg(target_os = "macos")]
        assert_eq!(result, "⌘S");
        #[cfg(not(target_os = "macos"))]
        assert_eq!(result, "Ctrl+S");

        // Test with shift
        let result = format_keybinding("e", true, true, false);
        #[cfg(target_os = "macos")]
        assert_eq!(result, "⌘⇧E");
        #[cfg(not(target_os = "macos"))]
        assert_eq!(result, "Ctrl+⇧+E");
    }

    #[test]
    fn test_primary_keystroke() {
        let keystroke = primary_keystroke("o");
        #[cfg(target_os = "macos")]
        assert_eq!(keystroke, "cmd-o");
        #[cfg(not(target_os = "macos"))]
        assert_eq!(keystroke, "ctrl-o");
    }
}
