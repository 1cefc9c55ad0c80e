//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for wizard shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
///
/// Plain Ctrl is accepted on every platform as well.
#[cfg(target_os = "macos")]
pub const WIZARD_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const WIZARD_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for the review step
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Next step shortcut display
#[cfg(target_os = "macos")]
pub const NEXT_STEP_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const NEXT_STEP_SHORTCUT: &str = "Ctrl+N";

/// Previous step shortcut display
#[cfg(target_os = "macos")]
pub const BACK_STEP_SHORTCUT: &str = "Cmd+B";

#[cfg(not(target_os = "macos"))]
pub const BACK_STEP_SHORTCUT: &str = "Ctrl+B";

/// True when `modifiers` holds Ctrl or the platform wizard modifier
pub fn has_wizard_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(WIZARD_MODIFIER)
}
