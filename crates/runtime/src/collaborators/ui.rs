use bitflags::bitflags;
use game_events::Resolution;

use crate::handlers::CancelContext;

bitflags! {
    /// Set of UI panels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Panels: u16 {
        const MAIN_MENU = 1 << 0;
        const HUD = 1 << 1;
        const PAUSE = 1 << 2;
        const PAUSE_CONFIRMATION = 1 << 3;
        const INVENTORY = 1 << 4;
        const LEVEL_TRANSITION = 1 << 5;
        const SAVE_SLOT = 1 << 6;
        const SETTINGS = 1 << 7;
        const EXIT_CONFIRMATION = 1 << 8;

        /// Panels that must not survive a return to the main menu.
        const TRANSIENT = Self::PAUSE.bits()
            | Self::PAUSE_CONFIRMATION.bits()
            | Self::INVENTORY.bits()
            | Self::LEVEL_TRANSITION.bits()
            | Self::SAVE_SLOT.bits()
            | Self::SETTINGS.bits()
            | Self::EXIT_CONFIRMATION.bits();
    }
}

/// Panel visibility and display settings owned by the UI layer.
pub trait UiManager {
    fn show(&self, panels: Panels);

    fn hide(&self, panels: Panels);

    /// Currently visible panels.
    fn visible(&self) -> Panels;

    /// Shows `panels` if any of them is hidden, hides them otherwise.
    fn toggle(&self, panels: Panels) {
        if self.visible().contains(panels) {
            self.hide(panels);
        } else {
            self.show(panels);
        }
    }

    /// Snapshot of everything the cancel key cares about.
    fn cancel_context(&self) -> CancelContext;

    fn apply_resolution(&self, resolution: Resolution);

    fn set_fullscreen(&self, enabled: bool);
}
