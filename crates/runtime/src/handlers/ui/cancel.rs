//! Cancel-key routing.
//!
//! A single key closes whatever is on top. What "on top" means is decided here,
//! from a snapshot of UI and game state, in a fixed priority order; the first
//! rule that matches wins.

use strum::{AsRefStr, Display};

use crate::collaborators::Panels;

/// Everything the cancel key looks at, captured at the moment it is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancelContext {
    pub dialogue_active: bool,
    pub inventory_open: bool,
    pub pause_confirmation_visible: bool,
    pub pause_visible: bool,
    pub level_transition_visible: bool,
    pub save_slot_visible: bool,
    pub exit_confirmation_visible: bool,
    pub game_started: bool,
    pub game_paused: bool,
}

impl CancelContext {
    /// Builds a context from a panel visibility set plus the non-panel flags.
    pub fn from_panels(
        visible: Panels,
        dialogue_active: bool,
        game_started: bool,
        game_paused: bool,
    ) -> Self {
        Self {
            dialogue_active,
            inventory_open: visible.contains(Panels::INVENTORY),
            pause_confirmation_visible: visible.contains(Panels::PAUSE_CONFIRMATION),
            pause_visible: visible.contains(Panels::PAUSE),
            level_transition_visible: visible.contains(Panels::LEVEL_TRANSITION),
            save_slot_visible: visible.contains(Panels::SAVE_SLOT),
            exit_confirmation_visible: visible.contains(Panels::EXIT_CONFIRMATION),
            game_started,
            game_paused,
        }
    }
}

/// What a cancel press resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CancelAction {
    /// A conversation is open; the dialogue system handles the key itself.
    DeferToDialogue,
    ToggleInventory,
    ClosePauseConfirmation,
    ClosePauseMenu,
    DismissLevelTransition,
    CloseSaveSlotMenu,
    HideExitConfirmation,
    OpenPauseMenu,
    ShowExitConfirmation,
    Nothing,
}

/// Resolves a cancel press. Pure: callers apply the returned action.
pub fn resolve_cancel(ctx: &CancelContext) -> CancelAction {
    if ctx.dialogue_active {
        CancelAction::DeferToDialogue
    } else if ctx.inventory_open {
        CancelAction::ToggleInventory
    } else if ctx.pause_confirmation_visible {
        CancelAction::ClosePauseConfirmation
    } else if ctx.pause_visible {
        CancelAction::ClosePauseMenu
    } else if ctx.level_transition_visible {
        CancelAction::DismissLevelTransition
    } else if ctx.save_slot_visible {
        CancelAction::CloseSaveSlotMenu
    } else if ctx.exit_confirmation_visible {
        CancelAction::HideExitConfirmation
    } else if ctx.game_started && !ctx.game_paused {
        CancelAction::OpenPauseMenu
    } else if !ctx.game_started {
        CancelAction::ShowExitConfirmation
    } else {
        CancelAction::Nothing
    }
}
