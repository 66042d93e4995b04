//! UI reactions: display settings, menus and the cancel key.

mod cancel;

pub use cancel::{CancelAction, CancelContext, resolve_cancel};

use std::rc::Rc;

use event_bus::{EventBus, HandlerResult};
use game_events::topics::{audio, game, inventory, ui};
use game_events::{GameStateChanged, ResolutionChanged, SettingsApplied, VolumeChanged};
use tracing::{debug, info};

use super::{HandlerModule, Subscriptions};
use crate::collaborators::{Panels, UiManager};

/// Drives panel visibility and display settings through the [`UiManager`].
pub struct UiHandlers {
    subscriptions: Subscriptions,
    context: Rc<UiContext>,
}

struct UiContext {
    bus: EventBus,
    ui: Rc<dyn UiManager>,
}

impl UiHandlers {
    pub fn new(bus: EventBus, ui: Rc<dyn UiManager>) -> Self {
        let context = Rc::new(UiContext {
            bus: bus.clone(),
            ui,
        });
        Self {
            subscriptions: Subscriptions::new(bus),
            context,
        }
    }
}

impl HandlerModule for UiHandlers {
    fn name(&self) -> &'static str {
        "ui"
    }

    fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    fn subscribe_to_events(&mut self) {
        let ctx = &self.context;
        let subs = &mut self.subscriptions;

        subs.route(ctx, ui::RESOLUTION_CHANGED, UiContext::on_resolution_changed);
        subs.route(ctx, ui::FULLSCREEN_TOGGLED, UiContext::on_fullscreen_toggled);
        subs.route(ctx, ui::SETTINGS_OPENED, UiContext::on_settings_opened);
        subs.route(ctx, ui::SETTINGS_CLOSED, UiContext::on_settings_closed);
        subs.route(ctx, ui::SETTINGS_APPLIED, UiContext::on_settings_applied);
        subs.route(ctx, ui::PAUSE_MENU_OPEN, UiContext::on_pause_menu_open);
        subs.route(ctx, ui::PAUSE_MENU_CLOSE, UiContext::on_pause_menu_close);
        subs.route(ctx, ui::PAUSE_CONFIRMATION_CLOSE, UiContext::on_pause_confirmation_close);
        subs.route(ctx, ui::SAVE_SLOT_MENU_CLOSE, UiContext::on_save_slot_menu_close);
        subs.route(ctx, ui::CANCEL_PRESSED, UiContext::on_cancel_pressed);
        subs.route(ctx, inventory::TOGGLE, UiContext::on_inventory_toggle);
    }

    fn unsubscribe_from_events(&mut self) {
        self.subscriptions.clear();
    }
}

impl UiContext {
    fn on_resolution_changed(&self, event: &ResolutionChanged) -> HandlerResult {
        self.ui.apply_resolution(event.resolution);
        info!(resolution = %event.resolution, "resolution changed");
        Ok(())
    }

    fn on_fullscreen_toggled(&self, enabled: &bool) -> HandlerResult {
        self.ui.set_fullscreen(*enabled);
        Ok(())
    }

    fn on_settings_opened(&self, _: &()) -> HandlerResult {
        self.ui.show(Panels::SETTINGS);
        Ok(())
    }

    fn on_settings_closed(&self, _: &()) -> HandlerResult {
        self.ui.hide(Panels::SETTINGS);
        Ok(())
    }

    fn on_settings_applied(&self, event: &SettingsApplied) -> HandlerResult {
        self.ui.apply_resolution(event.resolution);
        self.ui.set_fullscreen(event.fullscreen);
        self.bus.publish(
            audio::VOLUME_CHANGED,
            VolumeChanged::new(event.master_volume, event.music_volume, event.sfx_volume),
        );
        info!(
            resolution = %event.resolution,
            fullscreen = event.fullscreen,
            "settings applied"
        );
        Ok(())
    }

    fn on_pause_menu_open(&self, _: &()) -> HandlerResult {
        self.ui.show(Panels::PAUSE);
        self.bus
            .publish(game::PAUSED, GameStateChanged::new("pause menu opened"));
        Ok(())
    }

    fn on_pause_menu_close(&self, _: &()) -> HandlerResult {
        self.ui.hide(Panels::PAUSE | Panels::PAUSE_CONFIRMATION);
        self.bus
            .publish(game::RESUMED, GameStateChanged::new("pause menu closed"));
        Ok(())
    }

    fn on_pause_confirmation_close(&self, _: &()) -> HandlerResult {
        self.ui.hide(Panels::PAUSE_CONFIRMATION);
        Ok(())
    }

    fn on_save_slot_menu_close(&self, _: &()) -> HandlerResult {
        self.ui.hide(Panels::SAVE_SLOT);
        Ok(())
    }

    fn on_inventory_toggle(&self, _: &()) -> HandlerResult {
        self.ui.toggle(Panels::INVENTORY);
        Ok(())
    }

    fn on_cancel_pressed(&self, _: &()) -> HandlerResult {
        let context = self.ui.cancel_context();
        let action = resolve_cancel(&context);
        debug!(%action, "cancel pressed");
        self.apply(action);
        Ok(())
    }

    fn apply(&self, action: CancelAction) {
        match action {
            CancelAction::DeferToDialogue | CancelAction::Nothing => {}
            CancelAction::ToggleInventory => self.bus.publish(inventory::TOGGLE, ()),
            CancelAction::ClosePauseConfirmation => {
                self.bus.publish(ui::PAUSE_CONFIRMATION_CLOSE, ())
            }
            CancelAction::ClosePauseMenu => self.bus.publish(ui::PAUSE_MENU_CLOSE, ()),
            CancelAction::DismissLevelTransition => {
                self.ui.hide(Panels::LEVEL_TRANSITION);
                self.bus.publish(
                    game::RESUMED,
                    GameStateChanged::new("level transition dismissed"),
                );
                self.bus.publish(ui::TRANSITION_PANEL_HIDDEN, ());
            }
            CancelAction::CloseSaveSlotMenu => self.bus.publish(ui::SAVE_SLOT_MENU_CLOSE, ()),
            CancelAction::HideExitConfirmation => self.ui.hide(Panels::EXIT_CONFIRMATION),
            CancelAction::OpenPauseMenu => self.bus.publish(ui::PAUSE_MENU_OPEN, ()),
            CancelAction::ShowExitConfirmation => self.ui.show(Panels::EXIT_CONFIRMATION),
        }
    }
}
