//! Restart pipeline observation and the return-to-menu sequence.

use std::cell::Cell;
use std::rc::Rc;

use event_bus::{EventBus, HandlerResult};
use game_events::topics::{game, reset, restart};
use game_events::{GameStateChanged, ResetRequested, RestartStage};
use tracing::{debug, info};

use super::{HandlerModule, Subscriptions};
use crate::collaborators::{Panels, UiManager};

/// Traces restart stages and sends the player back to the main menu when the
/// UI asks for a reset.
pub struct ResetHandlers {
    subscriptions: Subscriptions,
    context: Rc<ResetContext>,
}

struct ResetContext {
    bus: EventBus,
    ui: Rc<dyn UiManager>,
    stages_seen: Cell<u64>,
    restarts_completed: Cell<u64>,
}

impl ResetHandlers {
    pub fn new(bus: EventBus, ui: Rc<dyn UiManager>) -> Self {
        let context = Rc::new(ResetContext {
            bus: bus.clone(),
            ui,
            stages_seen: Cell::new(0),
            restarts_completed: Cell::new(0),
        });
        Self {
            subscriptions: Subscriptions::new(bus),
            context,
        }
    }

    /// Restart stages observed so far, across all restarts.
    pub fn stages_seen(&self) -> u64 {
        self.context.stages_seen.get()
    }

    pub fn restarts_completed(&self) -> u64 {
        self.context.restarts_completed.get()
    }
}

impl HandlerModule for ResetHandlers {
    fn name(&self) -> &'static str {
        "reset"
    }

    fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    fn subscribe_to_events(&mut self) {
        let ctx = &self.context;
        let subs = &mut self.subscriptions;

        subs.route(ctx, restart::STARTED, ResetContext::on_restart_started);
        subs.route(ctx, restart::ENTITIES_CLEARED, ResetContext::on_entities_cleared);
        subs.route(ctx, restart::PLAYER_RESET, ResetContext::on_player_reset);
        subs.route(ctx, restart::ENEMIES_RESET, ResetContext::on_enemies_reset);
        subs.route(ctx, restart::UI_RESET, ResetContext::on_ui_reset);
        subs.route(ctx, restart::COMPLETED, ResetContext::on_restart_completed);
        subs.route(ctx, reset::REQUESTED, ResetContext::on_reset_requested);
    }

    fn unsubscribe_from_events(&mut self) {
        self.subscriptions.clear();
    }
}

impl ResetContext {
    fn observe(&self, stage: &'static str, event: &RestartStage) {
        self.stages_seen.set(self.stages_seen.get() + 1);
        debug!(stage, affected = event.affected, "restart stage");
    }

    fn on_restart_started(&self, event: &RestartStage) -> HandlerResult {
        self.observe(restart::STARTED, event);
        info!("restart pipeline started");
        Ok(())
    }

    fn on_entities_cleared(&self, event: &RestartStage) -> HandlerResult {
        self.observe(restart::ENTITIES_CLEARED, event);
        Ok(())
    }

    fn on_player_reset(&self, event: &RestartStage) -> HandlerResult {
        self.observe(restart::PLAYER_RESET, event);
        Ok(())
    }

    fn on_enemies_reset(&self, event: &RestartStage) -> HandlerResult {
        self.observe(restart::ENEMIES_RESET, event);
        Ok(())
    }

    fn on_ui_reset(&self, event: &RestartStage) -> HandlerResult {
        self.observe(restart::UI_RESET, event);
        Ok(())
    }

    fn on_restart_completed(&self, event: &RestartStage) -> HandlerResult {
        self.observe(restart::COMPLETED, event);
        self.restarts_completed.set(self.restarts_completed.get() + 1);
        info!(
            restarts = self.restarts_completed.get(),
            "restart pipeline completed"
        );
        Ok(())
    }

    fn on_reset_requested(&self, event: &ResetRequested) -> HandlerResult {
        if !event.returns_to_menu() {
            debug!(
                for_ui = event.for_ui,
                from_save = event.from_save,
                "reset requested, staying in game"
            );
            return Ok(());
        }

        self.ui.hide(Panels::TRANSIENT);
        self.bus
            .publish(game::STOPPED, GameStateChanged::new("returned to main menu"));
        self.bus.publish(reset::SCENE_CLEAR_REQUESTED, ());
        self.ui.show(Panels::MAIN_MENU);
        info!("returned to main menu");
        Ok(())
    }
}
