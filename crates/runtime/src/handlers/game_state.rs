//! Game-state reactions: pause, game over, restarts and level announcements.

use std::rc::Rc;

use event_bus::{EventBus, HandlerError, HandlerResult};
use game_events::topics::{game, level, restart};
use game_events::{
    GameOver, GameStateChanged, LevelCompleted, LevelLoaded, LevelTransition, RestartRequested,
    RestartStage,
};
use tracing::info;

use super::{HandlerModule, Subscriptions};
use crate::collaborators::{LogColor, LogSink, RestartManager};

pub struct GameStateHandlers {
    subscriptions: Subscriptions,
    context: Rc<GameStateContext>,
}

struct GameStateContext {
    bus: EventBus,
    log: Rc<dyn LogSink>,
    restart: Rc<dyn RestartManager>,
}

impl GameStateHandlers {
    pub fn new(bus: EventBus, log: Rc<dyn LogSink>, restart: Rc<dyn RestartManager>) -> Self {
        let context = Rc::new(GameStateContext {
            bus: bus.clone(),
            log,
            restart,
        });
        Self {
            subscriptions: Subscriptions::new(bus),
            context,
        }
    }
}

impl HandlerModule for GameStateHandlers {
    fn name(&self) -> &'static str {
        "game-state"
    }

    fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    fn subscribe_to_events(&mut self) {
        let ctx = &self.context;
        let subs = &mut self.subscriptions;

        subs.route(ctx, game::STARTED, GameStateContext::on_started);
        subs.route(ctx, game::PAUSED, GameStateContext::on_paused);
        subs.route(ctx, game::RESUMED, GameStateContext::on_resumed);
        subs.route(ctx, game::STOPPED, GameStateContext::on_stopped);
        subs.route(ctx, game::OVER, GameStateContext::on_game_over);
        subs.route(ctx, game::RESTART_REQUESTED, GameStateContext::on_restart_requested);

        subs.route(ctx, level::LOADED, GameStateContext::on_level_loaded);
        subs.route(ctx, level::COMPLETED, GameStateContext::on_level_completed);
        subs.route(ctx, level::TRANSITION_STARTED, GameStateContext::on_transition_started);
    }

    fn unsubscribe_from_events(&mut self) {
        self.subscriptions.clear();
    }
}

impl GameStateContext {
    fn on_started(&self, _: &GameStateChanged) -> HandlerResult {
        self.log.write("Welcome, adventurer", LogColor::Green);
        Ok(())
    }

    fn on_paused(&self, event: &GameStateChanged) -> HandlerResult {
        info!(reason = %event.reason, "game paused");
        self.log.write("Paused", LogColor::Gray);
        Ok(())
    }

    fn on_resumed(&self, event: &GameStateChanged) -> HandlerResult {
        info!(reason = %event.reason, "game resumed");
        Ok(())
    }

    fn on_stopped(&self, event: &GameStateChanged) -> HandlerResult {
        info!(reason = %event.reason, "game stopped");
        Ok(())
    }

    fn on_game_over(&self, event: &GameOver) -> HandlerResult {
        if event.victory {
            self.log
                .write(&format!("Victory! Final score {}", event.score), LogColor::Gold);
        } else {
            self.log
                .write(&format!("Game over. Final score {}", event.score), LogColor::Red);
        }
        Ok(())
    }

    fn on_restart_requested(&self, event: &RestartRequested) -> HandlerResult {
        if let Err(err) = self.restart.restart(event) {
            self.log
                .write(&format!("Could not restart: {err}"), LogColor::Red);
            return Err(HandlerError::from(err));
        }

        let text = if event.from_checkpoint {
            "Restarting from the last checkpoint"
        } else {
            "Restarting level"
        };
        self.log.write(text, LogColor::Yellow);
        self.bus.publish(restart::STARTED, RestartStage::new(0));
        Ok(())
    }

    fn on_level_loaded(&self, event: &LevelLoaded) -> HandlerResult {
        self.log.write(
            &format!("Level {}: {}", event.index, event.name),
            LogColor::Cyan,
        );
        Ok(())
    }

    fn on_level_completed(&self, event: &LevelCompleted) -> HandlerResult {
        let seconds = event.elapsed_secs.max(0.0).round() as u64;
        self.log.write(
            &format!(
                "{} cleared in {}:{:02}",
                event.name,
                seconds / 60,
                seconds % 60
            ),
            LogColor::Green,
        );
        Ok(())
    }

    fn on_transition_started(&self, event: &LevelTransition) -> HandlerResult {
        info!(from = event.from, to = event.to, "level transition started");
        self.log.write("Descending deeper...", LogColor::Gray);
        Ok(())
    }
}
