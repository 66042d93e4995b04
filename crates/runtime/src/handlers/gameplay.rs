//! Gameplay reactions: combat, inventory, quests, dialogue, loot.

use std::rc::Rc;

use event_bus::{EventBus, HandlerError, HandlerResult};
use game_events::topics::{combat, dialogue, environment, inventory, npc, player, quest};
use game_events::{
    AttackExecuted, ChestOpened, ChestSpawned, DamageTaken, DialogueChoice, DialogueStarted,
    DropKind, EnemyKilled, GoldChanged, HealthChanged, ItemAdded, ItemDropped, ItemRemoved,
    ItemUsed, NpcInteracted, PlayerDied, Position, QuestCompleted, QuestProgress, QuestStarted,
};
use tracing::{debug, warn};

use super::{HandlerModule, Subscriptions};
use crate::collaborators::{
    Collaborators, ContentLoader, LogColor, LogSink, QuestManager, QuestOutcome, RandomSource,
};
use crate::config::GameplayConfig;

/// Writes gameplay events to the message log, feeds quest progress and rolls
/// loot for slain enemies.
pub struct GameplayHandlers {
    subscriptions: Subscriptions,
    context: Rc<GameplayContext>,
}

struct GameplayContext {
    bus: EventBus,
    log: Rc<dyn LogSink>,
    quests: Rc<dyn QuestManager>,
    content: Rc<dyn ContentLoader>,
    random: Rc<dyn RandomSource>,
    config: GameplayConfig,
}

impl GameplayHandlers {
    pub fn new(bus: EventBus, collaborators: &Collaborators, config: GameplayConfig) -> Self {
        let context = Rc::new(GameplayContext {
            bus: bus.clone(),
            log: Rc::clone(&collaborators.log),
            quests: Rc::clone(&collaborators.quests),
            content: Rc::clone(&collaborators.content),
            random: Rc::clone(&collaborators.random),
            config: config.normalized(),
        });
        Self {
            subscriptions: Subscriptions::new(bus),
            context,
        }
    }
}

impl HandlerModule for GameplayHandlers {
    fn name(&self) -> &'static str {
        "gameplay"
    }

    fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    fn subscribe_to_events(&mut self) {
        let ctx = &self.context;
        let subs = &mut self.subscriptions;

        subs.route(ctx, combat::ATTACK_EXECUTED, GameplayContext::on_attack_executed);
        subs.route(ctx, combat::DAMAGE_TAKEN, GameplayContext::on_damage_taken);
        subs.route(ctx, combat::ENEMY_KILLED, GameplayContext::on_enemy_killed);

        subs.route(ctx, inventory::ITEM_ADDED, GameplayContext::on_item_added);
        subs.route(ctx, inventory::ITEM_REMOVED, GameplayContext::on_item_removed);
        subs.route(ctx, inventory::ITEM_USED, GameplayContext::on_item_used);

        subs.route(ctx, quest::STARTED, GameplayContext::on_quest_started);
        subs.route(ctx, quest::PROGRESS, GameplayContext::on_quest_progress);
        subs.route(ctx, quest::COMPLETED, GameplayContext::on_quest_completed);

        subs.route(ctx, dialogue::STARTED, GameplayContext::on_dialogue_started);
        subs.route(ctx, dialogue::ENDED, GameplayContext::on_dialogue_ended);
        subs.route(ctx, dialogue::CHOICE_SELECTED, GameplayContext::on_dialogue_choice);

        subs.route(ctx, environment::CHEST_OPENED, GameplayContext::on_chest_opened);
        subs.route(ctx, environment::ITEM_DROPPED, GameplayContext::on_item_dropped);
        subs.route(ctx, environment::CHEST_SPAWNED, GameplayContext::on_chest_spawned);

        subs.route(ctx, npc::INTERACTED, GameplayContext::on_npc_interacted);

        subs.route(ctx, player::HEALTH_CHANGED, GameplayContext::on_health_changed);
        subs.route(ctx, player::GOLD_CHANGED, GameplayContext::on_gold_changed);
        subs.route(ctx, player::DIED, GameplayContext::on_player_died);
    }

    fn unsubscribe_from_events(&mut self) {
        self.subscriptions.clear();
    }
}

impl GameplayContext {
    fn say(&self, text: impl AsRef<str>, color: LogColor) {
        self.log.write(text.as_ref(), color);
    }

    fn on_attack_executed(&self, event: &AttackExecuted) -> HandlerResult {
        match &event.target {
            Some(target) if event.critical => self.say(
                format!(
                    "{} lands a critical hit on {} for {} damage!",
                    event.attacker, target, event.damage
                ),
                LogColor::Orange,
            ),
            Some(target) => self.say(
                format!("{} hits {} for {} damage", event.attacker, target, event.damage),
                LogColor::White,
            ),
            None => self.say(format!("{} swings at nothing", event.attacker), LogColor::Gray),
        }
        Ok(())
    }

    fn on_damage_taken(&self, event: &DamageTaken) -> HandlerResult {
        let color = if event.is_player {
            LogColor::Red
        } else {
            LogColor::White
        };
        self.say(
            format!(
                "{} takes {} damage ({} HP left)",
                event.entity, event.amount, event.remaining_hp
            ),
            color,
        );

        if event.is_player
            && event.remaining_hp > 0
            && event.remaining_hp <= self.config.low_health_threshold
        {
            self.say("Your health is low!", LogColor::Red);
        }
        Ok(())
    }

    fn on_enemy_killed(&self, event: &EnemyKilled) -> HandlerResult {
        self.say(format!("{} is defeated", event.enemy), LogColor::Green);

        let outcome = self.quests.record_kill(&event.kind);
        self.report_quest(outcome);

        self.roll_loot(event)
    }

    fn on_item_added(&self, event: &ItemAdded) -> HandlerResult {
        let text = if event.quantity > 1 {
            format!("Picked up {} x{}", event.name, event.quantity)
        } else {
            format!("Picked up {}", event.name)
        };
        self.say(text, LogColor::Cyan);

        let outcome = self.quests.record_collect(&event.item_id, event.quantity);
        self.report_quest(outcome);
        Ok(())
    }

    fn on_item_removed(&self, event: &ItemRemoved) -> HandlerResult {
        self.say(
            format!("Removed {} x{}", event.item_id, event.quantity),
            LogColor::Gray,
        );
        Ok(())
    }

    fn on_item_used(&self, event: &ItemUsed) -> HandlerResult {
        self.say(format!("Used {}: {}", event.name, event.effect), LogColor::Cyan);
        Ok(())
    }

    fn on_quest_started(&self, event: &QuestStarted) -> HandlerResult {
        self.say(format!("New quest: {}", event.title), LogColor::Yellow);
        Ok(())
    }

    fn on_quest_progress(&self, event: &QuestProgress) -> HandlerResult {
        self.say(
            format!(
                "Quest {}: {}/{}",
                event.quest_id, event.current, event.required
            ),
            LogColor::Yellow,
        );
        Ok(())
    }

    fn on_quest_completed(&self, event: &QuestCompleted) -> HandlerResult {
        let text = if event.reward_gold > 0 {
            format!(
                "Quest complete: {} (+{} gold)",
                event.title, event.reward_gold
            )
        } else {
            format!("Quest complete: {}", event.title)
        };
        self.say(text, LogColor::Gold);
        Ok(())
    }

    fn on_dialogue_started(&self, event: &DialogueStarted) -> HandlerResult {
        self.say(format!("{} wants to talk", event.speaker), LogColor::Gray);
        Ok(())
    }

    fn on_dialogue_ended(&self, _: &()) -> HandlerResult {
        self.say("The conversation ends", LogColor::Gray);
        Ok(())
    }

    fn on_dialogue_choice(&self, event: &DialogueChoice) -> HandlerResult {
        self.say(format!("> {}", event.text), LogColor::White);
        Ok(())
    }

    fn on_chest_opened(&self, event: &ChestOpened) -> HandlerResult {
        let text = if event.contents.is_empty() {
            "The chest is empty".to_owned()
        } else {
            format!("The chest holds {}", event.contents.join(", "))
        };
        self.say(text, LogColor::Gold);
        Ok(())
    }

    fn on_item_dropped(&self, event: &ItemDropped) -> HandlerResult {
        let text = match event.kind {
            DropKind::Gold => format!("{} gold dropped at {}", event.amount, event.position),
            kind => format!("A {kind} dropped at {}", event.position),
        };
        self.say(text, LogColor::Yellow);
        Ok(())
    }

    fn on_chest_spawned(&self, event: &ChestSpawned) -> HandlerResult {
        self.say(
            format!("A treasure chest appears at {}", event.position),
            LogColor::Gold,
        );
        Ok(())
    }

    fn on_npc_interacted(&self, event: &NpcInteracted) -> HandlerResult {
        self.say(format!("You approach {}", event.npc), LogColor::Gray);
        Ok(())
    }

    fn on_health_changed(&self, event: &HealthChanged) -> HandlerResult {
        if event.delta == 0 {
            return Ok(());
        }
        let color = if event.delta < 0 {
            LogColor::Red
        } else {
            LogColor::Green
        };
        self.say(format!("HP {}/{}", event.current, event.max), color);
        Ok(())
    }

    fn on_gold_changed(&self, event: &GoldChanged) -> HandlerResult {
        let text = if event.delta >= 0 {
            format!("+{} gold ({} total)", event.delta, event.total)
        } else {
            format!("{} gold ({} total)", event.delta, event.total)
        };
        self.say(text, LogColor::Gold);
        Ok(())
    }

    fn on_player_died(&self, event: &PlayerDied) -> HandlerResult {
        self.say(format!("You died: {}", event.cause), LogColor::Red);
        Ok(())
    }

    fn report_quest(&self, outcome: QuestOutcome) {
        match outcome {
            QuestOutcome::Untracked => {}
            QuestOutcome::Advanced {
                quest_id,
                current,
                required,
            } => {
                self.bus
                    .publish(quest::PROGRESS, QuestProgress::new(quest_id, current, required));
            }
            QuestOutcome::Completed { quest_id } => {
                debug!(%quest_id, "quest objectives complete");
            }
        }
    }

    /// Rolls every drop for `event`. A failed spawn does not stop the other
    /// rolls; the first failure is returned once all of them ran.
    fn roll_loot(&self, event: &EnemyKilled) -> HandlerResult {
        let config = &self.config;
        let mut first_failure = None;

        if self.random.roll() < config.gold_drop_chance {
            let amount = self.random.range(config.gold_drop_min, config.gold_drop_max);
            if let Err(err) = self.spawn_drop(DropKind::Gold, amount, event.position) {
                first_failure.get_or_insert(err);
            }
        }
        if self.random.roll() < config.potion_drop_chance
            && let Err(err) = self.spawn_drop(DropKind::Potion, 1, event.position)
        {
            first_failure.get_or_insert(err);
        }
        if event.boss
            && let Err(err) = self.spawn_drop(DropKind::Chest, 1, event.position)
        {
            first_failure.get_or_insert(err);
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn spawn_drop(&self, kind: DropKind, amount: u32, position: Position) -> HandlerResult {
        if let Err(err) = self.content.spawn(kind, amount, position) {
            warn!(%kind, %position, error = %err, "loot spawn failed");
            return Err(HandlerError::from(err));
        }

        match kind {
            DropKind::Chest => self
                .bus
                .publish(environment::CHEST_SPAWNED, ChestSpawned::new(position)),
            _ => self.bus.publish(
                environment::ITEM_DROPPED,
                ItemDropped::new(kind, amount, position),
            ),
        }
        Ok(())
    }
}
