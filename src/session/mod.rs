//! A single player's run: the current battle, the roster carried between
//! battles, the catch offer and the opponent being prepared for next time.
//!
//! Every command is phase-gated. A command issued in a phase that does not
//! allow it returns `None` and leaves the session untouched.

mod message_log;
mod snapshot;

pub use message_log::MessageLog;
pub use snapshot::{CreatureView, MoveView, RosterEntry, SessionSnapshot};

use crate::battle::catch::{
    add_caught_pokemon, can_offer_catch, prepare_caught_pokemon, replace_team_member,
    CatchResolution,
};
use crate::battle::engine::{
    collect_npc_actions, ready_for_turn_resolution, resolve_turn, send_out_replacement,
    validate_player_action,
};
use crate::battle::state::{
    BattleEvent, BattleOutcome, BattlePhase, BattleRules, BattleState, EventBus, TurnRng,
    PLAYER_SIDE,
};
use crate::config::RunConfig;
use crate::dex::DataProvider;
use crate::encounters::{create_pokemon, prepare_opponent, select_starter, PreparedOpponent};
use crate::player::{BattlePlayer, PlayerAction};
use crate::pokemon::PokemonInst;
use schema::PokemonType;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const PLAYER_ID: &str = "player";
const PLAYER_NAME: &str = "Player";
const WILD_ID: &str = "wild";
const WILD_NAME: &str = "Wild";

fn wild_side(pokemon: PokemonInst) -> BattlePlayer {
    BattlePlayer::new(WILD_ID.to_string(), WILD_NAME.to_string(), vec![pokemon])
}

pub struct BattleSession {
    config: RunConfig,
    provider: Arc<dyn DataProvider>,
    rng: TurnRng,
    starter_type: PokemonType,
    state: BattleState,
    battle_number: u32,
    catch_cooldown: u8,
    catch_resolved: bool,
    /// Accepted catch waiting for the player to pick who leaves a full roster.
    pending_catch: Option<PokemonInst>,
    messages: MessageLog,
    prepared: Option<PreparedOpponent>,
    prefetch: Option<JoinHandle<PreparedOpponent>>,
}

impl BattleSession {
    /// Rolls a starter of `starter_type` and opens battle one.
    pub async fn start(
        config: RunConfig,
        provider: Arc<dyn DataProvider>,
        starter_type: PokemonType,
        rng: TurnRng,
    ) -> Self {
        Self::launch(config, provider, starter_type, rng).await.0
    }

    async fn launch(
        config: RunConfig,
        provider: Arc<dyn DataProvider>,
        starter_type: PokemonType,
        mut rng: TurnRng,
    ) -> (Self, EventBus) {
        let starter_species =
            select_starter(starter_type, &config.starters, provider.as_ref(), &mut rng).await;
        let starter = create_pokemon(&starter_species, &config, provider.as_ref(), &mut rng).await;
        let opponent = prepare_opponent(1, &config, provider.as_ref(), &mut rng)
            .await
            .pokemon;

        let player =
            BattlePlayer::new(PLAYER_ID.to_string(), PLAYER_NAME.to_string(), vec![starter]);
        let state = BattleState::new(player, wild_side(opponent))
            .with_rules(BattleRules::from_config(&config));

        let mut session = Self {
            messages: MessageLog::new(config.message_log_capacity),
            config,
            provider,
            rng,
            starter_type,
            state,
            battle_number: 1,
            catch_cooldown: 0,
            catch_resolved: false,
            pending_catch: None,
            prepared: None,
            prefetch: None,
        };
        let bus = session.open_battle(EventBus::new());
        (session, bus)
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn battle_number(&self) -> u32 {
        self.battle_number
    }

    pub fn catch_cooldown(&self) -> u8 {
        self.catch_cooldown
    }

    pub fn starter_type(&self) -> PokemonType {
        self.starter_type
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn catch_available(&self) -> bool {
        can_offer_catch(&self.state, self.catch_cooldown, self.catch_resolved).is_ok()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            &self.state,
            self.battle_number,
            self.catch_cooldown,
            self.catch_available(),
            self.messages.to_vec(),
        )
    }

    /// Use the move in `move_index` for this turn. Moves with no PP left are
    /// disabled unless a charge is pending, in which case the charge move
    /// fires whatever is selected.
    pub fn select_move(&mut self, move_index: usize) -> Option<EventBus> {
        if self.state.phase != BattlePhase::SelectMove {
            return self.ignored("select_move");
        }
        let selectable = self
            .state
            .player()
            .active_pokemon()
            .is_some_and(|pokemon| pokemon.move_selectable(move_index));
        if !selectable {
            return self.ignored("select_move");
        }

        Some(self.play_turn(PlayerAction::UseMove { move_index }))
    }

    /// Voluntary switch. Spends the turn; the opponent still attacks. A charge
    /// in progress is abandoned.
    pub fn switch_to(&mut self, team_index: usize) -> Option<EventBus> {
        if self.state.phase != BattlePhase::SelectMove {
            return self.ignored("switch_to");
        }
        let action = PlayerAction::SwitchPokemon { team_index };
        if let Err(err) = validate_player_action(&self.state, PLAYER_SIDE, &action) {
            debug!(%err, "switch rejected");
            return None;
        }

        Some(self.play_turn(action))
    }

    /// Picks a roster member. After a faint this sends out a living
    /// replacement; after a catch into a full roster it names who is released.
    pub fn select_replacement(&mut self, team_index: usize) -> Option<EventBus> {
        match self.state.phase {
            BattlePhase::PokemonSelection => {
                match send_out_replacement(&mut self.state, team_index) {
                    Ok(bus) => {
                        self.record(&bus);
                        Some(bus)
                    }
                    Err(err) => {
                        debug!(%err, "replacement rejected");
                        None
                    }
                }
            }
            BattlePhase::ReplacementSelection => {
                let caught = self.pending_catch.take()?;
                let mut bus = EventBus::new();
                let player = &mut self.state.players[PLAYER_SIDE];
                match replace_team_member(player, team_index, caught.clone(), &mut bus) {
                    Ok(released) => {
                        info!(
                            released = %released.name,
                            caught = %caught.name,
                            "roster member released"
                        );
                        self.state.phase = BattlePhase::BattleEnd(BattleOutcome::Victory);
                        self.record(&bus);
                        Some(bus)
                    }
                    Err(err) => {
                        debug!(%err, "release rejected");
                        self.pending_catch = Some(caught);
                        None
                    }
                }
            }
            _ => self.ignored("select_replacement"),
        }
    }

    /// Accept or decline the defeated opponent. Either answer resolves the
    /// offer for this victory.
    pub fn confirm_catch(&mut self, accept: bool) -> Option<EventBus> {
        if let Err(reason) = can_offer_catch(&self.state, self.catch_cooldown, self.catch_resolved)
        {
            debug!(?reason, "catch not offered");
            return None;
        }
        self.catch_resolved = true;

        let mut bus = EventBus::new();
        if !accept {
            debug!("catch declined");
            return Some(bus);
        }

        let defeated = self.state.opponent().active_pokemon()?;
        let caught = prepare_caught_pokemon(defeated);
        self.catch_cooldown = self.config.catch_cooldown;
        info!(pokemon = %caught.name, "catch accepted");

        let player = &mut self.state.players[PLAYER_SIDE];
        match add_caught_pokemon(player, caught, self.config.roster_limit, &mut bus) {
            CatchResolution::Joined { team_index } => {
                debug!(team_index, "caught pokemon joined the roster");
            }
            CatchResolution::RosterFull(caught) => {
                self.pending_catch = Some(caught);
                self.state.phase = BattlePhase::ReplacementSelection;
            }
        }
        self.record(&bus);
        Some(bus)
    }

    /// Heal the roster and bring out the next wild opponent. Allowed only
    /// after a victory whose catch offer, if any, has been settled.
    pub async fn advance_to_next_battle(&mut self) -> Option<EventBus> {
        if self.state.phase != BattlePhase::BattleEnd(BattleOutcome::Victory) {
            return self.ignored("advance_to_next_battle");
        }

        self.battle_number += 1;
        self.catch_cooldown = self.catch_cooldown.saturating_sub(1);
        self.catch_resolved = false;
        self.pending_catch = None;
        self.messages.clear();

        let opponent = self.next_opponent().await;
        let mut player = self.state.players[PLAYER_SIDE].clone();
        for pokemon in player.team.iter_mut() {
            pokemon.restore_fully();
        }
        self.state = BattleState::new(player, wild_side(opponent))
            .with_rules(BattleRules::from_config(&self.config));

        let mut bus = EventBus::new();
        bus.push(BattleEvent::TeamRestored);
        Some(self.open_battle(bus))
    }

    /// Abandon the run and start over with a fresh starter of the same type.
    pub async fn restart_run(&mut self) -> EventBus {
        self.cancel_prefetch();
        let rng = self.rng.fork();
        let (session, bus) = Self::launch(
            self.config.clone(),
            Arc::clone(&self.provider),
            self.starter_type,
            rng,
        )
        .await;
        *self = session;
        info!(starter_type = ?self.starter_type, "run restarted");
        bus
    }

    /// Wait for the background opponent, if one is being prepared, and keep it.
    pub async fn await_prefetch(&mut self) {
        if let Some(handle) = self.prefetch.take() {
            match handle.await {
                Ok(prepared) => self.prepared = Some(prepared),
                Err(err) => warn!(%err, "opponent prefetch failed"),
            }
        }
    }

    fn play_turn(&mut self, action: PlayerAction) -> EventBus {
        self.state.action_queue[PLAYER_SIDE] = Some(action);
        collect_npc_actions(&mut self.state);
        debug_assert!(ready_for_turn_resolution(&self.state));
        let bus = resolve_turn(&mut self.state, &mut self.rng);
        debug!(
            turn = self.state.turn_number.saturating_sub(1),
            events = bus.len(),
            "turn resolved"
        );
        self.record(&bus);

        if let BattlePhase::BattleEnd(outcome) = self.state.phase {
            info!(battle_number = self.battle_number, ?outcome, "battle ended");
        }
        bus
    }

    /// Announce the battle now in `state` and begin preparing the one after it.
    fn open_battle(&mut self, mut bus: EventBus) -> EventBus {
        if let Some(opponent) = self.state.opponent().active_pokemon() {
            bus.push(BattleEvent::WildPokemonAppeared {
                pokemon: opponent.name.clone(),
            });
        }
        if let Some(active) = self.state.player().active_pokemon() {
            bus.push(BattleEvent::PokemonSwitched {
                player_index: PLAYER_SIDE,
                old_pokemon: String::new(),
                new_pokemon: active.name.clone(),
                forced: true,
            });
        }
        self.record(&bus);
        info!(
            battle_number = self.battle_number,
            opponent = self
                .state
                .opponent()
                .active_pokemon()
                .map(|pokemon| pokemon.name.as_str())
                .unwrap_or_default(),
            "battle started"
        );

        self.spawn_prefetch();
        bus
    }

    /// Uses the prefetched opponent when it was prepared for this battle,
    /// otherwise generates one on the spot.
    async fn next_opponent(&mut self) -> PokemonInst {
        self.await_prefetch().await;
        match self.prepared.take() {
            Some(prepared) if prepared.battle_number == self.battle_number => prepared.pokemon,
            stale => {
                if let Some(stale) = stale {
                    debug!(
                        prepared_for = stale.battle_number,
                        battle_number = self.battle_number,
                        "discarding stale opponent"
                    );
                }
                prepare_opponent(
                    self.battle_number,
                    &self.config,
                    self.provider.as_ref(),
                    &mut self.rng,
                )
                .await
                .pokemon
            }
        }
    }

    /// Background generation needs a tokio runtime; without one the next
    /// opponent is simply generated when it is needed.
    fn spawn_prefetch(&mut self) {
        self.cancel_prefetch();
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime, opponent will be generated inline");
            return;
        };

        let battle_number = self.battle_number + 1;
        let config = self.config.clone();
        let provider = Arc::clone(&self.provider);
        let mut rng = self.rng.fork();
        self.prefetch = Some(runtime.spawn(async move {
            prepare_opponent(battle_number, &config, provider.as_ref(), &mut rng).await
        }));
    }

    fn cancel_prefetch(&mut self) {
        if let Some(handle) = self.prefetch.take() {
            handle.abort();
        }
    }

    fn record(&mut self, bus: &EventBus) {
        self.messages.extend(bus.messages(&self.state));
    }

    fn ignored(&self, command: &str) -> Option<EventBus> {
        debug!(command, phase = ?self.state.phase, "command ignored");
        None
    }
}

impl Drop for BattleSession {
    fn drop(&mut self) {
        self.cancel_prefetch();
    }
}
