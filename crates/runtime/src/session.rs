//! The synchronous turn loop.
//!
//! A [`GameSession`] owns the current floor and every mutable stream of a run
//! (RNG, message log, turn counter). Each [`GameSession::submit`] executes the
//! player's action, lets every other living actor respond, then refreshes the
//! visibility overlay.

use game_content::GameContent;
use game_core::{
    Action, ActionResult, Actor, AiTick, EntityId, ExecuteError, FloorRequest, GameEngine,
    GameEnv, GameMap, GameRng, MessageBuffer, MessageLog, MessageTag, PrepareTurnAction,
    TemplateId,
};

use crate::api::{ActionProvider, Result, RuntimeError};
use crate::fov::compute_fov;
use crate::providers::MonsterAiProvider;
use crate::repository::{SessionSnapshot, StateRepository};

const WELCOME: &str = "Hello and welcome, adventurer, to yet another dungeon!";

/// Template spawned as the player character.
pub const PLAYER_TEMPLATE: &str = "player";

/// What happened during one submitted turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// False when the action was refused and nothing moved.
    pub consumed: bool,
    pub result: Option<ActionResult>,
    pub descended: bool,
    pub player_dead: bool,
    pub level_up_pending: bool,
    /// Floor number after the turn.
    pub floor: u32,
}

/// Configures and starts a [`GameSession`].
pub struct SessionBuilder {
    content: GameContent,
    seed: u64,
    npc: Option<Box<dyn ActionProvider>>,
}

impl SessionBuilder {
    pub fn new(content: GameContent) -> Self {
        Self {
            content,
            seed: 0,
            npc: None,
        }
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the default [`MonsterAiProvider`].
    #[must_use]
    pub fn npc_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.npc = Some(Box::new(provider));
        self
    }

    /// Spawns the player and generates floor 1.
    pub fn build(self) -> Result<GameSession> {
        let npc = self.npc.unwrap_or_else(|| Box::new(MonsterAiProvider));
        let player = self
            .content
            .templates
            .spawn_actor(&TemplateId::from(PLAYER_TEMPLATE))?;
        let mut rng = GameRng::new(self.seed);
        let map = generate_floor(&self.content, 1, player, &mut rng)?;

        let mut session = GameSession {
            content: self.content,
            map,
            floor: 1,
            turn: 0,
            rng,
            log: MessageBuffer::default(),
            npc,
        };
        session
            .log
            .add_message(WELCOME.to_string(), MessageTag::Welcome);
        session.refresh_fov();
        tracing::info!(seed = self.seed, "session started");
        Ok(session)
    }

    /// Resumes from a snapshot instead of starting a new run.
    pub fn restore(self, snapshot: SessionSnapshot) -> Result<GameSession> {
        if snapshot.map.player().is_none() {
            return Err(RuntimeError::PlayerMissing);
        }
        tracing::info!(floor = snapshot.floor, turn = snapshot.turn, "session restored");
        Ok(GameSession {
            content: self.content,
            map: snapshot.map,
            floor: snapshot.floor,
            turn: snapshot.turn,
            rng: snapshot.rng,
            log: snapshot.log,
            npc: self.npc.unwrap_or_else(|| Box::new(MonsterAiProvider)),
        })
    }

    /// Resumes the run saved in `slot`, or `None` if the slot is empty.
    pub fn load(self, repo: &dyn StateRepository, slot: &str) -> Result<Option<GameSession>> {
        match repo.load(slot)? {
            Some(snapshot) => self.restore(snapshot).map(Some),
            None => Ok(None),
        }
    }
}

fn generate_floor(
    content: &GameContent,
    floor: u32,
    player: Actor,
    rng: &mut GameRng,
) -> Result<GameMap> {
    let kind = content.config.generator_for_floor(floor);
    let request = FloorRequest::new(floor, &content.config, &content.templates, &content.tables);
    let generated = kind
        .generate(&request, player, rng)
        .map_err(|source| RuntimeError::Generation { floor, source })?;
    tracing::info!(floor, %kind, start = ?generated.start, "entered floor");
    Ok(generated.map)
}

/// One run of the game.
pub struct GameSession {
    content: GameContent,
    map: GameMap,
    floor: u32,
    turn: u64,
    rng: GameRng,
    log: MessageBuffer,
    npc: Box<dyn ActionProvider>,
}

impl GameSession {
    pub fn builder(content: GameContent) -> SessionBuilder {
        SessionBuilder::new(content)
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Turns consumed so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn log(&self) -> &MessageBuffer {
        &self.log
    }

    pub fn content(&self) -> &GameContent {
        &self.content
    }

    pub fn player(&self) -> Option<&Actor> {
        self.map.player()
    }

    pub fn is_player_dead(&self) -> bool {
        self.map.player().is_none_or(|player| !player.is_alive())
    }

    pub fn level_up_pending(&self) -> bool {
        self.map
            .player()
            .is_some_and(|player| player.is_alive() && player.level.requires_level_up())
    }

    /// Executes the player's action and runs the enemies' response.
    ///
    /// A refused action (an impossible move, a full inventory, ...) is logged
    /// and reported with `consumed == false`; nothing else happens that turn.
    /// Level-up choices do not give enemies a turn.
    pub fn submit(&mut self, action: Action) -> Result<TurnReport> {
        if self.map.player().is_none() {
            return Err(RuntimeError::PlayerMissing);
        }
        if self.is_player_dead() {
            return Err(RuntimeError::PlayerDead);
        }
        if action.actor() != EntityId::PLAYER {
            return Err(RuntimeError::InvalidActionActor {
                expected: EntityId::PLAYER,
                provided: action.actor(),
            });
        }
        let levelling = matches!(action, Action::LevelUp(_));
        if self.level_up_pending() && !levelling {
            return Err(RuntimeError::LevelUpPending);
        }

        let result = match self.execute(&action) {
            Ok(result) => result,
            Err(error) => {
                let Some(impossible) = error.impossible() else {
                    return Err(error.into());
                };
                self.log
                    .add_message(impossible.to_string(), MessageTag::Impossible);
                return Ok(self.report(false, None, false));
            }
        };

        let descended = result.is_descend();
        if descended {
            self.descend()?;
        }
        if !levelling && !self.is_player_dead() {
            self.run_enemy_turns()?;
        }
        self.refresh_fov();
        self.turn += 1;
        Ok(self.report(true, Some(result), descended))
    }

    /// Asks `provider` for the player's action and submits it.
    pub fn play_turn(&mut self, provider: &dyn ActionProvider) -> Result<TurnReport> {
        let action = provider.provide_action(EntityId::PLAYER, &self.map, &mut self.rng)?;
        self.submit(action)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            floor: self.floor,
            turn: self.turn,
            map: self.map.clone(),
            rng: self.rng.clone(),
            log: self.log.clone(),
        }
    }

    pub fn save(&self, repo: &dyn StateRepository, slot: &str) -> Result<()> {
        repo.save(slot, &self.snapshot())?;
        tracing::info!(slot, floor = self.floor, turn = self.turn, "session saved");
        Ok(())
    }

    fn report(&self, consumed: bool, result: Option<ActionResult>, descended: bool) -> TurnReport {
        TurnReport {
            consumed,
            result,
            descended,
            player_dead: self.is_player_dead(),
            level_up_pending: self.level_up_pending(),
            floor: self.floor,
        }
    }

    fn execute(&mut self, action: &Action) -> std::result::Result<ActionResult, ExecuteError> {
        let mut env = GameEnv::new(
            &self.content.config,
            &self.content.templates,
            &mut self.rng,
            &mut self.log,
        );
        GameEngine::new(&mut self.map).execute(&mut env, action)
    }

    fn descend(&mut self) -> Result<()> {
        let player = self
            .map
            .take_actor(EntityId::PLAYER)
            .ok_or(RuntimeError::PlayerMissing)?;
        let next = self.floor + 1;
        self.map = generate_floor(&self.content, next, player, &mut self.rng)?;
        self.floor = next;
        Ok(())
    }

    /// Every other living actor, in map order, gets one action.
    fn run_enemy_turns(&mut self) -> Result<()> {
        for id in self.map.living_ids() {
            if id == EntityId::PLAYER {
                continue;
            }
            if !self.map.actor(id).is_some_and(Actor::is_alive) {
                continue;
            }

            match self.execute(&Action::PrepareTurn(PrepareTurnAction::new(id))) {
                Ok(ActionResult::PrepareTurn(AiTick::Expired)) => continue,
                Ok(_) => {}
                Err(error) => return Err(error.into()),
            }

            let action = self.npc.provide_action(id, &self.map, &mut self.rng)?;
            if let Err(error) = self.execute(&action) {
                if error.impossible().is_none() {
                    return Err(error.into());
                }
                tracing::debug!(actor = %id, %error, "npc action refused");
            }

            if self.is_player_dead() {
                tracing::info!(floor = self.floor, turn = self.turn, "player died");
                break;
            }
        }
        Ok(())
    }

    fn refresh_fov(&mut self) {
        let Some(origin) = self.map.player().map(Actor::position) else {
            return;
        };
        let radius = self.content.config.fov_radius;
        let lit = compute_fov(&mut self.map, origin, radius);
        tracing::debug!(lit, "fov refreshed");
    }
}
