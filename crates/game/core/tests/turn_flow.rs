use game_core::{
    Action, ActionResult, Actor, Ai, Direction, Entity, EntityId, Fighter, GameConfig, GameEngine,
    GameEnv, GameMap, GameRng, ImpossibleAction, Level, MessageBuffer, Position, Rgb, Tile,
    TemplateRegistry,
};

struct World {
    map: GameMap,
    config: GameConfig,
    templates: TemplateRegistry,
    rng: GameRng,
    log: MessageBuffer,
}

impl World {
    fn new() -> Self {
        let mut map = GameMap::new(10, 10);
        for y in 1..9 {
            for x in 1..9 {
                map.set_tile(Position::new(x, y), Tile::FLOOR).expect("in bounds");
            }
        }
        let player = Actor::new(
            Entity::new("Player", '@', Rgb::WHITE),
            Ai::Controlled,
            Fighter::new(30, 10, 0, 0, 1, 10),
        )
        .with_level(Level::new(200, 0));
        map.place_player(player, Position::new(5, 5));
        map.reveal_all();
        Self {
            map,
            config: GameConfig::default(),
            templates: TemplateRegistry::new(),
            rng: GameRng::new(1),
            log: MessageBuffer::default(),
        }
    }

    fn run(&mut self, action: Action) -> Result<ActionResult, game_core::ExecuteError> {
        let mut env = GameEnv::new(&self.config, &self.templates, &mut self.rng, &mut self.log);
        GameEngine::new(&mut self.map).execute(&mut env, &action)
    }
}

#[test]
fn killing_a_monster_leaves_a_walkable_corpse_and_awards_xp() {
    let mut world = World::new();
    let orc = Actor::new(
        Entity::new("Orc", 'o', Rgb(63, 127, 63)),
        Ai::Hostile,
        Fighter::new(1, 1, 0, 0, 0, 3),
    )
    .with_level(Level::new(0, 35));
    let orc = world.map.spawn_actor(orc, Position::new(6, 5));

    let result = world
        .run(Action::bump(EntityId::PLAYER, Direction::East))
        .expect("attack");
    let ActionResult::Attack(Some(hit)) = result else {
        panic!("expected a hit, got {result:?}");
    };
    assert_eq!(hit.target, orc);
    assert!(hit.killed);

    let corpse = world.map.actor(orc).expect("corpse stays");
    assert!(!corpse.is_alive());
    assert_eq!(corpse.name(), "remains of Orc");
    assert_eq!(world.map.blocking_actor_at(Position::new(6, 5)), None);
    assert_eq!(world.map.player().map(|p| p.level.current_xp), Some(35));

    world
        .run(Action::bump(EntityId::PLAYER, Direction::East))
        .expect("walks over the corpse");
    assert_eq!(
        world.map.player().map(|p| p.position()),
        Some(Position::new(6, 5))
    );
}

#[test]
fn refusals_leave_the_floor_untouched() {
    let mut world = World::new();
    world.map.player_mut().expect("player").entity.position = Position::new(1, 1);
    let before = world.map.clone();

    let error = world
        .run(Action::bump(EntityId::PLAYER, Direction::North))
        .unwrap_err();
    assert_eq!(error.impossible(), Some(&ImpossibleAction::Blocked));

    let error = world.run(Action::take_stairs(EntityId::PLAYER)).unwrap_err();
    assert_eq!(error.impossible().map(ToString::to_string).as_deref(), Some("There are no stairs here."));
    assert_eq!(world.map, before);
}

#[test]
fn stairs_report_a_descent() {
    let mut world = World::new();
    world
        .map
        .set_downstairs(Position::new(5, 5))
        .expect("in bounds");
    let result = world.run(Action::take_stairs(EntityId::PLAYER)).expect("descends");
    assert!(result.is_descend());
    assert!(world.log.contains("You descend the staircase."));
}
