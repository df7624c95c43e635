use game_content::GameContent;
use game_core::{
    Action, Direction, EntityId, LevelUpAction, LevelUpChoice, MessageTag, SpawnTables,
    TemplateId,
};
use runtime::{
    AutoPlayProvider, GameSession, InMemoryStateRepo, RuntimeError, SessionSnapshot,
    StateRepository, WaitActionProvider,
};

fn content() -> GameContent {
    GameContent::embedded().expect("embedded content")
}

/// Default content with nothing spawned on any floor.
fn empty_floors() -> GameContent {
    let mut content = content();
    content.tables = SpawnTables::default();
    content
}

fn start(content: GameContent, seed: u64) -> GameSession {
    GameSession::builder(content)
        .seed(seed)
        .build()
        .expect("session starts")
}

#[test]
fn new_session_greets_the_player_on_floor_one() {
    let session = start(content(), 1);
    assert_eq!(session.floor(), 1);
    assert_eq!(session.turn(), 0);
    let first = session.log().iter().next().expect("welcome");
    assert_eq!(first.tag, MessageTag::Welcome);

    let player = session.player().expect("player");
    assert!(player.is_alive());
    assert_eq!(player.body.len(), 12);
    assert!(session.map().is_visible(player.position()));
    assert!(session.map().downstairs.is_some());
}

#[test]
fn same_seed_builds_the_same_run() {
    let a = start(content(), 42);
    let b = start(content(), 42);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn refused_actions_do_not_spend_the_turn() {
    let mut session = start(empty_floors(), 3);
    let report = session
        .submit(Action::pickup(EntityId::PLAYER))
        .expect("handled");
    assert!(!report.consumed);
    assert_eq!(report.result, None);
    assert_eq!(session.turn(), 0);
    let last = session.log().last().expect("message");
    assert_eq!(last.text, "There is nothing here to pick up.");
    assert_eq!(last.tag, MessageTag::Impossible);
}

#[test]
fn waiting_spends_a_turn() {
    let mut session = start(empty_floors(), 3);
    let report = session.submit(Action::wait(EntityId::PLAYER)).expect("wait");
    assert!(report.consumed);
    assert!(!report.descended);
    assert!(!report.player_dead);
    assert_eq!(session.turn(), 1);
}

#[test]
fn actions_must_belong_to_the_player() {
    let mut session = start(empty_floors(), 3);
    let err = session.submit(Action::wait(EntityId(7))).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::InvalidActionActor {
            expected: EntityId::PLAYER,
            provided: EntityId(7),
        }
    ));
}

#[test]
fn taking_the_stairs_generates_the_next_floor() {
    let mut session = start(empty_floors(), 11);
    let mut descended = None;
    for _ in 0..2000 {
        let report = session.play_turn(&AutoPlayProvider).expect("turn");
        if report.descended {
            descended = Some(report);
            break;
        }
    }
    let report = descended.expect("reached the stairs");
    assert_eq!(report.floor, 2);
    assert_eq!(session.floor(), 2);
    assert!(session.log().contains("You descend the staircase."));
    let player = session.player().expect("player came along");
    assert!(session.map().is_walkable(player.position()));
    assert!(session.map().is_visible(player.position()));
}

#[test]
fn snapshots_resume_identically() {
    let mut original = start(content(), 5);
    for _ in 0..10 {
        if original.is_player_dead() {
            break;
        }
        original.play_turn(&WaitActionProvider).expect("turn");
    }
    let bytes = original.snapshot().to_bytes().expect("encode");
    let snapshot = SessionSnapshot::from_bytes(&bytes).expect("decode");
    let mut restored = GameSession::builder(content())
        .restore(snapshot)
        .expect("restore");

    for _ in 0..10 {
        if original.is_player_dead() {
            break;
        }
        let a = original.submit(Action::wait(EntityId::PLAYER)).expect("turn");
        let b = restored.submit(Action::wait(EntityId::PLAYER)).expect("turn");
        assert_eq!(a, b);
    }
    assert_eq!(original.snapshot(), restored.snapshot());
}

#[test]
fn saves_round_trip_through_a_repository() {
    let repo = InMemoryStateRepo::new();
    let mut session = start(empty_floors(), 8);
    session.submit(Action::wait(EntityId::PLAYER)).expect("wait");
    session.save(&repo, "slot1").expect("save");
    assert_eq!(repo.list_slots().expect("list"), vec!["slot1"]);

    let loaded = GameSession::builder(empty_floors())
        .load(&repo, "slot1")
        .expect("load")
        .expect("slot holds a save");
    assert_eq!(loaded.turn(), 1);
    assert_eq!(loaded.snapshot(), session.snapshot());

    let missing = GameSession::builder(empty_floors())
        .load(&repo, "nothing")
        .expect("load");
    assert!(missing.is_none());
}

#[test]
fn pending_level_up_blocks_other_actions() {
    let session = start(empty_floors(), 2);
    let mut snapshot = session.snapshot();
    let level = &mut snapshot.map.player_mut().expect("player").level;
    level.current_xp = level.experience_to_next_level() + 1;
    let mut session = GameSession::builder(empty_floors())
        .restore(snapshot)
        .expect("restore");
    assert!(session.level_up_pending());

    let err = session.submit(Action::wait(EntityId::PLAYER)).unwrap_err();
    assert!(matches!(err, RuntimeError::LevelUpPending));

    let report = session
        .submit(Action::LevelUp(LevelUpAction::new(
            EntityId::PLAYER,
            LevelUpChoice::Strength,
        )))
        .expect("level up");
    assert!(report.consumed);
    assert!(!report.level_up_pending);
    assert_eq!(session.player().map(|p| p.level.current_level), Some(2));
    assert!(session.log().contains("You feel stronger!"));
}

#[test]
fn a_lethal_enemy_ends_the_run() {
    let session = start(empty_floors(), 4);
    let mut snapshot = session.snapshot();
    let here = session.player().expect("player").position();
    let beside = Direction::ALL
        .into_iter()
        .map(|d| d.step(here))
        .find(|&p| snapshot.map.is_walkable(p) && snapshot.map.blocking_actor_at(p).is_none())
        .expect("an open neighbour");
    let mut brute = session
        .content()
        .templates
        .spawn_actor(&TemplateId::from("mad_dwarf"))
        .expect("template");
    brute.fighter.base_power = 1000;
    snapshot.map.spawn_actor(brute, beside);

    let mut session = GameSession::builder(empty_floors())
        .restore(snapshot)
        .expect("restore");
    let report = session.submit(Action::wait(EntityId::PLAYER)).expect("turn");
    assert!(report.player_dead);
    assert!(session.is_player_dead());
    assert!(matches!(
        session.submit(Action::wait(EntityId::PLAYER)),
        Err(RuntimeError::PlayerDead)
    ));
}

#[test]
fn restoring_without_a_player_fails() {
    let session = start(empty_floors(), 6);
    let mut snapshot = session.snapshot();
    snapshot.map.take_actor(EntityId::PLAYER);
    let err = GameSession::builder(empty_floors())
        .restore(snapshot)
        .err()
        .expect("refused");
    assert!(matches!(err, RuntimeError::PlayerMissing));
}
