use game_core::{
    Actor, Ai, Entity, Fighter, FloorRequest, GameConfig, GameMap, GameRng, GeneratorKind,
    Level, Rgb, SpawnTables, TemplateRegistry,
};
use rand::Rng;

fn player() -> Actor {
    Actor::new(
        Entity::new("Player", '@', Rgb::WHITE),
        Ai::Controlled,
        Fighter::new(30, 10, 0, 0, 1, 2),
    )
    .with_level(Level::new(200, 0))
}

#[test]
fn generated_floors_survive_bincode() {
    let config = GameConfig::default();
    let templates = TemplateRegistry::new();
    let tables = SpawnTables::default();
    for kind in [GeneratorKind::Rooms, GeneratorKind::Bsp, GeneratorKind::Cave] {
        let request = FloorRequest::new(1, &config, &templates, &tables);
        let floor = kind
            .generate(&request, player(), &mut GameRng::new(21))
            .expect("floor");
        let bytes = bincode::serialize(&floor.map).expect("encode");
        let decoded: GameMap = bincode::deserialize(&bytes).expect("decode");
        assert_eq!(decoded, floor.map, "{kind}");
    }
}

#[test]
fn restored_rng_continues_the_same_stream() {
    let mut rng = GameRng::new(99);
    let _: u32 = rng.r#gen();
    let bytes = bincode::serialize(&rng).expect("encode");
    let mut restored: GameRng = bincode::deserialize(&bytes).expect("decode");
    for _ in 0..16 {
        assert_eq!(rng.gen_range(0..1000), restored.gen_range(0..1000));
    }
}
