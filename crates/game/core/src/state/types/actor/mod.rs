//! Actor state: everything that can take a turn.

mod ai;
mod equipment;
mod fighter;
mod inventory;
mod level;

pub use ai::{Ai, AiTick};
pub use equipment::Equipment;
pub use fighter::Fighter;
pub use inventory::{Inventory, Stowed};
pub use level::Level;

use rand::Rng;

use super::{Entity, EntityId, Item, Position, RenderOrder, Rgb};
use crate::body::Body;
use crate::log::{MessageLog, MessageTag};
use crate::stats::EffectiveStats;

/// Drop probabilities rolled when an actor dies.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LootTable {
    pub inventory_chance: f64,
    pub inventory_rolls: u32,
    pub body_chance: f64,
    pub body_rolls: u32,
}

/// Result of an actor dying.
#[derive(Clone, Debug, PartialEq)]
pub struct Death {
    pub victim: EntityId,
    pub xp_given: i32,
    /// Items and parts now lying on the victim's tile.
    pub drops: Vec<Item>,
}

/// An entity that acts: the player and every monster.
///
/// Alive exactly while `ai` is `Some`. Dead actors stay on the map as corpses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: EntityId,
    pub entity: Entity,
    pub ai: Option<Ai>,
    pub fighter: Fighter,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub level: Level,
    pub body: Body,
    pub loot_table: LootTable,
}

impl Actor {
    pub fn new(entity: Entity, ai: Ai, fighter: Fighter) -> Self {
        Self {
            id: EntityId::PLAYER,
            entity: entity.blocking(),
            ai: Some(ai),
            fighter,
            equipment: Equipment::default(),
            inventory: Inventory::default(),
            level: Level::default(),
            body: Body::default(),
            loot_table: LootTable::default(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_loot_table(mut self, loot_table: LootTable) -> Self {
        self.loot_table = loot_table;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn position(&self) -> Position {
        self.entity.position
    }

    pub fn stats(&self) -> EffectiveStats {
        EffectiveStats::compute(&self.fighter, Some(&self.body), Some(&self.equipment))
    }

    pub fn hp(&self) -> i32 {
        self.fighter.hp() + self.body.health()
    }

    pub fn max_hp(&self) -> i32 {
        self.fighter.max_hp() + self.body.max_health()
    }

    pub fn power(&self) -> i32 {
        self.stats().power
    }

    pub fn defense(&self) -> i32 {
        self.stats().defense
    }

    pub fn mental_strength(&self) -> i32 {
        self.fighter.base_mental_strength() + self.body.totals().mental_strength
    }

    /// True when a sacrificial implement is carried or equipped.
    pub fn has_sacrificial_implement(&self) -> bool {
        self.equipment.has_sacrificial() || self.inventory.items().iter().any(Item::is_sacrificial)
    }

    /// Writes effective hit points, clamped into `0..=max_hp`.
    ///
    /// Base hit points take the value up to their own capacity and body parts
    /// hold the rest, so damage drains the body first and healing refills the
    /// base first. Returns true if this write brought a living actor to zero.
    fn write_hp(&mut self, value: i32, log: &mut dyn MessageLog) -> bool {
        let target = value.clamp(0, self.max_hp());
        let base = target.clamp(0, self.fighter.max_hp());
        self.fighter.set_hp(base);
        let delta = (target - base) - self.body.health();
        if delta != 0 {
            self.body.set_health(delta, log);
        }
        self.is_alive() && self.hp() == 0
    }

    /// Sets effective hit points; dies if they reach zero while alive.
    pub fn set_hp<R: Rng + ?Sized>(
        &mut self,
        value: i32,
        rng: &mut R,
        log: &mut dyn MessageLog,
    ) -> Option<Death> {
        if self.write_hp(value, log) {
            Some(self.die(rng, log))
        } else {
            None
        }
    }

    pub fn take_damage<R: Rng + ?Sized>(
        &mut self,
        amount: i32,
        rng: &mut R,
        log: &mut dyn MessageLog,
    ) -> Option<Death> {
        let value = self.hp() - amount;
        self.set_hp(value, rng, log)
    }

    /// Restores up to `amount` hit points and returns how many were recovered.
    pub fn heal(&mut self, amount: i32, log: &mut dyn MessageLog) -> i32 {
        let hp = self.hp();
        let max_hp = self.max_hp();
        if hp == max_hp {
            return 0;
        }
        let new_hp = (hp + amount).min(max_hp);
        self.write_hp(new_hp, log);
        new_hp - hp
    }

    /// Sets effective mental strength (floored at zero); dies at zero while alive.
    pub fn set_mental_strength<R: Rng + ?Sized>(
        &mut self,
        value: i32,
        rng: &mut R,
        log: &mut dyn MessageLog,
    ) -> Option<Death> {
        let target = value.max(0);
        let from_body = self.body.totals().mental_strength;
        self.fighter.set_mental_strength(target - from_body);
        if target == 0 && self.is_alive() {
            Some(self.die(rng, log))
        } else {
            None
        }
    }

    /// Puts `item` in the inventory, or returns it placed on the actor's tile
    /// when there is no room.
    pub fn stow_or_spill(&mut self, item: Item) -> Option<Item> {
        match self.inventory.add(item) {
            Ok(_) => None,
            Err(mut item) => {
                item.entity.position = self.position();
                Some(item)
            }
        }
    }

    /// Dies if losing a part left a living actor with no hit points.
    pub fn check_death<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        log: &mut dyn MessageLog,
    ) -> Option<Death> {
        if self.is_alive() && self.hp() == 0 {
            Some(self.die(rng, log))
        } else {
            None
        }
    }

    /// Turns the actor into a corpse and rolls its loot table.
    ///
    /// Dropped items are positioned on the corpse's tile; the caller places
    /// them on the map.
    pub fn die<R: Rng + ?Sized>(&mut self, rng: &mut R, log: &mut dyn MessageLog) -> Death {
        let (message, tag) = if self.id.is_player() {
            ("You died!".to_string(), MessageTag::PlayerDie)
        } else {
            (format!("{} is dead!", self.entity.name), MessageTag::EnemyDie)
        };

        self.entity.glyph = '%';
        self.entity.color = Rgb::CORPSE;
        self.entity.blocks_movement = false;
        self.entity.name = format!("remains of {}", self.entity.name);
        self.entity.render_order = RenderOrder::Corpse;
        self.ai = None;

        let position = self.position();
        let mut drops = Vec::new();
        for _ in 0..self.loot_table.inventory_rolls {
            if self.inventory.is_empty() || rng.r#gen::<f64>() >= self.loot_table.inventory_chance {
                continue;
            }
            let index = rng.gen_range(0..self.inventory.len());
            if let Some(mut item) = self.inventory.remove(index) {
                item.entity.position = position;
                drops.push(item);
            }
        }
        for _ in 0..self.loot_table.body_rolls {
            if self.body.is_empty() || rng.r#gen::<f64>() >= self.loot_table.body_chance {
                continue;
            }
            let index = rng.gen_range(0..self.body.len());
            let owner = self.entity.name.clone();
            if let Some(item) = self.body.drop(index, position, &owner, log) {
                drops.push(item);
            }
        }

        log.add_message(message, tag);

        Death {
            victim: self.id,
            xp_given: self.level.xp_given,
            drops,
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.entity.position = self.entity.position.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Part, PartBonuses, PartForm, PartKind};
    use crate::log::MessageBuffer;
    use crate::rng::GameRng;

    fn part(kind: PartKind, health: i32) -> Part {
        Part::new(kind.to_string(), kind, PartForm::Flesh, health, PartBonuses::default())
    }

    fn orc() -> Actor {
        let body = Body::from_parts([part(PartKind::Torso, 6), part(PartKind::Leg, 3)]);
        let mut actor = Actor::new(Entity::new("Orc", 'o', Rgb(63, 127, 63)), Ai::Hostile, Fighter::new(10, 1, 0, 0, 0, 3))
            .with_body(body)
            .with_level(Level::new(0, 35));
        actor.id = EntityId(3);
        actor
    }

    #[test]
    fn body_absorbs_damage_before_base() {
        let mut actor = orc();
        let mut rng = GameRng::new(1);
        let mut log = MessageBuffer::default();
        assert_eq!(actor.hp(), 19);
        assert!(actor.take_damage(7, &mut rng, &mut log).is_none());
        assert_eq!(actor.fighter.hp(), 10);
        assert_eq!(actor.body.health(), 2);
        assert_eq!(actor.hp(), 12);
    }

    #[test]
    fn healing_refills_base_first() {
        let mut actor = orc();
        let mut rng = GameRng::new(1);
        let mut log = MessageBuffer::default();
        actor.take_damage(15, &mut rng, &mut log);
        assert_eq!(actor.fighter.hp(), 4);
        assert_eq!(actor.body.health(), 0);
        assert_eq!(actor.heal(8, &mut log), 8);
        assert_eq!(actor.fighter.hp(), 10);
        assert_eq!(actor.body.health(), 2);
    }

    #[test]
    fn heal_at_full_recovers_nothing() {
        let mut actor = orc();
        let mut log = MessageBuffer::default();
        assert_eq!(actor.heal(5, &mut log), 0);
    }

    #[test]
    fn hp_stays_within_bounds() {
        let mut actor = orc();
        let mut rng = GameRng::new(1);
        let mut log = MessageBuffer::default();
        actor.set_hp(1000, &mut rng, &mut log);
        assert_eq!(actor.hp(), actor.max_hp());
        let death = actor.set_hp(-50, &mut rng, &mut log);
        assert_eq!(actor.hp(), 0);
        assert!(death.is_some());
    }

    #[test]
    fn death_turns_actor_into_corpse() {
        let mut actor = orc();
        let mut rng = GameRng::new(1);
        let mut log = MessageBuffer::default();
        let death = actor.take_damage(100, &mut rng, &mut log).expect("orc dies");
        assert!(!actor.is_alive());
        assert_eq!(actor.entity.glyph, '%');
        assert_eq!(actor.entity.color, Rgb::CORPSE);
        assert!(!actor.entity.blocks_movement);
        assert_eq!(actor.name(), "remains of Orc");
        assert_eq!(actor.entity.render_order, RenderOrder::Corpse);
        assert_eq!(death.xp_given, 35);
        assert!(log.contains("Orc is dead!"));
    }

    #[test]
    fn corpse_takes_no_second_death() {
        let mut actor = orc();
        let mut rng = GameRng::new(1);
        let mut log = MessageBuffer::default();
        actor.take_damage(100, &mut rng, &mut log);
        assert!(actor.take_damage(100, &mut rng, &mut log).is_none());
    }

    #[test]
    fn certain_loot_drops_every_roll() {
        let mut actor = orc().with_loot_table(LootTable {
            inventory_chance: 1.0,
            inventory_rolls: 3,
            body_chance: 1.0,
            body_rolls: 1,
        });
        actor.inventory = Inventory::with_items(
            4,
            [
                Item::new("Torn Scrap", '=', Rgb::WHITE),
                Item::new("Glass Shard", 'w', Rgb::WHITE),
            ],
        );
        actor.entity.position = Position::new(2, 2);
        let mut rng = GameRng::new(5);
        let mut log = MessageBuffer::default();
        let death = actor.take_damage(100, &mut rng, &mut log).expect("dies");
        assert_eq!(death.drops.len(), 3);
        assert!(actor.inventory.is_empty());
        assert_eq!(actor.body.len(), 1);
        assert!(death.drops.iter().all(|item| item.entity.position == Position::new(2, 2)));
    }

    #[test]
    fn mental_collapse_kills() {
        let mut actor = orc();
        let mut rng = GameRng::new(1);
        let mut log = MessageBuffer::default();
        assert_eq!(actor.mental_strength(), 1);
        assert!(actor.set_mental_strength(-3, &mut rng, &mut log).is_some());
        assert_eq!(actor.mental_strength(), 0);
        assert!(!actor.is_alive());
    }

    #[test]
    fn full_inventory_spills_onto_the_actor_tile() {
        let mut actor = orc();
        actor.entity.position = Position::new(4, 7);
        actor.inventory = Inventory::with_items(1, [Item::new("Torn Scrap", '=', Rgb::WHITE)]);
        let mut stray = Item::new("Glass Shard", 'w', Rgb::WHITE);
        stray.entity.position = Position::new(0, 0);
        let spilled = actor.stow_or_spill(stray).expect("no room");
        assert_eq!(spilled.entity.position, Position::new(4, 7));
        assert_eq!(actor.inventory.len(), 1);

        actor.inventory = Inventory::new(1);
        assert!(actor.stow_or_spill(spilled).is_none());
        assert_eq!(actor.inventory.len(), 1);
    }

    #[test]
    fn losing_the_last_healthy_part_kills() {
        let mut actor = Actor::new(
            Entity::new("Husk", 'h', Rgb::WHITE),
            Ai::Hostile,
            Fighter::new(0, 1, 0, 0, 0, 3),
        )
        .with_body(Body::from_parts([part(PartKind::Torso, 6)]));
        let mut rng = GameRng::new(1);
        let mut log = MessageBuffer::default();
        assert!(actor.check_death(&mut rng, &mut log).is_none());

        actor.body.unequip(0, false, &mut log);
        assert_eq!(actor.hp(), 0);
        assert!(actor.check_death(&mut rng, &mut log).is_some());
        assert!(!actor.is_alive());
        assert!(actor.check_death(&mut rng, &mut log).is_none());
    }
}
