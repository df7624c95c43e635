//! Moving items between the ground, the inventory, equipment slots and the
//! body.

use crate::action::{
    ActionError, ActionTransition, ImpossibleAction, living_actor, living_actor_mut,
};
use crate::body::{BodyError, PartRef, Toggle};
use crate::combat;
use crate::env::GameEnv;
use crate::log::MessageTag;
use crate::state::{EntityId, EquipSlot, GameMap, Stowed};

/// Picks up the first item on the actor's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupAction {
    pub actor: EntityId,
}

impl PickupAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }

    fn ground_index(&self, map: &GameMap) -> Result<usize, ActionError> {
        let position = living_actor(map, self.actor)?.position();
        map.item_index_at(position)
            .ok_or_else(|| ImpossibleAction::NothingToPickUp.into())
    }
}

impl ActionTransition for PickupAction {
    type Error = ActionError;
    type Result = Stowed;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let index = self.ground_index(map)?;
        let inventory = &living_actor(map, self.actor)?.inventory;
        let merges = inventory.stack_for(&map.items[index]).is_some();
        if !merges && inventory.is_full() {
            return Err(ImpossibleAction::InventoryFull.into());
        }
        Ok(())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<Stowed, Self::Error> {
        let index = self.ground_index(map)?;
        let item = map.take_item(index).ok_or(ActionError::NoSuchItem(index))?;
        let name = item.name().to_string();
        let inventory = &mut living_actor_mut(map, self.actor)?.inventory;
        match inventory.merge_or_add(item) {
            Ok(stowed) => {
                env.log
                    .add_message(format!("You picked up the {name}!"), MessageTag::Neutral);
                Ok(stowed)
            }
            Err(item) => {
                map.add_item(item);
                Err(ImpossibleAction::InventoryFull.into())
            }
        }
    }
}

/// What to put on the ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropTarget {
    /// Inventory index.
    Carried(usize),
    Equipped(EquipSlot),
    /// Body part index.
    Attached(usize),
}

/// Drops an item or body part at the actor's feet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropAction {
    pub actor: EntityId,
    pub target: DropTarget,
}

impl DropAction {
    pub fn new(actor: EntityId, target: DropTarget) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for DropAction {
    type Error = ActionError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actor = living_actor(map, self.actor)?;
        match self.target {
            DropTarget::Carried(index) if actor.inventory.get(index).is_none() => {
                Err(ActionError::NoSuchItem(index))
            }
            DropTarget::Equipped(slot) if actor.equipment.slot(slot).is_none() => {
                Err(ActionError::EmptySlot(slot))
            }
            DropTarget::Attached(index) if actor.body.part(index).is_none() => {
                Err(BodyError::NoSuchPart(index).into())
            }
            _ => Ok(()),
        }
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<(), Self::Error> {
        let actor = living_actor_mut(map, self.actor)?;
        let position = actor.position();
        let mut item = match self.target {
            DropTarget::Carried(index) => actor
                .inventory
                .remove(index)
                .ok_or(ActionError::NoSuchItem(index))?,
            DropTarget::Equipped(slot) => actor
                .equipment
                .take(slot)
                .ok_or(ActionError::EmptySlot(slot))?,
            DropTarget::Attached(index) => {
                let owner = actor.name().to_string();
                let item = actor
                    .body
                    .drop(index, position, &owner, env.log)
                    .ok_or(BodyError::NoSuchPart(index))?;
                map.add_item(item);
                combat::settle_part_loss(map, self.actor, env);
                return Ok(());
            }
        };
        item.entity.position = position;
        env.log.add_message(
            format!("You dropped the {}.", item.name()),
            MessageTag::Neutral,
        );
        map.add_item(item);
        Ok(())
    }
}

/// Equip source: an inventory item goes into its slot, a slot empties back
/// into the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipTarget {
    Carried(usize),
    Slot(EquipSlot),
}

/// Toggles an item between the inventory and the equipment slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipAction {
    pub actor: EntityId,
    pub target: EquipTarget,
}

impl EquipAction {
    pub fn new(actor: EntityId, target: EquipTarget) -> Self {
        Self { actor, target }
    }
}

impl ActionTransition for EquipAction {
    type Error = ActionError;
    type Result = EquipSlot;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actor = living_actor(map, self.actor)?;
        match self.target {
            EquipTarget::Carried(index) => {
                let item = actor
                    .inventory
                    .get(index)
                    .ok_or(ActionError::NoSuchItem(index))?;
                if item.equippable.is_none() {
                    return Err(ImpossibleAction::NotEquippable(item.name().to_string()).into());
                }
            }
            EquipTarget::Slot(slot) => {
                if actor.equipment.slot(slot).is_none() {
                    return Err(ActionError::EmptySlot(slot));
                }
                if actor.inventory.is_full() {
                    return Err(ImpossibleAction::InventoryFull.into());
                }
            }
        }
        Ok(())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<EquipSlot, Self::Error> {
        let actor = living_actor_mut(map, self.actor)?;
        match self.target {
            EquipTarget::Carried(index) => {
                let item = actor
                    .inventory
                    .remove(index)
                    .ok_or(ActionError::NoSuchItem(index))?;
                let slot = item.equippable.map(|e| e.slot).unwrap_or_default();
                let name = item.name().to_string();
                if let Some(previous) = actor.equipment.insert(item) {
                    env.log.add_message(
                        format!("You remove the {}.", previous.name()),
                        MessageTag::Neutral,
                    );
                    // A slot was just freed, so this cannot overflow.
                    if let Some(spilled) = actor.stow_or_spill(previous) {
                        map.add_item(spilled);
                    }
                }
                env.log
                    .add_message(format!("You equip the {name}."), MessageTag::Neutral);
                Ok(slot)
            }
            EquipTarget::Slot(slot) => {
                let item = actor
                    .equipment
                    .take(slot)
                    .ok_or(ActionError::EmptySlot(slot))?;
                env.log.add_message(
                    format!("You remove the {}.", item.name()),
                    MessageTag::Neutral,
                );
                actor
                    .inventory
                    .add(item)
                    .map_err(|_| ImpossibleAction::InventoryFull)?;
                Ok(slot)
            }
        }
    }
}

/// Attaches a carried part to the body or detaches an attached one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachAction {
    pub actor: EntityId,
    pub part: PartRef,
}

impl AttachAction {
    pub fn new(actor: EntityId, part: PartRef) -> Self {
        Self { actor, part }
    }
}

impl ActionTransition for AttachAction {
    type Error = ActionError;
    type Result = Toggle;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, map: &GameMap, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let actor = living_actor(map, self.actor)?;
        match self.part {
            PartRef::Attached(index) => {
                actor
                    .body
                    .part(index)
                    .ok_or(BodyError::NoSuchPart(index))?;
                if actor.inventory.is_full() {
                    return Err(ImpossibleAction::InventoryFull.into());
                }
            }
            PartRef::Carried(index) => {
                let holds_part = actor
                    .inventory
                    .get(index)
                    .is_some_and(|item| item.part.is_some());
                if !holds_part {
                    return Err(BodyError::NotAPart(index).into());
                }
                if actor.body.is_full() {
                    return Err(ImpossibleAction::BodyFull.into());
                }
            }
        }
        Ok(())
    }

    fn apply(&self, map: &mut GameMap, env: &mut GameEnv<'_>) -> Result<Toggle, Self::Error> {
        let actor = living_actor_mut(map, self.actor)?;
        let toggle = actor
            .body
            .toggle_equip(self.part, &mut actor.inventory, env.log)?;
        if toggle == Toggle::Detached {
            combat::settle_part_loss(map, self.actor, env);
        }
        Ok(toggle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::test_support::{Fixture, flesh};
    use crate::body::{Body, PartKind};
    use crate::state::{Equippable, Fighter, Inventory, Item, Position, Rgb, Stackable};

    fn shell(count: i32) -> Item {
        Item::new("Ornate Shell", '*', Rgb::WHITE).with_stack(Stackable::new(count, 5))
    }

    fn sword() -> Item {
        Item::new("Sword", '/', Rgb::WHITE).with_equippable(Equippable {
            slot: EquipSlot::Weapon,
            power: 4,
            ..Equippable::default()
        })
    }

    #[test]
    fn pickup_merges_identical_stacks() {
        let mut fx = Fixture::new();
        fx.player_mut().inventory = Inventory::with_items(26, [shell(3)]);
        fx.map.add_item({
            let mut item = shell(2);
            item.entity.position = Position::new(5, 5);
            item
        });
        let (map, mut env) = fx.env();
        let action = PickupAction::new(EntityId::PLAYER);
        action.pre_validate(map, &env).expect("item on tile");
        let stowed = action.apply(map, &mut env).expect("picks up");
        assert_eq!(stowed, Stowed::Merged(0));
        let inventory = &fx.player().inventory;
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.items()[0].stack, Some(Stackable::new(5, 5)));
        assert!(fx.map.items.is_empty());
    }

    #[test]
    fn pickup_needs_something_and_room() {
        let mut fx = Fixture::new();
        let (map, env) = fx.env();
        let err = PickupAction::new(EntityId::PLAYER)
            .pre_validate(map, &env)
            .unwrap_err();
        assert_eq!(err.to_string(), "There is nothing here to pick up.");

        fx.player_mut().inventory = Inventory::with_items(1, [sword()]);
        fx.map.add_item(sword().tap_position(Position::new(5, 5)));
        let (map, env) = fx.env();
        let err = PickupAction::new(EntityId::PLAYER)
            .pre_validate(map, &env)
            .unwrap_err();
        assert_eq!(err.to_string(), "Your inventory is full.");
    }

    #[test]
    fn full_inventory_still_merges_stacks() {
        let mut fx = Fixture::new();
        fx.player_mut().inventory = Inventory::with_items(1, [shell(1)]);
        fx.map.add_item(shell(4).tap_position(Position::new(5, 5)));
        let (map, mut env) = fx.env();
        let action = PickupAction::new(EntityId::PLAYER);
        action.pre_validate(map, &env).expect("merge allowed");
        action.apply(map, &mut env).expect("merges");
        assert_eq!(fx.player().inventory.items()[0].stack, Some(Stackable::new(5, 5)));
    }

    #[test]
    fn equip_swaps_and_unequip_returns_to_inventory() {
        let mut fx = Fixture::new();
        fx.player_mut().inventory = Inventory::with_items(26, [sword()]);
        let base_power = fx.player().power();
        let (map, mut env) = fx.env();
        EquipAction::new(EntityId::PLAYER, EquipTarget::Carried(0))
            .apply(map, &mut env)
            .expect("equips");
        assert!(fx.player().inventory.is_empty());
        assert_eq!(fx.player().power(), base_power + 4);

        let (map, mut env) = fx.env();
        EquipAction::new(EntityId::PLAYER, EquipTarget::Slot(EquipSlot::Weapon))
            .apply(map, &mut env)
            .expect("unequips");
        assert_eq!(fx.player().inventory.len(), 1);
        assert_eq!(fx.player().power(), base_power);
    }

    #[test]
    fn non_equippable_items_are_rejected() {
        let mut fx = Fixture::new();
        fx.player_mut().inventory = Inventory::with_items(26, [shell(1)]);
        let (map, env) = fx.env();
        let err = EquipAction::new(EntityId::PLAYER, EquipTarget::Carried(0))
            .pre_validate(map, &env)
            .unwrap_err();
        assert_eq!(err.to_string(), "The Ornate Shell cannot be equipped.");
    }

    #[test]
    fn detach_then_attach_preserves_wear() {
        let mut fx = Fixture::new();
        fx.player_mut()
            .body
            .set_health(-1, &mut crate::log::MessageBuffer::default());
        let (map, mut env) = fx.env();
        let toggle = AttachAction::new(EntityId::PLAYER, PartRef::Attached(0))
            .apply(map, &mut env)
            .expect("detaches");
        assert_eq!(toggle, Toggle::Detached);
        let carried = fx.player().inventory.items()[0].part.clone().expect("part");
        assert_eq!(carried.kind, PartKind::Arm);
        assert_eq!(carried.current_health(), 1);

        let (map, mut env) = fx.env();
        let toggle = AttachAction::new(EntityId::PLAYER, PartRef::Carried(0))
            .apply(map, &mut env)
            .expect("attaches");
        assert_eq!(toggle, Toggle::Attached);
        let reattached = fx.player().body.parts().last().expect("part");
        assert_eq!(reattached.current_health(), 1);
    }

    #[test]
    fn dropping_a_part_leaves_it_on_the_ground() {
        let mut fx = Fixture::new();
        let (map, mut env) = fx.env();
        DropAction::new(EntityId::PLAYER, DropTarget::Attached(1))
            .apply(map, &mut env)
            .expect("drops");
        assert_eq!(fx.player().body.len(), 1);
        assert_eq!(fx.map.items.len(), 1);
        assert_eq!(fx.map.items[0].entity.position, Position::new(5, 5));
        assert!(fx.log.contains("Player dropped a Human Leg."));
    }

    /// Player whose hit points all live in a single torso.
    fn hollow(fx: &mut Fixture) {
        let player = fx.player_mut();
        player.fighter = Fighter::new(0, 10, 0, 0, 1, 12);
        player.body = Body::from_parts([flesh("Human Torso", PartKind::Torso, 6)]);
    }

    #[test]
    fn dropping_the_last_healthy_part_kills() {
        let mut fx = Fixture::new();
        hollow(&mut fx);
        let (map, mut env) = fx.env();
        DropAction::new(EntityId::PLAYER, DropTarget::Attached(0))
            .apply(map, &mut env)
            .expect("drops");
        let player = fx.player();
        assert_eq!(player.hp(), 0);
        assert!(!player.is_alive());
        assert_eq!(player.name(), "remains of Player");
        assert_eq!(fx.map.items.len(), 1);
        assert!(fx.log.contains("You died!"));
    }

    #[test]
    fn detaching_the_last_healthy_part_kills() {
        let mut fx = Fixture::new();
        hollow(&mut fx);
        let (map, mut env) = fx.env();
        let toggle = AttachAction::new(EntityId::PLAYER, PartRef::Attached(0))
            .apply(map, &mut env)
            .expect("detaches");
        assert_eq!(toggle, Toggle::Detached);
        assert!(!fx.player().is_alive());
        assert!(fx.log.contains("You died!"));
    }

    #[test]
    fn detaching_with_health_to_spare_survives() {
        let mut fx = Fixture::new();
        let (map, mut env) = fx.env();
        AttachAction::new(EntityId::PLAYER, PartRef::Attached(0))
            .apply(map, &mut env)
            .expect("detaches");
        assert!(fx.player().is_alive());
        assert!(!fx.log.contains("You died!"));
    }

    trait TapPosition {
        fn tap_position(self, position: Position) -> Self;
    }

    impl TapPosition for Item {
        fn tap_position(mut self, position: Position) -> Self {
            self.entity.position = position;
            self
        }
    }
}
