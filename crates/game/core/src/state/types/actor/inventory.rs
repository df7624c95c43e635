use crate::state::Item;

/// Bounded list of carried items.
///
/// Capacity is fixed at construction. Stackables with the same name merge
/// instead of taking a second slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    capacity: usize,
    items: Vec<Item>,
}

/// Outcome of [`Inventory::merge_or_add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stowed {
    /// Count added to the existing stack at this index.
    Merged(usize),
    /// Item placed in a new slot at this index.
    Added(usize),
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Inventory pre-filled with `items`; anything past capacity is dropped.
    pub fn with_items(capacity: usize, items: impl IntoIterator<Item = Item>) -> Self {
        let mut inventory = Self::new(capacity);
        for item in items {
            if inventory.add(item).is_err() {
                break;
            }
        }
        inventory
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.items.get_mut(index)
    }

    /// Index of a stack that `item` would merge into.
    pub fn stack_for(&self, item: &Item) -> Option<usize> {
        self.items.iter().position(|held| held.stacks_with(item))
    }

    /// Places `item` in a new slot; hands it back when full.
    pub fn add(&mut self, item: Item) -> Result<usize, Item> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Merges into a matching stack when possible, otherwise adds.
    pub fn merge_or_add(&mut self, item: Item) -> Result<Stowed, Item> {
        if let Some(index) = self.stack_for(&item) {
            if let (Some(held), Some(incoming)) = (self.items[index].stack.as_mut(), item.stack) {
                held.count += incoming.count;
                return Ok(Stowed::Merged(index));
            }
        }
        self.add(item).map(Stowed::Added)
    }

    pub fn remove(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Removes every item, preserving order.
    pub fn drain(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}
