use super::{Position, Rgb};

/// Paint order; later variants are drawn on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderOrder {
    Corpse,
    #[default]
    Item,
    Actor,
}

/// Fields shared by every actor and item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub position: Position,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub description: String,
}

impl Entity {
    pub fn new(name: impl Into<String>, glyph: char, color: Rgb) -> Self {
        Self {
            position: Position::ORIGIN,
            glyph,
            color,
            name: name.into(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn blocking(mut self) -> Self {
        self.blocks_movement = true;
        self.render_order = RenderOrder::Actor;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}
