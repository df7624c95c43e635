use rand::Rng;

use crate::config::BspSettings;
use crate::procgen::{
    FloorGenerator, FloorRequest, GeneratedFloor, GenerationError, GeneratorKind,
    RectangularRoom, place_entities, tunnel,
};
use crate::rng::GameRng;
use crate::state::{Actor, GameMap, Position};

/// One node of the partition tree.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    children: Option<Box<(Node, Node)>>,
}

impl Node {
    fn leaf(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            children: None,
        }
    }

    /// Splits recursively until `depth` runs out or the node is too small to
    /// hold two children of `min_size` along either axis.
    fn split_recursive<R: Rng + ?Sized>(&mut self, depth: u32, settings: &BspSettings, rng: &mut R) {
        let min = settings.room_min_size;
        let ratio = settings.max_ratio;
        if depth == 0 || (self.width < 2 * min && self.height < 2 * min) {
            return;
        }

        let horizontal = if self.height < 2 * min || self.width as f32 > self.height as f32 * ratio {
            false
        } else if self.width < 2 * min || self.height as f32 > self.width as f32 * ratio {
            true
        } else {
            rng.gen_bool(0.5)
        };

        let (low, high) = if horizontal {
            (self.y + min, self.y + self.height - min)
        } else {
            (self.x + min, self.x + self.width - min)
        };
        let position = rng.gen_range(low.min(high)..=low.max(high));

        let (mut left, mut right) = if horizontal {
            (
                Node::leaf(self.x, self.y, self.width, position - self.y),
                Node::leaf(self.x, position, self.width, self.y + self.height - position),
            )
        } else {
            (
                Node::leaf(self.x, self.y, position - self.x, self.height),
                Node::leaf(position, self.y, self.x + self.width - position, self.height),
            )
        };
        left.split_recursive(depth - 1, settings, rng);
        right.split_recursive(depth - 1, settings, rng);
        self.children = Some(Box::new((left, right)));
    }

    fn center(&self) -> Position {
        Position::new(self.x + (self.width >> 1), self.y + (self.height >> 1))
    }

    /// Parents before children, left before right.
    fn pre_order(&self) -> Vec<&Node> {
        let mut stack = vec![self];
        let mut order = Vec::new();
        while let Some(node) = stack.pop() {
            order.push(node);
            if let Some(children) = node.children.as_deref() {
                stack.push(&children.1);
                stack.push(&children.0);
            }
        }
        order
    }
}

/// Binary space partition: a room in every leaf, siblings joined by jittered
/// corridors.
#[derive(Clone, Copy, Debug, Default)]
pub struct BspGenerator;

impl FloorGenerator for BspGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Bsp
    }

    fn generate(
        &self,
        request: &FloorRequest<'_>,
        player: Actor,
        rng: &mut GameRng,
    ) -> Result<GeneratedFloor, GenerationError> {
        let settings = request.config.bsp;
        let (width, height) = (request.width(), request.height());
        if width < 3 || height < 3 || settings.room_min_size < 2 {
            return Err(GenerationError::MapTooSmall {
                kind: self.kind(),
                width,
                height,
            });
        }

        let mut map = GameMap::new(width, height);
        let mut root = Node::leaf(0, 0, width - 1, height - 1);
        root.split_recursive(settings.depth, &settings, rng);

        let clamp = |p: Position| Position::new(p.x.clamp(1, width - 2), p.y.clamp(1, height - 2));
        let jitter = settings.corridor_jitter.max(0);
        let mut rooms = Vec::new();
        for node in root.pre_order() {
            match node.children.as_deref() {
                Some((first, second)) => {
                    let from = first.center().offset(rng.gen_range(-jitter..=jitter), 0);
                    let to = second.center().offset(0, rng.gen_range(-jitter..=jitter));
                    let path = tunnel::l_tunnel(clamp(from), clamp(to), rng);
                    tunnel::carve(&mut map, &path)?;
                }
                None => rooms.push(RectangularRoom::new(node.x, node.y, node.width, node.height)),
            }
        }

        let mut player = Some(player);
        let last = rooms.len() - 1;
        for (i, room) in rooms.iter().enumerate() {
            room.carve(&mut map)?;
            if i == 0
                && let Some(player) = player.take()
            {
                map.place_player(player, room.center());
            }
            if i == last {
                map.set_downstairs(room.center())?;
            }
            place_entities(&mut map, room, request, rng)?;
        }
        tracing::debug!(leaves = rooms.len(), depth = settings.depth, "partition carved");

        let start = rooms[0].center();
        Ok(GeneratedFloor { map, rooms, start })
    }
}
