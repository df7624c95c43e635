use rand::Rng;

use crate::procgen::{
    FloorGenerator, FloorRequest, GeneratedFloor, GenerationError, GeneratorKind,
    RectangularRoom, place_entities, tunnel,
};
use crate::rng::GameRng;
use crate::state::{Actor, GameMap};

/// Random rooms joined in placement order by L-shaped corridors.
///
/// Makes `max_rooms` placement attempts; an attempt that overlaps an earlier
/// room is dropped. The player starts in the first room and the stairs sit in
/// the centre of the last one. When no attempt succeeds the whole floor is
/// carved as a single room.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoomsGenerator;

impl FloorGenerator for RoomsGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Rooms
    }

    fn generate(
        &self,
        request: &FloorRequest<'_>,
        player: Actor,
        rng: &mut GameRng,
    ) -> Result<GeneratedFloor, GenerationError> {
        let settings = request.config.rooms;
        let (width, height) = (request.width(), request.height());
        let too_small = GenerationError::MapTooSmall {
            kind: self.kind(),
            width,
            height,
        };
        if settings.room_min_size > settings.room_max_size
            || settings.room_min_size + 1 > width.min(height)
        {
            return Err(too_small);
        }

        let mut map = GameMap::new(width, height);
        let mut rooms: Vec<RectangularRoom> = Vec::new();
        let mut player = Some(player);

        for _ in 0..settings.max_rooms {
            let room_width = rng.gen_range(settings.room_min_size..=settings.room_max_size);
            let room_height = rng.gen_range(settings.room_min_size..=settings.room_max_size);
            let (max_x, max_y) = (width - room_width - 1, height - room_height - 1);
            if max_x < 0 || max_y < 0 {
                continue;
            }
            let x = rng.gen_range(0..=max_x);
            let y = rng.gen_range(0..=max_y);
            let room = RectangularRoom::new(x, y, room_width, room_height);
            if rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }

            room.carve(&mut map)?;
            match rooms.last() {
                None => {
                    if let Some(player) = player.take() {
                        map.place_player(player, room.center());
                    }
                }
                Some(previous) => {
                    let path = tunnel::l_tunnel(previous.center(), room.center(), rng);
                    tunnel::carve(&mut map, &path)?;
                }
            }
            place_entities(&mut map, &room, request, rng)?;
            rooms.push(room);
        }

        let (start, stairs) = match (rooms.first(), rooms.last()) {
            (Some(first), Some(last)) => (first.center(), last.center()),
            _ => {
                // Nothing fit: the whole floor becomes one room.
                let room = RectangularRoom::new(0, 0, width - 1, height - 1);
                room.carve(&mut map)?;
                if let Some(player) = player.take() {
                    map.place_player(player, room.center());
                }
                place_entities(&mut map, &room, request, rng)?;
                rooms.push(room);
                tracing::debug!(attempts = settings.max_rooms, "no room placed, using the whole floor");
                (room.center(), room.center())
            }
        };
        map.set_downstairs(stairs)?;
        tracing::debug!(attempts = settings.max_rooms, placed = rooms.len(), "rooms placed");

        Ok(GeneratedFloor { map, rooms, start })
    }
}
