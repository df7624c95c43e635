use game_core::{GameMap, GameRng, MessageBuffer};
use serde::{Deserialize, Serialize};

use super::{RepositoryError, Result};

/// Resumable state of a session.
///
/// Content (templates, config, spawn tables) is not part of the snapshot; it
/// is supplied again when the session is restored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub floor: u32,
    pub turn: u64,
    pub map: GameMap,
    pub rng: GameRng,
    pub log: MessageBuffer,
}

impl SessionSnapshot {
    /// Encode as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    /// Decode bytes written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if snapshot.floor == 0 {
            return Err(RepositoryError::CorruptedData(
                "snapshot floor must start at 1".to_string(),
            ));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{MessageLog, MessageTag, Position, Tile};

    fn snapshot() -> SessionSnapshot {
        let mut map = GameMap::new(4, 3);
        map.set_tile(Position::new(1, 1), Tile::FLOOR).expect("in bounds");
        let mut log = MessageBuffer::default();
        log.add_message("Hello".to_string(), MessageTag::Welcome);
        SessionSnapshot {
            floor: 2,
            turn: 17,
            map,
            rng: GameRng::new(9),
            log,
        }
    }

    #[test]
    fn bytes_restore_the_same_snapshot() {
        let original = snapshot();
        let bytes = original.to_bytes().expect("encode");
        assert_eq!(SessionSnapshot::from_bytes(&bytes).expect("decode"), original);
    }

    #[test]
    fn truncated_bytes_are_rejected() {
        let bytes = snapshot().to_bytes().expect("encode");
        let err = SessionSnapshot::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn floor_zero_is_corrupt() {
        let mut zero = snapshot();
        zero.floor = 0;
        let bytes = zero.to_bytes().expect("encode");
        assert!(matches!(
            SessionSnapshot::from_bytes(&bytes),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
