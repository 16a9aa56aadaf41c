use tracing::warn;

use super::kv::KeyValueStore;
use crate::skin::Skin;

/// Key holding the selected skin name
pub const SKIN_KEY: &str = "skin";

/// Selected skin; a missing or unknown value gives the default skin
pub fn load_skin(store: &dyn KeyValueStore) -> Skin {
    Skin::resolve(store.get(SKIN_KEY).as_deref())
}

/// Remember the selected skin. Failures are logged and otherwise ignored.
pub fn save_skin(store: &mut dyn KeyValueStore, skin: Skin) {
    if let Err(err) = store.set(SKIN_KEY, skin.name()) {
        warn!(%err, skin = skin.name(), "failed to persist skin");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_skin_defaults_to_classic() {
        assert_eq!(load_skin(&MemoryStore::new()), Skin::Classic);

        let store = MemoryStore::new().with_value(SKIN_KEY, "tartan");
        assert_eq!(load_skin(&store), Skin::Classic);
    }

    #[test]
    fn test_skin_roundtrip() {
        let mut store = MemoryStore::new();
        save_skin(&mut store, Skin::Zebra);

        assert_eq!(store.get(SKIN_KEY).as_deref(), Some("zebra"));
        assert_eq!(load_skin(&store), Skin::Zebra);
    }

    #[test]
    fn test_save_failure_is_silent() {
        let mut store = MemoryStore::read_only();
        save_skin(&mut store, Skin::Ice);
        assert_eq!(load_skin(&store), Skin::Classic);
    }
}
