use crate::SkipList;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialized as a sequence of `(key, value)` pairs in key order. The
/// configured `max_level` and RNG seed are not part of the payload; a
/// round trip rebuilds the towers with [`Default`] settings.
impl<K: Serialize + Ord, V: Serialize> Serialize for SkipList<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries: Vec<(&K, &V)> = self.entries().collect();
        entries.serialize(serializer)
    }
}

impl<'de, K: Deserialize<'de> + Ord, V: Deserialize<'de>> Deserialize<'de> for SkipList<K, V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries: Vec<(K, V)> = Deserialize::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
