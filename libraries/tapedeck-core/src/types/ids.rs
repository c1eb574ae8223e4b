/// ID types for Tapedeck entities
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "sqlx-support")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Track identifier
///
/// The auto-generated integer key of a persisted track record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(i64);

impl TrackId {
    /// Wrap a store key
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw store key
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TrackId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "sqlx-support")]
impl Type<Sqlite> for TrackId {
    fn type_info() -> SqliteTypeInfo {
        <i64 as Type<Sqlite>>::type_info()
    }
}

#[cfg(feature = "sqlx-support")]
impl<'q> Encode<'q, Sqlite> for TrackId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<SqliteArgumentValue<'q>>,
    ) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<Sqlite>>::encode_by_ref(&self.0, args)
    }
}

#[cfg(feature = "sqlx-support")]
impl<'r> Decode<'r, Sqlite> for TrackId {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let id = <i64 as Decode<Sqlite>>::decode(value)?;
        Ok(TrackId(id))
    }
}

/// Playable handle identifier
///
/// Handles are process-lifetime resources, so the id is a plain counter and
/// is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleId(u64);

impl HandleId {
    /// Create a handle id from a counter value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_id_round_trips_through_raw_key() {
        let id = TrackId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(TrackId::from(42), id);
    }

    #[test]
    fn track_id_display() {
        assert_eq!(format!("{}", TrackId::new(7)), "7");
    }

    #[test]
    fn handle_id_display() {
        assert_eq!(HandleId::new(3).to_string(), "handle:3");
    }

    #[test]
    fn track_id_serializes_as_bare_integer() {
        let json = serde_json::to_string(&TrackId::new(12)).unwrap();
        assert_eq!(json, "12");
    }
}
