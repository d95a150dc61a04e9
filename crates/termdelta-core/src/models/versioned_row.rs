use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EffectiveTime, EntityId, EntityState};

/// Attribute set carried by one row version (label text, codes, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Why a raw row was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowRejection {
    MissingKey,
    MissingEffectiveTime,
    InvalidEffectiveTime,
    MissingActive,
    InvalidActive,
}

impl RowRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingKey => "missing_key",
            Self::MissingEffectiveTime => "missing_effective_time",
            Self::InvalidEffectiveTime => "invalid_effective_time",
            Self::MissingActive => "missing_active",
            Self::InvalidActive => "invalid_active",
        }
    }
}

/// A row as a Source Reader hands it over: fields present or not, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub key: Option<String>,
    pub component: Option<String>,
    pub effective_time: Option<String>,
    pub active: Option<String>,
    pub payload: Payload,
}

impl RawRow {
    /// Validate required fields. `sequence` is the row's position in its
    /// source and drives last-seen-wins tie-breaks downstream.
    pub fn into_versioned(self, sequence: u64) -> Result<VersionedRow, RowRejection> {
        let key = match self.key {
            Some(k) if !k.is_empty() => k,
            _ => return Err(RowRejection::MissingKey),
        };
        let effective_time = match self.effective_time.as_deref() {
            None | Some("") => return Err(RowRejection::MissingEffectiveTime),
            Some(text) => EffectiveTime::parse(text).ok_or(RowRejection::InvalidEffectiveTime)?,
        };
        let active = match self.active.as_deref() {
            None | Some("") => return Err(RowRejection::MissingActive),
            Some("1") => true,
            Some("0") => false,
            Some(_) => return Err(RowRejection::InvalidActive),
        };
        Ok(VersionedRow {
            entity_id: EntityId::new(key),
            component_id: self.component.filter(|c| !c.is_empty()),
            effective_time,
            active,
            payload: self.payload,
            sequence,
        })
    }
}

/// One observation of an entity at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedRow {
    pub entity_id: EntityId,
    /// Identity of the versioned component under `entity_id`. Two rows only
    /// supersede each other when they share it.
    pub component_id: Option<String>,
    pub effective_time: EffectiveTime,
    pub active: bool,
    pub payload: Payload,
    pub sequence: u64,
}

impl VersionedRow {
    pub fn new(entity_id: impl Into<EntityId>, effective_time: EffectiveTime, active: bool) -> Self {
        Self {
            entity_id: entity_id.into(),
            component_id: None,
            effective_time,
            active,
            payload: Payload::new(),
            sequence: 0,
        }
    }

    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(field, value);
        self
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// The component identity, defaulting to the entity key.
    pub fn component(&self) -> &str {
        self.component_id.as_deref().unwrap_or(self.entity_id.as_str())
    }

    pub fn state(&self) -> EntityState {
        EntityState::from_active(self.active)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.payload.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: &str, time: &str, active: &str) -> RawRow {
        RawRow {
            key: Some(key.to_string()),
            effective_time: Some(time.to_string()),
            active: Some(active.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn converts_complete_row() {
        let row = raw("22298006", "20200101", "1").into_versioned(7).unwrap();
        assert_eq!(row.entity_id.as_str(), "22298006");
        assert_eq!(row.effective_time.value(), 20200101);
        assert!(row.active);
        assert_eq!(row.sequence, 7);
        assert_eq!(row.component(), "22298006");
    }

    #[test]
    fn rejects_each_missing_or_bad_field() {
        assert_eq!(raw("", "20200101", "1").into_versioned(0), Err(RowRejection::MissingKey));
        assert_eq!(raw("E1", "", "1").into_versioned(0), Err(RowRejection::MissingEffectiveTime));
        assert_eq!(raw("E1", "2020", "1").into_versioned(0), Err(RowRejection::InvalidEffectiveTime));
        assert_eq!(raw("E1", "20200101", "").into_versioned(0), Err(RowRejection::MissingActive));
        assert_eq!(raw("E1", "20200101", "yes").into_versioned(0), Err(RowRejection::InvalidActive));
        let no_key = RawRow { key: None, ..raw("E1", "20200101", "1") };
        assert_eq!(no_key.into_versioned(0), Err(RowRejection::MissingKey));
    }

    #[test]
    fn empty_component_falls_back_to_key() {
        let mut r = raw("E1", "20200101", "0");
        r.component = Some(String::new());
        let row = r.into_versioned(0).unwrap();
        assert_eq!(row.component_id, None);
        assert_eq!(row.component(), "E1");
    }
}
