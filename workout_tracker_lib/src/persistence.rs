use thiserror::Error;

use crate::{
    store::{KeyValueStore, StoreError},
    workout::Workout,
};

pub const DEFAULT_STORAGE_KEY: &str = "workout";

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to serialize workouts: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Saves and loads the whole workout list as one JSON record under a fixed key.
///
/// Loaded workouts are display records: their derived fields come straight
/// from the snapshot and are never recomputed or validated again.
pub struct WorkoutRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// Overwrites the stored record with `workouts`.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(workouts)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!("Saved {} workouts under {:?}", workouts.len(), self.key);
        Ok(())
    }

    /// Missing, unreadable and malformed records all load as an empty list.
    pub fn load(&self) -> Vec<Workout> {
        let record = match self.store.get(&self.key) {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("No saved workouts under {:?}", self.key);
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!("Failed to read saved workouts: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Workout>>(&record) {
            Ok(workouts) => workouts,
            Err(err) => {
                tracing::warn!("Ignoring malformed workout record: {err}");
                Vec::new()
            }
        }
    }

    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}


#[cfg(test)]
mod proptests {
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::{coords::Coords, store::MemoryStore};

    fn workout() -> impl Strategy<Value = Workout> {
        (
            -90.0_f64..=90.0,
            -180.0_f64..=180.0,
            1e-3_f64..1e4,
            1e-3_f64..1e4,
            1e-3_f64..1e4,
            any::<bool>(),
            0_i64..4_102_444_800,
            0_u32..1_000_000_000,
        )
            .prop_map(|(lat, lng, distance, duration, tertiary, running, secs, nanos)| {
                let coords = Coords::new(lat, lng).unwrap();
                let date = DateTime::<Utc>::from_timestamp(secs, nanos).unwrap();
                if running {
                    Workout::running(coords, distance, duration, tertiary, date).unwrap()
                } else {
                    Workout::cycling(coords, distance, duration, tertiary, date).unwrap()
                }
            })
    }

    proptest! {
        #[test]
        fn load_returns_any_saved_list(workouts in prop::collection::vec(workout(), 1..8)) {
            let mut repository = WorkoutRepository::new(MemoryStore::new());
            repository.save(&workouts).unwrap();
            prop_assert_eq!(repository.load(), workouts);
        }
    }
}
