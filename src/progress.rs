use std::collections::BTreeMap;

/// Minimal key-value persistence the host page provides (browser local
/// storage, a file, or nothing). Only trivial flags live here; flower state
/// is rebuilt fresh on every load.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

const PROGRESS_KEY: &str = "tutorialProgress";

/// Per-step completion map for the tutorial checklist.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TutorialProgress {
    steps: BTreeMap<String, bool>,
}

impl TutorialProgress {
    /// Restore saved progress. Anything missing or malformed starts fresh.
    pub fn load(store: &dyn KvStore) -> Self {
        store
            .get(PROGRESS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn KvStore) {
        match serde_json::to_string(self) {
            Ok(raw) => store.set(PROGRESS_KEY, &raw),
            Err(err) => tracing::warn!(%err, "failed to serialize tutorial progress"),
        }
    }

    pub fn set_step(&mut self, step: impl Into<String>, done: bool) {
        self.steps.insert(step.into(), done);
    }

    pub fn is_done(&self, step: &str) -> bool {
        self.steps.get(step).copied().unwrap_or(false)
    }

    pub fn completed(&self) -> usize {
        self.steps.values().filter(|&&done| done).count()
    }

    /// Rounded completion percentage against the host's step count.
    pub fn percent_complete(&self, total_steps: usize) -> u32 {
        if total_steps == 0 {
            return 0;
        }
        let done = self.completed().min(total_steps);
        ((done as f64 / total_steps as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_tracks_steps() {
        let mut p = TutorialProgress::default();
        assert_eq!(p.percent_complete(6), 0);

        p.set_step("setup", true);
        p.set_step("first-flower", true);
        p.set_step("drag", false);
        assert_eq!(p.completed(), 2);
        assert!(p.is_done("setup"));
        assert!(!p.is_done("drag"));
        assert_eq!(p.percent_complete(6), 33);
    }

    #[test]
    fn round_trips_through_a_store() {
        let mut store = MemoryStore::new();
        let mut p = TutorialProgress::default();
        p.set_step("setup", true);
        p.save(&mut store);

        let restored = TutorialProgress::load(&store);
        assert_eq!(restored, p);
    }

    #[test]
    fn malformed_saved_state_starts_fresh() {
        let mut store = MemoryStore::new();
        store.set(PROGRESS_KEY, "{not json");
        assert_eq!(TutorialProgress::load(&store), TutorialProgress::default());
    }

    #[test]
    fn zero_total_never_divides() {
        assert_eq!(TutorialProgress::default().percent_complete(0), 0);
    }
}
