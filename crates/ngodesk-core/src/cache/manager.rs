use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::Dataset;
use crate::payload::Payload;

/// Consider cache stale after 1 hour.
const CACHE_STALE_MINUTES: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        format_age(self.age_minutes())
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CachedData<U> {
        CachedData {
            data: f(self.data),
            cached_at: self.cached_at,
        }
    }
}

/// "just now", "5m ago", "2h ago", "3d ago". Half units round up.
fn format_age(minutes: i64) -> String {
    if minutes < 1 {
        // Negative ages come from clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        let rounded = if minutes % 60 >= 30 { hours + 1 } else { hours };
        format!("{}h ago", rounded)
    } else {
        let days = minutes / 1440;
        let rounded = if (minutes % 1440) / 60 >= 12 { days + 1 } else { days };
        format!("{}d ago", rounded)
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, dataset: Dataset) -> PathBuf {
        self.cache_dir.join(format!("{}.json", dataset.as_str()))
    }

    pub fn load_dataset<T: DeserializeOwned>(
        &self,
        dataset: Dataset,
    ) -> Result<Option<CachedData<Vec<T>>>> {
        let path = self.cache_path(dataset);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", dataset))?;
        let cached: CachedData<Vec<T>> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", dataset))?;

        Ok(Some(cached))
    }

    pub fn save_dataset<T: Serialize>(&self, dataset: Dataset, records: &[T]) -> Result<()> {
        let cached = CachedData::new(records);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(self.cache_path(dataset), contents)
            .with_context(|| format!("Failed to write cache file: {}", dataset))?;
        debug!(dataset = %dataset, count = records.len(), "Cache saved");
        Ok(())
    }

    pub fn load_payload(&self, dataset: Dataset) -> Result<Option<CachedData<Payload>>> {
        Ok(match dataset {
            Dataset::Grants => self.load_dataset(dataset)?.map(|c| c.map(Payload::Grants)),
            Dataset::ComplianceDocuments => self
                .load_dataset(dataset)?
                .map(|c| c.map(Payload::ComplianceDocuments)),
            Dataset::Employees => self.load_dataset(dataset)?.map(|c| c.map(Payload::Employees)),
            Dataset::OnboardingTasks => self
                .load_dataset(dataset)?
                .map(|c| c.map(Payload::OnboardingTasks)),
            Dataset::Exits => self.load_dataset(dataset)?.map(|c| c.map(Payload::Exits)),
            Dataset::ReferenceChecks => self
                .load_dataset(dataset)?
                .map(|c| c.map(Payload::ReferenceChecks)),
            Dataset::Opportunities => self
                .load_dataset(dataset)?
                .map(|c| c.map(Payload::Opportunities)),
            Dataset::Users => self.load_dataset(dataset)?.map(|c| c.map(Payload::Users)),
        })
    }

    pub fn save_payload(&self, payload: &Payload) -> Result<()> {
        let dataset = payload.dataset();
        match payload {
            Payload::Grants(v) => self.save_dataset(dataset, v),
            Payload::ComplianceDocuments(v) => self.save_dataset(dataset, v),
            Payload::Employees(v) => self.save_dataset(dataset, v),
            Payload::OnboardingTasks(v) => self.save_dataset(dataset, v),
            Payload::Exits(v) => self.save_dataset(dataset, v),
            Payload::ReferenceChecks(v) => self.save_dataset(dataset, v),
            Payload::Opportunities(v) => self.save_dataset(dataset, v),
            Payload::Users(v) => self.save_dataset(dataset, v),
        }
    }

    /// Read only the timestamp, without deserializing the records.
    fn cached_at(&self, dataset: Dataset) -> Result<Option<DateTime<Utc>>> {
        #[derive(Deserialize)]
        struct Stamp {
            cached_at: DateTime<Utc>,
        }

        let path = self.cache_path(dataset);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", dataset))?;
        let stamp: Stamp = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", dataset))?;
        Ok(Some(stamp.cached_at))
    }

    pub fn ages(&self) -> CacheAges {
        let mut ages = CacheAges::default();
        for dataset in Dataset::ALL {
            match self.cached_at(dataset) {
                Ok(Some(at)) => {
                    ages.minutes.insert(dataset.as_str(), (Utc::now() - at).num_minutes());
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(cache = %dataset, error = %e, "Failed to load cache for age display");
                }
            }
        }
        ages
    }

    /// True when any dataset is missing, unreadable or older than an hour.
    pub fn any_stale(&self) -> bool {
        Dataset::ALL.iter().any(|&dataset| match self.cached_at(dataset) {
            Ok(Some(at)) => (Utc::now() - at).num_minutes() > CACHE_STALE_MINUTES,
            Ok(None) => true,
            Err(e) => {
                debug!(cache = %dataset, error = %e, "Failed to load cache for staleness check");
                true
            }
        })
    }

    pub fn clear(&self) -> Result<()> {
        for dataset in Dataset::ALL {
            let path = self.cache_path(dataset);
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove cache file: {}", dataset))?;
            }
        }
        Ok(())
    }
}

/// Age in minutes of each cached dataset, keyed by dataset name.
#[derive(Debug, Default)]
pub struct CacheAges {
    minutes: BTreeMap<&'static str, i64>,
}

impl CacheAges {
    pub fn age(&self, dataset: Dataset) -> String {
        self.minutes
            .get(dataset.as_str())
            .map(|m| format_age(*m))
            .unwrap_or_else(|| "never".to_string())
    }

    /// Age of the freshest dataset.
    pub fn last_updated(&self) -> String {
        self.minutes
            .values()
            .min()
            .map(|m| format_age(*m))
            .unwrap_or_else(|| "never".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::ComplianceDocument;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn manager() -> (TempDir, CacheManager) {
        let dir = TempDir::new().unwrap();
        let manager = CacheManager::new(dir.path().join("ngodesk")).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_age_display() {
        assert_eq!(format_age(-3), "just now");
        assert_eq!(format_age(0), "just now");
        assert_eq!(format_age(5), "5m ago");
        assert_eq!(format_age(89), "1h ago");
        assert_eq!(format_age(90), "2h ago");
        assert_eq!(format_age(1440 + 11 * 60), "1d ago");
        assert_eq!(format_age(1440 + 12 * 60), "2d ago");
    }

    #[test]
    fn test_cached_data_is_stale() {
        let fresh = CachedData::new(vec![1]);
        assert!(!fresh.is_stale());
        assert_eq!(fresh.age_display(), "just now");

        let mut old = CachedData::new(vec![1]);
        old.cached_at = Utc::now() - Duration::minutes(61);
        assert!(old.is_stale());
    }

    #[test]
    fn test_dataset_round_trip_through_disk() {
        let (_dir, cache) = manager();
        let docs = fixtures::compliance_documents();
        assert!(cache
            .load_dataset::<ComplianceDocument>(Dataset::ComplianceDocuments)
            .unwrap()
            .is_none());

        cache.save_dataset(Dataset::ComplianceDocuments, &docs).unwrap();
        let loaded = cache
            .load_dataset::<ComplianceDocument>(Dataset::ComplianceDocuments)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.data, docs);
        assert!(!loaded.is_stale());
    }

    #[test]
    fn test_payload_round_trip() {
        let (_dir, cache) = manager();
        let payload = Payload::demo(Dataset::Users);
        cache.save_payload(&payload).unwrap();
        let loaded = cache.load_payload(Dataset::Users).unwrap().unwrap();
        assert_eq!(loaded.data, payload);
        assert!(cache.load_payload(Dataset::Exits).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_dir, cache) = manager();
        std::fs::write(cache.cache_dir().join("grants.json"), "{not json").unwrap();
        assert!(cache.load_payload(Dataset::Grants).is_err());
        assert!(cache.any_stale());
    }

    #[test]
    fn test_ages_and_staleness() {
        let (_dir, cache) = manager();
        assert!(cache.any_stale());
        assert_eq!(cache.ages().last_updated(), "never");

        for dataset in Dataset::ALL {
            cache.save_payload(&Payload::demo(dataset)).unwrap();
        }
        assert!(!cache.any_stale());
        let ages = cache.ages();
        assert_eq!(ages.age(Dataset::Grants), "just now");
        assert_eq!(ages.last_updated(), "just now");

        cache.clear().unwrap();
        assert_eq!(cache.ages().age(Dataset::Grants), "never");
    }
}
