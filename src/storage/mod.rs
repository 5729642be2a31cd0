// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::profile::ProfileRecord;
use crate::utils::error::StorageError;
use uuid::Uuid;

const PROFILE_FILE: &str = "profile.json";
const SUMMARY_FILE: &str = "summary.txt";
const META_FILE: &str = "meta.json";

/// Location of a saved profile.
#[derive(Debug, Clone)]
pub struct StoredProfile {
    pub id: Uuid,
    pub dir: PathBuf,
}

/// Keeps parsed profiles on disk, one directory per opaque identifier:
/// `<base_dir>/<id>/{profile.json, summary.txt, meta.json}`.
pub struct ProfileStore {
    base_dir: PathBuf,
}

impl ProfileStore {
    /// Creates a new ProfileStore with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the pruned record, its flattened text summary and metadata under a fresh id.
    pub fn save(&self, record: &ProfileRecord) -> Result<StoredProfile, StorageError> {
        let id = Uuid::new_v4();
        let target_dir = self.base_dir.join(id.to_string());
        fs::create_dir_all(&target_dir)
            .map_err(StorageError::IoError)?;

        let pruned = record
            .to_pruned_json()
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        let profile_str = serde_json::to_string_pretty(&pruned)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(target_dir.join(PROFILE_FILE), profile_str)
            .map_err(StorageError::IoError)?;

        let summary = flatten_profile(record);
        fs::write(target_dir.join(SUMMARY_FILE), &summary)
            .map_err(StorageError::IoError)?;

        let metadata = serde_json::json!({
            "id": id,
            "name": record.contact.name,
            "sections": record.populated_sections(),
            "experience_count": record.experience.len(),
            "education_count": record.education.len(),
            "certification_count": record.certifications.len(),
            "summary_length": summary.len(),
            "stored_at": chrono::Utc::now().to_rfc3339(),
        });
        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(target_dir.join(META_FILE), metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved profile {} to {}", id, target_dir.display());

        Ok(StoredProfile { id, dir: target_dir })
    }

    /// Loads a stored profile by its exact identifier.
    pub fn load(&self, id: &str) -> Result<ProfileRecord, StorageError> {
        let path = self.profile_dir(id)?.join(PROFILE_FILE);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        let content = fs::read_to_string(&path)
            .map_err(StorageError::IoError)?;
        let record = serde_json::from_str(&content)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        tracing::debug!("Loaded profile {} from {}", id, path.display());
        Ok(record)
    }

    /// Reads the flattened text summary stored next to a profile.
    pub fn load_summary(&self, id: &str) -> Result<String, StorageError> {
        let path = self.profile_dir(id)?.join(SUMMARY_FILE);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        fs::read_to_string(&path).map_err(StorageError::IoError)
    }

    // Only well-formed ids ever reach the filesystem.
    fn profile_dir(&self, id: &str) -> Result<PathBuf, StorageError> {
        let id = Uuid::parse_str(id.trim())
            .map_err(|e| StorageError::InvalidId(format!("'{}': {}", id, e)))?;
        Ok(self.base_dir.join(id.to_string()))
    }
}

/// Plain-text rendering of a profile, one fact per line, used as the searchable
/// summary stored with each record. Blank parts are skipped.
pub fn flatten_profile(record: &ProfileRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !record.contact.name.is_empty() {
        lines.push(record.contact.name.clone());
    }
    if !record.summary.is_empty() {
        lines.push(record.summary.clone());
    }
    for job in &record.experience {
        lines.push(format!("{} at {} ({} - {})", job.title, job.company, job.dates.start, job.dates.end));
    }
    for school in &record.education {
        let degree = if school.field.is_empty() {
            school.degree.clone()
        } else {
            format!("{}, {}", school.degree, school.field)
        };
        lines.push(format!("{} - {}", degree, school.school));
    }
    if let Some(skills) = joined(&record.skills) {
        lines.push(format!("Skills: {}", skills));
    }
    if let Some(languages) = joined(&record.languages) {
        lines.push(format!("Languages: {}", languages));
    }
    for cert in &record.certifications {
        lines.push(cert.name.clone());
    }

    lines.join("\n")
}

fn joined(items: &[String]) -> Option<String> {
    let kept: Vec<&str> = items.iter().map(String::as_str).filter(|s| !s.is_empty()).collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Certification, Contact, DateRange, Education, Experience};

    fn sample_record() -> ProfileRecord {
        ProfileRecord {
            contact: Contact {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            summary: "Systems engineer.".to_string(),
            experience: vec![Experience {
                title: "SENIOR ENGINEER".to_string(),
                company: "Acme Corp".to_string(),
                dates: DateRange { start: "Jan 2020".to_string(), end: "Present".to_string() },
                ..Default::default()
            }],
            education: vec![Education {
                school: "MIT".to_string(),
                degree: "BSc".to_string(),
                field: "Physics".to_string(),
                ..Default::default()
            }],
            skills: vec!["Python".to_string(), "".to_string(), "Go".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles")).unwrap();
        let record = sample_record();

        let stored = store.save(&record).unwrap();
        assert!(stored.dir.join("profile.json").exists());
        assert!(stored.dir.join("meta.json").exists());

        let loaded = store.load(&stored.id.to_string()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_stored_profile_omits_empty_sections() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path()).unwrap();
        let stored = store.save(&sample_record()).unwrap();

        let raw = fs::read_to_string(stored.dir.join("profile.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json.get("languages").is_none());
        assert!(json.get("certifications").is_none());
        assert!(json.get("experience").is_some());

        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(stored.dir.join("meta.json")).unwrap()).unwrap();
        assert_eq!(meta["id"], stored.id.to_string());
        assert_eq!(meta["experience_count"], 1);
    }

    #[test]
    fn test_unknown_and_invalid_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path()).unwrap();

        let missing = store.load(&Uuid::new_v4().to_string());
        assert!(matches!(missing, Err(StorageError::NotFound(_))));

        let invalid = store.load("../../etc/passwd");
        assert!(matches!(invalid, Err(StorageError::InvalidId(_))));
    }

    #[test]
    fn test_flatten_profile() {
        let summary = flatten_profile(&sample_record());
        assert_eq!(
            summary,
            "Jane Doe\nSystems engineer.\nSENIOR ENGINEER at Acme Corp (Jan 2020 - Present)\nBSc, Physics - MIT\nSkills: Python, Go"
        );
        assert_eq!(flatten_profile(&ProfileRecord::default()), "");
    }

    #[test]
    fn test_flatten_orders_languages_before_certifications() {
        let record = ProfileRecord {
            skills: vec!["Rust".to_string()],
            languages: vec!["English".to_string(), "".to_string(), "French".to_string()],
            certifications: vec![Certification { name: "CKA".to_string(), ..Default::default() }],
            ..Default::default()
        };
        assert_eq!(flatten_profile(&record), "Skills: Rust\nLanguages: English, French\nCKA");
    }

    #[test]
    fn test_load_summary() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path()).unwrap();
        let stored = store.save(&sample_record()).unwrap();

        let summary = store.load_summary(&stored.id.to_string()).unwrap();
        assert!(summary.starts_with("Jane Doe\n"));
    }
}
