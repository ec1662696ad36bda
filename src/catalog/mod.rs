// src/catalog/mod.rs
// Read-only course catalog, loaded once at startup

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("course not found: {0}")]
    NotFound(String),

    #[error("duplicate course id: {0}")]
    DuplicateId(String),

    #[error("course at position {0} has an empty id")]
    EmptyId(usize),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A full course, including its markdown body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
}

/// List view of a course; never carries `content`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&CourseRecord> for CourseSummary {
    fn from(record: &CourseRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    courses: Vec<CourseRecord>,
}

#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<CourseRecord>,
}

impl CourseCatalog {
    /// Build a catalog, rejecting empty or repeated ids
    pub fn new(courses: Vec<CourseRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(courses.len());
        for (position, course) in courses.iter().enumerate() {
            if course.id.is_empty() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(course.id.as_str()) {
                return Err(CatalogError::DuplicateId(course.id.clone()));
            }
        }
        Ok(Self { courses })
    }

    /// The courses compiled into the binary
    pub fn builtin() -> Self {
        Self {
            courses: builtin::courses(),
        }
    }

    /// Load a catalog from a TOML file with a `[[courses]]` array
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile = toml::from_str(&contents).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::new(file.courses)?;
        debug!(path = %path.display(), courses = catalog.len(), "Loaded course catalog from file");
        Ok(catalog)
    }

    pub fn list_courses(&self) -> Vec<CourseSummary> {
        self.courses.iter().map(CourseSummary::from).collect()
    }

    /// Exact, case-sensitive lookup by id
    pub fn get_course(&self, id: &str) -> Result<&CourseRecord, CatalogError> {
        self.courses
            .iter()
            .find(|course| course.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(id: &str) -> CourseRecord {
        CourseRecord {
            id: id.to_string(),
            title: format!("Title {}", id),
            description: format!("About {}", id),
            content: format!("# {}\n\nBody", id),
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = CourseCatalog::builtin();
        let rebuilt = CourseCatalog::new(builtin.courses.clone()).unwrap();
        assert_eq!(rebuilt.len(), 2);
    }

    #[test]
    fn test_every_listed_id_resolves_to_itself() {
        let catalog = CourseCatalog::builtin();
        for summary in catalog.list_courses() {
            let course = catalog.get_course(&summary.id).unwrap();
            assert_eq!(course.id, summary.id);
            assert_eq!(course.title, summary.title);
        }
    }

    #[test]
    fn test_list_preserves_order() {
        let catalog = CourseCatalog::builtin();
        let ids: Vec<String> = catalog.list_courses().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["gdp-economic-growth", "international-trade"]);
    }

    #[test]
    fn test_list_omits_content() {
        let catalog = CourseCatalog::builtin();
        let json = serde_json::to_value(catalog.list_courses()).unwrap();
        for course in json.as_array().unwrap() {
            assert!(course.get("content").is_none());
            assert!(course.get("id").is_some());
        }
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let catalog = CourseCatalog::builtin();
        let err = catalog.get_course("not-a-real-id").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref id) if id == "not-a-real-id"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = CourseCatalog::builtin();
        assert!(catalog.get_course("GDP-Economic-Growth").is_err());
        assert!(catalog.get_course("gdp-economic-growth ").is_err());
    }

    #[test]
    fn test_gdp_course_carries_markdown() {
        let catalog = CourseCatalog::builtin();
        let course = catalog.get_course("gdp-economic-growth").unwrap();
        assert_eq!(course.title, "GDP and Economic Growth");
        assert!(course.content.contains("GDP = C + G + I + NX"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = CourseCatalog::new(vec![record("a"), record("b"), record("a")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = CourseCatalog::new(vec![record("a"), record("")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId(1)));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[courses]]
id = "inflation"
title = "Inflation"
description = "Why prices rise."
content = """
# Inflation

Too much money chasing too few goods.
"""
"#
        )
        .unwrap();

        let catalog = CourseCatalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        let course = catalog.get_course("inflation").unwrap();
        assert!(course.content.contains("too few goods"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CourseCatalog::from_path(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[courses]]\nid = 42\n").unwrap();
        let err = CourseCatalog::from_path(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
