//! Project dataset: loading, validation, and the built-in Charleston demo.

use std::{collections::HashSet, fs, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::{
    domain::{Category, LatLng, Project, ProjectId, ProjectRecord, Status},
    error::{DatasetError, SkipReason},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered, immutable collection of projects keyed by unique id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub id: String,
    pub reason: SkipReason,
}

/// What validation did to the raw records while building a [`Dataset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
    pub dropped_links: usize,
    pub unparsed_dates: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.dropped_links == 0 && self.unparsed_dates == 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Wrapped { projects: Vec<ProjectRecord> },
    Bare(Vec<ProjectRecord>),
}

#[derive(Deserialize)]
struct TomlDocument {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

pub fn parse_json(text: &str) -> Result<Vec<ProjectRecord>, DatasetError> {
    Ok(match serde_json::from_str::<JsonDocument>(text)? {
        JsonDocument::Wrapped { projects } => projects,
        JsonDocument::Bare(projects) => projects,
    })
}

pub fn parse_toml(text: &str) -> Result<Vec<ProjectRecord>, DatasetError> {
    Ok(toml::from_str::<TomlDocument>(text)?.projects)
}

impl Dataset {
    /// Validates raw records in order. Records without usable coordinates are
    /// skipped and reported; an empty or repeated id rejects the whole load.
    pub fn from_records(
        records: Vec<ProjectRecord>,
    ) -> Result<(Self, LoadReport), DatasetError> {
        let mut report = LoadReport::default();
        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let id = record.id.trim().to_string();
            if id.is_empty() {
                return Err(DatasetError::MissingId { index });
            }
            if !seen.insert(id.clone()) {
                return Err(DatasetError::DuplicateId(ProjectId(id)));
            }

            let position = match (&record.lat, &record.lng) {
                (Some(lat), Some(lng)) => match (lat.as_f64(), lng.as_f64()) {
                    (Some(lat), Some(lng)) => LatLng::new(lat, lng),
                    _ => {
                        warn!(
                            project_id = %id,
                            lat = ?lat,
                            lng = ?lng,
                            "skipping project with non-numeric coordinates"
                        );
                        report.skipped.push(SkippedRecord {
                            id,
                            reason: SkipReason::NonNumericCoordinates,
                        });
                        continue;
                    }
                },
                _ => {
                    warn!(project_id = %id, "skipping project without coordinates");
                    report.skipped.push(SkippedRecord {
                        id,
                        reason: SkipReason::MissingCoordinates,
                    });
                    continue;
                }
            };
            if !position.is_valid() {
                warn!(
                    project_id = %id,
                    lat = position.lat,
                    lng = position.lng,
                    "skipping project with invalid coordinates"
                );
                report.skipped.push(SkippedRecord {
                    id,
                    reason: SkipReason::InvalidCoordinates,
                });
                continue;
            }

            for date in [&record.start_date, &record.end_date] {
                let date = date.trim();
                if !date.is_empty() && NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
                    warn!(project_id = %id, date, "date is not YYYY-MM-DD; shown as text");
                    report.unparsed_dates += 1;
                }
            }

            let mut links = Vec::with_capacity(record.links.len());
            for link in record.links {
                match Url::parse(link.trim()) {
                    Ok(url) if matches!(url.scheme(), "http" | "https") => {
                        links.push(link.trim().to_string())
                    }
                    Ok(url) => {
                        warn!(project_id = %id, link = %link, scheme = url.scheme(), "dropping non-web link");
                        report.dropped_links += 1;
                    }
                    Err(err) => {
                        warn!(project_id = %id, link = %link, "dropping unparseable link: {err}");
                        report.dropped_links += 1;
                    }
                }
            }

            projects.push(Project {
                id: ProjectId(id),
                name: record.name,
                category: Category::from(record.category),
                status: Status::from(record.status),
                city: record.city,
                position,
                budget_usd: record.budget_usd,
                start_date: record.start_date,
                end_date: record.end_date,
                links,
                description: record.description,
            });
        }

        report.loaded = projects.len();
        Ok((Self { projects }, report))
    }

    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        Self::from_records(parse_json(text)?).map(|(dataset, _)| dataset)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, DatasetError> {
        Self::from_records(parse_toml(text)?).map(|(dataset, _)| dataset)
    }

    /// Reads a `.json` or `.toml` dataset from disk.
    pub fn load(path: &Path) -> Result<(Self, LoadReport), DatasetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = match extension.as_str() {
            "json" => parse_json(&text)?,
            "toml" => parse_toml(&text)?,
            _ => return Err(DatasetError::UnsupportedFormat { extension }),
        };
        Self::from_records(records)
    }

    /// Demo records for Charleston, SC.
    pub fn charleston_demo() -> Self {
        let projects = CHARLESTON_DEMO
            .iter()
            .map(|demo| Project {
                id: ProjectId::new(demo.id),
                name: demo.name.to_string(),
                category: Category::from(demo.category),
                status: Status::from(demo.status),
                city: "Charleston, SC".to_string(),
                position: LatLng::new(demo.lat, demo.lng),
                budget_usd: demo.budget_usd,
                start_date: demo.start_date.to_string(),
                end_date: demo.end_date.to_string(),
                links: vec![demo.link.to_string()],
                description: demo.description.to_string(),
            })
            .collect();
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Distinct city names in first-seen order.
    pub fn cities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .map(|project| project.city.as_str())
            .filter(|city| seen.insert(*city))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

struct DemoProject {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    status: &'static str,
    lat: f64,
    lng: f64,
    budget_usd: u64,
    start_date: &'static str,
    end_date: &'static str,
    link: &'static str,
    description: &'static str,
}

const CHARLESTON_DEMO: &[DemoProject] = &[
    DemoProject {
        id: "CHS-001",
        name: "Low Battery Seawall — Phase 4",
        category: "resilience",
        status: "active",
        lat: 32.7749,
        lng: -79.9496,
        budget_usd: 100_000_000,
        start_date: "2024-03-01",
        end_date: "2027-12-31",
        link: "https://placeholder/low-battery-phase4",
        description: "Seawall elevation, storm surge protection along Murray Blvd.",
    },
    DemoProject {
        id: "CHS-002",
        name: "I-526 Lowcountry Corridor (West) — Improvements",
        category: "road",
        status: "planned",
        lat: 32.8670,
        lng: -80.0200,
        budget_usd: 0,
        start_date: "",
        end_date: "",
        link: "https://placeholder/i526-corridor-west",
        description: "Capacity, interchange, and safety upgrades along I-526 West.",
    },
    DemoProject {
        id: "CHS-003",
        name: "Union Pier Redevelopment — Public Realm Infrastructure",
        category: "building",
        status: "planned",
        lat: 32.7865,
        lng: -79.9240,
        budget_usd: 0,
        start_date: "",
        end_date: "",
        link: "https://placeholder/union-pier",
        description: "Street grid, utilities, waterfront access improvements.",
    },
    DemoProject {
        id: "CHS-004",
        name: "Ashley River Crossing (Bike/Ped Bridge)",
        category: "transit",
        status: "active",
        lat: 32.7905,
        lng: -79.9585,
        budget_usd: 0,
        start_date: "",
        end_date: "",
        link: "https://placeholder/ashley-river-crossing",
        description: "Dedicated multi-use bridge connecting downtown and West Ashley.",
    },
    DemoProject {
        id: "CHS-005",
        name: "Charleston International Airport (CHS) — Terminal Expansion",
        category: "building",
        status: "active",
        lat: 32.8986,
        lng: -80.0405,
        budget_usd: 0,
        start_date: "",
        end_date: "",
        link: "https://placeholder/chs-terminal-expansion",
        description: "Gate expansion, security, and curbside upgrades.",
    },
    DemoProject {
        id: "CHS-006",
        name: "West Ashley Greenway & Bikeway Upgrades",
        category: "park",
        status: "planned",
        lat: 32.7830,
        lng: -80.0120,
        budget_usd: 0,
        start_date: "",
        end_date: "",
        link: "https://placeholder/wag-upgrades",
        description: "Trail surface, lighting, crossings, and access improvements.",
    },
];

#[cfg(test)]
#[path = "tests/dataset_tests.rs"]
mod tests;
