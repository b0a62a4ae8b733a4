//! Static checks for hand-written map descriptors.

use std::collections::HashSet;
use std::fmt;

use crate::models::MapDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub severity: Severity,
    pub poi_id: Option<String>,
    pub message: String,
}

impl Issue {
    fn error(poi_id: &str, message: impl Into<String>) -> Self {
        Issue {
            severity: Severity::Error,
            poi_id: Some(poi_id.to_string()),
            message: message.into(),
        }
    }

    fn warning(poi_id: &str, message: impl Into<String>) -> Self {
        Issue {
            severity: Severity::Warning,
            poi_id: Some(poi_id.to_string()),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.poi_id {
            Some(id) => write!(f, "{level}: [{id}] {}", self.message),
            None => write!(f, "{level}: {}", self.message),
        }
    }
}

fn coordinate_ok(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

/// Everything wrong with `descriptor` that can be seen without touching the filesystem.
pub fn validate_descriptor(descriptor: &MapDescriptor) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for poi in &descriptor.points_of_interest {
        let id = poi.id.as_str();
        if id.trim().is_empty() {
            issues.push(Issue {
                severity: Severity::Error,
                poi_id: None,
                message: format!("point of interest \"{}\" has an empty id", poi.title),
            });
        } else if !seen.insert(id) {
            issues.push(Issue::error(id, "duplicate id"));
        }

        if poi.title.trim().is_empty() {
            issues.push(Issue::error(id, "empty title"));
        }

        match (poi.x, poi.y) {
            (Some(x), Some(y)) => {
                if !coordinate_ok(x) || !coordinate_ok(y) {
                    issues.push(Issue::error(
                        id,
                        format!("coordinates ({x}, {y}) outside 0..100"),
                    ));
                }
            }
            (None, None) => issues.push(Issue::warning(id, "not placed yet")),
            _ => issues.push(Issue::error(id, "only one of x/y is set")),
        }

        if let Some(sub_map) = &poi.sub_map {
            if !sub_map.is_complete() {
                issues.push(Issue::error(id, "subMap needs both data and image"));
            }
        }
    }
    issues
}

/// Site-relative files a descriptor links to, for existence checks by the caller.
pub fn linked_paths(descriptor: &MapDescriptor) -> Vec<(&str, &str)> {
    descriptor
        .points_of_interest
        .iter()
        .filter_map(|poi| Some((poi.id.as_str(), poi.enterable_sub_map()?)))
        .flat_map(|(id, sub)| [(id, sub.data.as_str()), (id, sub.image.as_str())])
        .collect()
}
