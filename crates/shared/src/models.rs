use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::geometry::Point;

/// Category used when a POI carries no `type`.
pub const GENERIC_POI_TYPE: &str = "Luogo Generico";

/// Identity of a loaded map: where its descriptor and image live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRef {
    pub data_path: String,
    pub image_path: String,
}

impl MapRef {
    pub fn new(data_path: impl Into<String>, image_path: impl Into<String>) -> Self {
        MapRef {
            data_path: data_path.into(),
            image_path: image_path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMap {
    pub data: String,
    pub image: String,
}

impl SubMap {
    pub fn is_complete(&self) -> bool {
        !self.data.trim().is_empty() && !self.image.trim().is_empty()
    }

    pub fn map_ref(&self) -> MapRef {
        MapRef::new(self.data.clone(), self.image.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub id: String,
    /// Percent of the image width; `None` while unplaced.
    #[serde(default)]
    pub x: Option<f64>,
    /// Percent of the image height; `None` while unplaced.
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub flavor: String,
    /// HTML fragment.
    #[serde(default)]
    pub desc: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_map: Option<SubMap>,
}

impl PointOfInterest {
    pub fn kind(&self) -> &str {
        match self.kind.as_deref() {
            Some(k) if !k.trim().is_empty() => k,
            _ => GENERIC_POI_TYPE,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position().is_some()
    }

    /// The sub-map this POI leads into, if it names both a descriptor and an image.
    pub fn enterable_sub_map(&self) -> Option<&SubMap> {
        self.sub_map.as_ref().filter(|s| s.is_complete())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDescriptor {
    /// Draw order follows list order. A missing or `null` list decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub points_of_interest: Vec<PointOfInterest>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl MapDescriptor {
    pub fn from_json(path: &str, json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|e| MapError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn find(&self, id: &str) -> Option<&PointOfInterest> {
        self.points_of_interest.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut PointOfInterest> {
        self.points_of_interest.iter_mut().find(|p| p.id == id)
    }

    /// Distinct POI categories in first-seen order.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = Vec::new();
        for poi in &self.points_of_interest {
            if !kinds.iter().any(|k| k == poi.kind()) {
                kinds.push(poi.kind().to_string());
            }
        }
        kinds
    }
}

/// What the UI layer draws for one POI. Positions are percentages of the content layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub kind: String,
    pub active: bool,
    pub visible: bool,
    pub enterable: bool,
}

/// Dev-mode export row: a POI that needed placement, with its current coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub id: String,
    pub title: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}
