//! Points of interest, selection and sub-map navigation.
//!
//! Loads are two-phase: `load_root`/`enter_sub_map`/`go_back` hand out a
//! [`LoadTicket`] tagged with a fresh generation, the host fetches the
//! descriptor, and `complete_load` commits it only if no newer load was
//! started in the meantime. History changes ride on the ticket and are
//! applied on commit, so a failed or superseded load never touches them.

use std::collections::BTreeSet;

use crate::error::MapError;
use crate::geometry::Point;
use crate::models::{MapDescriptor, MapRef, MarkerDescriptor, PlacementRecord, PointOfInterest, SubMap};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadTicket {
    generation: u64,
    target: MapRef,
    history: Vec<MapRef>,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn target(&self) -> &MapRef {
        &self.target
    }
}

/// Content for the side panel next to the map.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPanel {
    Placeholder,
    LoadError(String),
    Poi {
        id: String,
        title: String,
        flavor: String,
        desc: String,
        enterable: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    active: Option<MapRef>,
    descriptor: MapDescriptor,
    history: Vec<MapRef>,
    generation: u64,
    selected: Option<String>,
    /// `None` shows every category.
    type_filter: Option<BTreeSet<String>>,
    markers_visible: bool,
    load_error: Option<String>,
    picked: Option<String>,
    /// Ids that were unplaced when the map loaded, in descriptor order.
    pending: Vec<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator {
            active: None,
            descriptor: MapDescriptor::default(),
            history: Vec::new(),
            generation: 0,
            selected: None,
            type_filter: None,
            markers_visible: true,
            load_error: None,
            picked: None,
            pending: Vec::new(),
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&MapRef> {
        self.active.as_ref()
    }

    pub fn descriptor(&self) -> &MapDescriptor {
        &self.descriptor
    }

    pub fn history(&self) -> &[MapRef] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    fn issue(&mut self, target: MapRef, history: Vec<MapRef>) -> LoadTicket {
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            data = %target.data_path,
            "map load started"
        );
        LoadTicket {
            generation: self.generation,
            target,
            history,
        }
    }

    /// Load the top-level map. History is cleared when this commits.
    pub fn load_root(&mut self, root: MapRef) -> LoadTicket {
        self.issue(root, Vec::new())
    }

    /// Start entering `sub_map`; the current map is pushed onto history on commit.
    pub fn enter_sub_map(&mut self, sub_map: &SubMap) -> Option<LoadTicket> {
        if !sub_map.is_complete() {
            return None;
        }
        let mut history = self.history.clone();
        history.extend(self.active.clone());
        Some(self.issue(sub_map.map_ref(), history))
    }

    /// Enter the sub-map of the selected POI, if it has one.
    pub fn enter_selected(&mut self) -> Option<LoadTicket> {
        let sub_map = self.selected()?.enterable_sub_map()?.clone();
        self.enter_sub_map(&sub_map)
    }

    /// Start returning to the previous map. `None` when there is nowhere to go back to.
    pub fn go_back(&mut self) -> Option<LoadTicket> {
        let mut history = self.history.clone();
        let previous = history.pop()?;
        Some(self.issue(previous, history))
    }

    /// Commit or reject the result of a load.
    ///
    /// Stale tickets are discarded with [`MapError::StaleGeneration`] and leave
    /// everything untouched. Failed loads keep the previous map and history
    /// and surface the error through the detail panel.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<MapDescriptor, MapError>,
    ) -> Result<(), MapError> {
        if !self.is_current(&ticket) {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded map load"
            );
            return Err(MapError::StaleGeneration {
                stale: ticket.generation,
                current: self.generation,
            });
        }

        let descriptor = match result {
            Ok(descriptor) => descriptor,
            Err(err) => {
                tracing::warn!(data = %ticket.target.data_path, error = %err, "map load failed");
                self.load_error = Some(err.to_string());
                return Err(err);
            }
        };

        tracing::info!(
            data = %ticket.target.data_path,
            pois = descriptor.points_of_interest.len(),
            depth = ticket.history.len(),
            "map loaded"
        );
        self.pending = descriptor
            .points_of_interest
            .iter()
            .filter(|p| !p.is_placed())
            .map(|p| p.id.clone())
            .collect();
        self.descriptor = descriptor;
        self.active = Some(ticket.target);
        self.history = ticket.history;
        self.selected = None;
        self.picked = None;
        self.load_error = None;
        // Categories differ per map; a new map starts with all of them shown.
        self.type_filter = None;
        Ok(())
    }

    // --- Rendering & filtering ---

    /// One marker per placed POI, in descriptor order.
    pub fn render(&self) -> Vec<MarkerDescriptor> {
        self.descriptor
            .points_of_interest
            .iter()
            .filter_map(|poi| {
                let pos = poi.position()?;
                Some(MarkerDescriptor {
                    id: poi.id.clone(),
                    x: pos.x,
                    y: pos.y,
                    label: poi.title.clone(),
                    kind: poi.kind().to_string(),
                    active: self.selected.as_deref() == Some(poi.id.as_str()),
                    visible: self.is_visible(poi),
                    enterable: poi.enterable_sub_map().is_some(),
                })
            })
            .collect()
    }

    fn is_visible(&self, poi: &PointOfInterest) -> bool {
        self.markers_visible && self.is_kind_shown(poi.kind())
    }

    pub fn is_kind_shown(&self, kind: &str) -> bool {
        self.type_filter
            .as_ref()
            .map_or(true, |types| types.contains(kind))
    }

    /// Show only markers whose category is in `types`.
    pub fn set_type_filter<I, S>(&mut self, types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_filter = Some(types.into_iter().map(Into::into).collect());
    }

    pub fn show_all_types(&mut self) {
        self.type_filter = None;
    }

    /// Flip one category on or off, starting from "everything shown".
    pub fn toggle_type(&mut self, kind: &str) {
        let mut types = self
            .type_filter
            .clone()
            .unwrap_or_else(|| self.descriptor.kinds().into_iter().collect());
        if !types.remove(kind) {
            types.insert(kind.to_string());
        }
        self.type_filter = Some(types);
    }

    pub fn markers_visible(&self) -> bool {
        self.markers_visible
    }

    /// Hide or show all markers without touching the category filter.
    pub fn toggle_markers(&mut self) -> bool {
        self.markers_visible = !self.markers_visible;
        self.markers_visible
    }

    // --- Selection ---

    pub fn selected(&self) -> Option<&PointOfInterest> {
        self.selected.as_deref().and_then(|id| self.descriptor.find(id))
    }

    /// Make `id` the only active POI.
    pub fn select(&mut self, id: &str) -> Result<&PointOfInterest, MapError> {
        if self.descriptor.find(id).is_none() {
            return Err(MapError::UnknownPoi(id.to_string()));
        }
        self.selected = Some(id.to_string());
        self.load_error = None;
        self.descriptor
            .find(id)
            .ok_or_else(|| MapError::UnknownPoi(id.to_string()))
    }

    pub fn reset_selection(&mut self) {
        self.selected = None;
        self.load_error = None;
    }

    pub fn detail_panel(&self) -> DetailPanel {
        if let Some(err) = &self.load_error {
            return DetailPanel::LoadError(err.clone());
        }
        match self.selected() {
            Some(poi) => DetailPanel::Poi {
                id: poi.id.clone(),
                title: poi.title.clone(),
                flavor: poi.flavor.clone(),
                desc: poi.desc.clone(),
                enterable: poi.enterable_sub_map().is_some(),
            },
            None => DetailPanel::Placeholder,
        }
    }

    // --- Dev placement ---

    /// POIs still missing coordinates.
    pub fn unplaced_pois(&self) -> Vec<&PointOfInterest> {
        self.descriptor
            .points_of_interest
            .iter()
            .filter(|p| !p.is_placed())
            .collect()
    }

    pub fn picked(&self) -> Option<&str> {
        self.picked.as_deref()
    }

    pub fn pick_for_placement(&mut self, id: &str) -> Result<(), MapError> {
        if self.descriptor.find(id).is_none() {
            return Err(MapError::UnknownPoi(id.to_string()));
        }
        self.picked = Some(id.to_string());
        Ok(())
    }

    /// Write `percent` into the picked POI. `None` when nothing is picked.
    pub fn place_picked(&mut self, percent: Point) -> Option<PlacementRecord> {
        if !percent.is_finite() {
            return None;
        }
        let id = self.picked.take()?;
        let poi = self.descriptor.find_mut(&id)?;
        poi.x = Some(percent.x);
        poi.y = Some(percent.y);
        tracing::info!(id = %poi.id, x = percent.x, y = percent.y, "placed point of interest");
        Some(PlacementRecord {
            id: poi.id.clone(),
            title: poi.title.clone(),
            x: poi.x,
            y: poi.y,
        })
    }

    /// Every POI that needed placement when the map loaded, with its current coordinates.
    pub fn pending_placements(&self) -> Vec<PlacementRecord> {
        self.pending
            .iter()
            .filter_map(|id| self.descriptor.find(id))
            .map(|poi| PlacementRecord {
                id: poi.id.clone(),
                title: poi.title.clone(),
                x: poi.x,
                y: poi.y,
            })
            .collect()
    }
}

/// JSON line for a brand-new POI at `percent`, ready to paste into a descriptor.
pub fn new_poi_template(percent: Point) -> String {
    format!(
        r#"{{ "id": "new-poi", "x": {:.2}, "y": {:.2}, "title": "New Point", "flavor": "Flavor text", "desc": "Description" }},"#,
        percent.x, percent.y
    )
}
