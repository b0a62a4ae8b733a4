//! The single owner of viewport, gesture and navigation state.

use crate::config::MapConfig;
use crate::error::MapError;
use crate::geometry::{Point, Size, Transform, ViewportState};
use crate::gesture::{ClickResolution, ClickTarget, GestureRouter, PointerButton, ZoomOutcome};
use crate::models::{MapDescriptor, MapRef, MarkerDescriptor, PlacementRecord};
use crate::navigator::{self, DetailPanel, LoadTicket, Navigator};

/// Which DOM container currently hosts the content layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerKind {
    #[default]
    Inline,
    Fullscreen,
}

/// Dev-mode side effect of a background click.
#[derive(Debug, Clone, PartialEq)]
pub enum DevAction {
    None,
    Placed(PlacementRecord),
    /// No POI was picked: a JSON line describing a new POI at the click.
    Template(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Suppressed,
    Selected(String),
    Background(DevAction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapController {
    config: MapConfig,
    viewport: ViewportState,
    router: GestureRouter,
    navigator: Navigator,
    container_kind: ContainerKind,
    image_failed: bool,
}

impl Default for MapController {
    fn default() -> Self {
        let config = MapConfig::default();
        MapController {
            viewport: ViewportState::new(config.viewport),
            router: GestureRouter::new(),
            navigator: Navigator::new(),
            container_kind: ContainerKind::Inline,
            image_failed: false,
            config,
        }
    }
}

impl MapController {
    pub fn new(config: MapConfig) -> Result<Self, MapError> {
        config.viewport.validate()?;
        Ok(MapController {
            viewport: ViewportState::new(config.viewport),
            config,
            ..MapController::default()
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn container_kind(&self) -> ContainerKind {
        self.container_kind
    }

    pub fn is_panning(&self) -> bool {
        self.router.is_panning()
    }

    pub fn image_failed(&self) -> bool {
        self.image_failed
    }

    /// Image currently shown. Follows the committed map.
    pub fn image_path(&self) -> Option<&str> {
        self.navigator.active().map(|m| m.image_path.as_str())
    }

    pub fn transform(&self) -> Transform {
        self.viewport.current_transform()
    }

    pub fn markers(&self) -> Vec<MarkerDescriptor> {
        self.navigator.render()
    }

    pub fn detail_panel(&self) -> DetailPanel {
        self.navigator.detail_panel()
    }

    pub fn can_go_back(&self) -> bool {
        self.navigator.can_go_back()
    }

    // --- Loading ---

    pub fn start(&mut self) -> LoadTicket {
        let root = self.config.root.clone();
        self.navigator.load_root(root)
    }

    pub fn enter_selected(&mut self) -> Option<LoadTicket> {
        self.navigator.enter_selected()
    }

    pub fn go_back(&mut self) -> Option<LoadTicket> {
        self.navigator.go_back()
    }

    /// Feed back the result of a descriptor fetch.
    ///
    /// On commit the in-flight gesture is dropped and zoom and pan start over.
    /// The image box is re-fitted once the new image reports its size.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<MapDescriptor, MapError>,
    ) -> Result<(), MapError> {
        let previous_image = self.image_path().map(str::to_string);
        self.navigator.complete_load(ticket, result)?;
        self.router.cancel();
        self.viewport.reset_view();
        if self.image_path() != previous_image.as_deref() {
            self.image_failed = false;
        }
        Ok(())
    }

    /// The image at `path` loaded with these intrinsic dimensions.
    ///
    /// Reports for an image that is no longer the active one are ignored.
    pub fn image_loaded(&mut self, path: &str, intrinsic: Size) -> Result<(), MapError> {
        if self.image_path() != Some(path) {
            tracing::debug!(path, "ignoring load event for inactive image");
            return Ok(());
        }
        self.viewport.set_intrinsic(intrinsic)?;
        self.image_failed = false;
        Ok(())
    }

    /// The image at `path` failed. The last image box is kept so the viewport stays valid.
    pub fn image_load_failed(&mut self, path: &str) -> MapError {
        if self.image_path() == Some(path) {
            tracing::warn!(path, "map image failed to load");
            self.image_failed = true;
        }
        MapError::ImageLoad {
            path: path.to_string(),
        }
    }

    // --- Containers ---

    pub fn resize(&mut self, container: Size) -> Result<(), MapError> {
        self.viewport.set_container(container)
    }

    /// Move the content layer to another container. Zoom and pan start over.
    pub fn switch_container(&mut self, kind: ContainerKind, container: Size) -> Result<(), MapError> {
        self.viewport.set_container(container)?;
        self.router.cancel();
        self.container_kind = kind;
        tracing::debug!(?kind, "active map container switched");
        Ok(())
    }

    // --- Input ---

    pub fn wheel(&mut self, delta_y: f64, cursor: Point) -> ZoomOutcome {
        self.router.wheel(&mut self.viewport, delta_y, cursor)
    }

    pub fn pointer_down(&mut self, button: PointerButton, cursor: Point, over_content: bool) -> bool {
        self.router
            .pointer_down(&self.viewport, button, cursor, over_content)
    }

    pub fn pointer_move(&mut self, cursor: Point) -> bool {
        self.router.pointer_move(&mut self.viewport, cursor)
    }

    pub fn pointer_up(&mut self) {
        self.router.pointer_up();
    }

    pub fn double_click(&mut self) {
        self.viewport.reset_view();
    }

    /// A click on the content layer at `cursor` (container-relative).
    pub fn click(&mut self, cursor: Point, target: ClickTarget) -> ClickOutcome {
        let threshold = self.config.viewport.click_threshold;
        match self.router.resolve_click(threshold, cursor, target) {
            ClickResolution::Suppressed => ClickOutcome::Suppressed,
            ClickResolution::Marker(id) => match self.navigator.select(&id) {
                Ok(_) => ClickOutcome::Selected(id),
                Err(err) => {
                    tracing::debug!(error = %err, "click on unknown marker");
                    ClickOutcome::Suppressed
                }
            },
            ClickResolution::Background => {
                self.navigator.reset_selection();
                ClickOutcome::Background(self.dev_click(cursor))
            }
        }
    }

    fn dev_click(&mut self, cursor: Point) -> DevAction {
        if !self.config.dev_mode {
            return DevAction::None;
        }
        let Some(percent) = self.viewport.content_percent(cursor) else {
            return DevAction::None;
        };
        if let Some(record) = self.navigator.place_picked(percent) {
            return DevAction::Placed(record);
        }
        let line = navigator::new_poi_template(percent);
        tracing::info!("{line}");
        DevAction::Template(line)
    }

    /// The map the user would return to with "back".
    pub fn previous_map(&self) -> Option<&MapRef> {
        self.navigator.history().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointOfInterest, SubMap};

    fn poi(id: &str, x: Option<f64>, sub: bool) -> PointOfInterest {
        PointOfInterest {
            id: id.to_string(),
            x,
            y: x,
            title: id.to_string(),
            flavor: String::new(),
            desc: String::new(),
            kind: None,
            sub_map: sub.then(|| SubMap {
                data: format!("maps/{id}.json"),
                image: format!("img/{id}.webp"),
            }),
        }
    }

    fn controller(dev_mode: bool) -> MapController {
        let config = MapConfig {
            dev_mode,
            ..MapConfig::default()
        };
        let mut c = MapController::new(config).unwrap();
        let t = c.start();
        c.complete_load(
            t,
            Ok(MapDescriptor {
                points_of_interest: vec![
                    poi("castello", Some(25.0), true),
                    poi("lago", Some(60.0), false),
                    poi("rovine", None, false),
                ],
            }),
        )
        .unwrap();
        c.resize(Size::new(800.0, 400.0)).unwrap();
        let image = c.image_path().unwrap().to_string();
        c.image_loaded(&image, Size::new(1600.0, 800.0)).unwrap();
        c
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = MapConfig::default();
        config.viewport.min_scale = 0.0;
        assert!(MapController::new(config).is_err());
    }

    #[test]
    fn test_marker_click_selects_without_background_reset() {
        let mut c = controller(true);
        c.pointer_down(PointerButton::Primary, Point::new(200.0, 100.0), true);
        c.pointer_up();
        let out = c.click(Point::new(200.0, 100.0), ClickTarget::Marker("castello".into()));
        assert_eq!(out, ClickOutcome::Selected("castello".into()));
        assert!(matches!(c.detail_panel(), DetailPanel::Poi { ref id, .. } if id == "castello"));
    }

    #[test]
    fn test_background_click_clears_selection() {
        let mut c = controller(false);
        c.click(Point::new(1.0, 1.0), ClickTarget::Marker("lago".into()));
        let out = c.click(Point::new(700.0, 300.0), ClickTarget::Background);
        assert_eq!(out, ClickOutcome::Background(DevAction::None));
        assert!(c.markers().iter().all(|m| !m.active));
        assert_eq!(c.detail_panel(), DetailPanel::Placeholder);
    }

    #[test]
    fn test_drag_release_does_not_click() {
        let mut c = controller(false);
        c.wheel(-1.0, Point::new(400.0, 200.0));
        c.wheel(-1.0, Point::new(400.0, 200.0));
        c.click(Point::new(0.0, 0.0), ClickTarget::Marker("lago".into()));
        assert!(c.pointer_down(PointerButton::Primary, Point::new(100.0, 100.0), true));
        c.pointer_move(Point::new(140.0, 100.0));
        c.pointer_up();
        let out = c.click(Point::new(140.0, 100.0), ClickTarget::Background);
        assert_eq!(out, ClickOutcome::Suppressed);
        assert_eq!(c.navigator().selected().map(|p| p.id.as_str()), Some("lago"));
    }

    #[test]
    fn test_pan_survives_cursor_leaving_container() {
        let mut c = controller(false);
        c.wheel(-1.0, Point::new(400.0, 200.0));
        c.wheel(-1.0, Point::new(400.0, 200.0));
        assert!(c.pointer_down(PointerButton::Primary, Point::new(400.0, 200.0), true));
        c.pointer_move(Point::new(-50.0, 450.0));
        assert!(c.is_panning());
        c.pointer_move(Point::new(380.0, 190.0));
        assert!(c.is_panning());
        c.pointer_up();
        assert!(!c.is_panning());
    }

    #[test]
    fn test_dev_click_places_picked_poi_regardless_of_zoom() {
        let mut c = controller(true);
        // Zoom in around an arbitrary point, then click where content (200, 100) now renders.
        for _ in 0..10 {
            c.wheel(-1.0, Point::new(530.0, 310.0));
        }
        let t = c.transform();
        assert!((t.scale - 3.0).abs() < 1e-9);
        let cursor = Point::new(t.translate_x + 200.0 * t.scale, t.translate_y + 100.0 * t.scale);

        c.navigator_mut().pick_for_placement("rovine").unwrap();
        match c.click(cursor, ClickTarget::Background) {
            ClickOutcome::Background(DevAction::Placed(record)) => {
                assert_eq!(record.id, "rovine");
                assert!((record.x.unwrap() - 25.0).abs() < 1e-9);
                assert!((record.y.unwrap() - 25.0).abs() < 1e-9);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_dev_click_without_pick_emits_template() {
        let mut c = controller(true);
        match c.click(Point::new(400.0, 200.0), ClickTarget::Background) {
            ClickOutcome::Background(DevAction::Template(line)) => {
                assert!(line.contains(r#""x": 50.00, "y": 50.00"#), "{line}");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(c.navigator().unplaced_pois().len(), 1);
    }

    #[test]
    fn test_switch_container_refits_and_resets() {
        let mut c = controller(false);
        c.wheel(-1.0, Point::new(100.0, 100.0));
        assert!(c.viewport().is_zoomed());
        c.switch_container(ContainerKind::Fullscreen, Size::new(1920.0, 1080.0)).unwrap();
        assert_eq!(c.container_kind(), ContainerKind::Fullscreen);
        assert_eq!(c.transform().scale, 1.0);
        let b = c.viewport().image_box().unwrap();
        assert!((b.width - 1920.0).abs() < 1e-9);
        assert!((b.height - 960.0).abs() < 1e-9);
        assert!((b.top - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_enter_and_back_round_trip() {
        let mut c = controller(false);
        let root = c.navigator().active().cloned().unwrap();
        c.click(Point::new(0.0, 0.0), ClickTarget::Marker("castello".into()));
        let t = c.enter_selected().unwrap();
        c.complete_load(t, Ok(MapDescriptor::default())).unwrap();
        assert_eq!(c.image_path(), Some("img/castello.webp"));
        assert_eq!(c.previous_map(), Some(&root));
        assert!(c.markers().is_empty());

        let t = c.go_back().unwrap();
        c.complete_load(t, Ok(MapDescriptor::default())).unwrap();
        assert_eq!(c.navigator().active(), Some(&root));
        assert!(!c.can_go_back());
    }

    #[test]
    fn test_entering_sub_map_resets_view_without_image_event() {
        let mut c = controller(false);
        for _ in 0..5 {
            c.wheel(-1.0, Point::new(0.0, 0.0));
        }
        assert!(c.viewport().is_zoomed());

        // Same image as the parent: the host never sees a new load event.
        let image = c.image_path().unwrap().to_string();
        let sub = SubMap {
            data: "maps/cripta.json".into(),
            image,
        };
        let t = c.navigator_mut().enter_sub_map(&sub).unwrap();
        c.complete_load(t, Ok(MapDescriptor::default())).unwrap();

        assert_eq!(c.transform().scale, 1.0);
        assert_eq!(c.viewport().pan(), Point::ZERO);
    }

    #[test]
    fn test_failed_load_keeps_view() {
        let mut c = controller(false);
        c.wheel(-1.0, Point::new(400.0, 200.0));
        let before = c.transform();
        c.click(Point::new(0.0, 0.0), ClickTarget::Marker("castello".into()));
        let t = c.enter_selected().unwrap();
        let err = MapError::Fetch {
            path: "maps/castello.json".into(),
            reason: "HTTP 404".into(),
        };
        assert!(c.complete_load(t, Err(err)).is_err());
        assert_eq!(c.transform(), before);
    }

    #[test]
    fn test_image_failure_keeps_last_box() {
        let mut c = controller(false);
        let before = c.viewport().image_box();
        c.click(Point::new(0.0, 0.0), ClickTarget::Marker("castello".into()));
        let t = c.enter_selected().unwrap();
        c.complete_load(t, Ok(MapDescriptor::default())).unwrap();

        let err = c.image_load_failed("img/castello.webp");
        assert!(matches!(err, MapError::ImageLoad { .. }));
        assert!(c.image_failed());
        assert_eq!(c.viewport().image_box(), before);
        assert!(c.transform().scale.is_finite());
    }

    #[test]
    fn test_stale_image_events_are_ignored() {
        let mut c = controller(false);
        let before = c.viewport().image_box();
        c.image_loaded("img/elsewhere.webp", Size::new(10.0, 1000.0)).unwrap();
        assert_eq!(c.viewport().image_box(), before);
        c.image_load_failed("img/elsewhere.webp");
        assert!(!c.image_failed());
    }

    #[test]
    fn test_zero_sized_image_is_rejected() {
        let mut c = controller(false);
        let image = c.image_path().unwrap().to_string();
        assert!(c.image_loaded(&image, Size::new(0.0, 0.0)).is_err());
        assert!(c.viewport().image_box().is_some());
    }
}
