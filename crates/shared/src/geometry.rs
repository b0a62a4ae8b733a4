use serde::{Deserialize, Serialize};

use crate::clamp;
use crate::config::ViewportConfig;
use crate::error::MapError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// Reject sizes that would poison the viewport with zero, negative or NaN values.
    pub fn validated(self, what: &str) -> Result<Self, MapError> {
        if self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0 {
            Ok(self)
        } else {
            Err(MapError::InvalidGeometry(format!(
                "{what} size {}x{} must be positive and finite",
                self.width, self.height
            )))
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Contain-fit placement of the image inside its container, in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBox {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// CSS transform applied to the content layer (`transform-origin: 0 0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Transform {
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Fit `intrinsic` inside `container` preserving aspect ratio, centered.
///
/// A relatively wider container lets the height fill; otherwise the width fills.
pub fn fit_image(container: Size, intrinsic: Size) -> Result<ImageBox, MapError> {
    let container = container.validated("container")?;
    let intrinsic = intrinsic.validated("image")?;

    let image_ratio = intrinsic.aspect();
    let (width, height) = if container.aspect() > image_ratio {
        (container.height * image_ratio, container.height)
    } else {
        (container.width, container.width / image_ratio)
    };

    Ok(ImageBox {
        width,
        height,
        left: (container.width - width) / 2.0,
        top: (container.height - height) / 2.0,
    })
}

/// Zoom/pan state for the one live container.
///
/// Pan resets to `(0, 0)`: the image box offsets are applied as the content
/// layer's position, so the transform only carries the user's pan and zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    config: ViewportConfig,
    container: Option<Size>,
    intrinsic: Option<Size>,
    image_box: Option<ImageBox>,
    scale: f64,
    pan: Point,
}

impl ViewportState {
    pub fn new(config: ViewportConfig) -> Self {
        ViewportState {
            config,
            container: None,
            intrinsic: None,
            image_box: None,
            scale: config.min_scale,
            pan: Point::ZERO,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn container(&self) -> Option<Size> {
        self.container
    }

    pub fn intrinsic(&self) -> Option<Size> {
        self.intrinsic
    }

    pub fn image_box(&self) -> Option<ImageBox> {
        self.image_box
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > self.config.min_scale
    }

    /// New container dimensions (resize or container switch). Re-fits and resets.
    pub fn set_container(&mut self, container: Size) -> Result<(), MapError> {
        self.container = Some(container.validated("container")?);
        self.refit()
    }

    /// The image finished loading with these intrinsic dimensions. Re-fits and resets.
    pub fn set_intrinsic(&mut self, intrinsic: Size) -> Result<(), MapError> {
        self.intrinsic = Some(intrinsic.validated("image")?);
        self.refit()
    }

    fn refit(&mut self) -> Result<(), MapError> {
        if let (Some(container), Some(intrinsic)) = (self.container, self.intrinsic) {
            self.image_box = Some(fit_image(container, intrinsic)?);
        }
        self.reset_view();
        Ok(())
    }

    pub fn reset_view(&mut self) {
        self.scale = self.config.min_scale;
        self.pan = Point::ZERO;
    }

    pub fn current_transform(&self) -> Transform {
        Transform {
            translate_x: self.pan.x,
            translate_y: self.pan.y,
            scale: self.scale,
        }
    }

    /// Apply a proposed scale and pan, clamped. Non-finite proposals are ignored.
    pub fn apply(&mut self, scale: f64, pan: Point) {
        if !scale.is_finite() || !pan.is_finite() {
            return;
        }
        self.scale = clamp::clamp_scale(scale, &self.config);
        self.pan = self.clamped_pan(pan, self.scale);
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.apply(self.scale, pan);
    }

    fn clamped_pan(&self, pan: Point, scale: f64) -> Point {
        match (self.image_box, self.container) {
            (Some(image_box), Some(container)) => clamp::clamp_pan(pan, scale, &image_box, container),
            _ => Point::ZERO,
        }
    }

    /// Cursor position relative to the rendered (transformed) top-left of the content layer.
    pub fn cursor_offset_in_content(&self, cursor: Point) -> Option<Point> {
        let image_box = self.image_box?;
        Some(Point::new(
            cursor.x - image_box.left - self.pan.x,
            cursor.y - image_box.top - self.pan.y,
        ))
    }

    /// Undo the transform: container-relative point to un-transformed content pixels.
    pub fn container_to_content(&self, cursor: Point) -> Option<Point> {
        let offset = self.cursor_offset_in_content(cursor)?;
        Some(Point::new(offset.x / self.scale, offset.y / self.scale))
    }

    /// Percent position of a container-relative point on the image, clamped to `[0, 100]`.
    ///
    /// Independent of the current pan and zoom.
    pub fn content_percent(&self, cursor: Point) -> Option<Point> {
        let image_box = self.image_box?;
        let content = self.container_to_content(cursor)?;
        Some(Point::new(
            (content.x / image_box.width * 100.0).clamp(0.0, 100.0),
            (content.y / image_box.height * 100.0).clamp(0.0, 100.0),
        ))
    }

    /// Whether `cursor` lands on the scaled image rather than the letterbox around it.
    pub fn is_over_content(&self, cursor: Point) -> bool {
        match (self.image_box, self.container_to_content(cursor)) {
            (Some(b), Some(c)) => (0.0..=b.width).contains(&c.x) && (0.0..=b.height).contains(&c.y),
            _ => false,
        }
    }
}
