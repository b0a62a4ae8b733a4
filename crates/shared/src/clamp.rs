use crate::config::ViewportConfig;
use crate::geometry::{ImageBox, Point, Size};

/// Keep `scale` inside `[min_scale, max_scale]`. Non-finite input falls back to `min_scale`.
pub fn clamp_scale(scale: f64, config: &ViewportConfig) -> f64 {
    if !scale.is_finite() {
        return config.min_scale;
    }
    scale.min(config.max_scale).max(config.min_scale)
}

/// Nearest pan that keeps the scaled image covering the container.
pub fn clamp_pan(pan: Point, scale: f64, image_box: &ImageBox, container: Size) -> Point {
    Point::new(
        clamp_axis(pan.x, container.width, image_box.left, scale * image_box.width),
        clamp_axis(pan.y, container.height, image_box.top, scale * image_box.height),
    )
}

fn clamp_axis(pan: f64, container_len: f64, offset: f64, scaled_len: f64) -> f64 {
    // Content no wider than the container: the only stable position is centered,
    // which is exactly 0 at min scale because the offset already centers the box.
    if scaled_len <= container_len {
        return (container_len - scaled_len) / 2.0 - offset;
    }
    let min = container_len - offset - scaled_len;
    let max = -offset;
    if pan.is_nan() {
        return max;
    }
    pan.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Legal pan interval on each axis: `[container - offset - scale * size, -offset]`.
    /// When the scaled image is smaller than the container on an axis, `min > max`.
    struct PanBounds {
        min: Point,
        max: Point,
    }

    fn pan_bounds(scale: f64, image_box: &ImageBox, container: Size) -> PanBounds {
        PanBounds {
            min: Point::new(
                container.width - image_box.left - scale * image_box.width,
                container.height - image_box.top - scale * image_box.height,
            ),
            max: Point::new(-image_box.left, -image_box.top),
        }
    }

    fn cfg() -> ViewportConfig {
        ViewportConfig::default()
    }

    /// 1000x400 container showing a 2:1 image: 800x400 box, 100px letterbox each side.
    fn letterboxed() -> (ImageBox, Size) {
        (
            ImageBox {
                width: 800.0,
                height: 400.0,
                left: 100.0,
                top: 0.0,
            },
            Size::new(1000.0, 400.0),
        )
    }

    #[test]
    fn test_clamp_scale_bounds() {
        assert_eq!(clamp_scale(0.2, &cfg()), 1.0);
        assert_eq!(clamp_scale(3.4, &cfg()), 3.4);
        assert_eq!(clamp_scale(12.0, &cfg()), 8.0);
        assert_eq!(clamp_scale(f64::NAN, &cfg()), 1.0);
        assert_eq!(clamp_scale(f64::INFINITY, &cfg()), 1.0);
    }

    #[test]
    fn test_scale_stays_in_bounds_for_any_delta() {
        let mut scale = 1.0;
        for i in 0..200 {
            let delta = if i % 7 < 4 { 0.35 } else { -0.9 };
            scale = clamp_scale(scale + delta * (i as f64 / 10.0), &cfg());
            assert!((1.0..=8.0).contains(&scale));
        }
    }

    #[test]
    fn test_min_scale_collapses_to_zero_pan() {
        let (b, c) = letterboxed();
        let p = clamp_pan(Point::new(57.0, -33.0), 1.0, &b, c);
        assert_eq!(p, Point::ZERO);
    }

    #[test]
    fn test_min_scale_collapse_is_exact_for_awkward_ratios() {
        let b = ImageBox {
            width: 400.0 * 2.0 / 3.0,
            height: 400.0,
            left: (400.0 - 400.0 * 2.0 / 3.0) / 2.0,
            top: 0.0,
        };
        let p = clamp_pan(Point::new(3.0, 3.0), 1.0, &b, Size::new(400.0, 400.0));
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_zoomed_pan_clamps_to_edges() {
        let (b, c) = letterboxed();
        // At scale 2: x in [1000 - 100 - 1600, -100] = [-700, -100], y in [400 - 800, 0] = [-400, 0].
        let p = clamp_pan(Point::new(50.0, 50.0), 2.0, &b, c);
        assert!((p.x - -100.0).abs() < 1e-9);
        assert!((p.y - 0.0).abs() < 1e-9);
        let p = clamp_pan(Point::new(-5000.0, -5000.0), 2.0, &b, c);
        assert!((p.x - -700.0).abs() < 1e-9);
        assert!((p.y - -400.0).abs() < 1e-9);
        let p = clamp_pan(Point::new(-300.0, -150.0), 2.0, &b, c);
        assert!((p.x - -300.0).abs() < 1e-9);
        assert!((p.y - -150.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_smaller_than_container_stays_centered() {
        let (b, c) = letterboxed();
        // At 1.2 the box is 960 wide inside 1000: centered pan is (1000 - 960) / 2 - 100 = -80.
        let p = clamp_pan(Point::new(300.0, -10.0), 1.2, &b, c);
        assert!((p.x - -80.0).abs() < 1e-9);
        // Height overflows: y in [400 - 480, 0].
        assert!((p.y - -10.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_pan_lies_within_bounds() {
        let (b, c) = letterboxed();
        let pans = [-10_000.0, -650.0, -123.4, -1.0, 0.0, 42.0, 9_999.0];
        for step in 0..=35 {
            let scale = 1.0 + step as f64 * 0.2;
            let bounds = pan_bounds(scale, &b, c);
            for &px in &pans {
                for &py in &pans {
                    let p = clamp_pan(Point::new(px, py), scale, &b, c);
                    let (lo_x, hi_x) = (bounds.min.x.min(bounds.max.x), bounds.min.x.max(bounds.max.x));
                    let (lo_y, hi_y) = (bounds.min.y.min(bounds.max.y), bounds.min.y.max(bounds.max.y));
                    assert!(p.x >= lo_x - 1e-9 && p.x <= hi_x + 1e-9, "x {} at scale {}", p.x, scale);
                    assert!(p.y >= lo_y - 1e-9 && p.y <= hi_y + 1e-9, "y {} at scale {}", p.y, scale);
                }
            }
        }
    }

    #[test]
    fn test_nan_pan_is_deterministic() {
        let (b, c) = letterboxed();
        let p = clamp_pan(Point::new(f64::NAN, f64::NAN), 2.0, &b, c);
        assert!(p.is_finite());
    }
}
