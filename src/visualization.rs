//! Renders a Gram-Schmidt run as a 3D quiver plot.
//!
//! Global axes are drawn in grays, the subtracted projections in reds and the
//! resulting basis vectors in blues, inside the wireframe of the `[-1, 1]` cube.
//! Every arrow has its own shade; [`legend`] maps shades to arrow names.

use std::path::Path;

use image::{ImageResult, Pixel, Rgba, RgbaImage};
use imageproc::drawing;
use nalgebra::{Matrix2x3, Rotation2, Vector2, Vector3};
use once_cell::sync::Lazy;
use tracing::info;

use crate::algorithms::gram_schmidt::GramSchmidt;

/// Fraction of the image edge covered by a unit vector.
const UNIT_SCALE: f64 = 0.3;
const ARROW_HEAD_LENGTH: f64 = 12.0;
const ARROW_HEAD_ANGLE: f64 = 25.0;
/// Vectors shorter than this on screen are drawn as a dot.
const MIN_ARROW_LENGTH: f64 = 1.0;
const DOT_RADIUS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotOptions {
    /// Edge length of the square image, in pixels
    pub size: u32,
    /// Viewing angles in degrees
    pub azimuth: f64,
    pub elevation: f64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            size: 800,
            azimuth: -60.0,
            elevation: 30.0,
        }
    }
}

/// Orthographic camera looking at the origin from the configured angles
struct View {
    projection: Matrix2x3<f64>,
    center: Vector2<f64>,
    scale: f64,
}

impl View {
    fn new(options: &PlotOptions) -> Self {
        let (az, el) = (options.azimuth.to_radians(), options.elevation.to_radians());

        // rows are the screen right and up directions expressed in world coordinates
        let projection = Matrix2x3::new(
            -az.sin(),
            az.cos(),
            0.0,
            -el.sin() * az.cos(),
            -el.sin() * az.sin(),
            el.cos(),
        );

        let half = options.size as f64 / 2.0;
        Self {
            projection,
            center: Vector2::new(half, half),
            scale: options.size as f64 * UNIT_SCALE,
        }
    }

    fn to_pixel(&self, point: &Vector3<f64>) -> Vector2<f64> {
        let screen = self.projection * point * self.scale;
        // image rows grow downwards
        Vector2::new(self.center.x + screen.x, self.center.y - screen.y)
    }
}

/// Name and color of every arrow, in drawing order.
pub fn legend() -> [(&'static str, Rgba<u8>); 9] {
    [
        ("X_G", *GLOBAL_X),
        ("Y_G", *GLOBAL_Y),
        ("Z_G", *GLOBAL_Z),
        ("proj_u1(v2)", *PROJ_U1_V2),
        ("proj_u1(v3)", *PROJ_U1_V3),
        ("proj_u2(v3)", *PROJ_U2_V3),
        ("e1", *E1),
        ("e2", *E2),
        ("e3", *E3),
    ]
}

fn arrows(result: &GramSchmidt) -> [Vector3<f64>; 9] {
    let [x, y, z] = result.global_axes;
    let projections = &result.projections;
    let basis = &result.basis;
    [
        x,
        y,
        z,
        projections.u1_v2,
        projections.u1_v3,
        projections.u2_v3,
        basis.e1,
        basis.e2,
        basis.e3,
    ]
}

/// Draws every vector of `result` into a new image.
pub fn render(result: &GramSchmidt, options: &PlotOptions) -> RgbaImage {
    let view = View::new(options);
    let mut image = RgbaImage::from_pixel(options.size, options.size, *WHITE);

    draw_bounding_cube(&mut image, &view);

    for (vector, (_, color)) in arrows(result).iter().zip(legend()) {
        draw_arrow(&mut image, &view, vector, color);
    }

    image
}

/// Renders `result` and writes it to `path`, with the format chosen from the extension.
pub fn save_plot<P: AsRef<Path>>(
    result: &GramSchmidt,
    path: P,
    options: &PlotOptions,
) -> ImageResult<()> {
    let path = path.as_ref();
    render(result, options).save(path)?;
    info!(?path, size = options.size, "Saved basis plot");
    Ok(())
}

fn draw_bounding_cube(image: &mut RgbaImage, view: &View) {
    let corners: Vec<Vector3<f64>> = (0..8u8)
        .map(|bits| {
            Vector3::from_fn(|axis, _| if bits & (1 << axis) != 0 { 1.0 } else { -1.0 })
        })
        .collect();

    // connect corners that differ along exactly one axis
    for i in 0..corners.len() {
        for axis in 0..3 {
            let j = i ^ (1 << axis);
            if i < j {
                draw_line(image, view.to_pixel(&corners[i]), view.to_pixel(&corners[j]), *GRAY);
            }
        }
    }
}

fn draw_arrow(image: &mut RgbaImage, view: &View, vector: &Vector3<f64>, color: Rgba<u8>) {
    let origin = view.to_pixel(&Vector3::zeros());
    let tip = view.to_pixel(vector);

    let shaft = tip - origin;
    let length = shaft.norm();
    if length < MIN_ARROW_LENGTH {
        drawing::draw_filled_circle_mut(
            image,
            (origin.x.round() as i32, origin.y.round() as i32),
            DOT_RADIUS,
            color,
        );
        return;
    }

    draw_line(image, origin, tip, color);

    let back = -shaft / length * ARROW_HEAD_LENGTH.min(length * 0.3);
    for angle in [ARROW_HEAD_ANGLE, -ARROW_HEAD_ANGLE] {
        let barb = Rotation2::new(angle.to_radians()) * back;
        draw_line(image, tip, tip + barb, color);
    }
}

fn draw_line(image: &mut RgbaImage, start: Vector2<f64>, end: Vector2<f64>, color: Rgba<u8>) {
    drawing::draw_line_segment_mut(
        image,
        (start.x as f32, start.y as f32),
        (end.x as f32, end.y as f32),
        color,
    );
}

static WHITE: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[255, 255, 255, 255]));
static GRAY: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[210, 210, 210, 255]));

static GLOBAL_X: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[0, 0, 0, 255]));
static GLOBAL_Y: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[80, 80, 80, 255]));
static GLOBAL_Z: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[150, 150, 150, 255]));

static PROJ_U1_V2: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[255, 0, 0, 255]));
static PROJ_U1_V3: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[255, 140, 0, 255]));
static PROJ_U2_V3: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[170, 0, 90, 255]));

static E1: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[0, 0, 255, 255]));
static E2: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[0, 140, 255, 255]));
static E3: Lazy<Rgba<u8>> = Lazy::new(|| *Rgba::from_slice(&[0, 190, 170, 255]));
