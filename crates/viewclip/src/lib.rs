#![warn(missing_docs)]

//! Window projection, clipping and the cached display list for viewclip.
//!
//! A [`Scene`] owns one [`Window`] and every [`GeometricObject`]. Each
//! object caches its visible part in the window's normalized square
//! `[-1, 1]²`, and the scene recomputes those caches whenever the window,
//! the settings or the object itself change.
//!
//! # Example
//!
//! ```
//! use viewclip::{Scene, Window};
//! use viewclip::viewclip_math::{Point2, Point3};
//!
//! // a 500-unit window centered on (250, 250, 0)
//! let mut scene = Scene::new(Window::default());
//! let id = scene
//!     .add_line("l", Point3::new(250.0, 250.0, 0.0), Point3::new(750.0, 250.0, 0.0))
//!     .unwrap();
//! let shape = scene.get(id).unwrap().clipped().unwrap();
//! assert_eq!(shape.points, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
//! ```

pub use viewclip_clip;
pub use viewclip_curve;
pub use viewclip_math;

pub mod error;
pub mod object;
pub mod projection;
pub mod scene;
pub mod settings;
pub mod viewport;
pub mod window;

pub use error::{Result, SceneError};
pub use object::{ClippedShape, Color, GeometricObject, ObjectKind, Path};
pub use projection::WindowProjector;
pub use scene::{ObjectId, Scene};
pub use settings::{PipelineSettings, ProjectionMode};
pub use viewport::Viewport;
pub use window::Window;
