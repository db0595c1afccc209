//! The object store: one window, the pipeline settings and every object.

use slotmap::{new_key_type, SlotMap};
use viewclip_clip::Face;
use viewclip_curve::CubicBasis;
use viewclip_math::{HomogeneousPoint, Point3, Transform};

use crate::{Color, GeometricObject, ObjectKind, PipelineSettings, Result, SceneError, Window};

new_key_type! {
    /// Key for an object in a [`Scene`].
    pub struct ObjectId;
}

/// Owns the window and all objects, and keeps every cached clip current.
///
/// Each mutation recomputes the caches it affects before returning, so a read
/// never sees a clip result computed against an older window.
#[derive(Debug, Clone)]
pub struct Scene {
    window: Window,
    settings: PipelineSettings,
    objects: SlotMap<ObjectId, GeometricObject>,
    order: Vec<ObjectId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Window::default())
    }
}

impl Scene {
    /// An empty scene with default settings, keeping the window's eye distance.
    pub fn new(window: Window) -> Self {
        let settings = PipelineSettings {
            cop_distance: window.cop_distance(),
            ..PipelineSettings::default()
        };
        Self {
            window,
            settings,
            objects: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// An empty scene with the given settings.
    pub fn with_settings(mut window: Window, settings: PipelineSettings) -> Result<Self> {
        settings.validate()?;
        window.set_cop_distance(settings.cop_distance)?;
        Ok(Self {
            window,
            settings,
            objects: SlotMap::with_key(),
            order: Vec::new(),
        })
    }

    /// The window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The pipeline settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Replace the settings and recompute every object.
    pub fn set_settings(&mut self, settings: PipelineSettings) -> Result<()> {
        settings.validate()?;
        self.window.set_cop_distance(settings.cop_distance)?;
        self.settings = settings;
        self.recompute_all()
    }

    // -- window --------------------------------------------------------------

    /// Move the window along the world axes.
    pub fn translate_window(&mut self, dx: f64, dy: f64, dz: f64) -> Result<()> {
        self.window.translate(dx, dy, dz);
        self.recompute_all()
    }

    /// Move the window within its own plane.
    pub fn pan_window(&mut self, dx: f64, dy: f64) -> Result<()> {
        self.window.pan(dx, dy);
        self.recompute_all()
    }

    /// Zoom the window.
    pub fn scale_window(&mut self, factor: f64) -> Result<()> {
        self.window.scale(factor)?;
        self.recompute_all()
    }

    /// Rotate the window about its center.
    pub fn rotate_window(&mut self, x_angle: f64, y_angle: f64, z_angle: f64) -> Result<()> {
        self.window.rotate(x_angle, y_angle, z_angle);
        self.recompute_all()
    }

    /// Rotate the window about a point.
    pub fn rotate_window_about(
        &mut self,
        x_angle: f64,
        y_angle: f64,
        z_angle: f64,
        point: &Point3,
    ) -> Result<()> {
        self.window.rotate_about(x_angle, y_angle, z_angle, point);
        self.recompute_all()
    }

    // -- objects -------------------------------------------------------------

    /// Add a prebuilt object, computing its cache.
    pub fn add(&mut self, mut object: GeometricObject) -> Result<ObjectId> {
        if self.find(object.name()).is_some() {
            return Err(SceneError::DuplicateName(object.name().to_string()));
        }
        object.recompute(&self.window, &self.settings)?;
        log::debug!("added {} {:?}", object.kind().label(), object.name());
        let id = self.objects.insert(object);
        self.order.push(id);
        Ok(id)
    }

    /// Add a point.
    pub fn add_point(&mut self, name: impl Into<String>, point: Point3) -> Result<ObjectId> {
        self.add_kind(name, ObjectKind::Point, &[point])
    }

    /// Add a line segment.
    pub fn add_line(
        &mut self,
        name: impl Into<String>,
        from: Point3,
        to: Point3,
    ) -> Result<ObjectId> {
        self.add_kind(name, ObjectKind::Line, &[from, to])
    }

    /// Add a wireframe of closed faces over shared vertices.
    pub fn add_wireframe(
        &mut self,
        name: impl Into<String>,
        points: &[Point3],
        faces: Vec<Face>,
    ) -> Result<ObjectId> {
        self.add_kind(name, ObjectKind::Wireframe { faces }, points)
    }

    /// Add a composite cubic curve.
    pub fn add_curve(
        &mut self,
        name: impl Into<String>,
        basis: CubicBasis,
        points: &[Point3],
    ) -> Result<ObjectId> {
        self.add_kind(name, ObjectKind::Curve { basis }, points)
    }

    /// Add a bicubic surface over a row-major 4x4 grid.
    pub fn add_surface(
        &mut self,
        name: impl Into<String>,
        basis_u: CubicBasis,
        basis_v: CubicBasis,
        grid: &[Point3],
    ) -> Result<ObjectId> {
        self.add_kind(name, ObjectKind::Surface { basis_u, basis_v }, grid)
    }

    fn add_kind(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
        points: &[Point3],
    ) -> Result<ObjectId> {
        let points = points.iter().map(|&p| HomogeneousPoint::from(p)).collect();
        self.add(GeometricObject::new(name, kind, points, Color::BLACK)?)
    }

    /// Remove an object.
    pub fn remove(&mut self, id: ObjectId) -> Result<GeometricObject> {
        let object = self.objects.remove(id).ok_or(SceneError::UnknownObject(id))?;
        self.order.retain(|&other| other != id);
        log::debug!("removed {:?}", object.name());
        Ok(object)
    }

    /// Look up an object.
    pub fn get(&self, id: ObjectId) -> Option<&GeometricObject> {
        self.objects.get(id)
    }

    /// Look up an object by name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.order.iter().copied().find(|&id| self.objects[id].name() == name)
    }

    /// All objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &GeometricObject)> + '_ {
        self.order.iter().map(move |&id| (id, &self.objects[id]))
    }

    /// Objects with a visible clip result, in insertion order.
    pub fn display_file(&self) -> impl Iterator<Item = (ObjectId, &GeometricObject)> + '_ {
        self.iter().filter(|(_, object)| object.is_visible())
    }

    /// A default name for an anonymous object, not used by any object.
    pub fn next_available_name(&self) -> String {
        (self.len()..)
            .map(|n| format!("object{n}"))
            .find(|name| self.find(name).is_none())
            .unwrap_or_default()
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Move an object along the world axes.
    pub fn translate_object(&mut self, id: ObjectId, dx: f64, dy: f64, dz: f64) -> Result<()> {
        self.transform_object(id, |_| Ok(Transform::translation(dx, dy, dz)))
    }

    /// Scale an object about its center.
    pub fn scale_object(&mut self, id: ObjectId, sx: f64, sy: f64, sz: f64) -> Result<()> {
        if let Some(&bad) = [sx, sy, sz].iter().find(|s| !(s.is_finite() && **s != 0.0)) {
            return Err(SceneError::InvalidScale(bad));
        }
        self.transform_object(id, |object| {
            Ok(Transform::scale(sx, sy, sz).around_point(&object.center()))
        })
    }

    /// Rotate an object about its center.
    pub fn rotate_object(
        &mut self,
        id: ObjectId,
        x_angle: f64,
        y_angle: f64,
        z_angle: f64,
    ) -> Result<()> {
        self.transform_object(id, |object| {
            Ok(Transform::rotation(x_angle, y_angle, z_angle).around_point(&object.center()))
        })
    }

    /// Rotate an object about a point.
    pub fn rotate_object_about(
        &mut self,
        id: ObjectId,
        x_angle: f64,
        y_angle: f64,
        z_angle: f64,
        point: &Point3,
    ) -> Result<()> {
        self.transform_object(id, |_| {
            Ok(Transform::rotation(x_angle, y_angle, z_angle).around_point(point))
        })
    }

    /// Change an object's color.
    pub fn set_color(&mut self, id: ObjectId, color: Color) -> Result<()> {
        self.object_mut(id)?.set_color(color);
        Ok(())
    }

    fn transform_object(
        &mut self,
        id: ObjectId,
        transform: impl FnOnce(&GeometricObject) -> Result<Transform>,
    ) -> Result<()> {
        let object = self.objects.get_mut(id).ok_or(SceneError::UnknownObject(id))?;
        let t = transform(object)?;
        object.transform(&t);
        object.recompute(&self.window, &self.settings)
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut GeometricObject> {
        self.objects.get_mut(id).ok_or(SceneError::UnknownObject(id))
    }

    fn recompute_all(&mut self) -> Result<()> {
        log::debug!("recomputing {} objects", self.objects.len());
        for object in self.objects.values_mut() {
            object.recompute(&self.window, &self.settings)?;
        }
        Ok(())
    }
}
