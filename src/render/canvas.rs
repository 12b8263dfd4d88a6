use glam::{Mat4, Vec3};

use super::mesh::{self, Mesh, CONE_DETAIL, SPHERE_DETAIL};
use super::pipeline::Vertex;
use crate::scene::color::Rgb;

/// Immediate-mode 3D drawing surface the scene renders onto.
///
/// Coordinates follow the canvas convention: origin at the center, x to the
/// right, y down the screen, z toward the viewer.
pub trait Canvas {
    fn background(&mut self, color: Rgb);
    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, offset: Vec3);
    fn rotate_x(&mut self, angle: f32);
    fn rotate_y(&mut self, angle: f32);
    fn rotate_z(&mut self, angle: f32);
    /// Fill for subsequent solids; `alpha` is 0-255.
    fn ambient_material(&mut self, color: Rgb, alpha: f32);
    fn sphere(&mut self, radius: f32);
    fn cone(&mut self, radius: f32, height: f32);
    fn stroke(&mut self, color: Rgb);
    /// Open line path through `points`.
    fn polyline(&mut self, points: &[Vec3]);
}

/// Canvas that tessellates everything into world-space vertex lists for the GPU.
pub struct MeshCanvas {
    clear: Rgb,
    matrix: Mat4,
    stack: Vec<Mat4>,
    fill: [f32; 4],
    stroke: [f32; 4],
    triangles: Vec<Vertex>,
    lines: Vec<Vertex>,
    sphere: Mesh,
    cone: Mesh,
}

impl Default for MeshCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshCanvas {
    pub fn new() -> Self {
        Self {
            clear: Rgb::BLACK,
            matrix: Mat4::IDENTITY,
            stack: Vec::new(),
            fill: [1.0; 4],
            stroke: Rgb::BLACK.to_rgba(255.0),
            triangles: Vec::new(),
            lines: Vec::new(),
            sphere: mesh::unit_sphere(SPHERE_DETAIL.0, SPHERE_DETAIL.1),
            cone: mesh::unit_cone(CONE_DETAIL),
        }
    }

    /// Drop last frame's geometry and reset the drawing state.
    pub fn begin_frame(&mut self) {
        self.matrix = Mat4::IDENTITY;
        self.stack.clear();
        self.fill = [1.0; 4];
        self.stroke = Rgb::BLACK.to_rgba(255.0);
        self.triangles.clear();
        self.lines.clear();
    }

    pub fn clear_color(&self) -> Rgb {
        self.clear
    }

    /// Triangle list, in draw order.
    pub fn triangles(&self) -> &[Vertex] {
        &self.triangles
    }

    /// Line list (vertex pairs), in draw order.
    pub fn lines(&self) -> &[Vertex] {
        &self.lines
    }

    fn emit_solid(&mut self, solid: Solid, scale: Vec3) {
        let mesh = match solid {
            Solid::Sphere => &self.sphere,
            Solid::Cone => &self.cone,
        };
        let matrix = self.matrix;
        let model = matrix * Mat4::from_scale(scale);
        // Inverse scale keeps normals perpendicular under non-uniform scaling
        let normal_scale = scale.recip();
        let color = self.fill;
        self.triangles.extend(mesh.vertices.iter().map(|v| Vertex {
            position: model.transform_point3(v.position).to_array(),
            normal: matrix
                .transform_vector3(v.normal * normal_scale)
                .normalize_or_zero()
                .to_array(),
            color,
        }));
    }
}

#[derive(Clone, Copy)]
enum Solid {
    Sphere,
    Cone,
}

impl Canvas for MeshCanvas {
    fn background(&mut self, color: Rgb) {
        self.clear = color;
    }

    fn push(&mut self) {
        self.stack.push(self.matrix);
    }

    fn pop(&mut self) {
        match self.stack.pop() {
            Some(matrix) => self.matrix = matrix,
            None => log::debug!("pop() with an empty transform stack ignored"),
        }
    }

    fn translate(&mut self, offset: Vec3) {
        self.matrix *= Mat4::from_translation(offset);
    }

    fn rotate_x(&mut self, angle: f32) {
        self.matrix *= Mat4::from_rotation_x(angle);
    }

    fn rotate_y(&mut self, angle: f32) {
        self.matrix *= Mat4::from_rotation_y(angle);
    }

    fn rotate_z(&mut self, angle: f32) {
        self.matrix *= Mat4::from_rotation_z(angle);
    }

    fn ambient_material(&mut self, color: Rgb, alpha: f32) {
        self.fill = color.to_rgba(alpha);
    }

    fn sphere(&mut self, radius: f32) {
        if radius > 0.0 {
            self.emit_solid(Solid::Sphere, Vec3::splat(radius));
        }
    }

    fn cone(&mut self, radius: f32, height: f32) {
        if radius > 0.0 && height > 0.0 {
            self.emit_solid(Solid::Cone, Vec3::new(radius, height, radius));
        }
    }

    fn stroke(&mut self, color: Rgb) {
        self.stroke = color.to_rgba(255.0);
    }

    fn polyline(&mut self, points: &[Vec3]) {
        let matrix = self.matrix;
        let color = self.stroke;
        let vertex = |p: Vec3| Vertex {
            position: matrix.transform_point3(p).to_array(),
            normal: [0.0; 3],
            color,
        };
        for pair in points.windows(2) {
            self.lines.push(vertex(pair[0]));
            self.lines.push(vertex(pair[1]));
        }
    }
}
