//! Per-cell vertex generation and texture orientation.
//!
//! A quad is 4 vertices of 5 floats each: `x, y, color, u, v`, wound
//! bottom-left, top-left, top-right, bottom-right.

use macroquad::color::Color;

use crate::map::{Rotation, TextureRegion};

/// Floats per vertex.
pub const VERTEX_SIZE: usize = 5;
/// Floats per quad.
pub const QUAD_LEN: usize = 4 * VERTEX_SIZE;

/// Offsets into a quad's vertex array: `X1` is vertex 1's x, `C1` its packed
/// color, and so on.
pub mod idx {
    /// Vertex 1 x.
    pub const X1: usize = 0;
    /// Vertex 1 y.
    pub const Y1: usize = 1;
    /// Vertex 1 packed color.
    pub const C1: usize = 2;
    /// Vertex 1 u.
    pub const U1: usize = 3;
    /// Vertex 1 v.
    pub const V1: usize = 4;
    /// Vertex 2 x.
    pub const X2: usize = 5;
    /// Vertex 2 y.
    pub const Y2: usize = 6;
    /// Vertex 2 packed color.
    pub const C2: usize = 7;
    /// Vertex 2 u.
    pub const U2: usize = 8;
    /// Vertex 2 v.
    pub const V2: usize = 9;
    /// Vertex 3 x.
    pub const X3: usize = 10;
    /// Vertex 3 y.
    pub const Y3: usize = 11;
    /// Vertex 3 packed color.
    pub const C3: usize = 12;
    /// Vertex 3 u.
    pub const U3: usize = 13;
    /// Vertex 3 v.
    pub const V3: usize = 14;
    /// Vertex 4 x.
    pub const X4: usize = 15;
    /// Vertex 4 y.
    pub const Y4: usize = 16;
    /// Vertex 4 packed color.
    pub const C4: usize = 17;
    /// Vertex 4 u.
    pub const U4: usize = 18;
    /// Vertex 4 v.
    pub const V4: usize = 19;
}

use idx::*;

const US: [usize; 4] = [U1, U2, U3, U4];
const VS: [usize; 4] = [V1, V2, V3, V4];

/// Packs an RGBA color into one float (ABGR byte order, bit 24 cleared so
/// the result is never a NaN).
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> f32 {
    let bits = ((255.0 * a) as u32) << 24
        | ((255.0 * b) as u32) << 16
        | ((255.0 * g) as u32) << 8
        | ((255.0 * r) as u32);
    f32::from_bits(bits & 0xfeff_ffff)
}

/// Inverse of [`pack_color`]; alpha loses its lowest bit.
pub fn unpack_color(packed: f32) -> Color {
    let bits = packed.to_bits();
    Color::from_rgba(
        (bits & 0xff) as u8,
        ((bits >> 8) & 0xff) as u8,
        ((bits >> 16) & 0xff) as u8,
        ((bits >> 24) & 0xff) as u8,
    )
}

/// Reusable vertex scratch for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    vertices: [f32; QUAD_LEN],
}

impl Default for Quad {
    fn default() -> Self {
        Quad {
            vertices: [0.0; QUAD_LEN],
        }
    }
}

impl Quad {
    /// Overwrites every vertex for a quad spanning `(x1, y1)`..`(x2, y2)`.
    ///
    /// `v` and `v2` are swapped on the way in: the bottom vertices sample the
    /// region's bottom edge (`region.v2`) and the top vertices its top edge.
    pub fn set(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: f32, region: &TextureRegion) {
        let u1 = region.u;
        let v1 = region.v2;
        let u2 = region.u2;
        let v2 = region.v;

        self.vertices = [
            x1, y1, color, u1, v1, //
            x1, y2, color, u1, v2, //
            x2, y2, color, u2, v2, //
            x2, y1, color, u2, v1, //
        ];
    }

    /// Swaps the U of opposite corners. V is left alone.
    #[inline]
    pub fn flip_x(&mut self) {
        self.vertices.swap(U1, U3);
        self.vertices.swap(U2, U4);
    }

    /// Swaps the V of opposite corners. U is left alone.
    #[inline]
    pub fn flip_y(&mut self) {
        self.vertices.swap(V1, V3);
        self.vertices.swap(V2, V4);
    }

    /// Rotates the texture coordinates by whole quarter turns.
    pub fn rotate(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::R0 => {}
            Rotation::R90 => {
                self.shift_forward(VS);
                self.shift_forward(US);
            }
            Rotation::R180 => {
                self.vertices.swap(U1, U3);
                self.vertices.swap(U2, U4);
                self.vertices.swap(V1, V3);
                self.vertices.swap(V2, V4);
            }
            Rotation::R270 => {
                self.shift_backward(VS);
                self.shift_backward(US);
            }
        }
    }

    /// Flip X, then flip Y, then rotate.
    pub fn orient(&mut self, flip_x: bool, flip_y: bool, rotation: Rotation) {
        if flip_x {
            self.flip_x();
        }
        if flip_y {
            self.flip_y();
        }
        if rotation != Rotation::R0 {
            self.rotate(rotation);
        }
    }

    // a[0] <- a[1] <- a[2] <- a[3] <- a[0]
    fn shift_forward(&mut self, a: [usize; 4]) {
        let tmp = self.vertices[a[0]];
        self.vertices[a[0]] = self.vertices[a[1]];
        self.vertices[a[1]] = self.vertices[a[2]];
        self.vertices[a[2]] = self.vertices[a[3]];
        self.vertices[a[3]] = tmp;
    }

    // a[0] <- a[3] <- a[2] <- a[1] <- a[0]
    fn shift_backward(&mut self, a: [usize; 4]) {
        let tmp = self.vertices[a[0]];
        self.vertices[a[0]] = self.vertices[a[3]];
        self.vertices[a[3]] = self.vertices[a[2]];
        self.vertices[a[2]] = self.vertices[a[1]];
        self.vertices[a[1]] = tmp;
    }

    #[inline]
    /// Raw vertex data, in the layout sinks receive.
    pub fn vertices(&self) -> &[f32; QUAD_LEN] {
        &self.vertices
    }

    /// `(x, y)` of each vertex in winding order.
    pub fn positions(&self) -> [(f32, f32); 4] {
        [
            (self.vertices[X1], self.vertices[Y1]),
            (self.vertices[X2], self.vertices[Y2]),
            (self.vertices[X3], self.vertices[Y3]),
            (self.vertices[X4], self.vertices[Y4]),
        ]
    }

    /// `(u, v)` of each vertex in winding order.
    pub fn uvs(&self) -> [(f32, f32); 4] {
        [
            (self.vertices[U1], self.vertices[V1]),
            (self.vertices[U2], self.vertices[V2]),
            (self.vertices[U3], self.vertices[V3]),
            (self.vertices[U4], self.vertices[V4]),
        ]
    }

    /// Packed color of the first vertex (all four are equal).
    pub fn color(&self) -> f32 {
        self.vertices[C1]
    }
}

impl From<[f32; QUAD_LEN]> for Quad {
    fn from(vertices: [f32; QUAD_LEN]) -> Self {
        Quad { vertices }
    }
}
