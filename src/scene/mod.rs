pub mod serialization;

/// Shading style applied by the render collaborator. Matches the four
/// shader programs of the viewer (keys 1-4 in the app).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShadingStyle {
    Standard,
    Cel,
    Watercolor,
    Sketch,
}

impl ShadingStyle {
    pub const ALL: [ShadingStyle; 4] = [
        ShadingStyle::Standard,
        ShadingStyle::Cel,
        ShadingStyle::Watercolor,
        ShadingStyle::Sketch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShadingStyle::Standard => "Standard",
            ShadingStyle::Cel => "Cel",
            ShadingStyle::Watercolor => "Watercolor",
            ShadingStyle::Sketch => "Sketch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// CPU-side mesh data handed to the render backend.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned bounding center and half-extent of the vertex cloud.
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        if self.vertices.is_empty() {
            return ([0.0; 3], [0.0; 3]);
        }
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for vertex in &self.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex.position[axis]);
                max[axis] = max[axis].max(vertex.position[axis]);
            }
        }
        let center = [
            (min[0] + max[0]) * 0.5,
            (min[1] + max[1]) * 0.5,
            (min[2] + max[2]) * 0.5,
        ];
        let extent = [
            (max[0] - min[0]) * 0.5,
            (max[1] - min[1]) * 0.5,
            (max[2] - min[2]) * 0.5,
        ];
        (center, extent)
    }
}

/// Unit cube placeholder shown before any model is loaded: 8 shared
/// vertices, 12 triangles.
pub fn unit_cube() -> MeshData {
    let corners: [([f32; 3], [f32; 2]); 8] = [
        ([-0.5, -0.5, 0.5], [0.0, 0.0]),
        ([0.5, -0.5, 0.5], [1.0, 0.0]),
        ([0.5, 0.5, 0.5], [1.0, 1.0]),
        ([-0.5, 0.5, 0.5], [0.0, 1.0]),
        ([-0.5, -0.5, -0.5], [0.0, 0.0]),
        ([0.5, -0.5, -0.5], [1.0, 0.0]),
        ([0.5, 0.5, -0.5], [1.0, 1.0]),
        ([-0.5, 0.5, -0.5], [0.0, 1.0]),
    ];
    let vertices = corners
        .iter()
        .map(|(position, tex_coords)| Vertex {
            position: *position,
            normal: if position[2] > 0.0 {
                [0.0, 0.0, 1.0]
            } else {
                [0.0, 0.0, -1.0]
            },
            tex_coords: *tex_coords,
        })
        .collect();
    let indices = vec![
        0, 1, 2, 2, 3, 0, // front
        1, 5, 6, 6, 2, 1, // right
        5, 4, 7, 7, 6, 5, // back
        4, 0, 3, 3, 7, 4, // left
        3, 2, 6, 6, 7, 3, // top
        4, 5, 1, 1, 0, 4, // bottom
    ];
    MeshData {
        name: "cube".to_string(),
        vertices,
        indices,
    }
}

/// Flat grid placeholder on the XZ plane: `divisions` x `divisions` quads
/// spanning +/- `half_extent`, normals up.
pub fn ground_grid(half_extent: f32, divisions: u32) -> MeshData {
    let divisions = divisions.max(1);
    let side = divisions + 1;
    let mut vertices = Vec::with_capacity((side * side) as usize);
    for row in 0..side {
        for col in 0..side {
            let u = col as f32 / divisions as f32;
            let v = row as f32 / divisions as f32;
            vertices.push(Vertex {
                position: [
                    -half_extent + u * 2.0 * half_extent,
                    0.0,
                    -half_extent + v * 2.0 * half_extent,
                ],
                normal: [0.0, 1.0, 0.0],
                tex_coords: [u, v],
            });
        }
    }
    let mut indices = Vec::with_capacity((divisions * divisions * 6) as usize);
    for row in 0..divisions {
        for col in 0..divisions {
            let a = row * side + col;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    MeshData {
        name: "grid".to_string(),
        vertices,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::{ground_grid, unit_cube};

    #[test]
    fn cube_has_twelve_triangles_over_eight_vertices() {
        let cube = unit_cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.indices.iter().all(|index| (*index as usize) < 8));
        let (center, extent) = cube.bounds();
        assert_eq!(center, [0.0, 0.0, 0.0]);
        assert_eq!(extent, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn grid_tessellation_matches_its_divisions() {
        let grid = ground_grid(2.0, 4);
        assert_eq!(grid.vertices.len(), 25);
        assert_eq!(grid.indices.len(), 4 * 4 * 6);
        let (center, extent) = grid.bounds();
        assert_eq!(center, [0.0, 0.0, 0.0]);
        assert_eq!(extent, [2.0, 0.0, 2.0]);
        assert!(grid
            .vertices
            .iter()
            .all(|vertex| vertex.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn degenerate_grid_division_count_is_clamped() {
        let grid = ground_grid(1.0, 0);
        assert_eq!(grid.vertices.len(), 4);
        assert_eq!(grid.indices.len(), 6);
    }
}
