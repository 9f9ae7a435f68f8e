use crate::scene::{MeshData, Vertex};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read OBJ at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("OBJ at {path} contains no meshes")]
    Empty { path: String },
}

/// One decoded diffuse texture referenced by the model's materials.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// A fully imported model: converted meshes, decoded textures, combined
/// bounding center/extent.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    pub meshes: Vec<MeshData>,
    pub textures: Vec<TextureData>,
    pub center: [f32; 3],
    pub extent: [f32; 3],
}

/// Import an OBJ file. Mesh parsing failures are fatal; texture decode
/// failures are logged and skipped, since the viewer renders untextured
/// meshes just fine.
pub fn load_obj(path: &Path) -> Result<LoadedModel, AssetError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let meshes = convert_models(models);
    if meshes.is_empty() {
        return Err(AssetError::Empty {
            path: path.display().to_string(),
        });
    }

    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let textures = match materials {
        Ok(materials) => decode_diffuse_textures(&materials, &directory),
        Err(err) => {
            log::warn!("MTL load failed for {}: {}", path.display(), err);
            Vec::new()
        }
    };

    let (center, extent) = combined_bounds(&meshes);
    let name = path
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or("model")
        .to_string();
    Ok(LoadedModel {
        name,
        meshes,
        textures,
        center,
        extent,
    })
}

fn convert_models(models: Vec<tobj::Model>) -> Vec<MeshData> {
    models
        .into_iter()
        .filter(|model| !model.mesh.positions.is_empty())
        .map(|model| {
            let mesh = model.mesh;
            let vertex_count = mesh.positions.len() / 3;
            let has_normals = mesh.normals.len() == mesh.positions.len();
            let has_texcoords = mesh.texcoords.len() == vertex_count * 2;
            let mut vertices = Vec::with_capacity(vertex_count);
            for i in 0..vertex_count {
                vertices.push(Vertex {
                    position: [
                        mesh.positions[i * 3],
                        mesh.positions[i * 3 + 1],
                        mesh.positions[i * 3 + 2],
                    ],
                    normal: if has_normals {
                        [
                            mesh.normals[i * 3],
                            mesh.normals[i * 3 + 1],
                            mesh.normals[i * 3 + 2],
                        ]
                    } else {
                        [0.0, 0.0, 0.0]
                    },
                    tex_coords: if has_texcoords {
                        [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                    } else {
                        [0.0, 0.0]
                    },
                });
            }
            let mut data = MeshData {
                name: model.name,
                vertices,
                indices: mesh.indices,
            };
            if !has_normals {
                compute_smooth_normals(&mut data);
            }
            data
        })
        .collect()
}

/// Area-weighted vertex normals for meshes that ship without them.
fn compute_smooth_normals(mesh: &mut MeshData) {
    let mut accumulated = vec![glam::Vec3::ZERO; mesh.vertices.len()];
    for triangle in mesh.indices.chunks_exact(3) {
        let a = glam::Vec3::from_array(mesh.vertices[triangle[0] as usize].position);
        let b = glam::Vec3::from_array(mesh.vertices[triangle[1] as usize].position);
        let c = glam::Vec3::from_array(mesh.vertices[triangle[2] as usize].position);
        let face_normal = (b - a).cross(c - a);
        for index in triangle {
            accumulated[*index as usize] += face_normal;
        }
    }
    for (vertex, normal) in mesh.vertices.iter_mut().zip(accumulated) {
        if normal.length_squared() > 1e-12 {
            vertex.normal = normal.normalize().to_array();
        }
    }
}

fn decode_diffuse_textures(materials: &[tobj::Material], directory: &Path) -> Vec<TextureData> {
    let mut textures = Vec::new();
    for material in materials {
        let Some(texture_name) = material.diffuse_texture.as_deref() else {
            continue;
        };
        let texture_path: PathBuf = directory.join(texture_name);
        match image::open(&texture_path) {
            Ok(decoded) => {
                let rgba = decoded.to_rgba8();
                textures.push(TextureData {
                    name: texture_name.to_string(),
                    width: rgba.width(),
                    height: rgba.height(),
                    rgba: rgba.into_raw(),
                });
            }
            Err(err) => {
                log::warn!(
                    "Skipping texture {} ({}): {}",
                    texture_name,
                    texture_path.display(),
                    err
                );
            }
        }
    }
    textures
}

fn combined_bounds(meshes: &[MeshData]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    let mut any = false;
    for mesh in meshes {
        for vertex in &mesh.vertices {
            any = true;
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex.position[axis]);
                max[axis] = max[axis].max(vertex.position[axis]);
            }
        }
    }
    if !any {
        return ([0.0; 3], [0.0; 3]);
    }
    (
        [
            (min[0] + max[0]) * 0.5,
            (min[1] + max[1]) * 0.5,
            (min[2] + max[2]) * 0.5,
        ],
        [
            (max[0] - min[0]) * 0.5,
            (max[1] - min[1]) * 0.5,
            (max[2] - min[2]) * 0.5,
        ],
    )
}
