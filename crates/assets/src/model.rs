use std::path::Path;

use glam::{Mat4, Vec3};

use crate::AssetError;

/// Bounds of one mesh node, in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshInfo {
    /// Node or mesh name, or `mesh<N>` when unnamed.
    pub name: String,
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl MeshInfo {
    /// Box extents.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Box centre.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// A decoded model reduced to what the console needs: per-mesh bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelAsset {
    /// One entry per mesh-bearing node.
    pub meshes: Vec<MeshInfo>,
}

/// Import a glTF/GLB file and collect mesh bounds with node transforms applied.
pub fn load_model(path: &Path) -> Result<ModelAsset, AssetError> {
    let (document, buffers, _images) = gltf::import(path)?;

    let mut model = ModelAsset::default();
    for scene in document.scenes() {
        for node in scene.nodes() {
            collect_node(&node, &buffers, Mat4::IDENTITY, &mut model);
        }
    }

    if model.meshes.is_empty() {
        return Err(AssetError::NoGeometry);
    }
    tracing::debug!(path = %path.display(), meshes = model.meshes.len(), "model imported");
    Ok(model)
}

fn collect_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: Mat4,
    model: &mut ModelAsset,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            for pos in positions {
                let p = transform.transform_point3(Vec3::from_array(pos));
                min = min.min(p);
                max = max.max(p);
            }
        }
        if min.cmple(max).all() {
            let name = node
                .name()
                .or_else(|| mesh.name())
                .map(str::to_owned)
                .unwrap_or_else(|| format!("mesh{}", mesh.index()));
            model.meshes.push(MeshInfo { name, min, max });
        }
    }

    for child in node.children() {
        collect_node(&child, buffers, transform, model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0, "name": "lobe", "translation": [0.0, 0.0, 2.0]}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
        "buffers": [{"byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"}],
        "bufferViews": [{"buffer": 0, "byteLength": 36}],
        "accessors": [{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
            "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]}]
    }"#;

    fn write_temp(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "organ-console-assets-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).expect("write temp asset");
        path
    }

    #[test]
    fn triangle_bounds_include_node_translation() {
        let path = write_temp("triangle.gltf", TRIANGLE_GLTF.as_bytes());
        let model = load_model(&path).expect("model loads");
        assert_eq!(model.meshes.len(), 1);
        let mesh = &model.meshes[0];
        assert_eq!(mesh.name, "lobe");
        assert_eq!(mesh.min, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(mesh.max, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(mesh.center(), Vec3::new(0.5, 0.5, 2.0));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_model(Path::new("no/such/organ.gltf")).unwrap_err();
        assert!(matches!(err, AssetError::Gltf(_)));
    }
}
