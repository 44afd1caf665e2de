//! Wavefront OBJ support
//!
//! Reading goes through the `obj` crate; polygons are fan-triangulated
//! into the shared position list. An imported file becomes a one-object
//! scene with that object selected and active, so batch operations can
//! run on it directly. Writing emits plain `o`/`v`/`vn`/`f` records from
//! each object's stored base mesh, in local coordinates.

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use obj::ObjData;
use tracing::debug;

use crate::{SceneReader, SceneWriter};
use repivot_core::{Error, Point3f, Result, Scene, SceneObject, TriangleMesh};

pub struct ObjReader;
pub struct ObjWriter;

impl ObjReader {
    /// Read a mesh, merging every object and group in the file
    ///
    /// Corner normals are not carried over; they rarely line up with the
    /// shared position list one-to-one.
    pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let bytes = std::fs::read(path)?;
        let data = ObjData::load_buf(Cursor::new(bytes.as_slice()))
            .map_err(|e| Error::Parse(format!("invalid OBJ data: {e}")))?;

        let vertices: Vec<Point3f> = data
            .position
            .iter()
            .map(|p| Point3f::new(p[0], p[1], p[2]))
            .collect();

        let mut faces = Vec::new();
        for group in data.objects.iter().flat_map(|object| object.groups.iter()) {
            for poly in &group.polys {
                let corners = &poly.0;
                if corners.len() < 3 {
                    continue;
                }
                let base = corners[0].0;
                for i in 0..corners.len() - 2 {
                    faces.push([base, corners[i + 1].0, corners[i + 2].0]);
                }
            }
        }
        for face in &faces {
            if face.iter().any(|&index| index >= vertices.len()) {
                return Err(Error::Parse(format!(
                    "face references vertex {} but the file has {}",
                    face.iter().max().copied().unwrap_or(0),
                    vertices.len()
                )));
            }
        }

        Ok(TriangleMesh::from_vertices_and_faces(vertices, faces))
    }
}

impl SceneReader for ObjReader {
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh")
            .to_owned();
        let mesh = Self::read_mesh(path)?;

        let mut scene = Scene::new();
        let id = scene.add_object(SceneObject::mesh(name, mesh));
        scene.select(id);
        scene.set_active(Some(id));
        Ok(scene)
    }
}

fn write_mesh_records<W: Write>(
    writer: &mut W,
    mesh: &TriangleMesh,
    index_offset: usize,
    normal_offset: usize,
) -> Result<()> {
    for vertex in &mesh.vertices {
        writeln!(writer, "v {} {} {}", vertex.x, vertex.y, vertex.z)?;
    }
    let with_normals = match &mesh.normals {
        Some(normals) => {
            for normal in normals {
                writeln!(writer, "vn {} {} {}", normal.x, normal.y, normal.z)?;
            }
            true
        }
        None => false,
    };
    for face in &mesh.faces {
        let [a, b, c] = face.map(|index| index + index_offset);
        if with_normals {
            let [na, nb, nc] = face.map(|index| index + normal_offset);
            writeln!(writer, "f {a}//{na} {b}//{nb} {c}//{nc}")?;
        } else {
            writeln!(writer, "f {a} {b} {c}")?;
        }
    }
    Ok(())
}

impl ObjWriter {
    /// Write a single mesh without an object record
    pub fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_mesh_records(&mut writer, mesh, 1, 1)?;
        writer.flush()?;
        Ok(())
    }
}

impl SceneWriter for ObjWriter {
    /// Write every mesh object's base geometry; non-mesh objects are skipped
    fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let mut index_offset = 1;
        // vn numbering is file-global but only normal-bearing meshes emit
        // records, so it advances independently of the vertex numbering.
        let mut normal_offset = 1;
        for (_, object) in scene.objects() {
            let mesh = match object.base_mesh() {
                Some(mesh) => mesh,
                None => {
                    debug!(object = %object.name, "skipping non-mesh object in OBJ export");
                    continue;
                }
            };
            writeln!(writer, "o {}", object.name)?;
            write_mesh_records(&mut writer, mesh, index_offset, normal_offset)?;
            index_offset += mesh.vertex_count();
            if let Some(normals) = &mesh.normals {
                normal_offset += normals.len();
            }
        }
        writer.flush()?;
        Ok(())
    }
}
