//! Scene document and mesh I/O for repivot
//!
//! This crate reads and writes whole scenes. JSON is the native document
//! format and round-trips everything except undo history; Wavefront OBJ
//! is supported for exchanging mesh geometry with other tools.

pub mod json;
pub mod obj;

use repivot_core::{Error, Result, Scene};

/// Trait for reading scenes from files
pub trait SceneReader {
    fn read_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene>;
}

/// Trait for writing scenes to files
pub trait SceneWriter {
    fn write_scene<P: AsRef<std::path::Path>>(scene: &Scene, path: P) -> Result<()>;
}

/// Auto-detect format and read a scene
pub fn read_scene<P: AsRef<std::path::Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => json::JsonReader::read_scene(path),
        Some("obj") => obj::ObjReader::read_scene(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported scene format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and write a scene
pub fn write_scene<P: AsRef<std::path::Path>>(scene: &Scene, path: P) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => json::JsonWriter::write_scene(scene, path),
        Some("obj") => obj::ObjWriter::write_scene(scene, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported scene format: {:?}",
            path.extension()
        ))),
    }
}
