//! JSON scene documents
//!
//! The native on-disk format: a whole [`Scene`] serialized through serde,
//! objects and viewport state included. Undo history is transient and is
//! not part of the document.

use std::fs;
use std::path::Path;

use crate::{SceneReader, SceneWriter};
use repivot_core::{Error, Result, Scene};

pub struct JsonReader;
pub struct JsonWriter;

impl SceneReader for JsonReader {
    fn read_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| Error::Parse(format!("invalid scene document: {e}")))
    }
}

impl SceneWriter for JsonWriter {
    fn write_scene<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(scene)
            .map_err(|e| Error::Write(format!("cannot serialize scene: {e}")))?;
        fs::write(path, text)?;
        Ok(())
    }
}
