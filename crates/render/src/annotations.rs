//! JSON persistence of scene metadata, one file per image.
//!
//! Each `<name>.json` lists the placed objects in placement order:
//!
//! ```json
//! {"image": "scene_0000.png", "objects": [{"kind": "Plus", "index": 0, "x": 12, "y": 40, "width": 20, "height": 20}]}
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use shapegen_core::{Entry, MetadataSink, SceneError};

/// The on-disk annotation of one image.
#[derive(Debug, Serialize)]
pub struct Annotation<'a> {
    pub image: String,
    pub objects: Vec<AnnotatedObject<'a>>,
}

/// One placed object, flattened for consumers.
#[derive(Debug, Serialize)]
pub struct AnnotatedObject<'a> {
    pub kind: &'a str,
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl<'a> Annotation<'a> {
    /// Builds the annotation of the image `name`, keeping entry order.
    pub fn new(name: &str, entries: &'a [Entry]) -> Self {
        let objects = entries
            .iter()
            .map(|e| {
                let offset = e.region.offset();
                let size = e.region.size();
                AnnotatedObject {
                    kind: &e.kind,
                    index: e.index,
                    x: offset.x,
                    y: offset.y,
                    width: size.width,
                    height: size.height,
                }
            })
            .collect();
        Self {
            image: format!("{name}.png"),
            objects,
        }
    }
}

/// Writes `<dir>/<name>.json` for every finished scene.
#[derive(Debug, Clone)]
pub struct JsonMetadataWriter {
    dir: PathBuf,
}

impl JsonMetadataWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the metadata of `name` is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl MetadataSink for JsonMetadataWriter {
    fn save_metadata(&mut self, name: &str, entries: &[Entry]) -> Result<(), SceneError> {
        let path = self.path_for(name);
        let io_err = |e: &dyn std::fmt::Display| SceneError::Io(format!("{}: {e}", path.display()));
        let file = File::create(&path).map_err(|e| io_err(&e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &Annotation::new(name, entries))
            .map_err(|e| io_err(&e))?;
        writer.flush().map_err(|e| io_err(&e))?;
        tracing::debug!(path = %path.display(), objects = entries.len(), "wrote metadata");
        Ok(())
    }
}
