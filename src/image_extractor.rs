//! Image extraction from .docx packages
//!
//! Enumerates the image relationships of the main document part in the
//! order the package lists them and writes each blob to the output
//! directory as `<document-stem>_image_<n>.png`.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use crate::document::io::{read_part_bytes, read_part_to_string};
use crate::document::ExtractedImage;
use crate::error::{Error, Result};

const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
const IMAGE_RELATIONSHIP_SUFFIX: &str = "/relationships/image";
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// A relationship entry from a `.rels` part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub(crate) id: String,
    pub(crate) rel_type: String,
    pub(crate) target: String,
    pub(crate) external: bool,
}

impl Relationship {
    fn is_image(&self) -> bool {
        self.rel_type.ends_with(IMAGE_RELATIONSHIP_SUFFIX)
    }
}

/// An image relationship that could not be written
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub index: usize,
    pub relationship_id: String,
    pub message: String,
}

pub struct ImageExtractor {
    output_dir: PathBuf,
    images: Vec<ExtractedImage>,
    failures: Vec<ImageFailure>,
}

impl ImageExtractor {
    /// Create an extractor writing into `output_dir`, creating it if absent
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;

        Ok(Self {
            output_dir,
            images: Vec::new(),
            failures: Vec::new(),
        })
    }

    /// Write every image relationship of the document to the output directory
    ///
    /// A failure on one image is logged and recorded; the remaining images are
    /// still extracted. Only an unreadable package or relationships part is an
    /// error.
    pub fn extract_images_from_docx(&mut self, docx_path: &Path) -> Result<()> {
        let file = File::open(docx_path)?;
        let mut archive = ZipArchive::new(file)?;

        let doc_name = docx_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let relationships = match read_part_to_string(&mut archive, DOCUMENT_RELS)? {
            Some(xml) => parse_relationships(&xml)?,
            None => Vec::new(),
        };

        let mut image_index = 0;
        for rel in relationships.iter().filter(|rel| rel.is_image()) {
            image_index += 1;
            let image_path = self
                .output_dir
                .join(format!("{doc_name}_image_{image_index}.png"));

            match self.write_image(&mut archive, rel, &image_path) {
                Ok(()) => self.images.push(ExtractedImage {
                    index: image_index,
                    relationship_id: rel.id.clone(),
                    path: image_path,
                }),
                Err(e) => {
                    log::warn!(
                        "Failed to extract image {} ({}): {}",
                        image_index,
                        rel.id,
                        e
                    );
                    self.failures.push(ImageFailure {
                        index: image_index,
                        relationship_id: rel.id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        log::debug!(
            "Extracted {} images to {} ({} failed)",
            self.images.len(),
            self.output_dir.display(),
            self.failures.len()
        );

        Ok(())
    }

    fn write_image(
        &self,
        archive: &mut ZipArchive<File>,
        rel: &Relationship,
        image_path: &Path,
    ) -> Result<()> {
        if rel.external {
            return Err(Error::InvalidDocx(format!(
                "image {} is linked externally ({})",
                rel.id, rel.target
            )));
        }

        let part_name = resolve_part_name("word", &rel.target);
        let bytes = read_part_bytes(archive, &part_name)?;
        write_png(&bytes, image_path)
    }

    /// Images written so far, in relationship order
    pub fn images(&self) -> &[ExtractedImage] {
        &self.images
    }

    /// Image relationships that were skipped, in relationship order
    pub fn failures(&self) -> &[ImageFailure] {
        &self.failures
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Store image bytes as PNG, transcoding when the blob is another raster format
fn write_png(bytes: &[u8], image_path: &Path) -> Result<()> {
    if bytes.starts_with(PNG_SIGNATURE) {
        fs::write(image_path, bytes)?;
        return Ok(());
    }

    match image::load_from_memory(bytes) {
        Ok(img) => img
            .save_with_format(image_path, image::ImageFormat::Png)
            .map_err(|e| Error::Io(std::io::Error::other(e))),
        Err(e) => {
            // Vector formats (EMF/WMF) are kept byte-for-byte
            log::debug!(
                "Keeping undecodable image as-is at {}: {}",
                image_path.display(),
                e
            );
            fs::write(image_path, bytes)?;
            Ok(())
        }
    }
}

/// Parse the `Relationship` entries of a `.rels` part in document order
pub(crate) fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut relationships = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e) | Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel = Relationship::default();
                for attr in e.attributes().flatten() {
                    let value = attr
                        .unescape_value()
                        .map_err(|e| Error::Xml(e.to_string()))?
                        .into_owned();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        b"TargetMode" => rel.external = value.eq_ignore_ascii_case("External"),
                        _ => {}
                    }
                }
                relationships.push(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// Resolve a relationship target against the directory of its source part
pub(crate) fn resolve_part_name(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
