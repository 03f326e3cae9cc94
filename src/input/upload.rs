use base64::{engine::general_purpose, Engine as _};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::analysis::pixels::PixelBuffer;
use crate::error::{PetalError, Result};
use crate::input::mime;

/// Leading bytes read to identify a file that is too large to load.
const SNIFF_LEN: u64 = 8 * 1024;

/// A file offered for upload, before any validation.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    /// Type as declared by the sender (browser `file.type` or multipart header).
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileCandidate { name: name.into(), mime: mime.into(), bytes }
    }

    /// Reads a local file and assigns it a type from its content.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime = mime::sniff(&bytes).to_owned();
        Ok(FileCandidate { name: file_name(path), mime, bytes })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_owned()
}

/// An upload that passed type and size checks.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:<mime>;base64,<payload>` for inline display.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, general_purpose::STANDARD.encode(&self.bytes))
    }

    /// Decodes the upload into RGBA pixels.
    pub fn decode(&self) -> Result<PixelBuffer> {
        PixelBuffer::decode(&self.bytes)
    }
}

fn check_type(file: &FileCandidate) -> Result<()> {
    if mime::is_accepted(&file.mime) {
        return Ok(());
    }
    log::info!("rejected upload '{}': type '{}'", file.name, file.mime);
    Err(PetalError::InvalidFileType { mime: file.mime.clone() })
}

/// Checks type first, then size.
pub fn validate(file: FileCandidate, max_bytes: u64) -> Result<UploadedImage> {
    check_type(&file)?;
    let size = file.size();
    if size > max_bytes {
        log::info!("rejected upload '{}': {} bytes", file.name, size);
        return Err(PetalError::FileTooLarge { size, limit: max_bytes });
    }
    log::debug!("accepted upload '{}' ({}, {} bytes)", file.name, file.mime, size);
    Ok(UploadedImage { name: file.name, mime: file.mime, bytes: file.bytes })
}

/// [`validate`] for a local file.  A file over the limit is only sniffed
/// from its first bytes, never loaded whole.
pub fn validate_path(path: &Path, max_bytes: u64) -> Result<UploadedImage> {
    let size = std::fs::metadata(path)?.len();
    if size <= max_bytes {
        return validate(FileCandidate::from_path(path)?, max_bytes);
    }

    let mut head = Vec::new();
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
    let mime = mime::sniff(&head).to_owned();
    check_type(&FileCandidate { name: file_name(path), mime, bytes: head })?;

    log::info!("rejected '{}': {} bytes", path.display(), size);
    Err(PetalError::FileTooLarge { size, limit: max_bytes })
}
