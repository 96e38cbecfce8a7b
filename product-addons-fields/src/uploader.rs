//! Filesystem-backed [`Uploader`].

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::collaborators::{PathRewriter, StoredUpload, UploadError, Uploader};
use crate::submission::FileEntry;
use crate::upload_dir::UploadDir;

const MAX_NAME_ATTEMPTS: usize = 10_000;

/// Copies uploads from their temporary location into a directory tree.
#[derive(Debug, Clone)]
pub struct FilesystemUploader {
    base: UploadDir,
}

impl FilesystemUploader {
    pub fn new(base: UploadDir) -> Self {
        Self { base }
    }
}

impl Uploader for FilesystemUploader {
    fn store(
        &self,
        file: &FileEntry,
        rewrite: Option<PathRewriter<'_>>,
    ) -> Result<StoredUpload, UploadError> {
        let dir = match rewrite {
            Some(rewrite) => rewrite(self.base.clone()),
            None => self.base.clone(),
        };

        let name = sanitize_file_name(&file.name);
        if name.is_empty() {
            return Err(UploadError::new(format!(
                "\"{}\" is not a valid file name",
                file.name
            )));
        }

        let dir_path = Path::new(&dir.path);
        fs::create_dir_all(dir_path)
            .map_err(|e| UploadError::new(format!("could not create upload directory: {e}")))?;

        let mut source = fs::File::open(&file.path)
            .map_err(|e| UploadError::new(format!("could not read uploaded file: {e}")))?;

        // Dropping the staged file on error removes the partial copy.
        let mut staged = NamedTempFile::new_in(dir_path)
            .map_err(|e| UploadError::new(format!("could not create stored file: {e}")))?;
        io::copy(&mut source, &mut staged)
            .map_err(|e| UploadError::new(format!("could not write stored file: {e}")))?;
        let stored_name = persist_unique(staged, dir_path, &name)
            .map_err(|e| UploadError::new(format!("could not create stored file: {e}")))?;

        let stored = StoredUpload {
            file: dir_path.join(&stored_name),
            url: format!("{}/{}", dir.url.trim_end_matches('/'), stored_name),
        };
        debug!(file = %stored.file.display(), url = %stored.url, "stored upload");
        Ok(stored)
    }
}

/// Move `staged` to `name` in `dir`, or `stem-1.ext`, `stem-2.ext`, ... if
/// taken. Existing files are never replaced.
fn persist_unique(mut staged: NamedTempFile, dir: &Path, name: &str) -> io::Result<String> {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let candidate = match (attempt, ext) {
            (0, _) => name.to_string(),
            (n, Some(ext)) => format!("{stem}-{n}.{ext}"),
            (n, None) => format!("{stem}-{n}"),
        };

        match staged.persist_noclobber(dir.join(&candidate)) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => staged = e.file,
            Err(e) => return Err(e.error),
        }
    }

    Err(io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free file name for {name}"),
    ))
}

/// Reduce a client-supplied file name to a safe single path component.
fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
            cleaned.push(c);
        } else if c.is_whitespace() || c == '+' {
            cleaned.push('-');
        }
    }

    let collapsed = cleaned
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    collapsed.trim_matches(|c| c == '.' || c == '-').to_string()
}
