//! File writers

use crate::core::config::StageOptions;
use crate::core::stage::{PipelineData, Stage, StageError};
use crate::logging::Logger;
use crate::stages::reader::FileFormat;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Writes the payload of the last data item to `filename`
pub struct Writer {
    format: FileFormat,
    logger: Logger,
}

impl Writer {
    pub fn new(format: FileFormat, logger: Logger) -> Self {
        Self { format, logger }
    }
}

impl Stage for Writer {
    fn name(&self) -> &str {
        self.logger.name()
    }

    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn execute(
        &mut self,
        data: Vec<PipelineData>,
        options: &StageOptions,
    ) -> Result<Vec<PipelineData>, StageError> {
        let filename = options.require_str("filename")?;
        let force_overwrite = options.get_bool("force_overwrite", false)?;
        let path = Path::new(filename);

        let last = data.last().ok_or(StageError::NoInput)?;
        let content = self.format.render(&last.data)?;
        write_file(path, content.as_bytes(), force_overwrite)?;
        self.logger.info(format!("Wrote {} to {}", last.name, filename));

        Ok(data)
    }
}

/// Write `content` to `path`; without `force_overwrite` the file must not exist yet
fn write_file(path: &Path, content: &[u8], force_overwrite: bool) -> Result<(), StageError> {
    let result = if force_overwrite {
        fs::write(path, content)
    } else {
        // create_new checks and creates in one step
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .and_then(|mut file| file.write_all(content))
    };

    result.map_err(|source| match source.kind() {
        io::ErrorKind::AlreadyExists => StageError::Exists(path.to_path_buf()),
        _ => StageError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
