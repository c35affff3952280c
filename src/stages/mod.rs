//! Built-in stages
//!
//! Everything here lives in the `common` group:
//!
//! | Stage            | Options                          |
//! |------------------|----------------------------------|
//! | `YAMLReader`     | `filename`, `schema`             |
//! | `JSONReader`     | `filename`, `schema`             |
//! | `PrintProcessor` |                                  |
//! | `YAMLWriter`     | `filename`, `force_overwrite`    |
//! | `JSONWriter`     | `filename`, `force_overwrite`    |

pub mod processor;
pub mod reader;
pub mod writer;

use crate::core::registry::StageRegistry;

pub use processor::PrintProcessor;
pub use reader::{FileFormat, Reader};
pub use writer::Writer;

/// Group the built-in stages are registered under
pub const COMMON: &str = "common";

/// Register every built-in stage
pub fn register_builtins(registry: &mut StageRegistry) {
    registry.register(COMMON, "YAMLReader", |logger| {
        Ok(Box::new(Reader::new(FileFormat::Yaml, logger)))
    });
    registry.register(COMMON, "JSONReader", |logger| {
        Ok(Box::new(Reader::new(FileFormat::Json, logger)))
    });
    registry.register(COMMON, "PrintProcessor", |logger| {
        Ok(Box::new(PrintProcessor::new(logger)))
    });
    registry.register(COMMON, "YAMLWriter", |logger| {
        Ok(Box::new(Writer::new(FileFormat::Yaml, logger)))
    });
    registry.register(COMMON, "JSONWriter", |logger| {
        Ok(Box::new(Writer::new(FileFormat::Json, logger)))
    });
}
