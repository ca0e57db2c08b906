pub mod archive;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod vision;

pub use archive::{archive_path, sha256_bytes, to_hex};
pub use pipeline::{ExtractionResult, PipelineError, StatementPipeline};
pub use preprocess::{prepare_for_ocr, prepare_for_ocr_from_bytes, PreprocessError};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
pub use vision::{strip_code_fences, VisionClient, VisionError};
