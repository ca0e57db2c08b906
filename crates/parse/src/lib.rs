pub mod amounts;
pub mod assembler;
pub mod classify;
pub mod corrections;
pub mod parser;
pub mod profile;
pub mod section;
pub mod vision;

pub use amounts::{split_amounts, AmountSplit};
pub use assembler::RecordAssembler;
pub use classify::{classify_line, LineKind};
pub use corrections::{Correction, CorrectionSet};
pub use parser::{DocumentParser, OcrTextParser, ParseError};
pub use profile::{LayoutProfile, SectionMarkers};
pub use section::isolate_section;
pub use vision::VisionJsonParser;
