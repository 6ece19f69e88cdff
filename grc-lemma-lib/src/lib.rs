pub mod types;
pub mod normalize;
pub mod tables;
pub mod dictionary;
pub mod paradigm;
pub mod confidence;
pub mod resolve;
pub mod text;
pub mod index;
pub mod feed;
pub mod config;
pub mod error;
pub mod output;

pub use config::{BuildConfig, SourceSlot};
pub use dictionary::{CorpusVocabulary, HeadwordIndex};
pub use error::{Error, Result};
pub use index::{build, BuildReport, MappingIndex};
pub use normalize::normalize;
pub use paradigm::{paradigm, synthesize};
pub use resolve::resolve;
pub use text::resolve_line;
pub use types::{Candidate, Headword, MappingRecord, MappingSource, NormalizedForm, PartOfSpeech, ReasonCode, SourceTag};
