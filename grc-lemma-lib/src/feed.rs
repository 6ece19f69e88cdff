// Readers and writers for the files the engine consumes and produces.
//
// Every feed is read fully into memory before a build starts. JSON-lines
// feeds report malformed lines with their path and 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::confidence;
use crate::dictionary::{CorpusVocabulary, HeadwordIndex};
use crate::error::{Error, Result};
use crate::index::MappingIndex;
use crate::normalize::{self, normalize};
use crate::types::*;

const DEFAULT_CONFIDENCE: f64 = 1.0;

#[derive(Debug, Deserialize)]
struct RawHeadword {
    headword_normalized: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    headword: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCorpusForm {
    word_normalized: String,
}

#[derive(Debug, Deserialize)]
struct RawMapping {
    word_form: String,
    lemma: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    morph_info: Option<String>,
    #[serde(default)]
    morph_type: Option<String>,
}

/// Lexical-resource extraction output: one JSON document.
#[derive(Debug, Deserialize)]
struct MappingDocument {
    #[serde(default)]
    metadata: serde_json::Map<String, serde_json::Value>,
    mappings: Vec<RawMapping>,
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| Error::io(path, e))
}

/// Non-empty, non-comment lines with their 1-based numbers.
fn content_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<(usize, String)>> {
    let mut out = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        out.push((i + 1, trimmed.to_string()));
    }
    Ok(out)
}

fn is_json_object(line: &str) -> bool {
    line.starts_with('{')
}

// ---------------------------------------------------------------------------
// Headwords
// ---------------------------------------------------------------------------

/// Headwords from JSON lines (`headword_normalized`, `language`, optional
/// `headword` display form) or plain lines holding one display form each.
pub fn read_headwords<R: BufRead>(reader: R, path: &Path, language: &str) -> Result<HeadwordIndex> {
    let mut headwords = Vec::new();
    for (n, line) in content_lines(reader, path)? {
        if is_json_object(&line) {
            let raw: RawHeadword = serde_json::from_str(&line).map_err(|e| Error::json(path, n, e))?;
            let display = raw.headword.unwrap_or_else(|| raw.headword_normalized.clone());
            headwords.push(Headword {
                normalized_form: normalize(&raw.headword_normalized),
                language: raw.language.unwrap_or_else(|| language.to_string()),
                raw_display_form: display,
            });
        } else {
            headwords.push(Headword::new(&line, language));
        }
    }
    let index = HeadwordIndex::new(headwords.into_iter().filter(|h| h.language == language));
    info!(path = %path.display(), headwords = index.len(), "Loaded headwords");
    Ok(index)
}

pub fn load_headwords(path: &Path, language: &str) -> Result<HeadwordIndex> {
    read_headwords(open(path)?, path, language)
}

// ---------------------------------------------------------------------------
// Corpus vocabulary
// ---------------------------------------------------------------------------

/// Corpus forms from JSON lines (`word_normalized`) or running text, every
/// word of which is added.
pub fn read_corpus<R: BufRead>(reader: R, path: &Path) -> Result<CorpusVocabulary> {
    let mut forms = Vec::new();
    for (n, line) in content_lines(reader, path)? {
        if is_json_object(&line) {
            let raw: RawCorpusForm = serde_json::from_str(&line).map_err(|e| Error::json(path, n, e))?;
            forms.push(normalize(&raw.word_normalized));
        } else {
            forms.extend(normalize::words(&line).into_iter().map(|(_, key)| key));
        }
    }
    let corpus = CorpusVocabulary::new(forms);
    info!(path = %path.display(), forms = corpus.len(), "Loaded corpus vocabulary");
    Ok(corpus)
}

pub fn load_corpus(path: &Path) -> Result<CorpusVocabulary> {
    read_corpus(open(path)?, path)
}

// ---------------------------------------------------------------------------
// Mapping sources
// ---------------------------------------------------------------------------

/// A mapping feed, either a `{metadata, mappings}` document or JSON lines.
/// Records without a `source` take `tag`.
pub fn read_mapping_source<R: BufRead>(mut reader: R, path: &Path, tag: &str) -> Result<MappingSource> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|e| Error::io(path, e))?;

    let raw = match serde_json::from_str::<MappingDocument>(&text) {
        Ok(doc) => {
            info!(
                path = %path.display(),
                source = doc.metadata.get("source").and_then(|v| v.as_str()).unwrap_or("unknown"),
                extracted = doc.metadata.get("extraction_date").and_then(|v| v.as_str()).unwrap_or("unknown"),
                mappings = doc.mappings.len(),
                "Read mapping document"
            );
            doc.mappings
        }
        Err(_) => {
            let mut out = Vec::new();
            for (n, line) in content_lines(text.as_bytes(), path)? {
                out.push(serde_json::from_str::<RawMapping>(&line).map_err(|e| Error::json(path, n, e))?);
            }
            out
        }
    };

    let offered = raw.len();
    let records: Vec<MappingRecord> = raw.into_iter().filter_map(|r| to_record(r, tag)).collect();
    debug!(path = %path.display(), tag, offered, kept = records.len(), "Read mapping source");
    Ok(MappingSource::new(SourceTag::new(tag), records))
}

/// Load a mapping feed; the tag defaults to the file stem.
pub fn load_mapping_source(path: &Path, tag: Option<&str>) -> Result<MappingSource> {
    let default_tag = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "external".to_string());
    read_mapping_source(open(path)?, path, tag.unwrap_or(&default_tag))
}

fn to_record(raw: RawMapping, tag: &str) -> Option<MappingRecord> {
    let word_form = normalize(&raw.word_form);
    let lemma = normalize(&raw.lemma);
    if word_form.is_empty() || lemma.is_empty() {
        warn!(word_form = %raw.word_form, lemma = %raw.lemma, "Skipping record with empty key");
        return None;
    }
    let given = raw.confidence.unwrap_or(DEFAULT_CONFIDENCE);
    let Some(confidence) = confidence::clamp(given) else {
        warn!(%word_form, %lemma, "Rejecting record with non-finite confidence");
        return None;
    };
    if confidence != given {
        warn!(%word_form, %lemma, given, clamped = confidence, "Clamped confidence into [0, 1]");
    }
    Some(MappingRecord {
        word_form,
        lemma,
        confidence,
        source: SourceTag::new(raw.source.unwrap_or_else(|| tag.to_string())),
        morph_info: raw.morph_info.or(raw.morph_type),
    })
}

// ---------------------------------------------------------------------------
// Index persistence
// ---------------------------------------------------------------------------

pub fn write_index(index: &MappingIndex, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    index.write_jsonl(BufWriter::new(file)).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), records = index.len(), "Wrote index");
    Ok(())
}

/// Read an index written by [`write_index`].
pub fn read_index<R: BufRead>(reader: R, path: &Path) -> Result<MappingIndex> {
    let mut records = Vec::new();
    for (n, line) in content_lines(reader, path)? {
        let record: MappingRecord = serde_json::from_str(&line).map_err(|e| Error::json(path, n, e))?;
        records.push(record);
    }
    Ok(MappingIndex::from_records(records))
}

pub fn load_index(path: &Path) -> Result<MappingIndex> {
    read_index(open(path)?, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> &'static Path {
        Path::new("test.jsonl")
    }

    #[test]
    fn test_headwords_json_and_plain() {
        let text = "\
{\"headword_normalized\": \"λογοσ\", \"language\": \"greek\", \"headword\": \"λόγος\"}
# comment
τιμή
{\"headword_normalized\": \"amo\", \"language\": \"latin\"}
";
        let idx = read_headwords(text.as_bytes(), p(), "greek").unwrap();
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.lookup("λογοσ").unwrap()[0].raw_display_form, "λόγος");
        assert!(idx.contains("τιμη"));
    }

    #[test]
    fn test_headwords_malformed_json_reports_line() {
        let text = "λόγος\n{\"headword_normalized\": }\n";
        match read_headwords(text.as_bytes(), p(), "greek") {
            Err(Error::Json { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }

    #[test]
    fn test_corpus_from_running_text() {
        let text = "Μῆνιν ἄειδε, θεά, Πηληϊάδεω Ἀχιλῆος\n{\"word_normalized\": \"οὐλομένην\"}\n";
        let corpus = read_corpus(text.as_bytes(), p()).unwrap();
        assert_eq!(corpus.len(), 6);
        assert!(corpus.contains("αχιληοσ"));
        assert!(corpus.contains("ουλομενην"));
    }

    #[test]
    fn test_mapping_jsonl_defaults() {
        let text = "\
{\"word_form\": \"λόγου\", \"lemma\": \"λόγος\", \"morph_type\": \"gen sg\"}
{\"word_form\": \"λόγῳ\", \"lemma\": \"λόγος\", \"confidence\": 1.7, \"source\": \"other\"}
{\"word_form\": \"123\", \"lemma\": \"λόγος\"}
";
        let src = read_mapping_source(text.as_bytes(), p(), "feed").unwrap();
        assert_eq!(src.tag.as_str(), "feed");
        assert_eq!(src.records.len(), 2);
        assert_eq!(src.records[0].confidence, 1.0);
        assert_eq!(src.records[0].source.as_str(), "feed");
        assert_eq!(src.records[0].morph_info.as_deref(), Some("gen sg"));
        assert_eq!(src.records[1].confidence, 1.0);
        assert_eq!(src.records[1].source.as_str(), "other");
    }

    #[test]
    fn test_mapping_document() {
        let text = r#"{
  "metadata": {"source": "English Wiktionary", "extraction_date": "2025-08-04"},
  "mappings": [
    {"word_form": "μηνιν", "lemma": "μηνισ", "confidence": 0.95, "source": "wiktionary:inflection_of", "morph_info": "acc sg"}
  ]
}"#;
        let src = read_mapping_source(text.as_bytes(), p(), "wiktionary").unwrap();
        assert_eq!(src.records.len(), 1);
        assert_eq!(src.records[0].word_form, "μηνιν");
        assert_eq!(src.records[0].source.as_str(), "wiktionary:inflection_of");
    }

    #[test]
    fn test_index_round_trip_through_jsonl() {
        let index = MappingIndex::from_records(vec![MappingRecord {
            word_form: normalize("λόγου"),
            lemma: normalize("λόγος"),
            confidence: 0.8,
            source: SourceTag::new(SourceTag::GENERATED),
            morph_info: Some("gen sg".to_string()),
        }]);
        let mut buf = Vec::new();
        index.write_jsonl(&mut buf).unwrap();
        let back = read_index(buf.as_slice(), p()).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.lookup("λόγου")[0].morph_info.as_deref(), Some("gen sg"));
    }
}
