use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use grc_lemma_lib::{feed, output, BuildConfig, HeadwordIndex, PartOfSpeech};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "grc-lemma", about = "Ancient Greek lemma resolution", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output in bracketed {lemma:confidence:reason} format.
    #[arg(long, global = true)]
    bracketed: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error). Logs go to stderr.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Language tag of plain-text headwords [default: greek, or the config's].
    #[arg(long, global = true)]
    language: Option<String>,
}

impl Cli {
    fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}

const DEFAULT_LANGUAGE: &str = "greek";

#[derive(Subcommand)]
enum Command {
    /// Print the lookup key of each line. Reads stdin when TEXT is omitted.
    Normalize { text: Option<String> },

    /// List the inflected forms of a lemma.
    Synthesize {
        lemma: String,
        #[arg(long, value_enum)]
        pos: Option<Pos>,
        /// Include class and cell of every form.
        #[arg(long)]
        cells: bool,
    },

    /// Propose lemmas for a word form. Reads stdin when FORM is omitted.
    Resolve {
        form: Option<String>,
        #[arg(long)]
        headwords: PathBuf,
        /// Show at most N candidates per form (0 = all).
        #[arg(short = 'n', long = "top", default_value = "0")]
        top: usize,
    },

    /// Resolve every word of a line of running text. Reads stdin when LINE is
    /// omitted.
    Text {
        line: Option<String>,
        #[arg(long)]
        headwords: PathBuf,
    },

    /// Merge all sources into a mapping index and write it as JSON lines.
    Build {
        #[arg(long)]
        headwords: PathBuf,
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// External mapping feed; repeat in priority order.
        #[arg(long = "source")]
        sources: Vec<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep forms that do not occur in the corpus.
        #[arg(long)]
        no_prune: bool,
        #[arg(long)]
        out: PathBuf,
    },

    /// Look a word up in a built index.
    Lookup {
        form: String,
        #[arg(long)]
        index: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Pos {
    Noun,
    Verb,
    Adjective,
}

impl From<Pos> for PartOfSpeech {
    fn from(p: Pos) -> Self {
        match p {
            Pos::Noun => PartOfSpeech::Noun,
            Pos::Verb => PartOfSpeech::Verb,
            Pos::Adjective => PartOfSpeech::Adjective,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &cli.command {
        Command::Normalize { text } => {
            for_each_input(text.as_deref(), |line| {
                println!("{}", grc_lemma_lib::normalize::normalize_line(line));
                Ok(())
            })?;
        }
        Command::Synthesize { lemma, pos, cells } => {
            let headword = grc_lemma_lib::Headword::new(lemma, cli.language());
            let hint = pos.map(PartOfSpeech::from);
            if *cells {
                print_json(&grc_lemma_lib::paradigm(&headword, hint), cli.pretty)?;
            } else if cli.bracketed {
                let forms: Vec<String> =
                    grc_lemma_lib::synthesize(&headword, hint).into_iter().map(|f| f.into_string()).collect();
                println!("{}", forms.join(", "));
            } else {
                print_json(&grc_lemma_lib::synthesize(&headword, hint), cli.pretty)?;
            }
        }
        Command::Resolve { form, headwords, top } => {
            let headwords = load_headwords(headwords, cli.language())?;
            for_each_input(form.as_deref(), |line| {
                let key = grc_lemma_lib::normalize(line);
                let mut candidates = grc_lemma_lib::resolve(&key, &headwords);
                if *top > 0 {
                    candidates.truncate(*top);
                }
                if cli.bracketed {
                    println!("{}", output::candidates_to_bracketed(&candidates));
                    Ok(())
                } else {
                    print_json(&candidates, cli.pretty)
                }
            })?;
        }
        Command::Text { line, headwords } => {
            let headwords = load_headwords(headwords, cli.language())?;
            let lines = input_lines(line.as_deref())?;
            for resolution in grc_lemma_lib::text::resolve_lines(&lines, &headwords) {
                if cli.bracketed {
                    println!("{}", output::line_to_bracketed(&resolution));
                } else {
                    print_json(&resolution, cli.pretty)?;
                }
            }
        }
        Command::Build {
            headwords,
            corpus,
            sources,
            config,
            no_prune,
            out,
        } => {
            let config = build_config(config.as_deref(), cli.language.as_deref(), *no_prune)?;

            let headwords = load_headwords(headwords, &config.language)?;
            let corpus = corpus
                .as_deref()
                .map(|p| feed::load_corpus(p).with_context(|| format!("loading corpus {}", p.display())))
                .transpose()?;
            let external = sources
                .iter()
                .map(|p| {
                    feed::load_mapping_source(p, None).with_context(|| format!("loading source {}", p.display()))
                })
                .collect::<Result<Vec<_>>>()?;

            let (index, report) = grc_lemma_lib::build(&external, &headwords, corpus.as_ref(), &config)
                .context("building mapping index")?;
            feed::write_index(&index, out).with_context(|| format!("writing index {}", out.display()))?;
            info!(out = %out.display(), records = index.len(), "Done");
            print_json(&report, cli.pretty)?;
        }
        Command::Lookup { form, index } => {
            let index = feed::load_index(index).with_context(|| format!("loading index {}", index.display()))?;
            let hits = index.lookup(form);
            if cli.bracketed {
                println!("{}", output::hits_to_bracketed(&hits));
            } else {
                print_json(&hits, cli.pretty)?;
            }
        }
    }
    Ok(())
}

/// The config file (or defaults) with command-line overrides applied.
fn build_config(path: Option<&Path>, language: Option<&str>, no_prune: bool) -> Result<BuildConfig> {
    let mut config = match path {
        Some(path) => {
            BuildConfig::from_json_file(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => BuildConfig::default(),
    };
    if let Some(language) = language {
        config.language = language.to_string();
    }
    if no_prune {
        config.prune_to_corpus = false;
    }
    Ok(config)
}

fn load_headwords(path: &Path, language: &str) -> Result<HeadwordIndex> {
    feed::load_headwords(path, language).with_context(|| format!("loading headwords {}", path.display()))
}

/// Run `f` on the given input, or on every non-blank stdin line.
fn for_each_input(input: Option<&str>, mut f: impl FnMut(&str) -> Result<()>) -> Result<()> {
    match input {
        Some(text) => f(text),
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("reading stdin")?;
                if !line.trim().is_empty() {
                    f(line.trim())?;
                }
            }
            Ok(())
        }
    }
}

/// The given input as a single line, or every non-blank stdin line.
fn input_lines(input: Option<&str>) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for_each_input(input, |line| {
        lines.push(line.to_string());
        Ok(())
    })?;
    Ok(lines)
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", json.context("JSON serialization failed")?);
    Ok(())
}
