use crate::error::{Result, WordedError};
use include_dir::{include_dir, Dir};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// Hard cap on the number of words kept from a single dataset.
pub const MAX_BANK_WORDS: usize = 1_000_000;

/// A target word, indexed by Unicode scalar value (`char`). Multi-byte
/// characters count as one unit; combining sequences such as `e\u{301}` count
/// as one unit per scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word(Vec<char>);

impl Word {
    pub fn new(text: &str) -> Self {
        Self(text.chars().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<char> {
        self.0.get(idx).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Word lists compiled into the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BuiltinList {
    English,
    Code,
}

/// Where the words of a run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dataset {
    Builtin(BuiltinList),
    File(PathBuf),
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Builtin(list) => write!(f, "builtin:{list}"),
            Dataset::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Monkeytype-style language file
#[derive(Deserialize, Clone, Debug)]
pub struct LanguageFile {
    pub name: String,
    #[serde(default)]
    pub size: u32,
    pub words: Vec<String>,
}

/// Ordered, non-empty list of candidate words
#[derive(Debug, Clone)]
pub struct WordBank {
    name: String,
    words: Vec<Word>,
}

impl WordBank {
    /// Builds a bank, dropping blank entries and entries of `word_max` chars or more.
    pub fn from_words<I, S>(name: impl Into<String>, entries: I, word_max: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut words = Vec::new();

        for entry in entries {
            let text = entry.as_ref().trim();
            if text.is_empty() {
                continue;
            }

            let word = Word::new(text);
            if word.len() >= word_max {
                log::warn!("skipping large word: '{text}' ({} >= {word_max})", word.len());
                continue;
            }

            words.push(word);
            if words.len() >= MAX_BANK_WORDS {
                log::warn!("exceeded word limit, dataset '{name}' truncated at {MAX_BANK_WORDS} words");
                break;
            }
        }

        if words.is_empty() {
            return Err(WordedError::EmptyDataset(name));
        }

        log::info!("loaded {} words from '{name}'", words.len());
        Ok(Self { name, words })
    }

    pub fn from_reader<R: BufRead>(name: impl Into<String>, reader: R, word_max: usize) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        Self::from_words(name, lines, word_max)
    }

    pub fn load_file(path: &Path, word_max: usize) -> Result<Self> {
        let file = File::open(path).map_err(|source| WordedError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path.display().to_string(), BufReader::new(file), word_max)
    }

    pub fn builtin(list: BuiltinList, word_max: usize) -> Result<Self> {
        let lang = read_builtin(list)?;
        Self::from_words(list.to_string(), lang.words, word_max)
    }

    pub fn load(dataset: &Dataset, word_max: usize) -> Result<Self> {
        match dataset {
            Dataset::Builtin(list) => Self::builtin(*list, word_max),
            Dataset::File(path) => Self::load_file(path, word_max),
        }
    }

    /// Uniform sampling with replacement, reproducible for a given seed.
    pub fn sample(&self, count: usize, seed: u64) -> Vec<Word> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| self.words[rng.gen_range(0..self.words.len())].clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn read_builtin(list: BuiltinList) -> Result<LanguageFile> {
    let file_name = format!("{list}.json");
    let file = LANG_DIR
        .get_file(&file_name)
        .ok_or_else(|| WordedError::UnknownWordList(list.to_string()))?;
    let contents = file
        .contents_utf8()
        .ok_or_else(|| WordedError::UnknownWordList(list.to_string()))?;

    Ok(serde_json::from_str(contents)?)
}
