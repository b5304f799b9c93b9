use crate::error::Result;
use crate::word_bank::LanguageFile;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// What a conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub name: String,
    pub words: usize,
    /// Longest word, in chars
    pub max_len: usize,
}

/// Rewrites a monkeytype language JSON document as one word per line.
pub fn convert<R: Read, W: Write>(input: R, mut output: W) -> Result<Conversion> {
    let lang: LanguageFile = serde_json::from_reader(input)?;
    log::info!("converting '{}' ({} words)", lang.name, lang.words.len());

    let mut max_len = 0;
    for word in &lang.words {
        writeln!(output, "{word}")?;
        max_len = max_len.max(word.chars().count());
    }
    output.flush()?;

    Ok(Conversion {
        name: lang.name,
        words: lang.words.len(),
        max_len,
    })
}

pub fn convert_file(input: &Path, output: &Path) -> Result<Conversion> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    convert(reader, writer)
}
