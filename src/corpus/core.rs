use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::CorpusError;

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/corpus/data");

/// One embedded table of practice material: either single words or whole passages.
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub entries: Vec<String>,
}

impl WordList {
    pub fn load(file_name: &str) -> Result<Self, CorpusError> {
        read_list_from_file(&format!("{file_name}.json"))
    }

    /// The first `n` entries, in table order.
    pub fn head(&self, n: usize) -> &[String] {
        &self.entries[..n.min(self.entries.len())]
    }
}

fn read_list_from_file(file_name: &str) -> Result<WordList, CorpusError> {
    let contents = DATA_DIR
        .get_file(file_name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| CorpusError::Missing(file_name.to_string()))?;

    let list: WordList = from_str(contents).map_err(|source| CorpusError::Malformed {
        name: file_name.to_string(),
        source,
    })?;

    if list.entries.is_empty() {
        return Err(CorpusError::Empty(file_name.to_string()));
    }

    Ok(list)
}
