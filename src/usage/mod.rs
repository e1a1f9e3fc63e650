//! Usage-example pipeline: corpus selection, retrieval with fallback, ranking, and rendering.

pub(crate) mod present;
pub(crate) mod rank;
pub(crate) mod retrieve;

use std::fmt;

use tracing::info;

use crate::corpus::{CorpusClient, CorpusError, CorpusVariant, Language, select_variant};
use crate::marker::Marker;
use crate::script::classify;
use present::present;
use rank::rank_and_truncate;
use retrieve::{RetrieveRequest, retrieve};

#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("word must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

/// The searched word or phrase; never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQuery(String);

impl WordQuery {
    /// Joins `words` with single spaces.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self, UsageError> {
        let joined = words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            return Err(UsageError::EmptyQuery);
        }
        Ok(Self(joined))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct UsageRequest<'a> {
    pub query: &'a WordQuery,
    pub count: u32,
    /// `None` lets the word's alphabet decide.
    pub corpus: Option<CorpusVariant>,
    pub language: Language,
    pub marker: Option<Marker>,
}

/// Runs one query end to end and returns the rendered lines.
pub async fn collect_examples(
    client: &impl CorpusClient,
    req: &UsageRequest<'_>,
) -> Result<Vec<String>, UsageError> {
    let script = classify(req.query.as_str());
    let variant = select_variant(script, req.corpus);

    info!(
        word = %req.query,
        ?script,
        corpus = variant.mode(),
        count = req.count,
        "collecting examples"
    );

    let records = retrieve(
        client,
        &RetrieveRequest {
            word: req.query.as_str(),
            count: req.count,
            variant,
            language: req.language,
            marker: req.marker,
        },
    )
    .await?;

    let fetched = records.len();
    let ranked = rank_and_truncate(records, req.count as usize);

    info!(fetched, shown = ranked.len(), "examples ranked");
    Ok(present(&ranked))
}
