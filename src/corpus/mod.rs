//! Corpus selection, fetch parameters, result records, and the corpus service client.

pub mod client;
mod extract;
pub(crate) mod record;
pub mod types;

pub use client::{CorpusClient, CorpusError, HttpCorpusClient};
pub use record::{PIVOT_LANGUAGE, ResultCollection, ResultRecord};

use clap::ValueEnum;

use crate::marker::Marker;
use crate::script::Script;

/// Examples requested per page.
pub const EXAMPLES_PER_PAGE: u32 = 5;
/// Wanted examples covered by each requested page.
const WANTED_EXAMPLES_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorpusVariant {
    /// Single-language (Russian) corpus
    #[value(name = "main")]
    Primary,
    /// Russian sentences aligned with their translations
    Parallel,
}

impl CorpusVariant {
    pub fn mode(self) -> &'static str {
        match self {
            CorpusVariant::Primary => "main",
            CorpusVariant::Parallel => "parallel",
        }
    }
}

/// Explicit choice wins; otherwise Latin-script words go to the parallel corpus
/// and everything else to the main one.
pub fn select_variant(script: Script, explicit: Option<CorpusVariant>) -> CorpusVariant {
    match (explicit, script) {
        (Some(variant), _) => variant,
        (None, Script::Foreign) => CorpusVariant::Parallel,
        (None, Script::Target | Script::Unknown) => CorpusVariant::Primary,
    }
}

/// Languages the parallel corpus aligns Russian with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Arm,
    Bas,
    Bel,
    Bul,
    Bur,
    Sp,
    It,
    Ch,
    Lat,
    Lit,
    Ger,
    Pol,
    Ukr,
    Fr,
    Fin,
    Cz,
    Sw,
    Es,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Arm => "arm",
            Language::Bas => "bas",
            Language::Bel => "bel",
            Language::Bul => "bul",
            Language::Bur => "bur",
            Language::Sp => "sp",
            Language::It => "it",
            Language::Ch => "ch",
            Language::Lat => "lat",
            Language::Lit => "lit",
            Language::Ger => "ger",
            Language::Pol => "pol",
            Language::Ukr => "ukr",
            Language::Fr => "fr",
            Language::Fin => "fin",
            Language::Cz => "cz",
            Language::Sw => "sw",
            Language::Es => "es",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Random,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Random => "random",
        }
    }
}

/// Everything the corpus client needs for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub count: u32,
    pub pages: u32,
    pub examples_per_page: u32,
    pub sort: SortMode,
    pub marker: Option<Marker>,
    pub variant: CorpusVariant,
    /// Only set for `CorpusVariant::Parallel`.
    pub language: Option<Language>,
}

impl FetchParams {
    pub fn new(
        count: u32,
        variant: CorpusVariant,
        language: Language,
        marker: Option<Marker>,
    ) -> Self {
        let count = count.max(1);
        Self {
            count,
            pages: (count / WANTED_EXAMPLES_PER_PAGE).max(1),
            examples_per_page: EXAMPLES_PER_PAGE,
            sort: SortMode::Random,
            marker,
            variant,
            language: match variant {
                CorpusVariant::Parallel => Some(language),
                CorpusVariant::Primary => None,
            },
        }
    }
}
