/// Native side of every aligned example.
pub const PIVOT_LANGUAGE: &str = "ru";

/// One example returned by the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRecord {
    Simple(SimpleRecord),
    Aligned(AlignedRecord),
}

/// Records of a single fetch, in the order the corpus returned them.
pub type ResultCollection = Vec<ResultRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRecord {
    pub text: String,
    pub source: String,
}

/// An example with its translations, keyed by language code in the order received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRecord {
    pub texts: Vec<(String, String)>,
    pub source: String,
}

impl AlignedRecord {
    pub fn text(&self, lang: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(code, _)| code == lang)
            .map(|(_, text)| text.as_str())
    }
}

impl ResultRecord {
    pub fn source(&self) -> &str {
        match self {
            ResultRecord::Simple(r) => &r.source,
            ResultRecord::Aligned(r) => &r.source,
        }
    }
}
