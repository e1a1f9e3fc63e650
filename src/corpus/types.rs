use serde::Deserialize;

/// One page of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub documents: Vec<Document>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub examples: Vec<Example>,
}

/// Aligned examples carry one fragment per language; plain ones a single fragment.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Example {
    Aligned { aligned: Vec<Fragment> },
    Simple(Fragment),
}

#[derive(Debug, Deserialize)]
pub struct Fragment {
    pub lang: Option<String>,
    pub text: String,
    /// Wordforms in `text` that matched the query.
    #[serde(default)]
    pub matches: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: Option<u16>,
    pub message: Option<String>,
}
