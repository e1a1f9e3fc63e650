use tracing::{debug, warn};

use crate::corpus::{CorpusClient, CorpusError, CorpusVariant, FetchParams, Language, ResultCollection};
use crate::marker::Marker;

pub struct RetrieveRequest<'a> {
    pub word: &'a str,
    pub count: u32,
    pub variant: CorpusVariant,
    pub language: Language,
    pub marker: Option<Marker>,
}

/// Fetches raw examples for `req.word`.
///
/// When the corpus rejects the requested page count, the fetch is repeated
/// once as if a single example had been asked for. Any other failure, and a
/// second rejection, is returned as is.
pub async fn retrieve(
    client: &impl CorpusClient,
    req: &RetrieveRequest<'_>,
) -> Result<ResultCollection, CorpusError> {
    let params = FetchParams::new(req.count, req.variant, req.language, req.marker);
    debug!(
        word = req.word,
        pages = params.pages,
        dpp = params.examples_per_page,
        corpus = params.variant.mode(),
        "fetching examples"
    );

    match client.fetch(req.word, &params).await {
        Err(CorpusError::InvalidRequest(reason)) => {
            warn!(%reason, pages = params.pages, "corpus rejected request, retrying with a single page");
            let fallback = FetchParams::new(1, req.variant, req.language, req.marker);
            client.fetch(req.word, &fallback).await
        }
        outcome => outcome,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::corpus::ResultRecord;
    use crate::corpus::record::SimpleRecord;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub(crate) struct MockCorpus {
        responses: Mutex<VecDeque<Result<ResultCollection, CorpusError>>>,
        calls: Mutex<Vec<(String, FetchParams)>>,
    }

    impl MockCorpus {
        pub(crate) fn with_responses(
            responses: Vec<Result<ResultCollection, CorpusError>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn captured_calls(&self) -> Vec<(String, FetchParams)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CorpusClient for MockCorpus {
        async fn fetch(
            &self,
            word: &str,
            params: &FetchParams,
        ) -> Result<ResultCollection, CorpusError> {
            self.calls
                .lock()
                .unwrap()
                .push((word.to_string(), params.clone()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(CorpusError::RateLimited))
        }
    }

    fn simple(text: &str) -> ResultRecord {
        ResultRecord::Simple(SimpleRecord {
            text: text.into(),
            source: "src".into(),
        })
    }

    fn request(count: u32) -> RetrieveRequest<'static> {
        RetrieveRequest {
            word: "дом",
            count,
            variant: CorpusVariant::Primary,
            language: Language::En,
            marker: None,
        }
    }

    #[tokio::test]
    async fn success_returns_raw_collection() {
        let mock = MockCorpus::with_responses(vec![Ok(vec![simple("длинный дом"), simple("дом")])]);

        let records = retrieve(&mock, &request(25)).await.unwrap();

        assert_eq!(records, vec![simple("длинный дом"), simple("дом")]);
        let calls = mock.captured_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "дом");
        assert_eq!(calls[0].1.pages, 2);
        assert_eq!(calls[0].1.examples_per_page, 5);
    }

    #[tokio::test]
    async fn invalid_request_retries_with_single_page() {
        let mock = MockCorpus::with_responses(vec![
            Err(CorpusError::InvalidRequest("too many pages".into())),
            Ok(vec![simple("дом")]),
        ]);

        let records = retrieve(&mock, &request(30)).await.unwrap();

        assert_eq!(records.len(), 1);
        let calls = mock.captured_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1.pages, 3);
        assert_eq!(calls[1].1.pages, 1);
        assert_eq!(calls[1].1.count, 1);
    }

    #[tokio::test]
    async fn second_invalid_request_propagates() {
        let mock = MockCorpus::with_responses(vec![
            Err(CorpusError::InvalidRequest("first".into())),
            Err(CorpusError::InvalidRequest("second".into())),
            Ok(vec![simple("never fetched")]),
        ]);

        let err = retrieve(&mock, &request(30)).await.unwrap_err();

        assert!(matches!(err, CorpusError::InvalidRequest(ref m) if m == "second"));
        assert_eq!(mock.captured_calls().len(), 2);
    }

    #[tokio::test]
    async fn transport_failure_is_not_retried() {
        let mock = MockCorpus::with_responses(vec![
            Err(CorpusError::Api {
                code: 502,
                message: "bad gateway".into(),
            }),
            Ok(vec![simple("never fetched")]),
        ]);

        let err = retrieve(&mock, &request(10)).await.unwrap_err();

        assert!(matches!(err, CorpusError::Api { code: 502, .. }));
        assert_eq!(mock.captured_calls().len(), 1);
    }

    #[tokio::test]
    async fn retry_keeps_corpus_and_language() {
        let mock = MockCorpus::with_responses(vec![
            Err(CorpusError::InvalidRequest("too many pages".into())),
            Ok(vec![]),
        ]);
        let req = RetrieveRequest {
            word: "house",
            count: 50,
            variant: CorpusVariant::Parallel,
            language: Language::Fr,
            marker: Some(Marker::Hide),
        };

        let records = retrieve(&mock, &req).await.unwrap();

        assert!(records.is_empty());
        let retry = &mock.captured_calls()[1].1;
        assert_eq!(retry.variant, CorpusVariant::Parallel);
        assert_eq!(retry.language, Some(Language::Fr));
        assert_eq!(retry.marker, Some(Marker::Hide));
    }
}
