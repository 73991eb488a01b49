use serde_json::Value;
use tracing::info;

use super::PageSource;
use crate::error::{Error, Result};

/// Walks `page=1,2,..` until the endpoint returns an empty page and returns
/// every record seen, in page order. Any non-success status or undecodable
/// page aborts the walk; nothing is retried.
pub fn fetch_paginated<S: PageSource>(
    source: &S,
    resource_url: &str,
    since: &str,
    page_size: u32,
) -> Result<Vec<Value>> {
    let mut page: u32 = 1;
    let mut records = Vec::new();

    loop {
        info!("Fetching commits data from page num: {page}");
        let query = [
            ("since", since.to_string()),
            ("per_page", page_size.to_string()),
            ("page", page.to_string()),
        ];
        let resp = source.get(resource_url, &query)?;
        if !resp.is_success() {
            return Err(Error::PageRequest {
                page,
                status: resp.status,
                message: resp.body,
            });
        }

        let batch: Vec<Value> = resp.json()?;
        if batch.is_empty() {
            info!("No more data found");
            break;
        }
        records.extend(batch);
        page += 1;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;
    use crate::remote::RemoteResponse;

    /// Serves `full_pages` pages of `page_size` records, then empty pages.
    struct StubSource {
        full_pages: u32,
        page_size: u32,
        requests: RefCell<Vec<Vec<(String, String)>>>,
    }

    impl StubSource {
        fn new(full_pages: u32, page_size: u32) -> Self {
            Self {
                full_pages,
                page_size,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for StubSource {
        fn get(&self, _url: &str, query: &[(&str, String)]) -> Result<RemoteResponse> {
            self.requests.borrow_mut().push(
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            );
            let page: u32 = query
                .iter()
                .find(|(k, _)| *k == "page")
                .map(|(_, v)| v.parse().unwrap())
                .unwrap();

            let records: Vec<Value> = if page <= self.full_pages {
                (0..self.page_size)
                    .map(|i| json!({ "sha": format!("{page}-{i}") }))
                    .collect()
            } else {
                Vec::new()
            };
            Ok(RemoteResponse {
                status: 200,
                body: serde_json::to_string(&records).unwrap(),
            })
        }
    }

    #[test]
    fn test_stops_on_first_empty_page() {
        let source = StubSource::new(3, 100);
        let records = fetch_paginated(&source, "http://x/commits", "2021-01-01T00:00:00Z", 100)
            .unwrap();

        assert_eq!(records.len(), 300);
        assert_eq!(source.requests.borrow().len(), 4);
        assert_eq!(records[0]["sha"], "1-0");
        assert_eq!(records[299]["sha"], "3-99");
    }

    #[test]
    fn test_empty_first_page() {
        let source = StubSource::new(0, 100);
        let records = fetch_paginated(&source, "http://x/commits", "2021-01-01T00:00:00Z", 100)
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(source.requests.borrow().len(), 1);
    }

    #[test]
    fn test_query_parameters() {
        let source = StubSource::new(1, 5);
        fetch_paginated(&source, "http://x/commits", "2022-06-01T00:00:00Z", 5).unwrap();

        let requests = source.requests.borrow();
        assert_eq!(
            requests[1],
            vec![
                ("since".to_string(), "2022-06-01T00:00:00Z".to_string()),
                ("per_page".to_string(), "5".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    struct FailingSource {
        status: u16,
        body: &'static str,
    }

    impl PageSource for FailingSource {
        fn get(&self, _url: &str, _query: &[(&str, String)]) -> Result<RemoteResponse> {
            Ok(RemoteResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    #[test]
    fn test_error_status_is_fatal() {
        let source = FailingSource {
            status: 403,
            body: r#"{"message":"API rate limit exceeded"}"#,
        };
        let result = fetch_paginated(&source, "http://x/commits", "2021-01-01T00:00:00Z", 100);
        match result {
            Err(Error::PageRequest { page, status, message }) => {
                assert_eq!(page, 1);
                assert_eq!(status, 403);
                assert!(message.contains("rate limit"));
            }
            other => panic!("expected PageRequest error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_array_page_is_decode_error() {
        let source = FailingSource {
            status: 200,
            body: r#"{"message":"odd"}"#,
        };
        let result = fetch_paginated(&source, "http://x/commits", "2021-01-01T00:00:00Z", 100);
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
