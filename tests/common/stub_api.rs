use std::cell::RefCell;
use std::collections::HashMap;

use commit_etl::error::Result;
use commit_etl::remote::{PageSource, RemoteResponse};
use serde_json::{Value, json};

/// In-memory stand-in for the hosting API. Serves one repository object and
/// a fixed list of commit pages; any page past the list is empty.
pub struct StubApi {
    pub repo_status: u16,
    pub repo_body: Value,
    pub pages: Vec<Vec<Value>>,
    pub requests: RefCell<Vec<(String, HashMap<String, String>)>>,
}

impl StubApi {
    pub fn new(repo_id: i64, pages: Vec<Vec<Value>>) -> Self {
        Self {
            repo_status: 200,
            repo_body: json!({ "id": repo_id, "full_name": "apache/hadoop" }),
            pages,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn missing_repo() -> Self {
        Self {
            repo_status: 404,
            repo_body: json!({ "message": "Not Found" }),
            pages: Vec::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn commit_requests(&self) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|(url, _)| url.ends_with("/commits"))
            .count()
    }
}

impl PageSource for StubApi {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<RemoteResponse> {
        let params: HashMap<String, String> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.requests
            .borrow_mut()
            .push((url.to_string(), params.clone()));

        if !url.ends_with("/commits") {
            return Ok(RemoteResponse {
                status: self.repo_status,
                body: self.repo_body.to_string(),
            });
        }

        let page: usize = params["page"].parse().expect("numeric page");
        let records = self.pages.get(page - 1).cloned().unwrap_or_default();
        Ok(RemoteResponse {
            status: 200,
            body: Value::Array(records).to_string(),
        })
    }
}

/// A commit object shaped like the commits endpoint returns it.
pub fn raw_commit(sha: &str, date: &str, author: Option<(i64, &str)>) -> Value {
    let name = author.map_or("Unlinked Committer", |(_, name)| name);
    json!({
        "sha": sha,
        "commit": {
            "author": { "name": name, "email": "dev@example.com", "date": date },
            "message": format!("Commit {sha}")
        },
        "author": author.map(|(id, _)| json!({ "id": id, "login": name.to_lowercase() })),
        "html_url": format!("https://github.com/apache/hadoop/commit/{sha}")
    })
}
