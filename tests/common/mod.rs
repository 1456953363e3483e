//! Scripted transport and clock shared by the library tests.

#![allow(dead_code)]

use branch_protection_audit::config::Credentials;
use branch_protection_audit::error::{Error, Result};
use branch_protection_audit::github::{GitHubClient, HttpResponse, Transport};
use branch_protection_audit::rate_limit::Clock;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

pub const API: &str = "https://api.test";
pub const TOKEN: &str = "t0k3n";

/// Replays canned responses per URL. The last response for a URL repeats.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<HashMap<String, VecDeque<HttpResponse>>>,
    requests: RefCell<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, path: &str, response: HttpResponse) -> Self {
        self.responses
            .borrow_mut()
            .entry(format!("{API}{path}"))
            .or_default()
            .push_back(response);
        self
    }

    pub fn on_json(self, path: &str, status: u16, body: Value) -> Self {
        self.on(path, HttpResponse::new(status).with_json(&body))
    }

    /// URLs requested so far, in order.
    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|(u, _)| u.clone()).collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn headers_of(&self, index: usize) -> Vec<(String, String)> {
        self.requests.borrow()[index].1.clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        self.requests.borrow_mut().push((
            url.to_string(),
            headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));

        let mut responses = self.responses.borrow_mut();
        let queue = responses.get_mut(url).ok_or_else(|| Error::Transport {
            url: url.to_string(),
            message: "no scripted response".to_string(),
        })?;
        let response = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };
        Ok(response)
    }
}

/// Clock whose `sleep` only records the wait and advances time.
pub struct FakeClock {
    now: Cell<Duration>,
    sleeps: RefCell<Vec<Duration>>,
}

impl FakeClock {
    pub fn at(epoch_secs: u64) -> Self {
        FakeClock {
            now: Cell::new(Duration::from_secs(epoch_secs)),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for &FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.now.set(self.now.get() + duration);
    }
}

pub fn credentials(org: &str) -> Credentials {
    Credentials::resolve(Some(TOKEN.to_string()), Some(org.to_string())).unwrap()
}

pub fn client<'a>(
    transport: &'a ScriptedTransport,
    clock: &'a FakeClock,
) -> GitHubClient<&'a ScriptedTransport, &'a FakeClock> {
    GitHubClient::new(transport, API, &credentials("acme")).with_clock(clock)
}

pub fn repo_json(name: &str, branch: &str) -> Value {
    json!({ "id": 1, "name": name, "full_name": format!("acme/{name}"), "default_branch": branch })
}

pub fn repos_page(org: &str, page: u32) -> String {
    format!("/orgs/{org}/repos?per_page=100&page={page}")
}

pub fn not_found() -> HttpResponse {
    HttpResponse::new(404).with_json(&json!({
        "message": "Branch not protected",
        "documentation_url": "https://docs.github.com/rest"
    }))
}
