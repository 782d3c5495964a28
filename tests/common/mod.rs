//! Shared test utilities for CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let server = ListingServer::json(200, "[]");
//! let fixture = TestFixture::new().with_site(&server.base_url());
//! fixture.command().arg("build").assert().success();
//! ```

#![allow(dead_code)]

use assert_fs::prelude::*;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{ListingServer, Reply, TestFixture};
}

/// Fake `stagit`: writes `log.html` from the clone's sidecar files.
pub const FAKE_STAGIT: &str = r#"#!/bin/sh
set -e
repo="$1"
name=$(basename "$repo")
{
  echo "<h1>$name</h1>"
  echo "<p class=\"desc\">$(cat "$repo/.git/description")</p>"
  echo "<p class=\"owner\">$(cat "$repo/.git/owner")</p>"
  echo "<p class=\"url\">$(cat "$repo/.git/url")</p>"
} > log.html
echo "<ul></ul>" > files.html
"#;

/// Fake `stagit-index`: prints one table row per repository argument and,
/// like the real one, fails without any.
pub const FAKE_STAGIT_INDEX: &str = r#"#!/bin/sh
if [ $# -lt 1 ]; then
  echo "usage: stagit-index [repodir...]" >&2
  exit 1
fi
echo "<table>"
for repo in "$@"; do
  echo "<tr><td>$(basename "$repo")</td><td>$(cat "$repo/.git/description")</td></tr>"
done
echo "</table>"
"#;

/// One canned HTTP response. `{base}` in headers or body is replaced by the
/// server's base URL.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Minimal HTTP/1.1 responder on a loopback port standing in for the
/// listing API. Replies are served in order; the last one repeats.
pub struct ListingServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ListingServer {
    pub fn json(status: u16, body: &str) -> Self {
        Self::start(vec![Reply::json(status, body)])
    }

    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let served = requests.clone();
        let base = base_url.clone();
        thread::spawn(move || {
            for (i, stream) in listener.incoming().enumerate() {
                let Ok(stream) = stream else { continue };
                let reply = &replies[i.min(replies.len() - 1)];
                respond(stream, reply, &base, &served);
            }
        });

        Self { base_url, requests }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    /// Request lines received so far, e.g. `GET /users/x/repos?per_page=100 HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Records the request line before replying, so a client that has seen the
/// response always finds its request in the log.
fn respond(stream: TcpStream, reply: &Reply, base: &str, served: &Mutex<Vec<String>>) -> Option<()> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 || line == "\r\n" {
            break;
        }
    }

    served.lock().unwrap().push(request_line.trim_end().to_string());

    let body = reply.body.replace("{base}", base);
    let mut response = format!(
        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        body.len()
    );
    for (name, value) in &reply.headers {
        response.push_str(&format!("{}: {}\r\n", name, value.replace("{base}", base)));
    }
    response.push_str("\r\n");
    response.push_str(&body);

    let mut stream = stream;
    stream.write_all(response.as_bytes()).ok()?;
    stream.flush().ok()
}

/// A temporary working directory laid out like a site checkout: static
/// assets, fake renderer binaries and a `stagit-site.yaml`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Adds static assets, the fake renderer and a config pointing at `api_url`.
    pub fn with_site(self, api_url: &str) -> Self {
        self.with_static_assets()
            .with_fake_renderer()
            .with_config(&format!(
                "account: tester\nowner: Test Owner\napi_url: {}\nrenderer_dir: bin\ncommand_timeout_secs: 60\nhttp_timeout_secs: 10\n",
                api_url
            ))
    }

    pub fn with_static_assets(self) -> Self {
        for (name, content) in [
            ("favicon.png", "favicon"),
            ("logo.png", "logo"),
            ("style.css", "body {}"),
        ] {
            self.temp_dir
                .child("static")
                .child(name)
                .write_str(content)
                .expect("Failed to write static asset");
        }
        self
    }

    pub fn with_fake_renderer(self) -> Self {
        self.write_executable("bin/stagit", FAKE_STAGIT);
        self.write_executable("bin/stagit-index", FAKE_STAGIT_INDEX);
        self
    }

    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("stagit-site.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    fn write_executable(&self, path: &str, content: &str) {
        let child = self.temp_dir.child(path);
        child.write_str(content).expect("Failed to write script");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(child.path(), std::fs::Permissions::from_mode(0o755))
                .expect("Failed to mark script executable");
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `stagit-site` command running in the fixture directory, with proxies
    /// disabled for loopback requests.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stagit-site");
        cmd.current_dir(self.path())
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env("no_proxy", "127.0.0.1,localhost")
            .env_remove("GITHUB_TOKEN")
            .env_remove("STAGIT_SITE_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
