use std::error::Error;
use std::path::Path;
use std::process::{Child, Command};
use std::{fmt, io};

use reqwest::Url;

/// Port the Inertia ssr server listens on when the url doesn't set one.
pub const DEFAULT_SSR_PORT: u16 = 13714;

#[derive(Debug, Clone)]
pub struct NodeJsError {
    cause: String,
    description: String,
}

impl NodeJsError {
    pub fn new(cause: String, description: String) -> Self {
        NodeJsError { cause, description }
    }

    pub fn get_cause(&self) -> String {
        self.cause.clone()
    }

    pub fn get_description(&self) -> String {
        self.description.clone()
    }
}

impl fmt::Display for NodeJsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.cause, self.description)
    }
}

impl Error for NodeJsError {}

/// A running Inertia ssr server.
#[derive(Debug)]
pub struct NodeJsProc {
    child: Child,
    server: String,
}

impl NodeJsProc {
    /// Spawns `node <bundle> --port <port>`, adding `--watch` so that node restarts the
    /// server whenever the bundle is rebuilt.
    ///
    /// # Errors
    /// Returns a [`NodeJsError`] if the bundle doesn't exist or if [node] can't be spawned.
    ///
    /// [node]: https://nodejs.org
    ///
    /// Call [`NodeJsProc::kill`] before the application shuts down, otherwise the Node.js
    /// process outlives it.
    pub fn start(bundle: &str, server_url: &Url, watch: bool) -> Result<Self, NodeJsError> {
        let bundle = Path::new(bundle);

        if !bundle.is_file() {
            return Err(NodeJsError::new(
                "Invalid path".into(),
                format!("No ssr bundle found at {}.", bundle.display()),
            ));
        }

        let bundle = bundle.to_str().ok_or_else(|| {
            NodeJsError::new(
                "Invalid path".into(),
                "The ssr bundle path contains invalid UTF-8 characters.".into(),
            )
        })?;

        let port = server_url.port().unwrap_or(DEFAULT_SSR_PORT);
        let child = Command::new("node")
            .args(node_args(bundle, port, watch))
            .spawn()
            .map_err(|err| {
                NodeJsError::new(
                    "Process error".into(),
                    format!("Failed to spawn node: {}", err),
                )
            })?;

        log::debug!(
            "Started the Inertia ssr server {} on port {} (watch: {})",
            bundle,
            port,
            watch
        );

        Ok(NodeJsProc {
            child,
            server: server_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Asks the server to shut itself down, killing the process if it doesn't answer.
    pub async fn kill(mut self) -> io::Result<()> {
        let shutdown = reqwest::Client::new()
            .get(format!("{}/shutdown", self.server))
            .send()
            .await;

        match shutdown {
            Ok(_) => Ok(()),
            Err(err) => {
                log::warn!("The ssr server didn't shut down ({}), killing it", err);
                self.child.kill()
            }
        }
    }
}

fn node_args(bundle: &str, port: u16, watch: bool) -> Vec<String> {
    let mut args = Vec::with_capacity(4);
    if watch {
        args.push("--watch".to_string());
    }

    args.extend([bundle.to_string(), "--port".to_string(), port.to_string()]);
    args
}
