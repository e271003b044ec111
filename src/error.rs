use crate::eval::Severity;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot resolve {host}: {source}")]
    Resolve {
        host: String,
        source: std::io::Error,
    },

    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        source: std::io::Error,
    },

    #[error("ssh {context} failed: {source}")]
    Ssh {
        context: &'static str,
        source: ssh2::Error,
    },

    #[error("authentication failed for {user}: {source}")]
    Auth { user: String, source: ssh2::Error },

    #[error("no authentication method configured (set a password or key_path)")]
    MissingCredentials,

    #[error("incomplete configuration: {0}")]
    Config(String),

    #[error("remote command `{command}` exited {exit_code} with no output")]
    RemoteCommand { command: String, exit_code: i32 },

    #[error("malformed controller report: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Every pre-evaluation failure maps to UNKNOWN; the evaluator never
    /// produces that severity itself.
    pub fn severity(&self) -> Severity {
        Severity::Unknown
    }
}

pub type Result<T> = std::result::Result<T, Error>;
