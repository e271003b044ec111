use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use log::{debug, warn};
use ssh2::Session;
use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Command execution on the probed host. The production implementation is
/// [`SshShell`]; tests substitute a canned one.
pub trait RemoteShell {
    fn run(&self, command: &str) -> Result<String>;
}

/// Single-shot SSH session runner. One connection per probe, no reuse,
/// no retry.
#[derive(Debug, Clone)]
pub struct SshShell {
    conn: ConnectionConfig,
}

impl SshShell {
    pub fn new(conn: ConnectionConfig) -> Self {
        Self { conn }
    }

    fn connect(&self) -> Result<Session> {
        let host = self
            .conn
            .host
            .as_deref()
            .ok_or_else(|| Error::Config("no host configured".to_string()))?;
        let user = self
            .conn
            .user
            .as_deref()
            .ok_or_else(|| Error::Config("no user configured".to_string()))?;
        let timeout = Duration::from_secs(self.conn.timeout_secs);

        let addr = (host, self.conn.port)
            .to_socket_addrs()
            .map_err(|e| Error::Resolve {
                host: host.to_string(),
                source: e,
            })?
            .next()
            .ok_or_else(|| Error::Resolve {
                host: host.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "name resolved to no addresses",
                ),
            })?;

        debug!("connecting to {} ({})", host, addr);
        let tcp = TcpStream::connect_timeout(&addr, timeout).map_err(|e| Error::Connect {
            host: host.to_string(),
            source: e,
        })?;
        tcp.set_read_timeout(Some(timeout))
            .and_then(|()| tcp.set_write_timeout(Some(timeout)))
            .map_err(|e| Error::Connect {
                host: host.to_string(),
                source: e,
            })?;

        let mut session = Session::new().map_err(|e| Error::Ssh {
            context: "session init",
            source: e,
        })?;
        session.set_tcp_stream(tcp);
        session.handshake().map_err(|e| Error::Ssh {
            context: "handshake",
            source: e,
        })?;

        if let Some(ref key) = self.conn.key_path {
            debug!("authenticating as {} with key {}", user, key.display());
            session
                .userauth_pubkey_file(user, None, key, None)
                .map_err(|e| Error::Auth {
                    user: user.to_string(),
                    source: e,
                })?;
        } else if let Some(ref password) = self.conn.password {
            debug!("authenticating as {} with password", user);
            session
                .userauth_password(user, password)
                .map_err(|e| Error::Auth {
                    user: user.to_string(),
                    source: e,
                })?;
        } else {
            return Err(Error::MissingCredentials);
        }

        Ok(session)
    }
}

impl RemoteShell for SshShell {
    fn run(&self, command: &str) -> Result<String> {
        let session = self.connect()?;
        let host = self.conn.host.clone().unwrap_or_default();

        let mut channel = session.channel_session().map_err(|e| Error::Ssh {
            context: "channel open",
            source: e,
        })?;
        debug!("running `{}`", command);
        channel.exec(command).map_err(|e| Error::Ssh {
            context: "exec",
            source: e,
        })?;

        let mut stdout = String::new();
        channel
            .read_to_string(&mut stdout)
            .map_err(|e| Error::Connect {
                host: host.clone(),
                source: e,
            })?;

        let mut stderr = String::new();
        if channel.stderr().read_to_string(&mut stderr).is_ok() && !stderr.trim().is_empty() {
            debug!("remote stderr: {}", stderr.trim());
        }

        channel.wait_close().map_err(|e| Error::Ssh {
            context: "channel close",
            source: e,
        })?;
        let exit_code = channel.exit_status().map_err(|e| Error::Ssh {
            context: "exit status",
            source: e,
        })?;

        if exit_code != 0 {
            if stdout.trim().is_empty() {
                return Err(Error::RemoteCommand {
                    command: command.to_string(),
                    exit_code,
                });
            }
            // Some firmware revisions set a non-zero exit on a clean report.
            warn!("`{}` exited {} but produced output", command, exit_code);
        }

        debug!("captured {} bytes of output", stdout.len());
        Ok(stdout)
    }
}
