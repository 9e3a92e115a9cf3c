use crate::provider::{io_error, ProviderError};
use std::collections::BTreeMap;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub binary: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env_overrides: BTreeMap<String, String>,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
            cwd: None,
            env_overrides: BTreeMap::new(),
            timeout,
        }
    }

    pub fn command_form(&self) -> String {
        if self.args.is_empty() {
            self.binary.clone()
        } else {
            format!("{} {}", self.binary, self.args.join(" "))
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
}

/// Spawns `spec`, feeds `stdin`, and collects output. The child is killed
/// once `spec.timeout` elapses.
pub fn run_command(spec: &CommandSpec, stdin: &str) -> Result<CommandOutput, ProviderError> {
    let cwd = spec
        .cwd
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let mut command = Command::new(&spec.binary);
    command
        .current_dir(&cwd)
        .args(&spec.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    for (k, v) in &spec.env_overrides {
        command.env(k, v);
    }

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ProviderError::MissingBinary {
                binary: spec.binary.clone(),
            })
        }
        Err(err) => return Err(io_error(&cwd, err)),
    };

    if let Some(mut pipe) = child.stdin.take() {
        let payload = stdin.to_string();
        thread::spawn(move || {
            let _ = pipe.write_all(payload.as_bytes());
        });
    }

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io_error(&cwd, std::io::Error::other("missing stdout pipe")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io_error(&cwd, std::io::Error::other("missing stderr pipe")))?;

    let stdout_reader = thread::spawn(move || {
        let mut buf = String::new();
        let mut reader = BufReader::new(stdout);
        let _ = reader.read_to_string(&mut buf);
        buf
    });
    let stderr_reader = thread::spawn(move || {
        let mut buf = String::new();
        let mut reader = BufReader::new(stderr);
        let _ = reader.read_to_string(&mut buf);
        buf
    });

    let start = Instant::now();
    let exit_status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > spec.timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProviderError::Timeout {
                        binary: spec.binary.clone(),
                        timeout_ms: spec.timeout.as_millis() as u64,
                    });
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(err) => return Err(io_error(&cwd, err)),
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    if !exit_status.success() {
        return Err(ProviderError::NonZeroExit {
            binary: spec.binary.clone(),
            exit_code: exit_status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code: exit_status.code(),
        elapsed: start.elapsed(),
    })
}
