use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::debug;

use crate::error::OracleError;

use super::oracle::{Oracle, OracleRequest};

/// Oracle that asks an external program for a move.
///
/// The request prompt is written to the program's stdin, and the first line
/// of its stdout is the reply. The program is killed if it doesn't answer
/// within the timeout.
pub struct CommandOracle {
    command: Vec<String>,
    timeout: Duration,
}

impl CommandOracle {
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        CommandOracle { command, timeout }
    }

    fn spawn(&self) -> Result<Child, OracleError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| OracleError::Failed("no oracle command configured".to_string()))?;
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(child)
    }

    fn ask(&self, child: &mut Child, prompt: &str) -> Result<String, OracleError> {
        if let Some(mut stdin) = child.stdin.take() {
            // Programs may answer without reading the prompt.
            match stdin.write_all(prompt.as_bytes()) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e.into()),
                _ => {}
            }
        }

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| OracleError::Failed("oracle stdout unavailable".to_string()))?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut line = String::new();
            let result = BufReader::new(stdout).read_line(&mut line).map(|_| line);
            let _ = tx.send(result);
        });

        let line = match rx.recv_timeout(self.timeout) {
            Ok(result) => result?,
            Err(RecvTimeoutError::Timeout) => return Err(OracleError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(OracleError::Failed("oracle reader exited".to_string()))
            }
        };

        if !line.trim().is_empty() {
            return Ok(line.trim().to_string());
        }
        match child.try_wait()? {
            Some(status) if !status.success() => {
                Err(OracleError::Failed(format!("oracle exited with {status}")))
            }
            _ => Err(OracleError::EmptyReply),
        }
    }
}

impl Oracle for CommandOracle {
    fn name(&self) -> &str {
        "command"
    }

    fn propose(&mut self, request: &OracleRequest) -> Result<String, OracleError> {
        let mut child = self.spawn()?;
        let reply = self.ask(&mut child, &request.prompt());
        // Reap the child whatever happened; it may still be running.
        let _ = child.kill();
        let _ = child.wait();
        if let Ok(reply) = &reply {
            debug!("command oracle replied {:?}", reply);
        }
        reply
    }
}
