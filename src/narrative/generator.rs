use crate::error::GenerationFailure;
use serde_json::Value;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Handle to an external text-generation service. Callers construct it and
/// pass it in explicitly; nothing in the crate keeps a global client.
pub trait TextGenerator {
    fn generate(&self, payload: &Value) -> Result<String, GenerationFailure>;
}

/// Runs a program per request: the JSON payload goes to its stdin and its
/// stdout is taken as the reply.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, payload: &Value) -> Result<String, GenerationFailure> {
        let input = serde_json::to_vec(payload)
            .map_err(|e| GenerationFailure::Call(format!("payload encoding: {e}")))?;

        tracing::info!(program = %self.program, bytes = input.len(), "calling narrative generator");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GenerationFailure::Call(format!("{}: {e}", self.program)))?;

        let stdin = child.stdin.take();
        let output = std::thread::scope(|scope| {
            scope.spawn(move || {
                if let Some(mut stdin) = stdin {
                    // A generator that ignores its input may close the pipe early.
                    if let Err(error) = stdin.write_all(&input) {
                        if error.kind() != ErrorKind::BrokenPipe {
                            tracing::warn!(%error, "failed to write generator payload");
                        }
                    }
                }
            });
            child.wait_with_output()
        })
        .map_err(|e| GenerationFailure::Call(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerationFailure::Call(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| GenerationFailure::Call(format!("reply is not utf-8: {e}")))
    }
}
