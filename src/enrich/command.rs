//! External command backend.
//!
//! Runs a user-configured program for every request. The request is written
//! to the program's stdin as a single JSON object:
//!
//! ```json
//! {"task": "translate", "text": "Hello", "source": "eng_Latn", "target": "hin_Deva"}
//! {"task": "classify", "text": "Hello"}
//! {"task": "reply", "text": "<prompt>"}
//! ```
//!
//! For `translate` and `reply` the trimmed stdout is the answer. For
//! `classify` stdout must contain a JSON object (or array of objects) with
//! `label` and `score` fields, optionally surrounded by other text.

use std::io::{self, ErrorKind, Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use super::language::{Language, SOURCE_LANGUAGE};
use super::{
    Classification, EmotionClassifier, EnrichError, EnrichResult, ReplyGenerator, Translator,
};
use crate::config::EnrichConfig;

/// How often to check whether the child has exited.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Task {
    Translate,
    Classify,
    Reply,
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    task: Task,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
}

/// Backend that shells out to an external model runner.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandBackend {
    /// Create a backend running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: Duration::from_secs(EnrichConfig::default().timeout_secs),
        }
    }

    /// Build from the `[enrich]` config section.
    pub fn from_config(config: &EnrichConfig) -> EnrichResult<Self> {
        let program = config
            .program
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or(EnrichError::NotConfigured)?;

        Ok(Self::new(program, config.args.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn invoke(&self, request: &Request<'_>) -> EnrichResult<String> {
        let payload =
            serde_json::to_vec(request).map_err(|e| EnrichError::InvalidResponse(e.to_string()))?;

        debug!(program = %self.program, task = ?request.task, "invoking enrichment backend");

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    EnrichError::NotAvailable(format!("{} not found in PATH", self.program))
                }
                _ => EnrichError::Io(e),
            })?;

        let output = run_with_timeout(child, &payload, self.timeout)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(EnrichError::ExitCode {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Translator for CommandBackend {
    fn translate(&self, text: &str, target: &Language) -> EnrichResult<String> {
        self.invoke(&Request {
            task: Task::Translate,
            text,
            source: Some(SOURCE_LANGUAGE.model_code),
            target: Some(target.model_code),
        })
    }
}

impl EmotionClassifier for CommandBackend {
    fn classify(&self, text: &str) -> EnrichResult<Classification> {
        let response = self.invoke(&Request {
            task: Task::Classify,
            text,
            source: None,
            target: None,
        })?;
        parse_classification(&response)
    }
}

impl ReplyGenerator for CommandBackend {
    fn generate(&self, prompt: &str) -> EnrichResult<String> {
        self.invoke(&Request {
            task: Task::Reply,
            text: prompt,
            source: None,
            target: None,
        })
    }
}

struct Output {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Feed `input` to the child and wait for it, killing it after `timeout`.
///
/// stdin is fed and stdout/stderr are drained on background threads, so a
/// child that never reads its input or floods a pipe cannot stall the
/// deadline check.
fn run_with_timeout(mut child: Child, input: &[u8], timeout: Duration) -> EnrichResult<Output> {
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);
    let stdin = child.stdin.take().map(|pipe| feed(pipe, input.to_vec()));

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EnrichError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    };

    if let Some(Ok(Err(e))) = stdin.map(JoinHandle::join) {
        return Err(EnrichError::Io(e));
    }

    Ok(Output {
        status,
        stdout: collect(stdout),
        stderr: collect(stderr),
    })
}

/// Write `input` to the child's stdin and close it.
fn feed(mut pipe: ChildStdin, input: Vec<u8>) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || match pipe.write_all(&input) {
        // Child exited without reading its input
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    })
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).ok();
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Extract the first JSON object or array embedded in `text`.
fn extract_json(text: &str) -> EnrichResult<serde_json::Value> {
    let start = text
        .find(['{', '['])
        .ok_or_else(|| EnrichError::InvalidResponse("no JSON found in response".to_string()))?;
    let end = text
        .rfind(['}', ']'])
        .filter(|&end| end > start)
        .ok_or_else(|| EnrichError::InvalidResponse("unterminated JSON in response".to_string()))?;

    serde_json::from_str(&text[start..=end])
        .map_err(|e| EnrichError::InvalidResponse(format!("malformed JSON: {}", e)))
}

/// Parse a `{label, score}` classification, taking the first element of an array.
fn parse_classification(response: &str) -> EnrichResult<Classification> {
    let value = extract_json(response)?;
    let object = match &value {
        serde_json::Value::Array(items) => items.first(),
        other => Some(other),
    }
    .ok_or_else(|| EnrichError::InvalidResponse("empty classification list".to_string()))?;

    let label = object
        .get("label")
        .and_then(|l| l.as_str())
        .ok_or_else(|| EnrichError::InvalidResponse("missing string field `label`".to_string()))?;
    let score = object
        .get("score")
        .and_then(|s| s.as_f64())
        .ok_or_else(|| EnrichError::InvalidResponse("missing numeric field `score`".to_string()))?;

    Ok(Classification {
        label: label.to_string(),
        score: score as f32,
    })
}
