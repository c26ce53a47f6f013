// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted in-memory transport, tracing setup, and log capture.

use async_trait::async_trait;
use ebcli::api::{Params, ServiceError, Transport, TransportError};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Once};
use tracing_subscriber::fmt::MakeWriter;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("ebcli=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Collects formatted log output in memory for assertions.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl LogCapture {
    /// Install a debug-level subscriber writing into this capture for the
    /// current thread. Logs stop being captured when the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Number of captured lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.contents().lines().filter(|l| l.contains(needle)).count()
    }
}

pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buf: self.buf.clone(),
        }
    }
}

/// One recorded transport invocation.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Invocation {
    pub service: String,
    pub operation: String,
    pub params: Params,
    pub user_agent: Option<String>,
}

/// Replays scripted responses in order; the last one repeats forever.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Value, TransportError>>>,
    last: Mutex<Option<Result<Value, TransportError>>>,
    invocations: Mutex<Vec<Invocation>>,
    user_agent: Option<String>,
    user_agent_sets: usize,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new(script: Vec<Result<Value, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            invocations: Mutex::new(Vec::new()),
            user_agent: None,
            user_agent_sets: 0,
        }
    }

    /// Always fail with the same error.
    pub fn always(err: TransportError) -> Self {
        Self::new(vec![Err(err)])
    }

    /// `failures` copies of `err`, then `success`.
    pub fn failing_then(err: TransportError, failures: usize, success: Value) -> Self {
        let mut script: Vec<_> = (0..failures).map(|_| Err(err.clone())).collect();
        script.push(Ok(success));
        Self::new(script)
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.invocations.lock().len()
    }

    pub fn user_agent_sets(&self) -> usize {
        self.user_agent_sets
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = Some(user_agent.to_string());
        self.user_agent_sets += 1;
    }

    async fn invoke(
        &self,
        service: &str,
        operation: &str,
        params: &Params,
    ) -> Result<Value, TransportError> {
        self.invocations.lock().push(Invocation {
            service: service.to_string(),
            operation: operation.to_string(),
            params: params.clone(),
            user_agent: self.user_agent.clone(),
        });

        let next = self.script.lock().pop_front();
        match next {
            Some(response) => {
                *self.last.lock() = Some(response.clone());
                response
            }
            None => self
                .last
                .lock()
                .clone()
                .unwrap_or_else(|| Err(TransportError::Connection("script is empty".to_string()))),
        }
    }
}

/// The canonical 500 used throughout the retry tests.
#[allow(dead_code)]
pub fn internal_server_error() -> TransportError {
    ServiceError::new(Some(500), "500 Internal Server Error")
        .with_raw(json!({
            "ResponseMetadata": {"HTTPStatusCode": 500},
            "Error": {"Message": "500 Internal Server Error"}
        }))
        .into()
}
