//! Splunk HTTP event collector sender
//!
//! Ships each message's raw payload as a HEC event. Groups are filtered child
//! by child and the survivors go out in one batch request. Transport failures
//! never reach the logging call site; they go to the sender's error handler.

use crate::core::{JournalError, LevelInfo, Priority, Result, Sender, SenderBase};
use crate::message::Composer;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Environment variable holding the collector URL
pub const SPLUNK_SERVER_URL_ENV: &str = "JOURNAL_SPLUNK_SERVER_URL";
/// Environment variable holding the collector token
pub const SPLUNK_CLIENT_TOKEN_ENV: &str = "JOURNAL_SPLUNK_CLIENT_TOKEN";

/// Everything needed to reach a collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplunkConnectionInfo {
    pub server_url: String,
    pub token: String,
}

impl SplunkConnectionInfo {
    pub fn new(server_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            token: token.into(),
        }
    }

    /// Read [`SPLUNK_SERVER_URL_ENV`] and [`SPLUNK_CLIENT_TOKEN_ENV`]. Unset
    /// variables come back empty; [`validate`](Self::validate) catches them.
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var(SPLUNK_SERVER_URL_ENV).unwrap_or_default(),
            token: std::env::var(SPLUNK_CLIENT_TOKEN_ENV).unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// [`JournalError::Configuration`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(JournalError::config(
                "SplunkSender",
                "server_url",
                "must not be empty",
            ));
        }
        if self.token.is_empty() {
            return Err(JournalError::config("SplunkSender", "token", "must not be empty"));
        }
        Ok(())
    }
}

/// One collector event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HecEvent {
    /// Seconds since the epoch, millisecond precision
    pub time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcetype: Option<String>,
    pub event: serde_json::Value,
}

impl HecEvent {
    pub fn new(event: serde_json::Value) -> Self {
        Self {
            time: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
            host: std::env::var("HOSTNAME").ok().filter(|h| !h.is_empty()),
            source: None,
            sourcetype: None,
            event,
        }
    }

    #[must_use]
    pub fn with_sourcetype(mut self, sourcetype: impl Into<String>) -> Self {
        self.sourcetype = Some(sourcetype.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Transport used by [`SplunkSender`].
pub trait CollectorClient: Send {
    /// Prepare the connection. Called once, during sender construction.
    fn create(&mut self, server_url: &str, token: &str) -> Result<()>;

    fn write_event(&mut self, event: HecEvent) -> Result<()>;

    fn write_batch(&mut self, events: Vec<HecEvent>) -> Result<()>;

    fn close(&mut self) {}
}

/// Blocking HTTP client for the HEC REST endpoint.
#[cfg(feature = "splunk")]
pub struct HecClient {
    client: Option<reqwest::blocking::Client>,
    endpoint: String,
    authorization: String,
    timeout: std::time::Duration,
}

#[cfg(feature = "splunk")]
impl HecClient {
    pub fn new() -> Self {
        Self {
            client: None,
            endpoint: String::new(),
            authorization: String::new(),
            timeout: std::time::Duration::from_secs(5),
        }
    }

    /// Per-request timeout. Default: 5 seconds
    #[must_use]
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn post(&self, body: String) -> Result<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| JournalError::transport("HEC client not created"))?;

        let response = client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| JournalError::transport(format!("request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let detail = response.text().unwrap_or_default();
            Err(JournalError::transport(format!(
                "collector responded {}: {}",
                status, detail
            )))
        }
    }
}

#[cfg(feature = "splunk")]
impl Default for HecClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "splunk")]
impl CollectorClient for HecClient {
    fn create(&mut self, server_url: &str, token: &str) -> Result<()> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| JournalError::transport(format!("failed to build HEC client: {}", e)))?;

        self.endpoint = format!(
            "{}/services/collector/event",
            server_url.trim_end_matches('/')
        );
        self.authorization = format!("Splunk {}", token);
        self.client = Some(client);
        Ok(())
    }

    fn write_event(&mut self, event: HecEvent) -> Result<()> {
        self.post(serde_json::to_string(&event)?)
    }

    /// HEC batches are concatenated JSON objects in one body.
    fn write_batch(&mut self, events: Vec<HecEvent>) -> Result<()> {
        let body = events
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join("\n");
        self.post(body)
    }

    fn close(&mut self) {
        self.client = None;
    }
}

/// Sender for a Splunk HTTP event collector.
///
/// # Example
///
/// ```no_run
/// use rust_journaler::prelude::*;
///
/// let info = SplunkConnectionInfo::new("https://splunk.example.com:8088", "token");
/// let sender = SplunkSender::new("billing", info, LevelInfo::new(Priority::INFO, Priority::INFO))?;
/// let journaler = Journaler::new("billing", sender);
/// journaler.warning("invoice queue is backing up");
/// # Ok::<(), JournalError>(())
/// ```
pub struct SplunkSender {
    base: SenderBase,
    info: SplunkConnectionInfo,
    client: Mutex<Box<dyn CollectorClient>>,
}

impl SplunkSender {
    /// Sender backed by [`HecClient`].
    ///
    /// # Errors
    ///
    /// [`JournalError::Configuration`] for an empty URL or token,
    /// [`JournalError::InvalidPriority`] for an invalid level, or whatever
    /// the client reports while being created.
    #[cfg(feature = "splunk")]
    pub fn new(
        name: impl Into<String>,
        info: SplunkConnectionInfo,
        level: LevelInfo,
    ) -> Result<Self> {
        Self::with_client(name, info, level, HecClient::new())
    }

    /// Sender configured from the environment, accepting every priority.
    #[cfg(feature = "splunk")]
    pub fn from_env(name: impl Into<String>) -> Result<Self> {
        Self::new(
            name,
            SplunkConnectionInfo::from_env(),
            LevelInfo::new(Priority::DEBUG, Priority::DEBUG),
        )
    }

    /// Sender backed by a caller-supplied transport.
    pub fn with_client<C>(
        name: impl Into<String>,
        info: SplunkConnectionInfo,
        level: LevelInfo,
        mut client: C,
    ) -> Result<Self>
    where
        C: CollectorClient + 'static,
    {
        info.validate()?;
        let base = SenderBase::new(name, level)?;
        client.create(&info.server_url, &info.token)?;

        Ok(Self {
            base,
            info,
            client: Mutex::new(Box::new(client)),
        })
    }

    pub fn connection_info(&self) -> &SplunkConnectionInfo {
        &self.info
    }

    pub fn base(&self) -> &SenderBase {
        &self.base
    }

    fn event(&self, message: &dyn Composer) -> HecEvent {
        HecEvent::new(message.raw()).with_source(self.base.name())
    }

    fn send_batch(&self, message: &dyn Composer, children: &[Box<dyn Composer>]) {
        let batch: Vec<HecEvent> = children
            .iter()
            .filter(|m| self.base.should_log(m.as_ref()))
            .map(|m| self.event(m.as_ref()))
            .collect();

        if batch.is_empty() {
            return;
        }

        let count = batch.len() as u64;
        let result = self.client.lock().write_batch(batch);
        match result {
            Ok(()) => {
                self.base.metrics().record_sent(count);
            }
            Err(e) => self.base.handle_error(&e, message),
        }
    }

    fn send_single(&self, message: &dyn Composer) {
        if !self.base.should_log(message) {
            return;
        }

        let event = self.event(message);
        let result = self.client.lock().write_event(event);
        match result {
            Ok(()) => {
                self.base.metrics().record_sent(1);
            }
            Err(e) => self.base.handle_error(&e, message),
        }
    }
}

impl Sender for SplunkSender {
    fn name(&self) -> String {
        self.base.name()
    }

    fn set_name(&self, name: &str) {
        self.base.set_name(name);
    }

    fn level(&self) -> LevelInfo {
        self.base.level()
    }

    fn set_level(&self, level: LevelInfo) -> Result<()> {
        self.base.set_level(level)
    }

    fn send(&self, message: &dyn Composer) {
        if self.base.is_closed() {
            self.base
                .handle_error(&JournalError::closed(self.base.name()), message);
            return;
        }

        match message.as_group() {
            Some(group) => self.send_batch(message, group.messages()),
            None => self.send_single(message),
        }
    }

    fn close(&self) -> Result<()> {
        if self.base.mark_closed() {
            self.client.lock().close();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group;
    use crate::message::DefaultMessage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct MockState {
        fail_create: bool,
        fail_send: bool,
        num_sent: usize,
        calls: usize,
        closed: usize,
    }

    #[derive(Clone, Default)]
    struct MockClient(Arc<Mutex<MockState>>);

    impl MockClient {
        fn failing_create() -> Self {
            let mock = Self::default();
            mock.0.lock().fail_create = true;
            mock
        }
    }

    impl CollectorClient for MockClient {
        fn create(&mut self, _server_url: &str, _token: &str) -> Result<()> {
            if self.0.lock().fail_create {
                return Err(JournalError::transport("creation failed"));
            }
            Ok(())
        }

        fn write_event(&mut self, _event: HecEvent) -> Result<()> {
            let mut state = self.0.lock();
            state.calls += 1;
            if state.fail_send {
                return Err(JournalError::transport("write failed"));
            }
            state.num_sent += 1;
            Ok(())
        }

        fn write_batch(&mut self, events: Vec<HecEvent>) -> Result<()> {
            let mut state = self.0.lock();
            state.calls += 1;
            if state.fail_send {
                return Err(JournalError::transport("write failed"));
            }
            state.num_sent += events.len();
            Ok(())
        }

        fn close(&mut self) {
            self.0.lock().closed += 1;
        }
    }

    fn info() -> SplunkConnectionInfo {
        SplunkConnectionInfo::new("https://collector.local:8088", "token")
    }

    fn level() -> LevelInfo {
        LevelInfo::new(Priority::DEBUG, Priority::INFO)
    }

    fn sender_with_errors(mock: &MockClient) -> (SplunkSender, Arc<AtomicUsize>) {
        let sender = SplunkSender::with_client("name", info(), level(), mock.clone()).unwrap();
        let errors = Arc::new(AtomicUsize::new(0));
        let errors_clone = Arc::clone(&errors);
        sender.base().set_error_handler(Arc::new(
            move |_err: &JournalError, _msg: &dyn Composer| {
                errors_clone.fetch_add(1, Ordering::SeqCst);
            },
        ));
        (sender, errors)
    }

    fn mixed_group() -> crate::message::GroupComposer {
        group![
            DefaultMessage::with_priority(Priority::ALERT, "hello"),
            DefaultMessage::with_priority(Priority::DEBUG, "hello"),
            DefaultMessage::with_priority(Priority::ALERT, ""),
            DefaultMessage::with_priority(Priority::ALERT, "hello"),
        ]
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = SplunkConnectionInfo::new("", "token").validate().unwrap_err();
        assert!(err.to_string().contains("server_url"));

        let err = SplunkConnectionInfo::new("http://x", "").validate().unwrap_err();
        assert!(matches!(
            err,
            JournalError::Configuration { ref field, .. } if field == "token"
        ));

        let result = SplunkSender::with_client(
            "name",
            SplunkConnectionInfo::default(),
            level(),
            MockClient::default(),
        );
        assert!(matches!(result, Err(JournalError::Configuration { .. })));
    }

    #[cfg(feature = "splunk")]
    #[test]
    fn test_from_env() {
        std::env::set_var(SPLUNK_SERVER_URL_ENV, "https://collector.local:8088");
        std::env::set_var(SPLUNK_CLIENT_TOKEN_ENV, "secret");
        assert_eq!(
            SplunkConnectionInfo::from_env(),
            SplunkConnectionInfo::new("https://collector.local:8088", "secret")
        );
        let sender = SplunkSender::from_env("env").unwrap();
        assert_eq!(sender.name(), "env");
        assert_eq!(sender.level(), LevelInfo::new(Priority::DEBUG, Priority::DEBUG));

        std::env::set_var(SPLUNK_SERVER_URL_ENV, "");
        let err = SplunkSender::from_env("env").err().unwrap();
        assert!(matches!(
            err,
            JournalError::Configuration { ref field, .. } if field == "server_url"
        ));

        std::env::set_var(SPLUNK_SERVER_URL_ENV, "https://collector.local:8088");
        std::env::set_var(SPLUNK_CLIENT_TOKEN_ENV, "");
        let err = SplunkSender::from_env("env").err().unwrap();
        assert!(matches!(
            err,
            JournalError::Configuration { ref field, .. } if field == "token"
        ));

        std::env::remove_var(SPLUNK_SERVER_URL_ENV);
        std::env::remove_var(SPLUNK_CLIENT_TOKEN_ENV);
        assert_eq!(SplunkConnectionInfo::from_env(), SplunkConnectionInfo::default());
    }

    #[test]
    fn test_constructor_fails_when_client_create_fails() {
        let result = SplunkSender::with_client("name", info(), level(), MockClient::failing_create());
        assert!(matches!(result, Err(JournalError::Transport { .. })));
    }

    #[test]
    fn test_constructor_rejects_invalid_level() {
        let result = SplunkSender::with_client(
            "name",
            info(),
            LevelInfo::new(Priority::new(0), Priority::INFO),
            MockClient::default(),
        );
        assert!(matches!(result, Err(JournalError::InvalidPriority { .. })));
    }

    #[test]
    fn test_send_single() {
        let mock = MockClient::default();
        let (sender, errors) = sender_with_errors(&mock);
        sender.set_level(LevelInfo::new(Priority::INFO, Priority::INFO)).unwrap();

        sender.send(&DefaultMessage::with_priority(Priority::DEBUG, "hello"));
        assert_eq!(mock.0.lock().num_sent, 0);

        sender.send(&DefaultMessage::with_priority(Priority::ALERT, ""));
        assert_eq!(mock.0.lock().num_sent, 0);

        sender.send(&DefaultMessage::with_priority(Priority::ALERT, "world"));
        assert_eq!(mock.0.lock().num_sent, 1);
        assert_eq!(sender.base().metrics().sent_count(), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_send_single_with_error() {
        let mock = MockClient::default();
        let (sender, errors) = sender_with_errors(&mock);

        let m = DefaultMessage::with_priority(Priority::ALERT, "world");
        sender.send(&m);
        assert_eq!(mock.0.lock().num_sent, 1);

        mock.0.lock().fail_send = true;
        sender.send(&m);
        assert_eq!(mock.0.lock().num_sent, 1);
        assert_eq!(sender.base().metrics().sent_count(), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_batch_send() {
        let mock = MockClient::default();
        let (sender, _errors) = sender_with_errors(&mock);
        sender.set_level(LevelInfo::new(Priority::INFO, Priority::INFO)).unwrap();

        sender.send(&mixed_group());

        let state = mock.0.lock();
        assert_eq!(state.num_sent, 2);
        assert_eq!(state.calls, 1);
    }

    #[test]
    fn test_batch_send_with_error() {
        let mock = MockClient::default();
        let (sender, errors) = sender_with_errors(&mock);
        sender.set_level(LevelInfo::new(Priority::INFO, Priority::INFO)).unwrap();

        let g = mixed_group();
        sender.send(&g);
        assert_eq!(mock.0.lock().num_sent, 2);

        mock.0.lock().fail_send = true;
        sender.send(&g);
        assert_eq!(mock.0.lock().num_sent, 2);
        assert_eq!(sender.base().metrics().sent_count(), 2);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_batch_skips_transport() {
        let mock = MockClient::default();
        let (sender, _errors) = sender_with_errors(&mock);

        sender.send(&group![DefaultMessage::with_priority(Priority::ALERT, "")]);
        assert_eq!(mock.0.lock().calls, 0);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mock = MockClient::default();
        let (sender, errors) = sender_with_errors(&mock);

        sender.close().unwrap();
        sender.close().unwrap();
        assert_eq!(mock.0.lock().closed, 1);

        sender.send(&DefaultMessage::with_priority(Priority::ALERT, "late"));
        assert_eq!(mock.0.lock().calls, 0);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_serialization() {
        let event = HecEvent::new(serde_json::json!({"k": 1})).with_source("svc");
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["source"], "svc");
        assert_eq!(json["event"]["k"], 1);
        assert!(json.get("sourcetype").is_none());
    }
}
