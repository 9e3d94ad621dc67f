use crate::{
    error::{Result, TutorError},
    gemini::ContentGenerator,
    tutor::retry::Sleeper,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Records requested pauses instead of waiting.
#[derive(Default)]
pub(crate) struct RecordingSleeper {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub(crate) fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

/// Scripted stand-in for the hosted model.
///
/// Text replies are consumed in order; once the script runs out every call
/// returns `fallback_text`. Image prompts containing "fail" error out.
pub(crate) struct FakeGenerator {
    text_replies: Mutex<VecDeque<Result<String>>>,
    fallback_text: Option<String>,
    text_calls: AtomicUsize,
    image_prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub(crate) fn new() -> Self {
        Self {
            text_replies: Mutex::new(VecDeque::new()),
            fallback_text: None,
            text_calls: AtomicUsize::new(0),
            image_prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self {
            fallback_text: Some(text.to_string()),
            ..Self::new()
        }
    }

    pub(crate) fn then(self, reply: Result<String>) -> Self {
        self.text_replies.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn image_prompts(&self) -> Vec<String> {
        self.image_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reply) = self.text_replies.lock().unwrap().pop_front() {
            return reply;
        }
        self.fallback_text
            .clone()
            .ok_or_else(|| TutorError::ResponseError("no scripted reply".into()))
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        if prompt.contains("fail") {
            return Err(TutorError::ServiceError {
                status: 500,
                message: "image backend down".into(),
            });
        }
        Ok(prompt.as_bytes().to_vec())
    }
}

/// Serves a single canned HTTP reply on a random local port.
///
/// Returns the base URL and a handle resolving to the raw request received.
pub(crate) async fn stub_http(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let reply = format!(
            "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (base_url, handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
