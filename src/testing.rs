//! Shared test doubles: a recording SMS sender, credential fixtures, and a
//! fake provider HTTP server.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::{
    AppState, Config, CredentialSource, SmsCredentials, ENV_ACCOUNT_SID, ENV_AUTH_TOKEN,
    ENV_FROM_PHONE, ENV_TO_PHONE,
};
use crate::sms::{OutboundMessage, SendError, SmsSender};

pub const FROM_PHONE: &str = "+12175550100";
pub const TO_PHONE: &str = "+12175550199";

/// A complete, valid SMS environment
pub fn sms_env() -> HashMap<String, String> {
    HashMap::from([
        (ENV_ACCOUNT_SID.to_string(), "AC123".to_string()),
        (ENV_AUTH_TOKEN.to_string(), "secret".to_string()),
        (ENV_FROM_PHONE.to_string(), FROM_PHONE.to_string()),
        (ENV_TO_PHONE.to_string(), TO_PHONE.to_string()),
    ])
}

/// Records every message instead of sending it
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<OutboundMessage>>,
    /// When set, every send is rejected with this provider message
    pub reject_with: Option<Option<String>>,
}

impl RecordingSender {
    pub fn rejecting(message: Option<&str>) -> Self {
        Self {
            sent: Mutex::default(),
            reject_with: Some(message.map(String::from)),
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for RecordingSender {
    async fn send(
        &self,
        _credentials: &SmsCredentials,
        message: &OutboundMessage,
    ) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.reject_with {
            Some(message) => Err(SendError::Rejected {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn state_with(
    sender: Arc<RecordingSender>,
    env: HashMap<String, String>,
) -> Arc<AppState> {
    let config = Config::defaults().unwrap();
    let credentials: Arc<dyn CredentialSource> = Arc::new(env);
    Arc::new(AppState::with_parts(config, sender, credentials))
}

/// What the fake provider saw
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub form: HashMap<String, String>,
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

/// Start a fake provider answering every request with `status` and `body`
pub async fn spawn_provider(status: StatusCode, body: &'static str) -> (SocketAddr, Captured) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::default();
    let log = Arc::clone(&captured);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let log = Arc::clone(&log);
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let log = Arc::clone(&log);
                    async move {
                        let request = capture(req).await;
                        log.lock().unwrap().push(request);
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(body)))
                                .unwrap(),
                        )
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (addr, captured)
}

async fn capture(req: Request<Incoming>) -> CapturedRequest {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let authorization = header("authorization");
    let content_type = header("content-type");

    let bytes = req.into_body().collect().await.unwrap().to_bytes();
    let encoded = String::from_utf8(bytes.to_vec()).unwrap();
    let url = reqwest::Url::parse(&format!("http://form.local/?{encoded}")).unwrap();
    let form = url.query_pairs().into_owned().collect();

    CapturedRequest {
        method,
        path,
        authorization,
        content_type,
        form,
    }
}

/// An address nothing is listening on
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
