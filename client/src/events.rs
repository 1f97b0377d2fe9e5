//! Fire-and-forget analytics events.
//!
//! Events are posted as JSON to the collector's `/api/event` endpoint with
//! whatever session id the jar holds. Delivery is best effort: a transport
//! failure is logged at debug level and dropped, never retried and never
//! surfaced to the caller. Responses are ignored entirely.

use cookie::CookieJar;
use serde::Serialize;
use tracing::debug;

use crate::session::get_or_create_session_id;

/// Payload accepted by the backend collector.
#[derive(Clone, Debug, Serialize)]
pub struct Event {
    pub session_id: String,
    pub event_type: String,
    pub module_slug: Option<String>,
    pub page: String,
}

/// Posts analytics events to the platform collector.
#[derive(Clone)]
pub struct EventRecorder {
    http: reqwest::Client,
    endpoint: String,
}

impl EventRecorder {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/event", base_url.trim_end_matches('/')),
        }
    }

    /// Record one event for the session in `jar`, creating the identity on
    /// first use. Resolves once the send has completed or failed.
    pub async fn record(
        &self,
        jar: &mut CookieJar,
        event_type: &str,
        module_slug: Option<&str>,
        page: &str,
    ) {
        let event = self.build_event(jar, event_type, module_slug, page);
        self.send(event).await;
    }

    /// Same as [`record`](Self::record), but dispatched on the runtime so
    /// the caller never waits on the network. No ordering guarantee
    /// relative to later events.
    pub fn record_detached(
        &self,
        jar: &mut CookieJar,
        event_type: &str,
        module_slug: Option<&str>,
        page: &str,
    ) {
        let event = self.build_event(jar, event_type, module_slug, page);
        let recorder = self.clone();

        tokio::spawn(async move {
            recorder.send(event).await;
        });
    }

    fn build_event(
        &self,
        jar: &mut CookieJar,
        event_type: &str,
        module_slug: Option<&str>,
        page: &str,
    ) -> Event {
        Event {
            session_id: get_or_create_session_id(jar),
            event_type: event_type.to_owned(),
            module_slug: module_slug.map(str::to_owned),
            page: page.to_owned(),
        }
    }

    async fn send(&self, event: Event) {
        if let Err(err) = self.http.post(&self.endpoint).json(&event).send().await {
            debug!("Event record failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
    use cookie::{Cookie, CookieJar};
    use serde_json::Value;
    use tokio::{net::TcpListener, sync::mpsc};

    use super::EventRecorder;
    use crate::session::SESSION_COOKIE;

    async fn spawn_collector() -> (String, mpsc::Receiver<(String, Value)>) {
        let (tx, rx) = mpsc::channel(8);

        let app = Router::new()
            .route(
                "/api/event",
                post(
                    |State(tx): State<mpsc::Sender<(String, Value)>>,
                     headers: HeaderMap,
                     Json(body): Json<Value>| async move {
                        let content_type = headers
                            .get("content-type")
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or_default()
                            .to_string();
                        tx.send((content_type, body)).await.unwrap();
                        "ok"
                    },
                ),
            )
            .with_state(tx);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), rx)
    }

    #[tokio::test]
    async fn records_one_event_with_session_identity() {
        let (base, mut rx) = spawn_collector().await;
        let recorder = EventRecorder::new(&base);
        let mut jar = CookieJar::new();

        recorder.record(&mut jar, "page_view", None, "/dashboard").await;

        let (content_type, body) = rx.recv().await.unwrap();
        let session_id = jar.get(SESSION_COOKIE).unwrap().value().to_string();

        assert!(content_type.starts_with("application/json"));
        assert_eq!(body["event_type"], "page_view");
        assert_eq!(body["module_slug"], Value::Null);
        assert_eq!(body["page"], "/dashboard");
        assert_eq!(body["session_id"], session_id.as_str());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn reuses_existing_session_identity() {
        let (base, mut rx) = spawn_collector().await;
        let recorder = EventRecorder::new(&base);
        let mut jar = CookieJar::new();
        jar.add_original(Cookie::new(SESSION_COOKIE, "abc123"));

        recorder
            .record(
                &mut jar,
                "module_view",
                Some("ai-foundations:introduction"),
                "/courses/ai-foundations",
            )
            .await;

        let (_, body) = rx.recv().await.unwrap();

        assert_eq!(body["session_id"], "abc123");
        assert_eq!(body["module_slug"], "ai-foundations:introduction");
    }

    #[tokio::test]
    async fn failed_delivery_is_swallowed() {
        // Nothing listens on the discard port; the send fails fast.
        let recorder = EventRecorder::new("http://127.0.0.1:9");
        let mut jar = CookieJar::new();

        recorder.record(&mut jar, "page_view", None, "/").await;

        assert!(jar.get(SESSION_COOKIE).is_some());
    }
}
