//! Shared fixtures for app integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pothole_report_api::{ApiClient, HttpResponse, HttpTransport, MultipartForm, TransportError};
use pothole_report_app::ReportController;
use pothole_report_capture::FixedGeolocationProvider;
use pothole_report_core::{GeolocationFix, ImageBlob};
use pothole_report_session::{
    CredentialError, CredentialProvider, ResetHandler, Session, SessionGuard,
};

/// Transport that replays scripted responses and records call activity.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: AtomicUsize,
    last_form: Mutex<Option<MultipartForm>>,
}

impl ScriptedTransport {
    #[allow(dead_code)]
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            last_form: Mutex::new(None),
        })
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn last_form(&self) -> Option<MultipartForm> {
        self.last_form.lock().expect("form lock").clone()
    }

    fn next(&self) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .expect("response lock")
            .pop_front()
            .expect("transport script exhausted")
    }
}

impl HttpTransport for ScriptedTransport {
    fn post_multipart(
        &self,
        _url: &str,
        _token: &str,
        form: &MultipartForm,
    ) -> Result<HttpResponse, TransportError> {
        *self.last_form.lock().expect("form lock") = Some(form.clone());
        self.next()
    }

    fn get(&self, _url: &str, _token: &str) -> Result<HttpResponse, TransportError> {
        self.next()
    }
}

/// Reset handler counting forced session resets.
pub struct CountingReset {
    count: AtomicUsize,
}

impl CountingReset {
    #[allow(dead_code)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            count: AtomicUsize::new(0),
        })
    }

    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ResetHandler for CountingReset {
    fn force_reload(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

struct ScriptedCredentialProvider {
    healthy: bool,
}

impl CredentialProvider for ScriptedCredentialProvider {
    fn fresh_token(&self) -> Result<String, CredentialError> {
        if self.healthy {
            Ok("fresh-token".to_string())
        } else {
            Err(CredentialError::Provider("refresh token revoked".to_string()))
        }
    }
}

/// Controller plus handles to its observable collaborators.
pub struct Harness {
    pub controller: ReportController,
    pub transport: Arc<ScriptedTransport>,
    pub resets: Arc<CountingReset>,
}

/// Builds a signed-in controller over scripted collaborators.
#[allow(dead_code)]
pub fn harness(
    responses: Vec<Result<HttpResponse, TransportError>>,
    credential_healthy: bool,
) -> Harness {
    let transport = ScriptedTransport::new(responses);
    let resets = CountingReset::new();

    let mut guard = SessionGuard::new(resets.clone());
    guard.restore(Some(Session::new(
        "rider@example.test",
        Arc::new(ScriptedCredentialProvider {
            healthy: credential_healthy,
        }),
    )));

    let api = ApiClient::new("https://service.example.test", transport.clone())
        .expect("test client should build");
    let location = Arc::new(FixedGeolocationProvider::new(
        GeolocationFix::new(12.971599, 77.594566).expect("fix fixture"),
    ));

    Harness {
        controller: ReportController::new(guard, api, location),
        transport,
        resets,
    }
}

/// Creates one deterministic image blob.
#[allow(dead_code)]
pub fn sample_blob(name: &str, byte: u8) -> ImageBlob {
    ImageBlob::new(name, "image/jpeg", vec![byte; 16]).expect("blob fixture should be valid")
}

/// Convenience 2xx response.
#[allow(dead_code)]
pub fn ok(body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string(),
    })
}

/// Convenience non-2xx response.
#[allow(dead_code)]
pub fn rejected(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

/// Selects two images and acquires the fix so submission preconditions pass.
#[allow(dead_code)]
pub fn make_ready(controller: &mut ReportController) {
    controller.select_images(vec![sample_blob("a.jpg", 1), sample_blob("b.jpg", 2)]);
    controller.acquire_location();
}
