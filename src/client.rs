//! The activities client.
//!
//! [`ActivityClient`] owns one [`Transport`] and one [`View`]. Every operation
//! talks to the server, then pushes the outcome into the view: a fresh
//! [`CatalogView`], a message for the signup form, or a blocking alert.
//!
//! Refreshes are ticketed. Each `load_catalog` takes the next ticket when it is
//! issued, and only the newest ticket may render, so a slow response can never
//! paint over a newer one.

use std::cell::Cell;

use tracing::{debug, info, warn};

use crate::delegate::{RemovalTag, TaggedElement};
use crate::error::ClientError;
use crate::model::Catalog;
use crate::protocol::{self, SignupRequest};
use crate::render::CatalogView;
use crate::transport::{HttpRequest, Transport};

pub const GENERIC_FAILURE: &str = "An error occurred. Please try again later.";
pub const UNREGISTER_OK: &str = "Participant unregistered successfully.";
pub const UNREGISTER_FAILED: &str = "Failed to unregister participant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Message shown in the signup form's message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Where the client's output goes.
///
/// Methods take `&self`: front ends keep their state behind signals or cells.
pub trait View {
    /// Replaces the activity list and the signup select.
    fn render_catalog(&self, view: CatalogView);

    fn show_message(&self, notice: Notice);

    /// Blocking acknowledgement.
    fn alert(&self, text: &str);

    /// Developer-facing channel (browser console and the like).
    fn report_diagnostic(&self, _message: &str) {}
}

pub struct ActivityClient<T, V> {
    transport: T,
    view: V,
    refresh_seq: Cell<u64>,
}

impl<T: Transport, V: View> ActivityClient<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self {
            transport,
            view,
            refresh_seq: Cell::new(0),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the catalog and re-renders it.
    ///
    /// Failures only reach the diagnostic channel; the current rendering stays
    /// as it was.
    pub async fn load_catalog(&self) -> Result<(), ClientError> {
        let ticket = self.begin_refresh();
        match self.fetch_catalog().await {
            Ok(catalog) => {
                self.apply_catalog(ticket, &catalog);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load activities");
                self.view
                    .report_diagnostic(&format!("Error fetching activities: {e}"));
                Err(e)
            }
        }
    }

    async fn fetch_catalog(&self) -> Result<Catalog, ClientError> {
        let response = self
            .transport
            .send(HttpRequest::get(protocol::ACTIVITIES_PATH))
            .await?;
        if !response.is_success() {
            return Err(ClientError::Status {
                status: response.status,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    fn begin_refresh(&self) -> u64 {
        let ticket = self.refresh_seq.get().wrapping_add(1);
        self.refresh_seq.set(ticket);
        ticket
    }

    /// Renders `catalog` if `ticket` is still the newest refresh.
    fn apply_catalog(&self, ticket: u64, catalog: &Catalog) {
        let newest = self.refresh_seq.get();
        if ticket != newest {
            debug!(ticket, newest, "dropping stale catalog response");
            return;
        }
        debug!(activities = catalog.len(), "rendering catalog");
        self.view.render_catalog(CatalogView::from_catalog(catalog));
    }

    /// Signs `email` up for `activity`, then refreshes the catalog on success.
    pub async fn submit_signup(&self, activity: &str, email: &str) -> Result<(), ClientError> {
        let request = HttpRequest::post_json(
            protocol::signup_path(activity),
            &SignupRequest {
                email: email.to_string(),
            },
        )?;

        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                warn!(activity, error = %e, "signup request failed");
                self.view
                    .report_diagnostic(&format!("Error signing up: {e}"));
                self.view.show_message(Notice::error(GENERIC_FAILURE));
                return Err(e.into());
            }
        };

        if response.is_success() {
            info!(activity, "signed up");
            self.view.show_message(Notice::success(format!(
                "Successfully signed up for {activity}!"
            )));
            // Refresh failures are already reported by load_catalog.
            let _ = self.load_catalog().await;
            return Ok(());
        }

        let status = response.status;
        match protocol::parse_error_detail(&response.body) {
            Some(detail) => {
                info!(activity, status, %detail, "signup rejected");
                self.view
                    .show_message(Notice::error(format!("Error: {detail}")));
                Err(ClientError::Rejected { status, detail })
            }
            None => {
                warn!(activity, status, "signup failed with unreadable error body");
                self.view.report_diagnostic(&format!(
                    "Error signing up: status {status} with unreadable body"
                ));
                self.view.show_message(Notice::error(GENERIC_FAILURE));
                Err(ClientError::Status { status })
            }
        }
    }

    /// Removes `participant` from `activity`, then refreshes on success.
    /// Both outcomes end in a blocking alert.
    pub async fn submit_unregister(
        &self,
        activity: &str,
        participant: &str,
    ) -> Result<(), ClientError> {
        let request = HttpRequest::delete(protocol::unregister_path(activity, participant));

        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                warn!(activity, error = %e, "unregister request failed");
                self.view
                    .report_diagnostic(&format!("Error unregistering participant: {e}"));
                self.view.alert(UNREGISTER_FAILED);
                return Err(e.into());
            }
        };

        if response.is_success() {
            info!(activity, "participant unregistered");
            self.view.alert(UNREGISTER_OK);
            let _ = self.load_catalog().await;
            return Ok(());
        }

        let status = response.status;
        match protocol::parse_error_detail(&response.body) {
            Some(detail) => {
                info!(activity, status, %detail, "unregister rejected");
                self.view
                    .alert(&format!("Failed to unregister participant: {detail}"));
                Err(ClientError::Rejected { status, detail })
            }
            None => {
                info!(activity, status, "unregister rejected");
                self.view.alert(UNREGISTER_FAILED);
                Err(ClientError::Status { status })
            }
        }
    }

    /// Delegated click handler. Returns `Ok(false)` when `target` is not a
    /// removal control; no request is made in that case.
    pub async fn handle_click<E: TaggedElement + ?Sized>(
        &self,
        target: &E,
    ) -> Result<bool, ClientError> {
        let Some(tag) = RemovalTag::from_element(target) else {
            return Ok(false);
        };
        self.submit_unregister(&tag.activity, &tag.participant)
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::tests::FakeElement;
    use crate::error::TransportError;
    use crate::transport::{HttpResponse, Method};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    #[derive(Default)]
    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        fn fail(self, msg: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(TransportError::Network(msg.to_string())));
            self
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }

        fn catalog_reads(&self) -> usize {
            self.requests
                .borrow()
                .iter()
                .filter(|r| r.method == Method::Get && r.path == "/activities")
                .count()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
        }
    }

    #[derive(Default)]
    struct RecordingView {
        renders: RefCell<Vec<CatalogView>>,
        messages: RefCell<Vec<Notice>>,
        alerts: RefCell<Vec<String>>,
        diagnostics: RefCell<Vec<String>>,
    }

    impl View for RecordingView {
        fn render_catalog(&self, view: CatalogView) {
            self.renders.borrow_mut().push(view);
        }

        fn show_message(&self, notice: Notice) {
            self.messages.borrow_mut().push(notice);
        }

        fn alert(&self, text: &str) {
            self.alerts.borrow_mut().push(text.to_string());
        }

        fn report_diagnostic(&self, message: &str) {
            self.diagnostics.borrow_mut().push(message.to_string());
        }
    }

    const CATALOG: &str = r#"{
        "Chess Club": {
            "description": "Learn strategies and compete in chess tournaments",
            "schedule": "Fridays, 3:30 PM - 5:00 PM",
            "max_participants": 5,
            "participants": ["michael@mergington.edu", "daniel@mergington.edu", "emma@mergington.edu"]
        },
        "Art Club": {
            "description": "Explore various art techniques",
            "schedule": "Thursdays, 3:30 PM - 5:00 PM",
            "max_participants": 15,
            "participants": ["isabella@mergington.edu"]
        }
    }"#;

    fn client(transport: ScriptedTransport) -> ActivityClient<ScriptedTransport, RecordingView> {
        ActivityClient::new(transport, RecordingView::default())
    }

    #[test]
    fn load_renders_spots_left_and_options() {
        let c = client(ScriptedTransport::default().reply(200, CATALOG));
        pollster::block_on(c.load_catalog()).unwrap();

        let renders = c.view().renders.borrow();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].cards[0].name, "Chess Club");
        assert_eq!(renders[0].cards[0].spots_left, 2);
        assert_eq!(renders[0].options, vec!["Chess Club", "Art Club"]);
    }

    #[test]
    fn load_empty_catalog_renders_empty_view() {
        let c = client(ScriptedTransport::default().reply(200, "{}"));
        pollster::block_on(c.load_catalog()).unwrap();

        let renders = c.view().renders.borrow();
        assert_eq!(renders.len(), 1);
        assert!(renders[0].cards.is_empty());
        assert!(renders[0].options.is_empty());
    }

    #[test]
    fn load_failure_only_reaches_diagnostics() {
        let c = client(ScriptedTransport::default().fail("connection refused"));
        let err = pollster::block_on(c.load_catalog()).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));

        let view = c.view();
        assert!(view.renders.borrow().is_empty());
        assert!(view.messages.borrow().is_empty());
        assert!(view.alerts.borrow().is_empty());
        assert_eq!(view.diagnostics.borrow().len(), 1);
        assert!(view.diagnostics.borrow()[0].contains("connection refused"));
    }

    #[test]
    fn load_with_malformed_body_keeps_prior_view() {
        let c = client(ScriptedTransport::default().reply(200, "not json"));
        let err = pollster::block_on(c.load_catalog()).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(c.view().renders.borrow().is_empty());
        assert_eq!(c.view().diagnostics.borrow().len(), 1);
    }

    #[test]
    fn load_with_error_status_is_a_failure() {
        let c = client(ScriptedTransport::default().reply(500, r#"{"detail":"db down"}"#));
        let err = pollster::block_on(c.load_catalog()).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(c.view().renders.borrow().is_empty());
    }

    #[test]
    fn signup_success_posts_email_and_refreshes_once() {
        let c = client(
            ScriptedTransport::default()
                .reply(200, r#"{"message":"Signed up"}"#)
                .reply(200, CATALOG),
        );
        pollster::block_on(c.submit_signup("Chess Club", "new@mergington.edu")).unwrap();

        let requests = c.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/activities/Chess%20Club/signup");
        assert_eq!(
            requests[0].body.as_deref(),
            Some(r#"{"email":"new@mergington.edu"}"#)
        );
        assert_eq!(c.transport().catalog_reads(), 1);

        assert_eq!(
            *c.view().messages.borrow(),
            vec![Notice::success("Successfully signed up for Chess Club!")]
        );
        assert_eq!(c.view().renders.borrow().len(), 1);
    }

    #[test]
    fn signup_rejection_shows_server_detail() {
        let c = client(ScriptedTransport::default().reply(400, r#"{"detail":"Already signed up"}"#));
        let err = pollster::block_on(c.submit_signup("Chess Club", "michael@mergington.edu"))
            .unwrap_err();

        assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
        assert_eq!(
            *c.view().messages.borrow(),
            vec![Notice::error("Error: Already signed up")]
        );
        assert_eq!(c.transport().catalog_reads(), 0);
    }

    #[test]
    fn signup_rejection_with_unreadable_body_falls_back_to_generic_message() {
        let c = client(ScriptedTransport::default().reply(502, "<html>Bad Gateway</html>"));
        let err = pollster::block_on(c.submit_signup("Chess Club", "x@mergington.edu"))
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 502 }));
        assert_eq!(
            *c.view().messages.borrow(),
            vec![Notice::error(GENERIC_FAILURE)]
        );
        assert_eq!(c.view().diagnostics.borrow().len(), 1);
    }

    #[test]
    fn signup_network_failure_shows_retry_message() {
        let c = client(ScriptedTransport::default().fail("offline"));
        let err = pollster::block_on(c.submit_signup("Chess Club", "x@mergington.edu"))
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(
            *c.view().messages.borrow(),
            vec![Notice::error("An error occurred. Please try again later.")]
        );
        assert_eq!(c.transport().catalog_reads(), 0);
    }

    #[test]
    fn signup_does_not_validate_email_format() {
        let c = client(
            ScriptedTransport::default()
                .reply(200, "{}")
                .reply(200, CATALOG),
        );
        pollster::block_on(c.submit_signup("Art Club", "not an email")).unwrap();
        assert_eq!(
            c.transport().requests()[0].body.as_deref(),
            Some(r#"{"email":"not an email"}"#)
        );
    }

    #[test]
    fn click_on_removal_control_sends_one_delete() {
        let c = client(
            ScriptedTransport::default()
                .reply(200, r#"{"message":"Unregistered"}"#)
                .reply(200, CATALOG),
        );
        let el = FakeElement::removal("Art Club", "isabella@mergington.edu");
        let handled = pollster::block_on(c.handle_click(&el)).unwrap();
        assert!(handled);

        let requests = c.transport().requests();
        let deletes: Vec<&HttpRequest> = requests
            .iter()
            .filter(|r| r.method == Method::Delete)
            .collect();
        assert_eq!(deletes.len(), 1);
        assert_eq!(
            deletes[0].path,
            "/activities/Art%20Club/unregister?email=isabella%40mergington.edu"
        );
        assert_eq!(deletes[0].body, None);
        assert_eq!(requests.len(), 2);
        assert_eq!(c.transport().catalog_reads(), 1);

        assert_eq!(*c.view().alerts.borrow(), vec![UNREGISTER_OK.to_string()]);
    }

    #[test]
    fn click_elsewhere_sends_nothing() {
        let c = client(ScriptedTransport::default());
        let el = FakeElement::default();
        let handled = pollster::block_on(c.handle_click(&el)).unwrap();
        assert!(!handled);
        assert!(c.transport().requests().is_empty());
        assert!(c.view().alerts.borrow().is_empty());
    }

    #[test]
    fn unregister_failure_alerts_without_refresh() {
        let c = client(ScriptedTransport::default().reply(404, ""));
        let err = pollster::block_on(c.submit_unregister("Art Club", "ghost@mergington.edu"))
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 404 }));
        assert_eq!(*c.view().alerts.borrow(), vec![UNREGISTER_FAILED.to_string()]);
        assert_eq!(c.transport().catalog_reads(), 0);
    }

    #[test]
    fn unregister_failure_includes_detail_when_present() {
        let c = client(ScriptedTransport::default().reply(
            400,
            r#"{"detail":"Student not signed up for this activity"}"#,
        ));
        let _ = pollster::block_on(c.submit_unregister("Art Club", "ghost@mergington.edu"));
        assert_eq!(
            *c.view().alerts.borrow(),
            vec!["Failed to unregister participant: Student not signed up for this activity"
                .to_string()]
        );
    }

    #[test]
    fn unregister_network_failure_alerts() {
        let c = client(ScriptedTransport::default().fail("offline"));
        let err = pollster::block_on(c.submit_unregister("Art Club", "a@x")).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(*c.view().alerts.borrow(), vec![UNREGISTER_FAILED.to_string()]);
        assert_eq!(c.view().diagnostics.borrow().len(), 1);
    }

    /// Every request parks until its slot is released with a body.
    #[derive(Default)]
    struct GatedTransport {
        slots: RefCell<Vec<Option<String>>>,
    }

    impl GatedTransport {
        fn release(&self, slot: usize, body: &str) {
            self.slots.borrow_mut()[slot] = Some(body.to_string());
        }
    }

    impl Transport for GatedTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let slot = {
                let mut slots = self.slots.borrow_mut();
                slots.push(None);
                slots.len() - 1
            };
            std::future::poll_fn(|_| match self.slots.borrow()[slot].clone() {
                Some(body) => Poll::Ready(Ok(HttpResponse { status: 200, body })),
                None => Poll::Pending,
            })
            .await
        }
    }

    fn single(name: &str) -> String {
        format!(
            r#"{{"{name}": {{"description": "d", "schedule": "s", "max_participants": 1, "participants": []}}}}"#
        )
    }

    #[test]
    fn stale_refresh_does_not_overwrite_newer_one() {
        let c = ActivityClient::new(GatedTransport::default(), RecordingView::default());
        let mut cx = Context::from_waker(Waker::noop());

        let mut older = pin!(c.load_catalog());
        let mut newer = pin!(c.load_catalog());
        assert!(older.as_mut().poll(&mut cx).is_pending());
        assert!(newer.as_mut().poll(&mut cx).is_pending());

        c.transport().release(1, &single("New"));
        assert!(matches!(newer.as_mut().poll(&mut cx), Poll::Ready(Ok(()))));
        c.transport().release(0, &single("Old"));
        assert!(matches!(older.as_mut().poll(&mut cx), Poll::Ready(Ok(()))));

        let renders = c.view().renders.borrow();
        assert_eq!(renders.len(), 1);
        assert_eq!(renders[0].options, vec!["New"]);
    }

    #[test]
    fn sequential_refreshes_each_render() {
        let c = client(
            ScriptedTransport::default()
                .reply(200, &single("First"))
                .reply(200, &single("Second")),
        );
        pollster::block_on(c.load_catalog()).unwrap();
        pollster::block_on(c.load_catalog()).unwrap();

        let renders = c.view().renders.borrow();
        assert_eq!(renders.len(), 2);
        assert_eq!(renders[1].options, vec!["Second"]);
    }
}
