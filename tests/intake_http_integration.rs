//! Integration tests for the HTTP boundaries.
//!
//! Each test spins up an Axum server on a random port that stands in for
//! both the postal code service and the intake webhook, then drives a
//! `FormController` built from config with the real reqwest clients.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use clinic_intake::form::{FormController, FormNotice, SubmitOutcome};
use clinic_intake::model::{
    BrazilianState, BusinessField, HourSlot, ProcedureField, ProfessionalField, ScheduleUpdate,
    Weekday,
};
use clinic_intake::submission::SubmissionPhase;
use clinic_intake::IntakeConfig;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
struct MockState {
    lookups: Arc<Mutex<Vec<String>>>,
    deliveries: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    hook_status: StatusCode,
}

impl MockState {
    fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }

    fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

async fn viacep(State(state): State<MockState>, Path(cep): Path<String>) -> Response {
    state.lookups.lock().unwrap().push(cep.clone());
    match cep.as_str() {
        "01001000" => Json(json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308"
        }))
        .into_response(),
        "99999999" => Json(json!({ "erro": true })).into_response(),
        _ => (StatusCode::BAD_REQUEST, "<h2>Bad Request (400)</h2>").into_response(),
    }
}

async fn webhook(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.deliveries.lock().unwrap().push((content_type, body));
    state.hook_status
}

/// Start the mock server, return (base URL, shared state).
async fn start_server(hook_status: StatusCode) -> (String, MockState) {
    let state = MockState {
        lookups: Arc::default(),
        deliveries: Arc::default(),
        hook_status,
    };
    let app = Router::new()
        .route("/ws/{cep}/json/", get(viacep))
        .route("/hook", post(webhook))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (format!("http://127.0.0.1:{port}"), state)
}

fn config_for(base: &str) -> IntakeConfig {
    IntakeConfig::default()
        .with_address_service_url(base)
        .with_intake_endpoint_url(format!("{base}/hook"))
        .with_origin("https://cadastro.example.com")
}

/// A port with nothing listening on it.
async fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/hook")
}

async fn fill_clinic(ctrl: &FormController, registration: &str) {
    ctrl.set_business_field(BusinessField::BusinessName, "Clínica Saúde Total")
        .await;
    ctrl.set_business_field(BusinessField::Phone, "(11) 98888-7777")
        .await;

    let prof = ctrl.snapshot().await.professionals.iter().next().unwrap().id;
    ctrl.update_professional(prof, ProfessionalField::Name, "Dr. João Silva")
        .await;
    ctrl.update_professional(prof, ProfessionalField::Profession, "medico")
        .await;
    ctrl.update_professional(prof, ProfessionalField::RegistrationNumber, registration)
        .await;
    ctrl.update_professional(prof, ProfessionalField::RegistrationState, "SP")
        .await;
}

// ── Submission ───────────────────────────────────────────────────────

#[tokio::test]
async fn submit_posts_json_and_resets_form() {
    timeout(TEST_TIMEOUT, async {
        let (base, mock) = start_server(StatusCode::OK).await;
        let ctrl = FormController::from_config(&config_for(&base)).unwrap();
        let mut notices = ctrl.subscribe();

        fill_clinic(&ctrl, "123456").await;
        let draft = ctrl.add_professional().await;
        ctrl.update_professional(draft, ProfessionalField::RegistrationNumber, "1")
            .await;
        let procedure = ctrl.snapshot().await.procedures.iter().next().unwrap().id;
        ctrl.update_procedure(procedure, ProcedureField::Name, "Consulta").await;
        ctrl.update_procedure(procedure, ProcedureField::Price, "250.00").await;
        ctrl.update_procedure(procedure, ProcedureField::Duration, "40").await;
        ctrl.update_schedule(Weekday::Segunda, ScheduleUpdate::Enabled(true))
            .await;
        ctrl.update_schedule(Weekday::Segunda, ScheduleUpdate::Start(HourSlot::new(8).unwrap()))
            .await;
        ctrl.update_schedule(Weekday::Segunda, ScheduleUpdate::End(HourSlot::new(18).unwrap()))
            .await;

        let outcome = ctrl.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Submitted), "got {outcome:?}");
        assert_eq!(notices.recv().await.unwrap(), FormNotice::Submitted);

        let deliveries = mock.deliveries.lock().unwrap().clone();
        assert_eq!(deliveries.len(), 1);
        let (content_type, body) = &deliveries[0];
        assert_eq!(content_type.as_deref(), Some("application/json"));

        assert_eq!(body["businessName"], "Clínica Saúde Total");
        assert_eq!(body["phone"], "(11) 98888-7777");
        assert_eq!(body["slug"], "clinica_saude_total");
        assert_eq!(body["triggered_from"], "https://cadastro.example.com");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

        let professionals = body["professionals"].as_array().unwrap();
        assert_eq!(professionals.len(), 1);
        assert_eq!(professionals[0]["professionalName"], "Dr. João Silva");
        assert_eq!(professionals[0]["profession"], "medico");
        assert_eq!(professionals[0]["registrationState"], "SP");

        assert_eq!(body["procedures"][0]["price"], "250.00");
        assert_eq!(
            body["workingHours"],
            json!({"segunda": {"enabled": true, "start": "08:00", "end": "18:00"}})
        );

        let form = ctrl.snapshot().await;
        assert!(form.is_pristine());
        assert_eq!(form.slug.value(), "");
        assert_eq!(ctrl.phase().await, SubmissionPhase::Idle);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn webhook_error_status_is_not_read() {
    timeout(TEST_TIMEOUT, async {
        let (base, mock) = start_server(StatusCode::INTERNAL_SERVER_ERROR).await;
        let ctrl = FormController::from_config(&config_for(&base)).unwrap();
        fill_clinic(&ctrl, "123456").await;

        assert!(matches!(ctrl.submit().await, SubmitOutcome::Submitted));
        assert_eq!(mock.delivery_count(), 1);
        assert!(ctrl.snapshot().await.is_pristine());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreachable_webhook_keeps_form() {
    timeout(TEST_TIMEOUT, async {
        let (base, _mock) = start_server(StatusCode::OK).await;
        let config = config_for(&base).with_intake_endpoint_url(dead_endpoint().await);
        let ctrl = FormController::from_config(&config).unwrap();
        let mut notices = ctrl.subscribe();
        fill_clinic(&ctrl, "123456").await;
        let before = ctrl.snapshot().await;

        assert!(matches!(ctrl.submit().await, SubmitOutcome::Failed(_)));
        assert_eq!(ctrl.snapshot().await, before);
        assert_eq!(ctrl.phase().await, SubmissionPhase::Idle);

        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title(), "Erro ao enviar dados");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn invalid_registration_never_reaches_webhook() {
    timeout(TEST_TIMEOUT, async {
        let (base, mock) = start_server(StatusCode::OK).await;
        let ctrl = FormController::from_config(&config_for(&base)).unwrap();
        fill_clinic(&ctrl, "123").await;
        let before = ctrl.snapshot().await;

        assert!(matches!(ctrl.submit().await, SubmitOutcome::Rejected(_)));
        assert_eq!(mock.delivery_count(), 0);
        assert_eq!(ctrl.snapshot().await, before);
        assert_eq!(before.business.business_name, "Clínica Saúde Total");
    })
    .await
    .expect("test timed out");
}

// ── Postal code lookup ───────────────────────────────────────────────

#[tokio::test]
async fn postal_code_fills_address() {
    timeout(TEST_TIMEOUT, async {
        let (base, mock) = start_server(StatusCode::OK).await;
        let ctrl = FormController::from_config(&config_for(&base)).unwrap();

        ctrl.set_postal_code("01001000").await.unwrap().await.unwrap();

        let business = ctrl.snapshot().await.business;
        assert_eq!(business.postal_code, "01001-000");
        assert_eq!(business.city, "São Paulo");
        assert_eq!(business.state, Some(BrazilianState::Sp));
        assert_eq!(business.street, "Praça da Sé");
        assert_eq!(business.neighborhood, "Sé");
        assert_eq!(mock.lookup_count(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn postal_code_not_found_leaves_address() {
    timeout(TEST_TIMEOUT, async {
        let (base, mock) = start_server(StatusCode::OK).await;
        let ctrl = FormController::from_config(&config_for(&base)).unwrap();
        ctrl.set_business_field(BusinessField::City, "Campinas").await;
        ctrl.set_business_field(BusinessField::State, "SP").await;
        ctrl.set_business_field(BusinessField::Street, "Av. Brasil").await;
        ctrl.set_business_field(BusinessField::Neighborhood, "Centro")
            .await;

        ctrl.set_postal_code("99999-999").await.unwrap().await.unwrap();

        let business = ctrl.snapshot().await.business;
        assert_eq!(business.postal_code, "99999-999");
        assert_eq!(business.city, "Campinas");
        assert_eq!(business.state, Some(BrazilianState::Sp));
        assert_eq!(business.street, "Av. Brasil");
        assert_eq!(business.neighborhood, "Centro");
        assert_eq!(mock.lookup_count(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn lookup_error_page_is_swallowed() {
    timeout(TEST_TIMEOUT, async {
        let (base, mock) = start_server(StatusCode::OK).await;
        let ctrl = FormController::from_config(&config_for(&base)).unwrap();
        ctrl.set_business_field(BusinessField::City, "Campinas").await;

        ctrl.set_postal_code("00000000").await.unwrap().await.unwrap();

        assert_eq!(ctrl.snapshot().await.business.city, "Campinas");
        assert_eq!(mock.lookup_count(), 1);

        // The user can still submit normally.
        fill_clinic(&ctrl, "4567").await;
        assert!(matches!(ctrl.submit().await, SubmitOutcome::Submitted));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn partial_postal_code_makes_no_request() {
    timeout(TEST_TIMEOUT, async {
        let (base, mock) = start_server(StatusCode::OK).await;
        let ctrl = FormController::from_config(&config_for(&base)).unwrap();

        for typed in ["0", "0100", "01001", "0100100"] {
            assert!(ctrl.set_postal_code(typed).await.is_none());
        }
        assert_eq!(ctrl.snapshot().await.business.postal_code, "01001-00");
        assert_eq!(mock.lookup_count(), 0);
    })
    .await
    .expect("test timed out");
}
