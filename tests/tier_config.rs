use dockhand::{
    Config, DispatchOutcome, Disposition, Filters, MockHttpClient, Param, TierConfigAutomation,
    TierConfigHandler, TierConfigRequest,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn config() -> Config {
    Config::new("https://api.example.com/public/v1/", "SU-000:token")
}

fn tier_config_request_json(id: &str, product_id: &str) -> Value {
    json!({
        "id": id,
        "type": "setup",
        "status": "pending",
        "configuration": {
            "id": "TC-000-000-000",
            "name": "Configuration of Reseller",
            "tier_level": 1,
            "account": {"id": "TA-1-000-000-000"},
            "product": {"id": product_id, "name": "Product"},
            "params": [{"id": "param_a", "value": "param_a_value"}]
        },
        "params": [{"id": "param_a", "value": ""}],
        "events": {
            "created": {"at": "2018-11-21T11:10:29+00:00"},
            "inquired": {
                "at": "2018-11-21T11:10:29+00:00",
                "by": {"id": "PA-000-000", "name": "Username"}
            }
        }
    })
}

/// Approves setups with a template reference and inquires on anything
/// missing its `param_a` value.
struct SetupHandler;

impl TierConfigHandler for SetupHandler {
    fn process_request(
        &mut self,
        request: &TierConfigRequest,
    ) -> dockhand::Result<Option<Disposition>> {
        let param = match request.get_param_by_id("param_a") {
            Some(param) => param,
            None => return Ok(Some(Disposition::Fail("param_a is missing".to_string()))),
        };
        if param.value.as_deref().unwrap_or_default().is_empty() {
            let mut fixed = param.clone();
            fixed.value_error = Some("Value is required".to_string());
            return Ok(Some(Disposition::Inquire(vec![fixed])));
        }
        Ok(Some(Disposition::approve_template("TP-000-000-000")))
    }
}

#[test_log::test]
fn list_parses_nested_configuration_and_events() {
    let mock = MockHttpClient::new();
    mock.add_ok(
        "GET tier/config-requests",
        &json!([tier_config_request_json("TCR-000-000-000", "PRD-000-000-000")]).to_string(),
    );

    let automation = TierConfigAutomation::with_client(mock.clone(), config(), SetupHandler);

    let requests = automation.list(Filters::new()).unwrap();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.id, "TCR-000-000-000");
    assert_eq!(request.kind, "setup");
    assert_eq!(request.configuration.account.id, "TA-1-000-000-000");
    assert_eq!(request.configuration.tier_level, Some(1));

    let events = request.events.as_ref().unwrap();
    assert!(events.created.is_some());
    assert_eq!(
        events.inquired.as_ref().unwrap().by.as_ref().unwrap().id,
        "PA-000-000"
    );
    assert!(events.pended.is_none());

    let calls = mock.get_calls();
    assert_eq!(calls[0].path, "tier/config-requests");
    assert_eq!(
        calls[0].query,
        vec![
            ("limit".to_string(), "1000".to_string()),
            ("status".to_string(), "pending".to_string()),
        ]
    );
}

#[test_log::test]
fn process_inquires_when_a_required_param_is_empty() {
    let mock = MockHttpClient::new();
    mock.add_ok(
        "GET tier/config-requests",
        &json!([tier_config_request_json("TCR-000-000-000", "PRD-000-000-000")]).to_string(),
    );
    mock.add_ok("PUT tier/config-requests/TCR-000-000-000", "{}");
    mock.add_ok("POST tier/config-requests/TCR-000-000-000/inquire/", "{}");

    let mut automation = TierConfigAutomation::with_client(mock.clone(), config(), SetupHandler);

    let records = automation.process().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, DispatchOutcome::Inquired);

    let calls = mock.get_calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].method, "PUT");
    let put_body: Value = serde_json::from_str(calls[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        put_body,
        json!({"params": [{"id": "param_a", "value": "", "value_error": "Value is required"}]})
    );
    assert_eq!(calls[2].method, "POST");
    assert_eq!(calls[2].path, "tier/config-requests/TCR-000-000-000/inquire/");
}

#[test_log::test]
fn process_approves_completed_setups_with_a_template() {
    let mut request = tier_config_request_json("TCR-000-000-000", "PRD-000-000-000");
    request["params"][0]["value"] = json!("tenant-7");

    let mock = MockHttpClient::new();
    mock.add_ok("GET tier/config-requests", &json!([request]).to_string());
    mock.add_ok("POST tier/config-requests/TCR-000-000-000/approve/", "{}");

    let mut automation = TierConfigAutomation::with_client(mock.clone(), config(), SetupHandler);

    let records = automation.process().unwrap();
    assert_eq!(records[0].outcome, DispatchOutcome::Approved);

    let calls = mock.get_calls();
    let body: Value = serde_json::from_str(calls[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"template": {"id": "TP-000-000-000"}}));
}

#[test_log::test]
fn allow_list_filters_tier_config_requests_by_configured_product() {
    let mock = MockHttpClient::new();
    mock.add_ok(
        "GET tier/config-requests",
        &json!([tier_config_request_json("TCR-000-000-000", "PRD-999-999-999")]).to_string(),
    );

    let mut automation = TierConfigAutomation::with_client(
        mock.clone(),
        config().with_products(vec!["PRD-000-000-000".to_string()]),
        SetupHandler,
    );

    let records = automation.process().unwrap();
    assert_eq!(records[0].outcome, DispatchOutcome::SkippedByFilter);
    assert_eq!(mock.call_count(), 1);
}

#[test_log::test]
fn update_parameters_puts_to_the_bare_request_id() {
    let mock = MockHttpClient::new();
    mock.add_ok("PUT tier/config-requests/TCR-000-000-000", "{}");

    let automation = TierConfigAutomation::with_client(mock.clone(), config(), SetupHandler);
    automation
        .update_parameters(
            "TCR-000-000-000",
            &[Param::with_error("param_a", "Value is required")],
        )
        .unwrap();

    let calls = mock.get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "PUT");
    assert_eq!(calls[0].path, "tier/config-requests/TCR-000-000-000");
}

#[test_log::test]
fn get_tier_config_queries_approved_configurations() {
    let mut request = tier_config_request_json("TCR-000-000-000", "PRD-000-000-000");
    request["status"] = json!("approved");

    let mock = MockHttpClient::new();
    mock.add_ok("GET tier/config-requests", &json!([request]).to_string());

    let automation = TierConfigAutomation::with_client(mock.clone(), config(), SetupHandler);

    let tier_config = automation
        .get_tier_config("TA-1-000-000-000", "PRD-000-000-000")
        .unwrap()
        .unwrap();
    assert_eq!(tier_config.id, "TC-000-000-000");
    assert_eq!(
        tier_config.get_param_by_id("param_a").unwrap().value.as_deref(),
        Some("param_a_value")
    );

    assert_eq!(
        mock.get_calls()[0].query,
        vec![
            (
                "configuration__account__id".to_string(),
                "TA-1-000-000-000".to_string()
            ),
            (
                "configuration__product__id".to_string(),
                "PRD-000-000-000".to_string()
            ),
            ("status".to_string(), "approved".to_string()),
        ]
    );
}
