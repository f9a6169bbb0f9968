//! End-to-end flows driven through the public API, the way the Zellij shim
//! drives the library: configuration map in, events in, actions out.

use std::collections::BTreeMap;

use serde_json::json;
use zcatalog::catalog::api::{RequestKind, RequestTag};
use zcatalog::ui::BodyView;
use zcatalog::{handle_event, initialize, Action, AppState, Config, Event, InputMode};

fn config(pairs: &[(&str, &str)]) -> Config {
    let map: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Config::from_zellij(&map)
}

fn requests(actions: &[Action]) -> Vec<(String, RequestTag)> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::WebRequest(request) => Some((request.url.clone(), request.tag.clone())),
            _ => None,
        })
        .collect()
}

fn reply(state: &mut AppState, tag: &RequestTag, status: u16, body: &serde_json::Value) -> bool {
    let event = Event::HttpResponse {
        tag: tag.clone(),
        status,
        body: body.to_string().into_bytes(),
    };
    handle_event(state, &event).unwrap().0
}

#[test]
fn remote_panels_load_through_base_url() {
    let mut state = initialize(&config(&[
        ("base_url", "https://catalog.example/"),
        ("applications_url", "/api/applications"),
        ("contacts_url", "api/contacts"),
    ]));

    let (_, actions) =
        handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let sent = requests(&actions);
    assert_eq!(
        sent.iter().map(|(url, _)| url.as_str()).collect::<Vec<_>>(),
        [
            "https://catalog.example/api/applications",
            "https://catalog.example/api/contacts"
        ]
    );

    let applications = sent
        .iter()
        .find(|(_, tag)| tag.kind == RequestKind::Applications)
        .map(|(_, tag)| tag.clone())
        .unwrap();
    assert!(reply(
        &mut state,
        &applications,
        200,
        &json!([{"ext_id": "A-1", "dataset": "Cohort", "state": "approved",
                 "creation_date_string": "2021-03-01"}]),
    ));

    let vm = state.compute_viewmodel(30, 120);
    assert_eq!(vm.header.tabs[0].label, "Applications (1)");
    assert!(vm.header.tabs[0].active);
    assert!(matches!(vm.body, BodyView::Table(_)));

    handle_event(&mut state, &Event::NextPanel).unwrap();
    let vm = state.compute_viewmodel(30, 120);
    assert!(vm.header.tabs[1].active);
    match vm.body {
        BodyView::Empty(empty) => assert!(empty.message.starts_with("Loading")),
        BodyView::Table(_) => panic!("contacts have not arrived yet"),
    }
}

#[test]
fn denied_permissions_still_show_inline_data() {
    let contacts = json!([
        {"full_name": "Ada Lovelace", "email": "ada@example.org", "roles": ["Data Steward"]},
        {"full_name": "Alan Turing", "email": "", "roles": []},
    ]);
    let mut state = initialize(&Config {
        contacts: Some(contacts.to_string()),
        attachments_url: Some("/api/files".to_string()),
        ..Config::default()
    });

    let (_, actions) =
        handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
    assert!(actions.is_empty());
    assert_eq!(state.active_table().map(|t| t.rows().len()), Some(2));

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    assert_eq!(
        actions,
        vec![Action::OpenUrl("mailto:ada@example.org".to_string())]
    );
}

#[test]
fn access_link_modal_round_trip() {
    let mut state = initialize(&config(&[
        ("download_link_api_url", "/api/access-link"),
        ("entity_id", "42"),
        ("csrf_token", "secret"),
    ]));
    handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::RequestDownloadLink).unwrap();
    let [Action::WebRequest(request)] = actions.as_slice() else {
        panic!("expected one request, got {actions:?}");
    };
    assert_eq!(request.url, "/api/access-link");
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&request.body).unwrap(),
        json!({"entityId": "42"})
    );

    reply(
        &mut state,
        &request.tag,
        200,
        &json!({"data": {"absolute_url": "https://dl.example/x",
                         "page_password": "pw",
                         "expiration_date_string": "2030-01-01"}}),
    );
    let modal = state.compute_viewmodel(30, 100).modal.unwrap();
    assert_eq!(modal.url, "https://dl.example/x");
    assert_eq!(modal.password, "pw");

    let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
    assert_eq!(actions, vec![Action::OpenUrl("https://dl.example/x".to_string())]);

    handle_event(&mut state, &Event::Escape).unwrap();
    assert!(state.compute_viewmodel(30, 100).modal.is_none());
    assert_eq!(state.input_mode, InputMode::Normal);
}

#[test]
fn rendering_small_and_large_panes_does_not_panic() {
    let rows: Vec<_> = (0..40)
        .map(|i| json!({"ext_id": format!("A-{i}"), "dataset": "Registry of very long names",
                        "state": "submitted", "creation_date_string": "2022-05-06"}))
        .collect();
    let mut state = initialize(&Config {
        applications: Some(json!(rows).to_string()),
        titles_link: Some("/api/titles".to_string()),
        ..Config::default()
    });
    handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    handle_event(&mut state, &Event::SearchMode).unwrap();

    for (rows, cols) in [(4, 10), (12, 40), (50, 200)] {
        zcatalog::ui::render(&state, rows, cols);
    }
}
