use std::sync::Arc;

use onelogin_client::{
    mock::{MockLegalValues, MockRepository, Operation},
    models::user_mappings::{UserMapping, UserMappingsQuery},
    repository::Repository,
    Error, UserMappingsService,
};
use serde_json::json;

use crate::{
    invalid_mapping, json, mapping, valid_mapping, ALL_LEGAL, CONDITIONS_ONLY, HOST, MALFORMED,
};

fn service(repository: &Arc<MockRepository>, legal_values: MockLegalValues) -> UserMappingsService {
    UserMappingsService::new(
        repository.clone() as Arc<dyn Repository>,
        Arc::new(legal_values),
        HOST,
    )
}

fn named(id: i32, name: &str) -> UserMapping {
    UserMapping {
        id: Some(id),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

#[test_log::test(tokio::test)]
async fn query_gets_one_mapping() {
    let repository = Arc::new(
        MockRepository::default()
            .on_read(|_| Ok(vec![json(json!([{"id": 1, "name": "mapping"}]))])),
    );
    let query = UserMappingsQuery {
        limit: Some("1".into()),
        ..Default::default()
    };

    let mappings = service(&repository, MockLegalValues::unconstrained())
        .query(&query)
        .await
        .unwrap();

    assert_eq!(mappings, [named(1, "mapping")]);

    let requests = repository.requests();
    assert_eq!(requests[0].0, Operation::Read);
    assert_eq!(requests[0].1.url, "test.com/api/2/mappings");
    assert_eq!(
        requests[0].1.query_pairs(),
        [("limit".to_string(), "1".to_string())]
    );
}

#[test_log::test(tokio::test)]
async fn query_concatenates_pages() {
    let repository = Arc::new(MockRepository::default().on_read(|_| {
        Ok(vec![
            json(json!([{"id": 1, "name": "name"}])),
            json(json!([{"id": 2, "name": "name2"}])),
        ])
    }));

    let mappings = service(&repository, MockLegalValues::unconstrained())
        .query(&UserMappingsQuery::default())
        .await
        .unwrap();

    assert_eq!(mappings, [named(1, "name"), named(2, "name2")]);
    assert!(repository.requests()[0].1.query_pairs().is_empty());
}

#[test_log::test(tokio::test)]
async fn query_returns_at_most_limit_items() {
    let repository = Arc::new(MockRepository::default().on_read(|_| {
        Ok(vec![
            json(json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}])),
            json(json!([{"id": 3, "name": "c"}, {"id": 4, "name": "d"}])),
        ])
    }));
    let query = UserMappingsQuery {
        limit: Some("3".into()),
        ..Default::default()
    };

    let mappings = service(&repository, MockLegalValues::unconstrained())
        .query(&query)
        .await
        .unwrap();

    assert_eq!(mappings, [named(1, "a"), named(2, "b"), named(3, "c")]);
}

#[test_log::test(tokio::test)]
async fn query_with_no_matches_is_empty() {
    let repository = Arc::new(MockRepository::default().on_read(|_| Ok(vec![b"[]".to_vec()])));
    let query = UserMappingsQuery {
        has_action: Some("???".into()),
        ..Default::default()
    };

    let mappings = service(&repository, MockLegalValues::unconstrained())
        .query(&query)
        .await
        .unwrap();

    assert!(mappings.is_empty());
}

#[test_log::test(tokio::test)]
async fn query_transport_error() {
    let repository = Arc::new(MockRepository::default());

    let err = service(&repository, MockLegalValues::unconstrained())
        .query(&UserMappingsQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unclassified error: error");
}

#[test_log::test(tokio::test)]
async fn get_one() {
    let repository = Arc::new(
        MockRepository::default().on_read(|_| Ok(vec![json(json!({"id": 1, "name": "name"}))])),
    );

    let mapping = service(&repository, MockLegalValues::unconstrained())
        .get_one(1)
        .await
        .unwrap();

    assert_eq!(mapping, named(1, "name"));
    assert_eq!(repository.requests()[0].1.url, "test.com/api/2/mappings/1");
}

#[test_log::test(tokio::test)]
async fn get_one_transport_error() {
    let repository = Arc::new(MockRepository::default());

    let err = service(&repository, MockLegalValues::unconstrained())
        .get_one(2)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unclassified error: error");
}

#[test_log::test(tokio::test)]
async fn update_keeps_payload_and_applies_response() {
    let repository =
        Arc::new(MockRepository::default().on_update(|_| Ok(json(json!({"id": 1})))));
    let mut payload = UserMapping {
        id: Some(1),
        ..valid_mapping("updated")
    };

    service(&repository, MockLegalValues::respond_with(ALL_LEGAL))
        .update(1, &mut payload)
        .await
        .unwrap();

    assert_eq!(
        payload,
        UserMapping {
            id: Some(1),
            ..valid_mapping("updated")
        }
    );

    let (operation, request) = &repository.requests()[0];
    assert_eq!(*operation, Operation::Update);
    assert_eq!(request.url, "test.com/api/2/mappings/1");
    assert_eq!(
        request.payload.as_ref().unwrap()["conditions"][0]["source"],
        "has_role"
    );
}

#[test_log::test(tokio::test)]
async fn update_allows_freeform_inputs_when_no_legal_values() {
    let repository =
        Arc::new(MockRepository::default().on_update(|_| Ok(json(json!({"id": 1})))));
    let mut payload = mapping("updated", ("ri", "has_role", "12345"), ("set_status", &["1"]));

    service(&repository, MockLegalValues::respond_with("[]"))
        .update(1, &mut payload)
        .await
        .unwrap();

    assert_eq!(payload.id, Some(1));
    assert_eq!(payload.actions[0].value, ["1"]);
}

#[test_log::test(tokio::test)]
async fn update_rejects_invalid_values_without_sending() {
    let repository = Arc::new(MockRepository::default());
    let mut payload = invalid_mapping("updated");

    let err = service(&repository, MockLegalValues::respond_with(CONDITIONS_ONLY))
        .update(1, &mut payload)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(err
        .to_string()
        .starts_with("updated.conditions.source must be one of [ri has_role 12345], got: asdf"));
    assert!(repository.requests().is_empty());
    assert_eq!(payload, invalid_mapping("updated"));
}

#[test_log::test(tokio::test)]
async fn update_surfaces_legal_values_failure() {
    let repository = Arc::new(MockRepository::default());
    let mut payload = valid_mapping("updated");

    let err = service(&repository, MockLegalValues::respond_with(MALFORMED))
        .update(1, &mut payload)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Codec(_)), "{err:?}");
    assert!(repository.requests().is_empty());
}

#[test_log::test(tokio::test)]
async fn update_transport_error_leaves_payload() {
    let repository = Arc::new(MockRepository::default());
    let mut payload = valid_mapping("updated");

    let err = service(&repository, MockLegalValues::respond_with(ALL_LEGAL))
        .update(1, &mut payload)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unclassified error: error");
    assert_eq!(payload, valid_mapping("updated"));
    assert_eq!(repository.requests().len(), 1);
}

#[test_log::test(tokio::test)]
async fn create_assigns_id() {
    let repository =
        Arc::new(MockRepository::default().on_create(|_| Ok(json(json!({"id": 1})))));
    let mut payload = mapping("rule", ("ri", "has_role", "12345"), ("set_status", &["1"]));

    service(&repository, MockLegalValues::unconstrained())
        .create(&mut payload)
        .await
        .unwrap();

    assert_eq!(
        payload,
        UserMapping {
            id: Some(1),
            ..mapping("rule", ("ri", "has_role", "12345"), ("set_status", &["1"]))
        }
    );

    let (operation, request) = &repository.requests()[0];
    assert_eq!(*operation, Operation::Create);
    assert_eq!(request.url, "test.com/api/2/mappings");
    assert!(request.payload.as_ref().unwrap().get("id").is_none());
}

#[test_log::test(tokio::test)]
async fn create_rejects_invalid_values_without_sending() {
    let repository = Arc::new(MockRepository::default());
    let mut payload = invalid_mapping("updated");

    let err = service(&repository, MockLegalValues::respond_with(CONDITIONS_ONLY))
        .create(&mut payload)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "updated.conditions.source must be one of [ri has_role 12345], got: asdf, \
         updated.conditions.value must be one of [ri has_role 12345], got: asdf, \
         updated.conditions.operator must be one of [ri has_role 12345], got: asdf, \
         updated.actions.action must be one of [ri has_role 12345], got: asdf, \
         updated.actions.values must be one of [ri has_role 12345], got: 2"
    );
    assert!(repository.requests().is_empty());
}

#[test_log::test(tokio::test)]
async fn create_bad_request() {
    let repository = Arc::new(MockRepository::default().on_create(|_| {
        Err(Error::Api {
            status: http::StatusCode::BAD_REQUEST,
            message: "bad request".into(),
        })
    }));
    let mut payload = named(1, "not allowed value");

    let err = service(&repository, MockLegalValues::unconstrained())
        .create(&mut payload)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "api error (400 Bad Request): bad request");
    assert_eq!(payload, named(1, "not allowed value"));
}

#[test_log::test(tokio::test)]
async fn create_with_undecodable_response_is_a_codec_error() {
    let repository =
        Arc::new(MockRepository::default().on_create(|_| Ok(b"<html>oops</html>".to_vec())));
    let mut payload = valid_mapping("rule");

    let err = service(&repository, MockLegalValues::respond_with(ALL_LEGAL))
        .create(&mut payload)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Codec(_)));
    assert_eq!(payload, valid_mapping("rule"));
}

#[test_log::test(tokio::test)]
async fn destroy() {
    let repository = Arc::new(MockRepository::default().on_destroy(|_| Ok(vec![])));

    service(&repository, MockLegalValues::unconstrained())
        .destroy(1)
        .await
        .unwrap();

    let (operation, request) = &repository.requests()[0];
    assert_eq!(*operation, Operation::Destroy);
    assert_eq!(request.url, "test.com/api/2/mappings/1");
}

#[test_log::test(tokio::test)]
async fn destroy_ignores_response_body() {
    let repository =
        Arc::new(MockRepository::default().on_destroy(|_| Ok(b"not even json".to_vec())));

    service(&repository, MockLegalValues::unconstrained())
        .destroy(1)
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn destroy_transport_error() {
    let repository = Arc::new(MockRepository::default());

    let err = service(&repository, MockLegalValues::unconstrained())
        .destroy(2)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unclassified error: error");
}
