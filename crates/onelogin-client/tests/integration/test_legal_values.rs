use std::sync::Arc;

use onelogin_client::{
    legal_values::{LegalValues, RepositoryLegalValues},
    mock::MockRepository,
    Error,
};

use crate::{ALL_LEGAL, HOST, MALFORMED};

#[test_log::test(tokio::test)]
async fn reads_from_host_and_address() {
    let repository =
        Arc::new(MockRepository::default().on_read(|_| Ok(vec![ALL_LEGAL.as_bytes().to_vec()])));
    let legal_values = RepositoryLegalValues::new(repository.clone(), HOST);

    let set = legal_values
        .fetch("/api/2/mappings/conditions")
        .await
        .unwrap();

    assert_eq!(set.to_string(), "[ri has_role 12345 set_status]");
    assert_eq!(
        repository.requests()[0].1.url,
        "test.com/api/2/mappings/conditions"
    );
}

#[test_log::test(tokio::test)]
async fn merges_pages_without_duplicates() {
    let repository = Arc::new(MockRepository::default().on_read(|_| {
        Ok(vec![
            br#"[{"value": "a", "name": "A"}, {"value": "b"}]"#.to_vec(),
            br#"[{"value": "b"}, {"value": "c"}]"#.to_vec(),
        ])
    }));

    let set = RepositoryLegalValues::new(repository, HOST)
        .fetch("/api/2/mappings/actions")
        .await
        .unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(set.to_string(), "[a b c]");
}

#[test_log::test(tokio::test)]
async fn blank_and_null_bodies_are_unconstrained() {
    let repository = Arc::new(
        MockRepository::default().on_read(|_| Ok(vec![vec![], b"null".to_vec(), b"[]".to_vec()])),
    );

    let set = RepositoryLegalValues::new(repository, HOST)
        .fetch("/api/2/mappings/actions")
        .await
        .unwrap();

    assert!(set.is_empty());
    assert!(set.accepts("anything"));
}

#[test_log::test(tokio::test)]
async fn malformed_body_is_a_codec_error() {
    let repository =
        Arc::new(MockRepository::default().on_read(|_| Ok(vec![MALFORMED.as_bytes().to_vec()])));

    let err = RepositoryLegalValues::new(repository, HOST)
        .fetch("/api/2/mappings/conditions")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Codec(_)), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn transport_error_is_returned() {
    let repository = Arc::new(MockRepository::default());

    let err = RepositoryLegalValues::new(repository, HOST)
        .fetch("/api/2/mappings/conditions")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "unclassified error: error");
}
