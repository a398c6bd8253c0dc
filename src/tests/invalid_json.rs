use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_invalid_json() {
    let mut app = helper::setup_test_app();

    // wrong data
    let body = r#"{"titulo":1,"conteudo":"Buy milk"}"#;
    let (status_code, _, error) =
        helper::maybe_create_note_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let error = error.unwrap();
    assert_eq!("Data error".to_string(), error.error);
    assert_eq!(
        Some(
            "Failed to deserialize the JSON body into the target type: \
             titulo: invalid type: integer `1`, expected a string at line 1 column 11"
                .to_string()
        ),
        error.details
    );

    // syntax error
    let body = r#"{"}"#;
    let (status_code, _, error) =
        helper::maybe_create_note_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let error = error.unwrap();
    assert_eq!("JSON syntax error".to_string(), error.error);
    assert_eq!(
        Some("EOF while parsing a string at line 1 column 3".to_string()),
        error.details
    );

    // syntax error
    let body = r#"{"foo":{"bar":}}"#;
    let (status_code, _, error) =
        helper::maybe_create_note_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let error = error.unwrap();
    assert_eq!("JSON syntax error".to_string(), error.error);
    assert_eq!(
        Some("foo: expected value at line 1 column 15".to_string()),
        error.details
    );

    // missing content type
    let body = r#"{"titulo":"Shopping","conteudo":"Buy milk"}"#;
    let (status_code, _, error) =
        helper::maybe_create_note_with_raw_body(&mut app, body, false).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(
        "Missing `application/json` content type".to_string(),
        error.unwrap().error
    );

    // nothing was stored
    let (_, notes) = helper::list_notes(&mut app).await;
    assert_eq!(0, notes.unwrap().0);
}

#[tokio::test]
async fn test_empty_object_is_missing_fields() {
    let mut app = helper::setup_test_app();

    let (status_code, _, error) =
        helper::maybe_create_note_with_raw_body(&mut app, "{}", true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Título e conteúdo são obrigatórios", error.unwrap().error);
}
