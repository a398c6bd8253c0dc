use axum::http::StatusCode;
use serde_json::Value;

use crate::tests::helper;

#[tokio::test]
async fn test_notes() {
    let mut app = helper::setup_test_app();

    // verify empty note list
    let (status_code, notes) = helper::list_notes(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    let (total, notes) = notes.unwrap();
    assert_eq!(0, total);
    assert_eq!(Vec::<helper::Note>::new(), notes);

    // create note
    let payload = helper::payload("Shopping", "Buy milk", Some((38.7, -9.1, "Lisbon")));
    let (status_code, id, _) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::CREATED, status_code);
    let id = id.unwrap();
    assert_eq!(1, id);

    // verify note
    let (status_code, note, _) = helper::single_note(&mut app, &id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    let note = note.unwrap();
    assert_eq!(id, note.id);
    assert_eq!("Shopping", note.titulo);
    assert_eq!("Buy milk", note.conteudo);
    assert_eq!(Some(38.7), note.latitude);
    assert_eq!(Some(-9.1), note.longitude);
    assert_eq!(Some("Lisbon".to_string()), note.endereco);
    assert!(!note.data_criacao.is_empty());

    // fetch notes, note is included
    let (status_code, notes) = helper::list_notes(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    let (total, notes) = notes.unwrap();
    assert_eq!(1, total);
    assert_eq!(vec![note], notes);

    // update note, dropping the location
    let payload = helper::payload("Shopping", "Buy oat milk", None);
    let (status_code, message, _) =
        helper::maybe_update_note(&mut app, &id.to_string(), &payload).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some("Nota atualizada com sucesso!".to_string()), message);

    // verify note
    let (status_code, updated, _) = helper::single_note(&mut app, &id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    let updated = updated.unwrap();
    assert_eq!(id, updated.id);
    assert_eq!("Buy oat milk", updated.conteudo);
    assert_eq!(None, updated.latitude);
    assert_eq!(None, updated.endereco);
    assert_eq!(notes[0].data_criacao, updated.data_criacao);

    // delete note
    let (status_code, message, _) = helper::maybe_delete_note(&mut app, &id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some("Nota eliminada com sucesso!".to_string()), message);

    // note is gone
    let (status_code, _, error) = helper::single_note(&mut app, &id.to_string()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Nota não encontrada", error.unwrap().error);

    // deleting twice is not found
    let (status_code, _, error) = helper::maybe_delete_note(&mut app, &id.to_string()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Nota não encontrada", error.unwrap().error);

    // IDs are never reused
    let id_two = helper::create_note(&mut app, "Shopping", "Buy bread", None).await;
    assert_eq!(2, id_two);
}

#[tokio::test]
async fn test_create_note_requires_titulo_and_conteudo() {
    let mut app = helper::setup_test_app();

    for (titulo, conteudo) in [("", "Buy milk"), ("Shopping", ""), ("   ", "Buy milk")] {
        let payload = helper::payload(titulo, conteudo, None);
        let (status_code, id, error) = helper::maybe_create_note(&mut app, &payload).await;
        assert_eq!(StatusCode::BAD_REQUEST, status_code);
        assert_eq!(None, id);
        assert_eq!(
            helper::Error {
                error: "Título e conteúdo são obrigatórios".to_string(),
                details: None,
            },
            error.unwrap()
        );
    }

    // a missing field is the same as an empty one
    let mut payload = helper::payload("Shopping", "Buy milk", None);
    payload.remove("conteudo");
    let (status_code, _, error) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Título e conteúdo são obrigatórios", error.unwrap().error);

    // nothing was stored
    let (_, notes) = helper::list_notes(&mut app).await;
    assert_eq!(0, notes.unwrap().0);
}

#[tokio::test]
async fn test_create_note_without_location() {
    let mut app = helper::setup_test_app();

    let mut payload = helper::payload("Shopping", "Buy milk", None);
    payload.insert("endereco".to_string(), Value::String("  ".to_string()));
    payload.insert("latitude".to_string(), Value::Null);

    let (status_code, id, _) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let (_, note, _) = helper::single_note(&mut app, &id.unwrap().to_string()).await;
    let note = note.unwrap();
    assert_eq!(None, note.latitude);
    assert_eq!(None, note.longitude);
    assert_eq!(None, note.endereco);
}

#[tokio::test]
async fn test_endereco_is_stored_as_sent() {
    let mut app = helper::setup_test_app();

    let location = Some((38.7, -9.1, " Lisbon "));
    let id = helper::create_note(&mut app, "Shopping", "Buy milk", location).await;

    let (_, note, _) = helper::single_note(&mut app, &id.to_string()).await;
    assert_eq!(Some(" Lisbon ".to_string()), note.unwrap().endereco);

    let payload = helper::payload("Shopping", "Buy milk", Some((41.15, -8.61, "Porto\n")));
    let (status_code, _, _) =
        helper::maybe_update_note(&mut app, &id.to_string(), &payload).await;
    assert_eq!(StatusCode::OK, status_code);

    let (_, note, _) = helper::single_note(&mut app, &id.to_string()).await;
    assert_eq!(Some("Porto\n".to_string()), note.unwrap().endereco);
}

#[tokio::test]
async fn test_notes_are_listed_newest_first() {
    let mut app = helper::setup_test_app();

    let first = helper::create_note(&mut app, "One", "First", None).await;
    let second = helper::create_note(&mut app, "Two", "Second", None).await;
    let third = helper::create_note(&mut app, "Three", "Third", None).await;

    let (status_code, notes) = helper::list_notes(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    let (total, notes) = notes.unwrap();
    assert_eq!(3, total);
    assert_eq!(
        vec![third, second, first],
        notes.iter().map(|note| note.id).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_unknown_notes() {
    let mut app = helper::setup_test_app();

    let (status_code, _, error) = helper::single_note(&mut app, "42").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Nota não encontrada", error.unwrap().error);

    let payload = helper::payload("Shopping", "Buy milk", None);
    let (status_code, _, error) = helper::maybe_update_note(&mut app, "42", &payload).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Nota não encontrada", error.unwrap().error);

    let (status_code, _, error) = helper::maybe_delete_note(&mut app, "42").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Nota não encontrada", error.unwrap().error);
}

#[tokio::test]
async fn test_invalid_note_id() {
    let mut app = helper::setup_test_app();

    let (status_code, _, error) = helper::single_note(&mut app, "abc").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let error = error.unwrap();
    assert_eq!("Invalid path parameter", error.error);
    assert!(error.details.is_some());

    let (status_code, _, error) = helper::maybe_delete_note(&mut app, "1.5").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Invalid path parameter", error.unwrap().error);
}

#[tokio::test]
async fn test_update_stores_fields_as_given() {
    let mut app = helper::setup_test_app();

    let id = helper::create_note(&mut app, "Shopping", "Buy milk", None).await;

    // empty fields are not checked on update
    let payload = helper::payload("", "", Some((41.15, -8.61, "Porto")));
    let (status_code, _, _) = helper::maybe_update_note(&mut app, &id.to_string(), &payload).await;
    assert_eq!(StatusCode::OK, status_code);

    let (_, note, _) = helper::single_note(&mut app, &id.to_string()).await;
    let note = note.unwrap();
    assert_eq!("", note.titulo);
    assert_eq!("", note.conteudo);
    assert_eq!(Some(41.15), note.latitude);
    assert_eq!(Some("Porto".to_string()), note.endereco);

    // missing fields are a data error
    let mut payload = helper::payload("Shopping", "Buy milk", None);
    payload.remove("titulo");
    let (status_code, _, error) =
        helper::maybe_update_note(&mut app, &id.to_string(), &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Data error", error.unwrap().error);
}

#[tokio::test]
async fn test_create_note_ignores_unknown_fields() {
    let mut app = helper::setup_test_app();

    let mut payload = helper::payload("Shopping", "Buy milk", None);
    payload.insert("id".to_string(), Value::from(99));
    payload.insert(
        "data_criacao".to_string(),
        Value::String("2000-01-01T00:00:00".to_string()),
    );

    let (status_code, id, _) = helper::maybe_create_note(&mut app, &payload).await;
    assert_eq!(StatusCode::CREATED, status_code);
    assert_eq!(Some(1), id);

    let (_, note, _) = helper::single_note(&mut app, "1").await;
    assert_ne!("2000-01-01T00:00:00", note.unwrap().data_criacao);
}
