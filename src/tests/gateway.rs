use tokio::net::TcpListener;
use url::Url;

use crate::client::ClientError;
use crate::client::Gateway;
use crate::client::NoteRepository;
use crate::create_router;
use crate::notes::Note;
use crate::notes::NoteValues;
use crate::storage::Memory;

/// Serve the app on a random local port, returning its base URL
async fn spawn_app() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(Memory::new()))
            .await
            .unwrap();
    });

    Url::parse(&format!("http://{address}")).unwrap()
}

fn values(titulo: &str, endereco: Option<&str>) -> NoteValues {
    NoteValues {
        titulo: titulo.to_string(),
        conteudo: "Buy milk".to_string(),
        latitude: endereco.map(|_| 38.7),
        longitude: endereco.map(|_| -9.1),
        endereco: endereco.map(ToString::to_string),
    }
}

#[tokio::test]
async fn test_gateway_roundtrip() {
    let gateway = Gateway::new(spawn_app().await).unwrap();

    assert!(gateway.list().await.unwrap().is_empty());

    let id = gateway
        .create(&values("Shopping", Some("Praça do Comércio, Lisboa")))
        .await
        .unwrap();

    let note = gateway.get(id).await.unwrap();
    assert_eq!("Shopping", note.titulo);
    assert_eq!(Some((38.7, -9.1)), note.coordinates());

    // search terms are encoded on the way out
    let found = gateway.search("Praça do Comércio").await.unwrap();
    assert_eq!(vec![note.clone()], found);
    assert!(gateway.search("Porto").await.unwrap().is_empty());

    gateway.update(id, &values("Groceries", None)).await.unwrap();
    let updated = gateway.get(id).await.unwrap();
    assert_eq!("Groceries", updated.titulo);
    assert_eq!(None, updated.endereco);
    assert_eq!(note.data_criacao, updated.data_criacao);

    gateway.delete(id).await.unwrap();
    assert!(matches!(
        gateway.get(id).await,
        Err(ClientError::NotFound(message)) if message == "Nota não encontrada"
    ));
    assert!(matches!(
        gateway.delete(id).await,
        Err(ClientError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_gateway_search_with_dots() {
    let gateway = Gateway::new(spawn_app().await).unwrap();

    let porto = gateway
        .create(&values("Francesinha", Some("Porto")))
        .await
        .unwrap();
    let augusta = gateway
        .create(&values("Coffee", Some("R. Augusta, Lisboa")))
        .await
        .unwrap();
    let liberdade = gateway
        .create(&values("Cinema", Some("Av.. da Liberdade")))
        .await
        .unwrap();

    let ids = |notes: Vec<Note>| notes.iter().map(|note| note.id).collect::<Vec<_>>();

    assert_eq!(vec![liberdade, augusta], ids(gateway.search(".").await.unwrap()));
    assert_eq!(vec![liberdade], ids(gateway.search("..").await.unwrap()));
    assert_eq!(vec![augusta], ids(gateway.search("R. Augusta").await.unwrap()));
    assert_eq!(vec![porto], ids(gateway.search("Porto").await.unwrap()));
    assert!(gateway.search("...").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_gateway_reports_api_errors() {
    let gateway = Gateway::new(spawn_app().await).unwrap();

    let result = gateway.create(&values("  ", None)).await;
    let Err(ClientError::Api { status, error, .. }) = result else {
        panic!("Expected an API error, got {result:?}");
    };
    assert_eq!(400, status);
    assert_eq!("Título e conteúdo são obrigatórios", error);
}

#[tokio::test]
async fn test_gateway_without_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let gateway = Gateway::new(Url::parse(&format!("http://{address}")).unwrap()).unwrap();

    assert!(matches!(
        gateway.list().await,
        Err(ClientError::Transport(_))
    ));
}
