mod helpers;

use anyhow::Result;
use helpers::{client_for, fixture, fixture_notes, TEST_TOKEN};
use mockito::{Matcher, Server};
use notehub::application::NoteRepository;
use notehub::domain::{DomainError, ListQuery, NoteCreationData, NoteTag};
use serde_json::json;

fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

#[tokio::test]
async fn given_flat_envelope_when_listing_then_normalizes_page() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notes")
        .match_query(Matcher::Exact("page=2&perPage=10".into()))
        .match_header("authorization", bearer().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixture("notes_flat.json")?)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let page = client.list_notes(&ListQuery::new(2, 10, "")).await?;

    // Assert
    mock.assert_async().await;
    assert_eq!(page.notes.len(), 2);
    assert_eq!(page.notes[0].id, fixture_notes::WEEKLY_PLANNING);
    assert_eq!(page.notes[1].tag, NoteTag::Shopping);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.per_page, 10);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.total, None);
    Ok(())
}

#[tokio::test]
async fn given_expanded_envelope_when_listing_then_reads_meta() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("perPage".into(), "12".into()),
            Matcher::UrlEncoded("search".into(), "dentist visit".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixture("notes_expanded.json")?)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let page = client
        .list_notes(&ListQuery::new(2, 12, "dentist visit"))
        .await?;

    // Assert
    mock.assert_async().await;
    assert_eq!(page.notes[0].id, fixture_notes::DENTIST);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.pagination.total, Some(13));
    Ok(())
}

#[tokio::test]
async fn given_blank_search_when_listing_then_search_parameter_is_omitted() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notes")
        .match_query(Matcher::Exact("page=1&perPage=10".into()))
        .with_status(200)
        .with_body(r#"{"notes": [], "totalPages": 0}"#)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let page = client.list_notes(&ListQuery::new(1, 10, "   ")).await?;

    // Assert
    mock.assert_async().await;
    assert!(page.notes.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_unrecognized_envelope_when_listing_then_returns_server_error() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let result = client.list_notes(&ListQuery::new(1, 10, "")).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Server(_))));
    Ok(())
}

#[tokio::test]
async fn given_rejected_token_when_listing_then_returns_auth_error() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message": "Invalid token"}"#)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let result = client.list_notes(&ListQuery::new(1, 10, "")).await;

    // Assert
    match result {
        Err(DomainError::Auth(detail)) => assert!(detail.contains("Invalid token")),
        other => panic!("Expected Auth error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn given_server_failure_when_listing_then_returns_server_error() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let result = client.list_notes(&ListQuery::new(1, 10, "")).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Server(_))));
    Ok(())
}

#[tokio::test]
async fn given_missing_route_when_listing_then_returns_server_error() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/notes")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let result = client.list_notes(&ListQuery::new(1, 10, "")).await;

    // Assert
    assert!(
        matches!(result, Err(DomainError::Server(_))),
        "Expected Server error, got {result:?}"
    );
    Ok(())
}

#[tokio::test]
async fn given_padded_search_when_listing_then_sends_trimmed_text() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notes")
        .match_query(Matcher::Exact("page=1&perPage=10&search=milk".into()))
        .with_status(200)
        .with_body(r#"{"notes": [], "totalPages": 0}"#)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    client.list_notes(&ListQuery::new(1, 10, "  milk ")).await?;

    // Assert
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn given_unreachable_host_when_listing_then_returns_network_error() -> Result<()> {
    // Arrange
    let client = client_for("http://127.0.0.1:1")?;

    // Act
    let result = client.list_notes(&ListQuery::new(1, 10, "")).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Network(_))));
    Ok(())
}

#[tokio::test]
async fn given_creation_data_when_creating_then_posts_json_and_returns_note() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/notes")
        .match_header("authorization", bearer().as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "title": "Call the plumber",
            "content": "Kitchen sink",
            "tag": "Todo"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(fixture("note.json")?)
        .create_async()
        .await;
    let client = client_for(&server.url())?;
    let data = NoteCreationData::new("Call the plumber", "Kitchen sink", NoteTag::Todo);

    // Act
    let note = client.create_note(&data).await?;

    // Assert
    mock.assert_async().await;
    assert_eq!(note.id, fixture_notes::PLUMBER);
    assert_eq!(note.tag, NoteTag::Todo);
    Ok(())
}

#[tokio::test]
async fn given_rejected_payload_when_creating_then_returns_validation_error() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/notes")
        .with_status(400)
        .with_body(r#"{"message": "title must be at least 3 characters"}"#)
        .create_async()
        .await;
    let client = client_for(&server.url())?;
    let data = NoteCreationData::new("ab", "", NoteTag::Work);

    // Act
    let result = client.create_note(&data).await;

    // Assert
    match result {
        Err(DomainError::Validation(detail)) => assert!(detail.contains("at least 3")),
        other => panic!("Expected Validation error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn given_missing_route_when_creating_then_returns_server_error() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/notes")
        .with_status(404)
        .create_async()
        .await;
    let client = client_for(&server.url())?;
    let data = NoteCreationData::new("Call the plumber", "", NoteTag::Todo);

    // Act
    let result = client.create_note(&data).await;

    // Assert
    assert!(
        matches!(result, Err(DomainError::Server(_))),
        "Expected Server error, got {result:?}"
    );
    Ok(())
}

#[tokio::test]
async fn given_existing_id_when_deleting_then_returns_deleted_note() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    let path = format!("/notes/{}", fixture_notes::PLUMBER);
    let mock = server
        .mock("DELETE", path.as_str())
        .match_header("authorization", bearer().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixture("note.json")?)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let note = client.delete_note(fixture_notes::PLUMBER).await?;

    // Assert
    mock.assert_async().await;
    assert_eq!(note.title, "Call the plumber");
    Ok(())
}

#[tokio::test]
async fn given_removed_id_when_deleting_then_returns_not_found_with_id() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/notes/gone")
        .with_status(404)
        .with_body(r#"{"message": "Note not found"}"#)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let result = client.delete_note("gone").await;

    // Assert
    assert_eq!(result, Err(DomainError::NotFound("gone".to_string())));
    Ok(())
}

#[tokio::test]
async fn given_bad_request_when_deleting_then_returns_server_error() -> Result<()> {
    // Arrange
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/notes/not-an-id")
        .with_status(400)
        .with_body(r#"{"message": "Invalid id"}"#)
        .create_async()
        .await;
    let client = client_for(&server.url())?;

    // Act
    let result = client.delete_note("not-an-id").await;

    // Assert
    assert!(
        matches!(result, Err(DomainError::Server(_))),
        "Expected Server error, got {result:?}"
    );
    Ok(())
}
