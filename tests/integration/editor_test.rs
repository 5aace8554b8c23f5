//! Integration tests for code editor documents.

mod helpers;

use cloudpanel_entity::{CodeDocument, DocumentSource};

fn document(name: &str, content: &str) -> CodeDocument {
    CodeDocument {
        filename: name.into(),
        content: content.into(),
        language: "python".into(),
    }
}

#[tokio::test]
async fn test_code_documents_lifecycle() {
    let app = helpers::TestPanel::new().await;
    let editor = app.panel.editor();

    let names = editor
        .save(DocumentSource::Code, &document("main.py", "print(1)"))
        .await
        .expect("save");
    assert_eq!(names, vec!["main.py".to_string()]);
    assert_eq!(app.last_alert_text().await, "File saved successfully!");

    let loaded = editor
        .load(DocumentSource::Code, "main.py")
        .await
        .expect("load");
    assert_eq!(loaded.content, "print(1)");
    assert_eq!(loaded.language, "python");

    let names = editor
        .delete(DocumentSource::Code, "main.py")
        .await
        .expect("delete");
    assert!(names.is_empty());
    assert_eq!(
        app.mock.requests(),
        vec![
            "POST /cloud/code/save".to_string(),
            "GET /cloud/code/list".to_string(),
            "GET /cloud/code/load/main.py".to_string(),
            "DELETE /cloud/code/delete/main.py".to_string(),
            "GET /cloud/code/list".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_names_are_sent_as_single_segment() {
    let app = helpers::TestPanel::new().await;
    app.mock.add_code_document("my script.js", "alert(1)", "javascript");

    let loaded = app
        .panel
        .editor()
        .load(DocumentSource::Code, "my script.js")
        .await
        .expect("load");

    assert_eq!(loaded.filename, "my script.js");
    assert_eq!(loaded.language, "javascript");
}

#[tokio::test]
async fn test_cloud_source_uses_file_endpoints() {
    let app = helpers::TestPanel::new().await;
    app.mock.add_file("notes.md", b"# hello");
    let editor = app.panel.editor();

    let loaded = editor
        .load(DocumentSource::Cloud, "notes.md")
        .await
        .expect("load");
    assert_eq!(loaded.content, "# hello");
    assert_eq!(loaded.language, "markdown");

    let names = editor
        .save(DocumentSource::Cloud, &document("script.py", "x = 1"))
        .await
        .expect("save");
    assert_eq!(names, vec!["notes.md".to_string(), "script.py".to_string()]);

    let requests = app.mock.requests();
    assert_eq!(requests[0], "GET /cloud/file/content");
    assert_eq!(requests[1], "POST /cloud/file/save");
    assert_eq!(requests[2], "GET /cloud/files");
}

#[tokio::test]
async fn test_unsuccessful_save_reports_server_error() {
    let app = helpers::TestPanel::new().await;

    let result = app
        .panel
        .editor()
        .save(DocumentSource::Code, &document("../escape.py", ""))
        .await;

    assert!(result.is_err());
    assert_eq!(
        app.last_alert_text().await,
        "Failed to save file: Invalid filename"
    );
    assert_eq!(app.mock.requests(), vec!["POST /cloud/code/save".to_string()]);
}

#[tokio::test]
async fn test_missing_document_fails_to_load() {
    let app = helpers::TestPanel::new().await;

    let result = app
        .panel
        .editor()
        .load(DocumentSource::Code, "ghost.py")
        .await;

    assert!(result.is_err());
    assert_eq!(
        app.last_alert_text().await,
        "Failed to load file: File not found"
    );
}

#[tokio::test]
async fn test_empty_filename_is_refused_locally() {
    let app = helpers::TestPanel::new().await;

    let result = app
        .panel
        .editor()
        .save(DocumentSource::Code, &document("", "x"))
        .await;

    assert!(result.is_err());
    assert!(app.mock.requests().is_empty());
    assert_eq!(app.last_alert_text().await, "Please enter a filename");
}
