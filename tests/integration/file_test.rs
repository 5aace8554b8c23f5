//! Integration tests for the owned file list and file actions.

mod helpers;

use bytes::Bytes;

use cloudpanel_client::UploadFile;
use cloudpanel_core::types::FileId;
use cloudpanel_view::{Action, AlertLevel, Region};

const GIB: u64 = 1024 * 1024 * 1024;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_initial_load_renders_all_regions() {
    let app = helpers::TestPanel::new().await;
    app.mock.add_file("report.pdf", &[0u8; 2048]);
    app.mock.add_file("notes.txt", b"hello");
    app.mock.add_share("gift.txt", "alice");

    app.panel.load().await;

    assert_eq!(
        app.mock.requests(),
        strings(&["GET /cloud/files/shared", "GET /cloud/files", "GET /cloud/storage-info"])
    );
    let files = app.view.html(Region::FileList).await;
    assert!(files.contains("report.pdf"));
    assert!(files.contains("2.00 KB"));
    assert!(app.view.html(Region::SharedList).await.contains("gift.txt"));
    assert!(app.view.html(Region::Quota).await.contains("GB used"));

    let bindings = app.panel.bindings().await;
    assert_eq!(bindings.len(), 8);
    assert_eq!(
        bindings.iter().filter(|b| b.action == Action::Delete).count(),
        2
    );
}

#[tokio::test]
async fn test_reload_does_not_duplicate_bindings() {
    let app = helpers::TestPanel::new().await;
    app.mock.add_file("a.txt", b"a");

    app.panel.load().await;
    app.panel.load().await;

    assert_eq!(app.panel.bindings().await.len(), 3);
}

#[tokio::test]
async fn test_alternate_field_names_are_rendered() {
    let app = helpers::TestPanel::new().await;
    let id = app.mock.add_legacy_file("old-style.csv", &[1u8; 1536]);

    let files = app.panel.refresh_files().await.expect("refresh");

    assert_eq!(files[0].id, Some(FileId(id)));
    assert_eq!(files[0].filename, "old-style.csv");
    let html = app.view.html(Region::FileList).await;
    assert!(html.contains("1.50 KB"));
    assert!(html.contains(&format!(r#"data-file-id="{id}""#)));
}

#[tokio::test]
async fn test_empty_list_shows_placeholder() {
    let app = helpers::TestPanel::new().await;
    app.panel.refresh_files().await.expect("refresh");

    assert!(app.view.html(Region::FileList).await.contains("No files uploaded yet"));
    assert!(app.panel.bindings().await.is_empty());
}

#[tokio::test]
async fn test_upload_refreshes_list_and_quota() {
    let app = helpers::TestPanel::new().await;

    app.panel
        .upload(Some(UploadFile {
            file_name: "hello.py".into(),
            mime_type: "text/x-python".into(),
            content: Bytes::from_static(b"print('hi')"),
        }))
        .await
        .expect("upload");

    assert_eq!(
        app.mock.requests(),
        strings(&["POST /cloud/upload", "GET /cloud/files", "GET /cloud/storage-info"])
    );
    assert_eq!(app.mock.file_names(), strings(&["hello.py"]));
    assert!(app.view.html(Region::FileList).await.contains("hello.py"));
    assert_eq!(app.last_alert_text().await, "File uploaded successfully");
}

#[tokio::test]
async fn test_upload_rejection_shows_server_error() {
    let app = helpers::TestPanel::new().await;

    let result = app
        .panel
        .upload(Some(UploadFile {
            file_name: "virus.exe".into(),
            mime_type: "application/octet-stream".into(),
            content: Bytes::from_static(b"MZ"),
        }))
        .await;

    assert!(result.is_err());
    assert_eq!(app.mock.requests(), strings(&["POST /cloud/upload"]));
    assert_eq!(app.last_alert_text().await, "File type not allowed");
}

#[tokio::test]
async fn test_delete_removes_row_and_refetches() {
    let app = helpers::TestPanel::new().await;
    let keep = app.mock.add_sized_file("keep.txt", GIB / 2);
    let gone = app.mock.add_sized_file("gone.txt", GIB / 4);
    app.panel.refresh_files().await.expect("refresh");
    assert!(app.view.html(Region::Quota).await.contains("0.75 / 5 GB used"));
    app.mock.clear_requests();

    app.panel.delete(FileId(gone)).await.expect("delete");

    assert_eq!(
        app.mock.requests(),
        vec![
            format!("DELETE /cloud/files/{gone}"),
            "GET /cloud/files".to_string(),
            "GET /cloud/storage-info".to_string(),
        ]
    );
    let html = app.view.html(Region::FileList).await;
    assert!(html.contains(&format!(r#"data-file-id="{keep}""#)));
    assert!(!html.contains("gone.txt"));
    let quota = app.view.html(Region::Quota).await;
    assert!(quota.contains("0.50 / 5 GB used"));
    assert!(quota.contains(r#"style="width: 10%""#));
    assert_eq!(app.last_alert_text().await, "File deleted successfully");
}

#[tokio::test]
async fn test_delete_with_active_shares_asks_to_revoke() {
    let app = helpers::TestPanel::new().await;
    let id = app.mock.add_file("shared.txt", b"s");
    app.mock.block_delete(id);

    assert!(app.panel.delete(FileId(id)).await.is_err());

    let alert = app.dialogs.last_alert().await.expect("alert");
    assert_eq!(alert.level, AlertLevel::Warning);
    assert_eq!(
        alert.text,
        "Cannot delete file with active shares. Please revoke shares first."
    );
    assert_eq!(app.mock.requests().len(), 1);
    assert_eq!(app.mock.file_names(), strings(&["shared.txt"]));
}

#[tokio::test]
async fn test_delete_without_token_sends_nothing() {
    let app = helpers::TestPanel::without_token().await;
    let id = app.mock.add_file("a.txt", b"a");

    assert!(app.panel.delete(FileId(id)).await.is_err());

    assert!(app.mock.requests().is_empty());
    assert_eq!(app.last_alert_text().await, "CSRF token is missing");
}

#[tokio::test]
async fn test_download_saves_under_server_name() {
    let app = helpers::TestPanel::new().await;
    let id = app.mock.add_file("report 2024.txt", b"quarterly numbers");

    let path = app.panel.download(FileId(id)).await.expect("download");

    assert_eq!(path, app.downloads.path().join("report 2024.txt"));
    assert_eq!(
        tokio::fs::read(&path).await.expect("read"),
        b"quarterly numbers"
    );
    let requests = app.mock.requests();
    assert_eq!(requests, vec![format!("GET /cloud/files/{id}/download")]);
}

#[tokio::test]
async fn test_download_missing_file_reports_error() {
    let app = helpers::TestPanel::new().await;

    assert!(app.panel.download(FileId(404)).await.is_err());
    assert_eq!(app.last_alert_text().await, "File not found");
}

#[tokio::test]
async fn test_download_server_failure_reports_error_text() {
    let app = helpers::TestPanel::new().await;
    let id = app.mock.add_file("a.txt", b"a");
    app.mock.fail(&format!("GET /cloud/files/{id}/download"));

    assert!(app.panel.download(FileId(id)).await.is_err());
    assert_eq!(app.last_alert_text().await, "Internal server error");
}

#[tokio::test]
async fn test_list_failure_keeps_rows() {
    let app = helpers::TestPanel::new().await;
    app.mock.add_file("stay.txt", b"s");
    app.panel.refresh_files().await.expect("refresh");

    app.mock.fail("GET /cloud/files");
    assert!(app.panel.refresh_files().await.is_err());

    assert!(app.view.html(Region::FileList).await.contains("stay.txt"));
    assert_eq!(app.last_alert_text().await, "Failed to load files");
}
