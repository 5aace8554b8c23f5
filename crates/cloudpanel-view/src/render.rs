//! Pure render functions from view-models to element trees.

use cloudpanel_core::i18n::{Locale, Message};
use cloudpanel_entity::file::UNNAMED_FILE;
use cloudpanel_entity::{FileRecord, QuotaView, ShareRecord, UserMatch};

use crate::bindings::{ACTION_ATTR, Action, FILE_ID_ATTR, SHARE_ID_ATTR};
use crate::element::Element;

/// Id of the owned files table body.
pub const FILES_LIST_ID: &str = "files-list";
/// Id of the owned files empty state.
pub const NO_FILES_ID: &str = "no-files";
/// Id of the shared-with-me table body.
pub const SHARED_LIST_ID: &str = "shared-files-list";
/// Id of the shared-with-me empty or error state.
pub const NO_SHARED_ID: &str = "no-shared-files";

/// Sender shown when a share names none.
pub const UNKNOWN_SENDER: &str = "Unknown Sender";
/// Date shown when a share has no parseable timestamp.
pub const UNKNOWN_DATE: &str = "Unknown Date";
/// Status shown when a share names none.
pub const UNKNOWN_STATUS: &str = "Unknown Status";

fn cell(text: impl Into<String>) -> Element {
    Element::new("td").text(text)
}

fn icon(class: &str) -> Element {
    Element::new("i").attr("class", class)
}

fn action_button(action: Action, target: &str, class: &str, label: String) -> Element {
    Element::new("button")
        .attr("class", class)
        .attr(ACTION_ATTR, action.as_str())
        .attr(action.target_attr(), target)
        .attr("aria-label", label)
}

fn button_group(buttons: Vec<Element>) -> Element {
    cell("").child(
        Element::new("div")
            .attr("class", "btn-group")
            .attr("role", "group")
            .children(buttons),
    )
}

/// One owned-file row with download, share, and delete buttons.
pub fn file_row(file: &FileRecord) -> Element {
    let id = file.raw_id.as_str();
    let name = file.filename.as_str();

    Element::new("tr")
        .attr(FILE_ID_ATTR, id)
        .child(cell(name))
        .child(cell(file.size_label()))
        .child(cell(file.file_type.as_str()))
        .child(button_group(vec![
            action_button(
                Action::Download,
                id,
                "btn btn-sm btn-primary download-file",
                format!("Download {name}"),
            )
            .child(icon("fas fa-download")),
            action_button(
                Action::Share,
                id,
                "btn btn-sm btn-info share-file-btn",
                format!("Share {name}"),
            )
            .child(icon("fas fa-share-alt")),
            action_button(
                Action::Delete,
                id,
                "btn btn-sm btn-danger delete-file",
                format!("Delete {name}"),
            )
            .child(icon("fas fa-trash")),
        ]))
}

/// The owned files table body, or the empty state when there are none.
pub fn file_table(files: &[FileRecord], locale: Locale) -> Element {
    if files.is_empty() {
        return Element::new("p")
            .attr("id", NO_FILES_ID)
            .attr("class", "text-muted")
            .text(Message::NoFiles.text(locale));
    }
    Element::new("tbody")
        .attr("id", FILES_LIST_ID)
        .children(files.iter().map(file_row))
}

/// One shared-with-me row with accept and reject buttons.
pub fn shared_row(share: &ShareRecord) -> Element {
    let id = share.id.to_string();
    let name = share.file_name.as_deref().unwrap_or(UNNAMED_FILE);

    Element::new("tr")
        .attr(SHARE_ID_ATTR, id.as_str())
        .child(cell(name))
        .child(cell(share.sender_username.as_deref().unwrap_or(UNKNOWN_SENDER)))
        .child(cell(
            share
                .shared_at_local()
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        ))
        .child(cell(share.status.as_deref().unwrap_or(UNKNOWN_STATUS)))
        .child(button_group(vec![
            action_button(
                Action::Accept,
                &id,
                "btn btn-sm btn-success accept-shared-file",
                format!("Accept {name}"),
            )
            .child(icon("fas fa-check"))
            .text(" Accept"),
            action_button(
                Action::Reject,
                &id,
                "btn btn-sm btn-danger reject-shared-file",
                format!("Reject {name}"),
            )
            .child(icon("fas fa-times"))
            .text(" Reject"),
        ]))
}

/// The shared-with-me table body, or the empty state when there are none.
pub fn shared_table(shares: &[ShareRecord], locale: Locale) -> Element {
    if shares.is_empty() {
        return Element::new("p")
            .attr("id", NO_SHARED_ID)
            .attr("class", "text-muted")
            .text(Message::NoSharedFiles.text(locale));
    }
    Element::new("tbody")
        .attr("id", SHARED_LIST_ID)
        .children(shares.iter().map(shared_row))
}

/// Notice shown when the shared-with-me list could not be loaded.
pub fn shared_error(locale: Locale) -> Element {
    Element::new("p")
        .attr("id", NO_SHARED_ID)
        .attr("class", "text-danger")
        .text(Message::SharedLoadFailed.text(locale))
}

/// Storage progress bar plus the `used / total` label.
pub fn quota_bar(quota: &QuotaView) -> Element {
    let percent = quota.percent();

    Element::new("div")
        .attr("class", "storage-quota")
        .child(
            Element::new("div").attr("class", "progress").child(
                Element::new("div")
                    .attr("id", "storage-progress")
                    .attr("class", "progress-bar")
                    .attr("role", "progressbar")
                    .attr("style", format!("width: {percent}%"))
                    .attr("aria-valuenow", percent.to_string())
                    .attr("aria-valuemin", "0")
                    .attr("aria-valuemax", "100")
                    .text(quota.percent_label()),
            ),
        )
        .child(
            Element::new("small")
                .attr("id", "storage-info")
                .text(quota.usage_label()),
        )
}

/// Checkbox list of candidate recipients, one per match.
pub fn recipient_picker(users: &[UserMatch]) -> Element {
    Element::new("div")
        .attr("id", "recipient-picker")
        .children(users.iter().map(|user| {
            Element::new("label")
                .attr("class", "d-block")
                .child(
                    Element::new("input")
                        .attr("type", "checkbox")
                        .attr("value", user.id.to_string())
                        .attr("class", "swal2-checkbox"),
                )
                .text(format!(" {}", user.label()))
        }))
}
