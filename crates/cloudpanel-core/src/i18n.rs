//! Localized user-facing message catalog.
//!
//! Every alert, dialog title, and prompt the panel shows is a [`Message`].
//! Text that comes from the server is shown verbatim and never passes
//! through this catalog.

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    English,
    /// German.
    #[serde(rename = "de")]
    German,
}

/// A user-facing message key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    FilesLoadFailed,
    NoFiles,
    NoFileSelected,
    UploadSucceeded,
    UploadFailed,
    DeleteSucceeded,
    DeleteBlockedByShares,
    DeleteFailed,
    DeleteNetworkError,
    DownloadFailed,
    DownloadUnexpected,
    DownloadSaved,
    InvalidFileTitle,
    InvalidFileText,
    ReceivedFileId,
    InvalidTarget,
    ShareTitle,
    SearchLabel,
    SearchPlaceholder,
    SearchRequired,
    NoUsersFoundTitle,
    NoUsersFoundText,
    SearchFailedTitle,
    SearchFailedText,
    SelectRecipients,
    ShareSucceededTitle,
    ShareSucceeded,
    ShareFailedTitle,
    ShareFailedText,
    CsrfMissing,
    SuccessTitle,
    WarningTitle,
    ErrorTitle,
    AcceptSucceeded,
    AcceptFailed,
    RejectSucceeded,
    RejectFailed,
    Unexpected,
    NoSharedFiles,
    SharedLoadFailed,
    FilenameRequired,
    DocumentLoadFailed,
    DocumentSaved,
    DocumentSaveFailed,
    DocumentDeleted,
}

impl Message {
    /// Text of this message in the given locale.
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => self.english(),
            Locale::German => self.german(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::FilesLoadFailed => "Failed to load files",
            Self::NoFiles => "No files uploaded yet",
            Self::NoFileSelected => "No file selected",
            Self::UploadSucceeded => "File uploaded successfully",
            Self::UploadFailed => "Upload failed",
            Self::DeleteSucceeded => "File deleted successfully",
            Self::DeleteBlockedByShares => {
                "Cannot delete file with active shares. Please revoke shares first."
            }
            Self::DeleteFailed => "Failed to delete file",
            Self::DeleteNetworkError => "Network error. Unable to delete file.",
            Self::DownloadFailed => "Failed to download file",
            Self::DownloadUnexpected => "An unexpected error occurred while downloading the file.",
            Self::DownloadSaved => "File saved",
            Self::InvalidFileTitle => "Invalid File",
            Self::InvalidFileText => "Please select a valid file to share",
            Self::ReceivedFileId => "Received file ID",
            Self::InvalidTarget => "This item has no valid ID",
            Self::ShareTitle => "Share File",
            Self::SearchLabel => "Search user by username or email",
            Self::SearchPlaceholder => "Enter username or email",
            Self::SearchRequired => "You need to enter a username or email!",
            Self::NoUsersFoundTitle => "No Users Found",
            Self::NoUsersFoundText => "No users match your search criteria",
            Self::SearchFailedTitle => "Search Failed",
            Self::SearchFailedText => "Could not search for users to share with",
            Self::SelectRecipients => "Select User(s) to Share With",
            Self::ShareSucceededTitle => "File Shared",
            Self::ShareSucceeded => "File shared successfully",
            Self::ShareFailedTitle => "Share Failed",
            Self::ShareFailedText => "Could not share file",
            Self::CsrfMissing => "CSRF token is missing",
            Self::SuccessTitle => "Success",
            Self::WarningTitle => "Warning",
            Self::ErrorTitle => "Error",
            Self::AcceptSucceeded => "File accepted and added to your cloud storage",
            Self::AcceptFailed => "Failed to accept file",
            Self::RejectSucceeded => "File share request rejected",
            Self::RejectFailed => "Failed to reject file",
            Self::Unexpected => "An unexpected error occurred",
            Self::NoSharedFiles => "No files have been shared with you",
            Self::SharedLoadFailed => "Error loading shared files. Please try again later.",
            Self::FilenameRequired => "Please enter a filename",
            Self::DocumentLoadFailed => "Failed to load file",
            Self::DocumentSaved => "File saved successfully!",
            Self::DocumentSaveFailed => "Failed to save file",
            Self::DocumentDeleted => "File deleted successfully!",
        }
    }

    fn german(self) -> &'static str {
        match self {
            Self::FilesLoadFailed => "Fehler beim Laden der Dateien",
            Self::NoFiles => "Noch keine Dateien hochgeladen",
            Self::NoFileSelected => "Keine Datei ausgewählt",
            Self::UploadSucceeded => "Datei erfolgreich hochgeladen",
            Self::UploadFailed => "Upload fehlgeschlagen",
            Self::DeleteSucceeded => "Datei erfolgreich gelöscht",
            Self::DeleteBlockedByShares => {
                "Datei mit aktiven Freigaben kann nicht gelöscht werden. Bitte widerrufen Sie zuerst die Freigaben."
            }
            Self::DeleteFailed => "Löschen fehlgeschlagen",
            Self::DeleteNetworkError => "Netzwerkfehler. Datei konnte nicht gelöscht werden.",
            Self::DownloadFailed => "Download fehlgeschlagen",
            Self::DownloadUnexpected => {
                "Beim Herunterladen der Datei ist ein unerwarteter Fehler aufgetreten."
            }
            Self::DownloadSaved => "Datei gespeichert",
            Self::InvalidFileTitle => "Ungültige Datei",
            Self::InvalidFileText => "Bitte wählen Sie eine gültige Datei zum Teilen aus",
            Self::ReceivedFileId => "Empfangene Datei-ID",
            Self::InvalidTarget => "Dieses Element hat keine gültige ID",
            Self::ShareTitle => "Datei teilen",
            Self::SearchLabel => "Benutzer nach Benutzername oder E-Mail suchen",
            Self::SearchPlaceholder => "Benutzername oder E-Mail eingeben",
            Self::SearchRequired => "Bitte geben Sie einen Benutzernamen oder eine E-Mail ein!",
            Self::NoUsersFoundTitle => "Keine Benutzer gefunden",
            Self::NoUsersFoundText => "Keine Benutzer entsprechen Ihren Suchkriterien",
            Self::SearchFailedTitle => "Suche fehlgeschlagen",
            Self::SearchFailedText => "Benutzer zum Teilen konnten nicht gesucht werden",
            Self::SelectRecipients => "Benutzer zum Teilen auswählen",
            Self::ShareSucceededTitle => "Datei geteilt",
            Self::ShareSucceeded => "Datei erfolgreich geteilt",
            Self::ShareFailedTitle => "Teilen fehlgeschlagen",
            Self::ShareFailedText => "Datei konnte nicht geteilt werden",
            Self::CsrfMissing => "CSRF-Token fehlt",
            Self::SuccessTitle => "Erfolg",
            Self::WarningTitle => "Warnung",
            Self::ErrorTitle => "Fehler",
            Self::AcceptSucceeded => "Datei angenommen und zu Ihrem Cloud-Speicher hinzugefügt",
            Self::AcceptFailed => "Datei konnte nicht angenommen werden",
            Self::RejectSucceeded => "Freigabeanfrage abgelehnt",
            Self::RejectFailed => "Datei konnte nicht abgelehnt werden",
            Self::Unexpected => "Ein unerwarteter Fehler ist aufgetreten",
            Self::NoSharedFiles => "Es wurden keine Dateien mit Ihnen geteilt",
            Self::SharedLoadFailed => {
                "Fehler beim Laden der geteilten Dateien. Bitte versuchen Sie es später erneut."
            }
            Self::FilenameRequired => "Bitte geben Sie einen Dateinamen ein",
            Self::DocumentLoadFailed => "Datei konnte nicht geladen werden",
            Self::DocumentSaved => "Datei erfolgreich gespeichert!",
            Self::DocumentSaveFailed => "Datei konnte nicht gespeichert werden",
            Self::DocumentDeleted => "Datei erfolgreich gelöscht!",
        }
    }
}
