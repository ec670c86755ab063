//! File transfer helpers for the editor: upload validation and download naming.

use std::path::Path;

use shared::error::TransferError;

/// Extensions the editor accepts when loading a source file.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["rs", "txt"];

/// Suggested name for the download dialog.
pub const DOWNLOAD_FILE_NAME: &str = "main.rs";

/// Rejects paths whose extension is not an accepted source extension.
pub fn validate_source_path(path: &Path) -> Result<(), TransferError> {
    let accepted = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });

    if accepted {
        Ok(())
    } else {
        Err(TransferError::UnsupportedExtension {
            path: path.to_path_buf(),
        })
    }
}

/// Short name shown in status messages after a load.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use compile_core::session::Session;

    use super::*;

    #[test]
    fn accepts_rust_and_text_sources() {
        assert!(validate_source_path(Path::new("src/main.rs")).is_ok());
        assert!(validate_source_path(Path::new("notes.txt")).is_ok());
        assert!(validate_source_path(Path::new("UPPER.RS")).is_ok());
    }

    #[test]
    fn rejects_other_extensions_and_bare_names() {
        assert!(validate_source_path(Path::new("notes.docx")).is_err());
        assert!(validate_source_path(Path::new("archive.tar.gz")).is_err());
        assert!(validate_source_path(Path::new("Makefile")).is_err());
    }

    #[test]
    fn rejection_message_names_the_file_and_the_accepted_types() {
        let err = validate_source_path(Path::new("notes.docx")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("notes.docx"));
        assert!(message.contains(".rs or .txt"));
    }

    #[test]
    fn rejected_upload_leaves_the_session_untouched() {
        let session = Session::new();
        let before = session.source_text().to_string();

        let result = validate_source_path(&PathBuf::from("notes.docx"));

        assert!(result.is_err());
        assert_eq!(session.source_text(), before);
        assert!(!session.is_compiling());
    }

    #[test]
    fn display_name_prefers_the_file_name() {
        assert_eq!(display_name(Path::new("/tmp/project/lib.rs")), "lib.rs");
        assert_eq!(display_name(Path::new("main.rs")), "main.rs");
    }
}
