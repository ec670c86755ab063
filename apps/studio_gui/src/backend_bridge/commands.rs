//! Backend commands queued from UI to the backend worker.

use std::path::PathBuf;

use shared::{domain::SessionId, protocol::CompileRequest};

#[derive(Debug)]
pub enum BackendCommand {
    Compile {
        session_id: SessionId,
        request: CompileRequest,
    },
    LoadSourceFile {
        path: PathBuf,
    },
    SaveSource {
        path: PathBuf,
        text: String,
    },
}
