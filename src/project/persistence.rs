// called on startup, on the autosave cadence, and on quit; keeps the whole
// project on disk so the next run picks up where this one left off
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::project::state::ProjectState;

const GRIDSEQ_DIR: &str = ".gridseq";
const PROJECT_FILE: &str = "project.json";

// <project_dir>/.gridseq/project.json
fn project_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(GRIDSEQ_DIR).join(PROJECT_FILE)
}

// None on a missing file or a payload that doesn't parse; the caller falls
// back to defaults either way. Whatever does parse still gets normalized,
// a file written by an older build can be missing fields or carry stale
// dimensions.
pub fn load_project(project_dir: &Path) -> Option<ProjectState> {
    let path = project_file_path(project_dir);
    let data = std::fs::read_to_string(&path).ok()?;
    let mut state: ProjectState = serde_json::from_str(&data).ok()?;
    state.normalize();
    Some(state)
}

// Save the project state to disk, making the files if they don't exist already
pub fn save_project(project_dir: &Path, state: &ProjectState) -> anyhow::Result<()> {
    let path = project_file_path(project_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
