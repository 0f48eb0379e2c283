use crate::workspace::Workspace;

/// Everything the screens share. The stores inside are only mutated from
/// `update`.
#[derive(Debug)]
pub struct AppState {
    pub workspace: Workspace,
}

impl AppState {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }
}
