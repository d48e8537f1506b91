use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WorkspaceRef {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub active_workspace: WorkspaceRef,
    /// `id` is 0 and `name` empty when no special workspace is shown.
    #[serde(default)]
    pub special_workspace: WorkspaceRef,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub monitor: String,
    #[serde(default)]
    pub windows: u32,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ActiveWindow {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_payload() {
        let json = r#"[{
            "id": 0, "name": "DP-1", "description": "x", "focused": true,
            "activeWorkspace": {"id": 3, "name": "3"},
            "specialWorkspace": {"id": -98, "name": "special:magic"},
            "width": 2560
        }]"#;
        let monitors: Vec<Monitor> = serde_json::from_str(json).unwrap();
        assert_eq!(monitors[0].active_workspace.id, 3);
        assert_eq!(monitors[0].special_workspace.id, -98);
        assert_eq!(monitors[0].special_workspace.name, "special:magic");
    }

    #[test]
    fn test_workspace_payload() {
        let json = r#"[{"id": 1, "name": "1", "monitor": "DP-1", "windows": 2, "hasfullscreen": false}]"#;
        let ws: Vec<Workspace> = serde_json::from_str(json).unwrap();
        assert_eq!(ws[0].windows, 2);
    }
}
