use crate::error::FileError;
use crate::models::narration::NarrationScript;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载解说脚本
pub async fn load_narration_script(toml_file_path: &Path) -> Result<NarrationScript> {
    let path_text = toml_file_path.display().to_string();

    if !toml_file_path.exists() {
        return Err(FileError::NotFound { path: path_text }.into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path_text.clone(),
            source,
        })?;

    let mut script = parse_narration_script(&content)
        .with_context(|| format!("无法解析解说脚本: {}", path_text))?;

    script.file_path = Some(path_text);
    tracing::info!(
        "已加载解说脚本: 会话 {} / {} 个事件",
        script.session_id,
        script.events.len()
    );

    Ok(script)
}

/// 从 TOML 文本解析解说脚本
pub fn parse_narration_script(content: &str) -> Result<NarrationScript, FileError> {
    toml::from_str(content).map_err(|source| FileError::TomlParseFailed {
        path: String::new(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NarrationEvent;

    const SCRIPT: &str = r#"
session_id = "game-42"

[[events]]
kind = "milestone"
title = "第 42 局开始"
content = "八只龙虾入场，其中藏着两个卧底。"

[[events]]
kind = "update"
content = "第一轮投票：红钳出局。"

[[events]]
kind = "update"
content = "补充说明"
post_id = "p-7"
"#;

    #[test]
    fn test_parse_narration_script() {
        let script = parse_narration_script(SCRIPT).unwrap();
        assert_eq!(script.session_id, "game-42");
        assert_eq!(script.events.len(), 3);
        assert!(matches!(
            &script.events[0],
            NarrationEvent::Milestone { title: Some(t), submolt: None, .. } if t == "第 42 局开始"
        ));
        assert_eq!(
            script.events[2],
            NarrationEvent::Update {
                content: "补充说明".to_string(),
                post_id: Some("p-7".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let bad = "session_id = \"x\"\n[[events]]\nkind = \"shout\"\ncontent = \"hi\"\n";
        assert!(matches!(
            parse_narration_script(bad),
            Err(FileError::TomlParseFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_narration_script(Path::new("definitely/not/here.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("文件不存在"));
    }
}
