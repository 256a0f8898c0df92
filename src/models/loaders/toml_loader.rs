use crate::models::template::DocumentTemplate;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载文档模板
pub async fn load_template(toml_file_path: &Path) -> Result<DocumentTemplate> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取模板文件: {}", toml_file_path.display()))?;

    let template: DocumentTemplate = toml::from_str(&content)
        .with_context(|| format!("无法解析模板文件: {}", toml_file_path.display()))?;

    tracing::info!(
        "已加载文档模板: {} 个横幅, {} 个拆行标题",
        template.boilerplate_blocks.len(),
        template.split_markers.len()
    );

    Ok(template)
}

/// 加载模板，未指定路径时使用内置模板
pub async fn load_template_or_default(toml_file_path: Option<&str>) -> Result<DocumentTemplate> {
    match toml_file_path {
        Some(path) => load_template(Path::new(path)).await,
        None => Ok(DocumentTemplate::default()),
    }
}
