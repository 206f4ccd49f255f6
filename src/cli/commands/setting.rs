use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, short_timestamp, truncate_with_ellipsis};
use crate::db::{Database, Setting, SettingRepository};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub(crate) struct SettingDisplay {
    #[tabled(rename = "Key")]
    pub(crate) key: String,
    #[tabled(rename = "Value")]
    pub(crate) value: String,
    #[tabled(rename = "Updated")]
    pub(crate) updated_at: String,
}

impl From<&Setting> for SettingDisplay {
    fn from(setting: &Setting) -> Self {
        Self {
            key: setting.key.clone(),
            value: truncate_with_ellipsis(&setting.value, 60),
            updated_at: short_timestamp(&setting.updated_at),
        }
    }
}

/// List site settings by key
pub async fn list_settings<D: Database>(db: &D, format: &str) -> CliResult<String> {
    let settings = db.settings().list().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&settings)?),
        _ => Ok(format_table(&settings)),
    }
}

pub(crate) fn format_table(settings: &[Setting]) -> String {
    if settings.is_empty() {
        return "No settings found.".to_string();
    }

    let display: Vec<SettingDisplay> = settings.iter().map(|s| s.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Insert or overwrite one setting
pub async fn set_setting<D: Database>(db: &D, key: &str, value: &str) -> CliResult<String> {
    let stored = db
        .settings()
        .upsert_many(&[(key.to_string(), value.to_string())])
        .await?;
    let key = stored.first().map(|s| s.key.as_str()).unwrap_or(key);
    Ok(format!("✓ Set setting: {}", key))
}

pub async fn delete_setting<D: Database>(db: &D, key: &str) -> CliResult<String> {
    db.settings().delete(key).await?;
    Ok(format!("✓ Deleted setting: {}", key))
}
