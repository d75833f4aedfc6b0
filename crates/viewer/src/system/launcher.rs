use std::path::{Path, PathBuf};
use std::process::{Child, Command};

/// Переменная окружения, которой помечен уже запущенный просмотрщик
pub const GUARD_VAR: &str = "LOG_VIEWER_RUNNING";

/// Запускать ли просмотрщик: не запускаем повторно из самого себя
pub fn should_launch(guard_value: Option<&str>) -> bool {
    guard_value != Some("1")
}

/// Путь к исполняемому файлу просмотрщика рядом с лаунчером
pub fn viewer_path(exe_dir: &Path) -> PathBuf {
    exe_dir.join(format!("viewer{}", std::env::consts::EXE_SUFFIX))
}

/// Запускает просмотрщик фоновым процессом. Возвращает `None`, если запуск
/// не нужен или исполняемый файл не найден.
pub fn launch() -> anyhow::Result<Option<Child>> {
    let guard = std::env::var(GUARD_VAR).ok();
    if !should_launch(guard.as_deref()) {
        tracing::info!("{}=1, viewer is already running", GUARD_VAR);
        return Ok(None);
    }

    let exe_path = std::env::current_exe()?;
    let exe_dir = exe_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("executable {} has no parent directory", exe_path.display()))?;

    let viewer = viewer_path(exe_dir);
    if !viewer.exists() {
        tracing::warn!("viewer executable not found at {}", viewer.display());
        return Ok(None);
    }

    let child = Command::new(&viewer)
        .env(GUARD_VAR, "1")
        .current_dir(exe_dir)
        .spawn()
        .map_err(|e| anyhow::anyhow!("Cannot start {}: {}", viewer.display(), e))?;

    tracing::info!("Started viewer {} (pid {})", viewer.display(), child.id());
    Ok(Some(child))
}
