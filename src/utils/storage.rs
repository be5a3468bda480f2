//! Staging de archivos subidos
//!
//! El archivo recibido se escribe a disco con un nombre único antes de
//! decodificarse, y se borra después de procesarlo sin importar el
//! resultado.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

/// Crear el directorio de staging si no existe
pub async fn ensure_upload_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir).await
}

/// Nombre único para el archivo staged, resistente a colisiones
pub fn staged_filename(extension: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), extension)
}

/// Escribir los bytes subidos al directorio de staging
pub async fn stage_upload(dir: &Path, extension: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let path = dir.join(staged_filename(extension));
    fs::write(&path, bytes).await?;
    Ok(path)
}

/// Borrar el archivo staged. Best effort: un fallo acá no cambia el
/// resultado de la request, solo se loguea.
pub async fn remove_staged(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!("⚠️ No se pudo borrar el archivo staged {}: {}", path.display(), e);
    }
}
