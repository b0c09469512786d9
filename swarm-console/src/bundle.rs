//! Artifact downloads.
//!
//! Writes a generated artifact set to disk: a zip archive for multi-file
//! bundles (directory-style entry names preserved, which is how the
//! composite module's `subsystems/<id>/` prefixes survive) or a single
//! plain-text file. Artifact sets are written whole; nothing here edits a
//! produced artifact.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use swarm_console_sdk::GeneratedArtifact;

/// Deterministic bundle filename for a module, timestamp-suffixed.
pub fn bundle_filename(module_id: &str) -> String {
    format!(
        "{}_{}.zip",
        module_id.to_lowercase(),
        Utc::now().format("%Y%m%d_%H%M%S")
    )
}

/// Write the artifact set as a zip archive at `path`.
pub fn write_zip(path: &Path, artifacts: &[GeneratedArtifact]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for artifact in artifacts {
        writer
            .start_file(artifact.filename.as_str(), options)
            .with_context(|| format!("adding {} to archive", artifact.filename))?;
        writer
            .write_all(artifact.body.as_bytes())
            .with_context(|| format!("writing {}", artifact.filename))?;
    }

    writer.finish().context("finalizing archive")?;
    Ok(())
}

/// Write a single artifact as plain text next to `dir`, flattening any
/// directory prefix in its name.
pub fn write_text(dir: &Path, artifact: &GeneratedArtifact) -> Result<PathBuf> {
    let flat = artifact.filename.replace('/', "_");
    let path = dir.join(flat);
    std::fs::write(&path, &artifact.body)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("swarm-console-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn zip_preserves_directory_prefixes() {
        let dir = temp_dir();
        let path = dir.join("bundle.zip");
        let artifacts = vec![
            GeneratedArtifact {
                filename: "README.md".to_string(),
                language: "markdown".to_string(),
                body: "# top".to_string(),
            },
            GeneratedArtifact {
                filename: "subsystems/HFT_ARBITRAGE_CORE/src/main.py".to_string(),
                language: "python".to_string(),
                body: "print('hft')".to_string(),
            },
        ];
        write_zip(&path, &artifacts).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "README.md".to_string(),
                "subsystems/HFT_ARBITRAGE_CORE/src/main.py".to_string()
            ]
        );

        let mut body = String::new();
        archive
            .by_name("subsystems/HFT_ARBITRAGE_CORE/src/main.py")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert_eq!(body, "print('hft')");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn text_write_flattens_prefix() {
        let dir = temp_dir();
        let artifact = GeneratedArtifact {
            filename: "config/production.yaml".to_string(),
            language: "yaml".to_string(),
            body: "risk: low".to_string(),
        };
        let path = write_text(&dir, &artifact).unwrap();
        assert!(path.ends_with("config_production.yaml"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "risk: low");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
