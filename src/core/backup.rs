use crate::config::{Backend, Config};
use crate::core::Services;
use crate::errors::{AppError, AppResult};
use crate::export::{ensure_writable, require_absolute};
use clap::ValueEnum;
use flate2::Compression as GzLevel;
use flate2::write::GzEncoder;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Compression {
    Zip,
    TarGz,
}

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the local database to `dest_file`. With compression the
    /// extension becomes `.zip` / `.tar.gz` and the archive holds the
    /// database under its own file name. Returns the path written.
    pub fn backup(
        svc: &Services,
        cfg: &Config,
        dest_file: &str,
        compress: Option<Compression>,
        force: bool,
    ) -> AppResult<PathBuf> {
        if cfg.backend != Backend::Sqlite {
            return Err(AppError::Unsupported {
                backend: svc.store.backend_name(),
                operation: "backup",
            });
        }

        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);
        require_absolute(dest)?;

        if !src.exists() {
            return Err(AppError::not_found("Database", src.display().to_string()));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let final_path = match compress {
            None => dest.to_path_buf(),
            Some(Compression::Zip) => dest.with_extension("zip"),
            Some(Compression::TarGz) => dest.with_extension("tar.gz"),
        };
        ensure_writable(&final_path, force)?;

        match compress {
            None => {
                fs::copy(src, dest)?;
            }
            Some(Compression::Zip) => compress_zip(src, &final_path)?,
            Some(Compression::TarGz) => compress_tar_gz(src, &final_path)?,
        }

        svc.audit(
            "backup",
            &final_path.to_string_lossy(),
            match compress {
                None => "Backup created",
                Some(Compression::Zip) => "Backup created and zipped",
                Some(Compression::TarGz) => "Backup created as tar.gz",
            },
        );

        Ok(final_path)
    }
}

fn entry_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Other(format!("not a file path: {}", path.display())))
}

fn compress_zip(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name(src)?, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;
    Ok(())
}

fn compress_tar_gz(src: &Path, archive: &Path) -> AppResult<()> {
    let file = fs::File::create(archive)?;
    let encoder = GzEncoder::new(file, GzLevel::default());
    let mut tar = tar::Builder::new(encoder);

    tar.append_path_with_name(src, entry_name(src)?)?;
    tar.into_inner()?.finish()?;
    Ok(())
}
