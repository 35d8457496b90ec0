use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{KitError, KitResult};
use crate::kit::platform::HostPlatform;
use crate::model::config::home_dir;
use crate::model::project::ProjectFile;

/// A kit to copy from a development checkout into the host's kits directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub kit_name: String,
    pub source_root: PathBuf,
    pub target_root: PathBuf,
}

/// Progress notifications emitted while installing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    Copying,
    RemovingOld,
    Complete,
}

impl InstallStep {
    pub fn message(self) -> &'static str {
        match self {
            InstallStep::Copying => "Copying new kit data...",
            InstallStep::RemovingOld => "Removing old kit...",
            InstallStep::Complete => "Installation complete.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub kit_name: String,
    pub destination: PathBuf,
    pub files_copied: usize,
    pub replaced: bool,
}

impl InstallRequest {
    pub fn new(
        kit_name: impl Into<String>,
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            kit_name: kit_name.into(),
            source_root: source_root.into(),
            target_root: target_root.into(),
        }
    }

    pub fn source_dir(&self) -> PathBuf {
        self.source_root.join(&self.kit_name)
    }

    pub fn target_dir(&self) -> PathBuf {
        self.target_root.join(&self.kit_name)
    }

    fn staging_dir(&self) -> PathBuf {
        self.target_root.join(format!(".{}.staging", self.kit_name))
    }

    fn has_plain_name(&self) -> bool {
        let mut components = Path::new(&self.kit_name).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }
}

/// Copies kits into the host's kits directory, replacing previous installs.
///
/// The kit is first copied into a hidden staging directory next to the
/// destination and only renamed into place once the copy has finished, so
/// an interrupted copy never leaves a half-written live kit. Two installs
/// of the same kit running at once are not coordinated.
#[derive(Debug, Default)]
pub struct KitInstaller;

impl KitInstaller {
    pub fn install_with(
        request: &InstallRequest,
        mut on_step: impl FnMut(InstallStep),
    ) -> KitResult<InstallReport> {
        let source = request.source_dir();
        if !request.has_plain_name() || !source.is_dir() {
            return Err(KitError::SourceMissing(source));
        }
        if !request.target_root.is_dir() {
            return Err(KitError::unwritable(
                &request.target_root,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "kits directory is missing or not a directory",
                ),
            ));
        }

        let staging = request.staging_dir();
        if staging.exists() {
            tracing::warn!("clearing stale staging directory {}", staging.display());
            fs::remove_dir_all(&staging).map_err(|err| KitError::unwritable(&staging, err))?;
        }

        on_step(InstallStep::Copying);
        let files_copied = match copy_tree(&source, &staging) {
            Ok(count) => count,
            Err(err) => {
                discard(&staging);
                return Err(err);
            }
        };

        let destination = request.target_dir();
        let replaced = destination.exists();
        if replaced {
            on_step(InstallStep::RemovingOld);
            if let Err(err) = fs::remove_dir_all(&destination) {
                discard(&staging);
                return Err(KitError::unwritable(&destination, err));
            }
        }

        promote(&staging, &destination)?;

        tracing::info!(
            kit = %request.kit_name,
            files = files_copied,
            replaced,
            "installed kit to {}",
            destination.display()
        );
        on_step(InstallStep::Complete);

        Ok(InstallReport {
            kit_name: request.kit_name.clone(),
            destination,
            files_copied,
            replaced,
        })
    }
}

/// Resolves the kits directory: an explicit override wins, otherwise the
/// host's fixed per-OS location.
pub fn resolve_target_root(os: &str, kits_dir: Option<PathBuf>) -> KitResult<PathBuf> {
    if let Some(dir) = kits_dir {
        return Ok(dir);
    }

    let platform = HostPlatform::from_os(os)?;
    let home = home_dir().ok_or_else(|| {
        KitError::unwritable(
            "~",
            io::Error::new(io::ErrorKind::NotFound, "cannot determine home directory"),
        )
    })?;
    Ok(platform.kits_dir(&home))
}

/// Installs the kit named by the project file in `source_root`.
///
/// The target is resolved before anything is read or written, so an
/// unsupported OS leaves the filesystem untouched.
pub fn install_project(
    project_path: &Path,
    source_root: &Path,
    os: &str,
    kits_dir: Option<PathBuf>,
    on_step: impl FnMut(InstallStep),
) -> KitResult<InstallReport> {
    let target_root = resolve_target_root(os, kits_dir)?;
    let project = ProjectFile::load(project_path)?;
    tracing::info!(
        kit = project.kit_name(),
        version = ?project.project.version,
        "installing from {}",
        source_root.display()
    );
    let request = InstallRequest::new(project.kit_name(), source_root, target_root);
    KitInstaller::install_with(&request, on_step)
}

fn copy_tree(source: &Path, destination: &Path) -> KitResult<usize> {
    let mut files = 0;

    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(true)
        .build();

    for entry in walker {
        let entry = entry.map_err(|err| KitError::io(source, io::Error::other(err)))?;
        let path = entry.path();
        let relative = path
            .strip_prefix(source)
            .map_err(|err| KitError::io(path, io::Error::other(err)))?;
        let target = destination.join(relative);

        if entry.file_type().is_some_and(|kind| kind.is_dir()) {
            fs::create_dir_all(&target).map_err(|err| KitError::unwritable(&target, err))?;
        } else {
            fs::copy(path, &target).map_err(|err| KitError::unwritable(&target, err))?;
            files += 1;
        }
    }

    Ok(files)
}

/// Moves a finished staging copy into place. On failure the staging copy
/// is kept, since the previous install may already be gone.
fn promote(staging: &Path, destination: &Path) -> KitResult<()> {
    fs::rename(staging, destination).map_err(|source| KitError::Stranded {
        staging: staging.to_path_buf(),
        destination: destination.to_path_buf(),
        source,
    })
}

fn discard(staging: &Path) {
    if let Err(err) = fs::remove_dir_all(staging) {
        tracing::warn!("failed to remove staging directory {}: {err}", staging.display());
    }
}
