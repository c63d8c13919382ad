//! engine::runner
//!
//! A documentation pass for one built version.
//!
//! # Architecture
//!
//! [`Session`] binds a resolved configuration to the version read from the
//! package manifest and the paths derived from both. [`Session::plan`] is
//! read-only and backs `status`; [`Session::finalize`] runs the full pass:
//!
//! ```text
//! Install assets -> Scan -> Reconcile -> Materialize -> Emit -> Persist -> Register
//! ```
//!
//! # Invariants
//!
//! - Configuration is validated before a session can be built
//! - The package registry is only touched in monorepo mode, through the
//!   injected [`RegistryAccess`]
//! - Metadata is persisted after links and artifacts, so a failed pass is
//!   recomputed from the filesystem on the next run

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::reconcile::{reconcile, MetadataDiff};
use super::scan::{scan, DocSnapshot};
use crate::core::config::ResolvedConfig;
use crate::core::manifest::{read_package_version, ManifestError};
use crate::core::metadata::{MetadataError, MetadataStore, VersionMetadata};
use crate::core::paths::DocPaths;
use crate::core::version::Version;
use crate::emit::{self, site, EmitError};
use crate::registry::{FileRegistry, PackageRegistry, RegistryAccess, RegistryError};
use crate::store::{materialize, prune, DocStore, LinkOutcome, LinkPlan, StoreError};

/// Errors from a documentation pass.
#[derive(Debug, Error)]
pub enum RunError {
    /// Reading the built version failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Directory or link operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Persisting metadata failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Writing an artifact failed.
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// Persisting the package registry failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The reconciled view of a version root, before anything is written.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// The record as persisted.
    pub prior: VersionMetadata,
    /// The filesystem as scanned.
    pub snapshot: DocSnapshot,
    /// The corrected record.
    pub metadata: VersionMetadata,
    /// Alias links the corrected record calls for.
    pub links: LinkPlan,
    /// What changes between `prior` and `metadata`.
    pub diff: MetadataDiff,
}

/// What a finalize pass did.
#[derive(Debug, Clone)]
pub struct FinalizeReport {
    pub version: Version,
    pub metadata: VersionMetadata,
    pub diff: MetadataDiff,
    pub links: Vec<LinkOutcome>,
    /// Stale minor links removed.
    pub pruned: Vec<String>,
    /// Files written, in order.
    pub artifacts: Vec<PathBuf>,
    pub nojekyll_moved: bool,
    pub menu_script_installed: bool,
    /// `Some(true)` when the package was newly registered (monorepo only).
    pub package_registered: Option<bool>,
}

/// One documentation pass over a version root.
pub struct Session {
    config: ResolvedConfig,
    version: Version,
    cwd: PathBuf,
    paths: DocPaths,
    registry: Option<Box<dyn RegistryAccess>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version)
            .field("paths", &self.paths)
            .field("registry", &self.registry.is_some())
            .finish()
    }
}

impl Session {
    /// Open a session for the version declared by the package manifest.
    ///
    /// In monorepo mode the file-backed registry at the shared root is
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Manifest` if the manifest cannot be read or its
    /// version is invalid.
    pub fn open(config: ResolvedConfig, cwd: &Path) -> Result<Self, RunError> {
        let version = read_package_version(cwd, &config.package_file)?;
        debug!(version = %version, "read package version");
        Ok(Self::with_version(config, cwd, version))
    }

    /// Open a session for an explicit version.
    pub fn with_version(config: ResolvedConfig, cwd: &Path, version: Version) -> Self {
        let paths = DocPaths::resolve(&config, cwd, &version);
        let registry: Option<Box<dyn RegistryAccess>> = if paths.is_monorepo() {
            Some(Box::new(FileRegistry::new(paths.packages_metadata_path())))
        } else {
            None
        };

        Self {
            config,
            version,
            cwd: cwd.to_path_buf(),
            paths,
            registry,
        }
    }

    /// Replace the package registry accessor.
    pub fn with_registry(mut self, registry: impl RegistryAccess + 'static) -> Self {
        self.registry = Some(Box::new(registry));
        self
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn paths(&self) -> &DocPaths {
        &self.paths
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    fn store(&self) -> DocStore {
        DocStore::new(&self.paths.version_root)
    }

    fn metadata_store(&self) -> MetadataStore {
        MetadataStore::new(self.paths.metadata_path())
    }

    /// Scan and reconcile without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Store` if the version root cannot be listed.
    pub fn plan(&self) -> Result<Reconciliation, RunError> {
        let prior = self.metadata_store().load();
        let snapshot = scan(&self.store())?;
        let metadata = reconcile(&prior, &snapshot, &self.version, &self.config.pins);
        let links = LinkPlan::for_metadata(&metadata, &self.config.pins);
        let diff = MetadataDiff::between(&prior, &metadata);

        Ok(Reconciliation {
            prior,
            snapshot,
            metadata,
            links,
            diff,
        })
    }

    /// The package registry as persisted (monorepo only).
    pub fn packages(&self) -> Option<PackageRegistry> {
        self.registry.as_ref().map(|r| r.load())
    }

    /// Run the full pass.
    ///
    /// # Errors
    ///
    /// Any failure is fatal; links and artifacts written before it stay in
    /// place and the next pass reconciles them.
    pub fn finalize(&self) -> Result<FinalizeReport, RunError> {
        info!(
            version = %self.version,
            target = %self.paths.target.display(),
            "finalizing documentation"
        );

        let menu_script_installed = match &self.config.menu_script {
            Some(script) => {
                site::install_menu_script(&self.cwd.join(script), &self.paths.menu_script_path())?;
                true
            }
            None => false,
        };
        let nojekyll_moved = site::move_nojekyll(&self.paths.target, &self.paths.root)?;

        let plan = self.plan()?;
        let store = self.store();
        let links = materialize(&store, &plan.links, self.config.make_relative_links)?;
        let pruned = prune(&store, &plan.links)?;

        let mut artifacts = emit::write_version_artifacts(
            &self.paths,
            &plan.metadata,
            self.config.show_patch_versions,
        )?;

        let metadata_store = self.metadata_store();
        metadata_store.save(&plan.metadata)?;
        artifacts.push(metadata_store.path().to_path_buf());

        let package_registered = self.register_package(&mut artifacts)?;

        Ok(FinalizeReport {
            version: self.version.clone(),
            metadata: plan.metadata,
            diff: plan.diff,
            links,
            pruned,
            artifacts,
            nojekyll_moved,
            menu_script_installed,
            package_registered,
        })
    }

    fn register_package(&self, artifacts: &mut Vec<PathBuf>) -> Result<Option<bool>, RunError> {
        let (Some(name), Some(access)) = (&self.paths.package, &self.registry) else {
            return Ok(None);
        };

        let mut registry = access.load();
        let added = registry.register(name);
        if added {
            debug!(package = %name, "registered package");
        }
        access.save(&registry)?;
        artifacts.push(self.paths.packages_metadata_path());
        artifacts.extend(emit::write_package_artifacts(&self.paths, &registry)?);

        Ok(Some(added))
    }
}
