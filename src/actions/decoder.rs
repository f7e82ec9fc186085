// Decoder install action: build dump1090 from source and install it

use super::Provisioner;
use crate::error::{HubError, Result};
use crate::platform::command::CommandRunner;
use crate::utils::fs::ensure_dir;
use crate::{log_info, log_warn};
use std::path::{Path, PathBuf};

/// Directory name a `git clone` of the repository produces
pub fn source_dir_name(repo: &str) -> &str {
    repo.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .trim_end_matches(".git")
}

/// Finds the .deb files a package build left next to the source tree
fn find_debs(build_root: &Path, package: &str) -> Result<Vec<PathBuf>> {
    let prefix = format!("{}_", package);
    let mut debs = Vec::new();

    for entry in std::fs::read_dir(build_root)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with(".deb") {
            debs.push(entry.path());
        }
    }

    if debs.is_empty() {
        return Err(HubError::Missing(format!(
            "no {}*.deb found in {} after build",
            prefix,
            build_root.display()
        )));
    }

    debs.sort();
    Ok(debs)
}

impl<R: CommandRunner> Provisioner<'_, R> {
    /// Clone the decoder repository, build its package, install it (with a
    /// dependency-fix fallback) and enable the resulting service.
    ///
    /// Clone or build failure propagates and aborts the run; the pre-clean
    /// below removes whatever a previously failed run left behind.
    pub fn decoder_install(&self) -> Result<()> {
        let settings = self.settings;
        ensure_dir(&settings.build_root)?;

        // The derived name must be a real subdirectory of the build root;
        // anything else would point the pre-clean at the wrong tree
        let dir_name = source_dir_name(&settings.decoder_repo);
        if dir_name.is_empty() || dir_name == "." || dir_name == ".." {
            return Err(HubError::Config(format!(
                "cannot derive a source directory name from repository '{}'",
                settings.decoder_repo
            )));
        }

        let src_dir = settings.build_root.join(dir_name);
        if src_dir.exists() {
            log_info!("Removing previous build directory {}", src_dir.display());
            std::fs::remove_dir_all(&src_dir)?;
        }

        log_info!("Cloning {}", settings.decoder_repo);
        let src_dir_str = src_dir.to_string_lossy();
        self.runner
            .run_interactive("git", &["clone", &settings.decoder_repo, &src_dir_str])?;

        log_info!("Building {} package", settings.decoder_package);
        self.runner
            .run_interactive_in(&src_dir, "dpkg-buildpackage", &["-b", "-uc"])?;

        let debs = find_debs(&settings.build_root, &settings.decoder_package)?;
        let deb_args: Vec<String> = debs
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let mut args = vec!["-i"];
        args.extend(deb_args.iter().map(String::as_str));

        log_info!("Installing {}", deb_args.join(" "));
        match self.runner.run_interactive("dpkg", &args) {
            Ok(()) => {}
            Err(HubError::Command { .. }) => {
                log_warn!("dpkg reported unmet dependencies, running apt-get -f install");
                self.runner
                    .run_interactive("apt-get", &["-y", "-f", "install"])?;
            }
            Err(e) => return Err(e),
        }

        let unit = format!("{}.service", settings.decoder_service);
        let systemd = self.systemd();
        systemd.enable(&unit)?;
        systemd.start(&unit)?;

        log_info!("Decoder service {} enabled and started", unit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_dir_name_strips_git_suffix() {
        assert_eq!(
            source_dir_name("https://github.com/mutability/dump1090.git"),
            "dump1090"
        );
        assert_eq!(
            source_dir_name("https://github.com/mutability/dump1090"),
            "dump1090"
        );
    }

    #[test]
    fn source_dir_name_ignores_trailing_slashes() {
        assert_eq!(
            source_dir_name("https://github.com/mutability/dump1090/"),
            "dump1090"
        );
        assert_eq!(
            source_dir_name("https://github.com/mutability/dump1090.git/"),
            "dump1090"
        );
        assert_eq!(source_dir_name("/"), "");
        assert_eq!(source_dir_name(""), "");
    }

    #[test]
    fn find_debs_matches_only_the_package_prefix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dump1090-mutability_1.15_armhf.deb"), "").unwrap();
        std::fs::write(dir.path().join("dump1090-mutability_1.15_armhf.changes"), "").unwrap();
        std::fs::write(dir.path().join("other-package_1.0_all.deb"), "").unwrap();

        let debs = find_debs(dir.path(), "dump1090-mutability").unwrap();
        assert_eq!(debs.len(), 1);
        assert!(
            debs[0]
                .file_name()
                .unwrap()
                .to_string_lossy()
                .ends_with("armhf.deb")
        );
    }

    #[test]
    fn find_debs_errors_when_build_produced_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_debs(dir.path(), "dump1090-mutability"),
            Err(HubError::Missing(_))
        ));
    }
}
