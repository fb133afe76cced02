//! Transient install and removal of the generator package.

use super::scripts::{ScriptAction, update_generate_script};
use crate::packager::{
    error::Result,
    settings::Settings,
    utils::{fs, process::CommandRunner},
};
use std::path::Path;

/// Package providing the generator CLI.
pub const PRISMA_PACKAGE: &str = "prisma";

/// Paths the package manager leaves behind after removing the generator.
///
/// The generator is a peer dependency of the client library, so removal
/// keeps its shim and package directory around. Both are large and must not
/// ship in the artifact.
pub const LEFTOVER_PATHS: [&str; 2] = ["node_modules/.bin/prisma", "node_modules/prisma"];

/// Package specifier, version-pinned when a version is configured.
pub fn package_specifier(version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{PRISMA_PACKAGE}@{version}"),
        None => PRISMA_PACKAGE.to_string(),
    }
}

/// Sub-command that adds a dependency for the given package manager.
///
/// `npm` spells it `install`; `yarn`, `pnpm` and `bun` reject
/// `install <package>` and use `add`.
pub fn install_subcommand(package_manager: &str) -> &'static str {
    match package_manager {
        "npm" => "install",
        _ => "add",
    }
}

/// Adds the generation script and installs the generator as a dev dependency.
pub async fn install(runner: &dyn CommandRunner, settings: &Settings, cwd: &Path) -> Result<()> {
    update_generate_script(ScriptAction::Add, cwd, settings.data_proxy()).await?;

    let package_manager = settings.package_manager();
    let specifier = package_specifier(settings.prisma_version());
    runner
        .run(
            package_manager,
            &[install_subcommand(package_manager), "-D", &specifier],
            cwd,
        )
        .await
}

/// Removes the generator and force-deletes what the package manager leaves.
///
/// Returns the number of bytes reclaimed from the leftover paths.
pub async fn remove(runner: &dyn CommandRunner, settings: &Settings, cwd: &Path) -> Result<u64> {
    runner
        .run(settings.package_manager(), &["remove", PRISMA_PACKAGE], cwd)
        .await?;

    let mut reclaimed = 0;
    for leftover in LEFTOVER_PATHS {
        let path = cwd.join(leftover);
        reclaimed += fs::disk_usage(&path).await;
        fs::remove_path(&path).await?;
    }
    log::debug!(
        "Removed generator leftovers in {} ({} bytes)",
        cwd.display(),
        reclaimed
    );
    Ok(reclaimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::{ServiceDescriptor, SettingsBuilder};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    #[async_trait]
    impl CommandRunner for Recorder {
        async fn run(&self, command: &str, args: &[&str], _cwd: &Path) -> Result<()> {
            self.0
                .lock()
                .unwrap()
                .push(crate::packager::utils::process::command_line(command, args));
            Ok(())
        }
    }

    fn settings(yaml: &str) -> Settings {
        let descriptor: ServiceDescriptor = serde_yaml::from_str(yaml).unwrap();
        SettingsBuilder::new()
            .service_path("/srv/app")
            .descriptor(descriptor)
            .build()
            .unwrap()
    }

    fn unit_with_manifest() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"scripts":{}}"#).unwrap();
        dir
    }

    #[test]
    fn specifier_pins_version_only_when_configured() {
        assert_eq!(package_specifier(None), "prisma");
        assert_eq!(package_specifier(Some("5.0.0")), "prisma@5.0.0");
    }

    #[tokio::test]
    async fn install_without_version_uses_bare_package() {
        let dir = unit_with_manifest();
        let runner = Recorder::default();
        install(&runner, &settings("service: app"), dir.path())
            .await
            .unwrap();

        assert_eq!(*runner.0.lock().unwrap(), ["npm install -D prisma"]);
        let manifest = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(manifest.contains("\"prisma:generate\": \"prisma generate\""));
    }

    #[tokio::test]
    async fn install_with_version_pins_it() {
        let dir = unit_with_manifest();
        let runner = Recorder::default();
        let s = settings("custom:\n  prisma:\n    version: 5.0.0\n    packageManager: yarn\n");
        install(&runner, &s, dir.path()).await.unwrap();
        assert_eq!(*runner.0.lock().unwrap(), ["yarn add -D prisma@5.0.0"]);
    }

    #[tokio::test]
    async fn remove_deletes_both_leftovers_whether_or_not_they_exist() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Recorder::default();
        let s = settings("service: app");

        remove(&runner, &s, dir.path()).await.unwrap();

        let pkg = dir.path().join("node_modules/prisma");
        std::fs::create_dir_all(pkg.join("build")).unwrap();
        std::fs::write(pkg.join("build/index.js"), [0u8; 64]).unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/.bin")).unwrap();
        std::fs::write(dir.path().join("node_modules/.bin/prisma"), [0u8; 16]).unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/@prisma/client")).unwrap();

        let reclaimed = remove(&runner, &s, dir.path()).await.unwrap();

        assert_eq!(reclaimed, 80);
        assert!(!pkg.exists());
        assert!(!dir.path().join("node_modules/.bin/prisma").exists());
        assert!(dir.path().join("node_modules/@prisma/client").exists());
        assert_eq!(
            *runner.0.lock().unwrap(),
            ["npm remove prisma", "npm remove prisma"]
        );
    }
}
