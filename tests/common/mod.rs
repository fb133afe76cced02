//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serverless_prisma_bundle::packager::{
    CommandRunner, Result, ServiceDescriptor, Settings, SettingsBuilder,
    utils::process::command_line,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Schema written into every fixture service.
pub const SCHEMA: &str = "datasource db {\n  provider = \"postgresql\"\n  url = env(\"DATABASE_URL\")\n}\n";

/// A service root on disk with bundler output directories.
///
/// The tempdir is cleaned up when the fixture is dropped.
pub struct ServiceFixture {
    dir: TempDir,
}

impl ServiceFixture {
    /// Creates a service with `descriptor` as `serverless.yml` and a schema.
    pub fn new(descriptor: &str) -> Self {
        let dir = TempDir::new().expect("failed to create tempdir");
        std::fs::write(dir.path().join("serverless.yml"), descriptor).unwrap();
        std::fs::create_dir_all(dir.path().join("prisma")).unwrap();
        std::fs::write(dir.path().join("prisma/schema.prisma"), SCHEMA).unwrap();
        Self { dir }
    }

    /// Replaces the descriptor, for runs with changed options.
    pub fn write_descriptor(&self, descriptor: &str) {
        std::fs::write(self.root().join("serverless.yml"), descriptor).unwrap();
    }

    /// Current contents of the source schema.
    pub fn source_schema(&self) -> String {
        std::fs::read_to_string(self.root().join("prisma/schema.prisma")).unwrap()
    }

    /// Service root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Creates the bundler output directory of `unit` with a manifest.
    pub fn add_unit(&self, unit: &str) -> PathBuf {
        let dir = self.unit_dir(unit);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("package.json"),
            "{\n  \"name\": \"bundle\",\n  \"scripts\": {\n    \"start\": \"node index.js\"\n  }\n}\n",
        )
        .unwrap();
        dir
    }

    /// Bundler output directory of `unit`.
    pub fn unit_dir(&self, unit: &str) -> PathBuf {
        self.root().join(".webpack").join(unit)
    }

    /// Settings resolved from the fixture's descriptor.
    pub fn settings(&self) -> Settings {
        let yaml = std::fs::read_to_string(self.root().join("serverless.yml")).unwrap();
        let descriptor: ServiceDescriptor = serde_yaml::from_str(&yaml).unwrap();
        SettingsBuilder::new()
            .service_path(self.root())
            .descriptor(descriptor)
            .build()
            .unwrap()
    }
}

/// Engine files a generator run leaves in a unit.
pub const GENERATED_ENGINES: [&str; 4] = [
    "node_modules/.prisma/client/libquery_engine-rhel-openssl-1.0.x.so.node",
    "node_modules/.prisma/client/libquery_engine-linux-arm64-openssl-1.0.x.so.node",
    "node_modules/.prisma/client/libquery_engine-darwin-arm64.dylib.node",
    "node_modules/@prisma/engines/schema-engine-darwin-arm64",
];

/// Runner that records command lines and simulates their effect on disk.
///
/// `add`/`install` creates the generator leftovers, `run` creates the
/// engines a generation run downloads.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<(String, PathBuf)>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    /// Runner that succeeds for every command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that fails the first command line starting with `prefix`.
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_on: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    /// Recorded command lines.
    pub fn commands(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    /// Recorded working directories.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().iter().map(|(_, d)| d.clone()).collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let line = command_line(command, args);
        self.calls
            .lock()
            .unwrap()
            .push((line.clone(), cwd.to_path_buf()));

        if self.fail_on.as_deref().is_some_and(|prefix| line.starts_with(prefix)) {
            return Err(serverless_prisma_bundle::packager::Error::CommandExit {
                command: line,
                code: Some(1),
            });
        }

        match args.first().copied() {
            Some("install") | Some("add") => {
                std::fs::create_dir_all(cwd.join("node_modules/.bin")).unwrap();
                std::fs::write(cwd.join("node_modules/.bin/prisma"), "#!/bin/sh\n").unwrap();
                std::fs::create_dir_all(cwd.join("node_modules/prisma")).unwrap();
                std::fs::write(cwd.join("node_modules/prisma/package.json"), "{}").unwrap();
            }
            Some("run") => {
                for engine in GENERATED_ENGINES {
                    let path = cwd.join(engine);
                    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                    std::fs::write(path, b"engine").unwrap();
                }
            }
            _ => {}
        }
        Ok(())
    }
}
