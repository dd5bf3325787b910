use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;

use crate::platform::Platform;
use crate::settings::JavaSettings;
use crate::{Error, Result};

const JAVA_HOME_VAR: &str = "JAVA_HOME";
const JAVA_VERSION_VAR: &str = "JAVA_VERSION";
const PATH_VAR: &str = "PATH";

/// Existence checks used while searching. Nothing else touches the filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait FileProbe {
    fn exists(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileProbe for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Everything the lookup reads, captured up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaEnvironment {
    pub java_home: PathBuf,
    pub java_version: Option<String>,
    pub os_name: String,
    pub path: Option<OsString>,
    pub extra_search_paths: Vec<PathBuf>,
}

impl JavaEnvironment {
    pub fn new(java_home: impl Into<PathBuf>) -> Self {
        Self {
            java_home: java_home.into(),
            java_version: None,
            os_name: std::env::consts::OS.to_string(),
            path: None,
            extra_search_paths: Vec::new(),
        }
    }

    pub fn with_java_version(mut self, version: impl Into<String>) -> Self {
        self.java_version = Some(version.into());
        self
    }

    pub fn with_os_name(mut self, os_name: impl Into<String>) -> Self {
        self.os_name = os_name.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<OsString>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn platform(&self) -> Platform {
        Platform::from_os_name(&self.os_name)
    }

    pub fn from_process() -> Result<Self> {
        Self::capture(&JavaSettings::default())
    }

    /// Reads `JAVA_HOME`, `JAVA_VERSION` and `PATH`, letting any value set in
    /// `settings` take precedence. The version is only probed from
    /// `java -version` on Windows, the one platform where it is consulted.
    pub fn capture(settings: &JavaSettings) -> Result<Self> {
        let java_home = settings
            .java_home
            .clone()
            .or_else(|| std::env::var_os(JAVA_HOME_VAR).filter(|v| !v.is_empty()).map(PathBuf::from))
            .ok_or(Error::MissingJavaHome)?;

        let os_name = settings
            .os_name
            .clone()
            .unwrap_or_else(|| std::env::consts::OS.to_string());

        let mut env = Self {
            java_home,
            java_version: settings
                .java_version
                .clone()
                .or_else(|| std::env::var(JAVA_VERSION_VAR).ok().filter(|v| !v.is_empty())),
            os_name,
            path: std::env::var_os(PATH_VAR),
            extra_search_paths: settings.extra_search_paths.clone(),
        };

        if env.path.is_none() {
            log::warn!("PATH is not set, only the Java home will be searched");
        }

        if env.java_version.is_none() && env.platform().is_windows() {
            match probe_java_version(&env.java_home, env.platform()) {
                Ok(version) => env.java_version = version,
                Err(e) => log::debug!("Could not determine Java version: {}", e),
            }
        }

        Ok(env)
    }
}

pub struct JavacLocator<F = RealFs> {
    probe: F,
}

impl JavacLocator<RealFs> {
    pub fn new() -> Self {
        Self { probe: RealFs }
    }
}

impl Default for JavacLocator<RealFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileProbe> JavacLocator<F> {
    pub fn with_probe(probe: F) -> Self {
        Self { probe }
    }

    /// Looks in `<java home>/bin` first, then every `PATH` entry in order,
    /// then any configured extra directories. `None` means no compiler exists.
    pub fn find_javac_executable(&self, env: &JavaEnvironment) -> Option<PathBuf> {
        let platform = env.platform();
        let executable = platform.javac_executable_name();

        let java_home = self.find_java_home(env);
        let javac = java_home.join("bin").join(executable);
        if self.probe.exists(&javac) {
            log::debug!("Found javac in Java home: {}", javac.display());
            return Some(javac);
        }

        let path_entries = env
            .path
            .as_deref()
            .map(|paths| platform.split_path_list(paths))
            .unwrap_or_default();

        for dir in path_entries.iter().chain(env.extra_search_paths.iter()) {
            let javac = dir.join(executable);
            if self.probe.exists(&javac) {
                log::debug!("Found javac on search path: {}", javac.display());
                return Some(javac);
            }
        }

        log::debug!("No {} found for Java home {}", executable, env.java_home.display());
        None
    }

    pub fn require_javac_executable(&self, env: &JavaEnvironment) -> Result<PathBuf> {
        self.find_javac_executable(env)
            .ok_or_else(|| Error::JavacNotFound {
                java_home: env.java_home.clone(),
            })
    }

    /// The directory actually searched for `bin/javac`.
    pub fn find_java_home(&self, env: &JavaEnvironment) -> PathBuf {
        let given = &env.java_home;

        if let Some(tools_jar) = self.find_tools_jar(env) {
            if let Some(home) = tools_jar.parent().and_then(Path::parent) {
                log::debug!("Using JDK home {} from {}", home.display(), tools_jar.display());
                return home.to_path_buf();
            }
        }

        if is_jre_dir(given) {
            if let Some(parent) = given.parent() {
                let bin = parent.join("bin");
                let platform_java = bin.join(env.platform().java_executable_name());
                if self.probe.exists(&bin.join("java")) || self.probe.exists(&platform_java) {
                    log::debug!("Java home {} is a bundled JRE, using {}", given.display(), parent.display());
                    return parent.to_path_buf();
                }
            }
        }

        given.clone()
    }

    /// Legacy JDK layouts kept the compiler classes in `lib/tools.jar`.
    pub fn find_tools_jar(&self, env: &JavaEnvironment) -> Option<PathBuf> {
        let java_home = &env.java_home;

        let tools_jar = tools_jar_in(java_home);
        if self.probe.exists(&tools_jar) {
            return Some(tools_jar);
        }

        let parent = java_home.parent()?;

        if is_jre_dir(java_home) {
            let tools_jar = tools_jar_in(parent);
            if self.probe.exists(&tools_jar) {
                return Some(tools_jar);
            }
        }

        if env.platform().is_windows() {
            let version = env.java_version.as_deref()?;
            let dir_name = dir_name(java_home);
            if versioned_jre_pattern().is_match(&dir_name) || dir_name == format!("jre{}", version) {
                let tools_jar = tools_jar_in(&parent.join(format!("jdk{}", version)));
                if self.probe.exists(&tools_jar) {
                    return Some(tools_jar);
                }
            }
        }

        None
    }
}

pub fn find_javac_executable(env: &JavaEnvironment) -> Option<PathBuf> {
    JavacLocator::new().find_javac_executable(env)
}

/// Runs `<java home>/bin/java -version` and returns the quoted version string.
pub fn probe_java_version(java_home: &Path, platform: Platform) -> Result<Option<String>> {
    let java_path = java_home.join("bin").join(platform.java_executable_name());
    if !java_path.exists() {
        return Ok(None);
    }

    let output = Command::new(&java_path)
        .arg("-version")
        .output()
        .map_err(|e| Error::Java(format!("Failed to run {}: {}", java_path.display(), e)))?;

    let version_str = String::from_utf8_lossy(&output.stderr);
    Ok(parse_java_version(&version_str))
}

fn parse_java_version(version_str: &str) -> Option<String> {
    // openjdk version "1.8.0_292" 2021-04-20
    // java version "17.0.1" 2021-10-19 LTS
    let version = version_str.lines().next()?.split('"').nth(1)?.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

fn tools_jar_in(dir: &Path) -> PathBuf {
    dir.join("lib").join("tools.jar")
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_jre_dir(path: &Path) -> bool {
    dir_name(path).eq_ignore_ascii_case("jre")
}

fn versioned_jre_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^jre\d+$").expect("jre pattern is valid"))
}
