use crate::error::{RaceError, Result};
use crate::theme::SkinKind;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "maze-race.toml";
pub const DEFAULT_POLL_MS: u64 = 100;

#[cfg(windows)]
pub const DEFAULT_ENGINE: &str = "maze.exe";
#[cfg(not(windows))]
pub const DEFAULT_ENGINE: &str = "./maze";

#[derive(Parser, Debug, Default)]
#[command(name = "maze-race", about = "Terminal front end for the maze engine")]
pub struct Args {
    /// Engine executable, relative to the work directory unless absolute.
    #[arg(long)]
    pub engine: Option<PathBuf>,
    /// Directory the engine runs in and writes its marker files to.
    #[arg(long)]
    pub workdir: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// ASCII labels instead of emoji.
    #[arg(long, default_value_t = false)]
    pub plain: bool,
    #[arg(long)]
    pub poll_ms: Option<u64>,
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub engine: Option<PathBuf>,
    pub skin: Option<String>,
    pub poll_ms: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub debug: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub engine: PathBuf,
    pub workdir: PathBuf,
    pub poll_interval: Duration,
    pub skin: SkinKind,
    pub log_dir: Option<PathBuf>,
    pub debug: bool,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let args = Args::parse();
        let cwd = std::env::current_dir()?;
        Self::from_parts(args, &cwd, |key| std::env::var(key).ok())
    }

    /// Flags win over the environment, which wins over the config file.
    pub fn from_parts<E>(args: Args, cwd: &Path, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let workdir = match args.workdir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };
        let file = match &args.config {
            Some(path) => read_file_config(path)?,
            None => {
                let path = workdir.join(CONFIG_FILE);
                if path.is_file() {
                    read_file_config(&path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let engine = args
            .engine
            .or_else(|| env("MAZE_RACE_ENGINE").map(PathBuf::from))
            .or(file.engine)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENGINE));

        let skin = if args.plain {
            SkinKind::Plain
        } else {
            match file.skin.as_deref() {
                Some(name) => SkinKind::parse(name).ok_or_else(|| RaceError::Config {
                    path: args.config.clone().unwrap_or_else(|| workdir.join(CONFIG_FILE)),
                    reason: format!("unknown skin '{name}'"),
                })?,
                None => SkinKind::default(),
            }
        };

        let poll_ms = args
            .poll_ms
            .or(file.poll_ms)
            .unwrap_or(DEFAULT_POLL_MS)
            .max(1);

        let log_dir = args
            .log_dir
            .or_else(|| env("MAZE_RACE_LOG_DIR").map(PathBuf::from))
            .or(file.log_dir);

        let debug = args.debug
            || env("MAZE_RACE_DEBUG").map(|v| is_true(&v)).unwrap_or(false)
            || file.debug.unwrap_or(false);

        let log_level = env("MAZE_RACE_LOG_LEVEL")
            .or(file.log_level)
            .unwrap_or_else(|| "info".to_string());

        Ok(Config {
            engine,
            workdir,
            poll_interval: Duration::from_millis(poll_ms),
            skin,
            log_dir,
            debug,
            log_level,
        })
    }

    pub fn engine_path(&self) -> PathBuf {
        if self.engine.is_absolute() {
            self.engine.clone()
        } else {
            self.workdir.join(&self.engine)
        }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path).map_err(|err| RaceError::Config {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    toml::from_str(&raw).map_err(|err| RaceError::Config {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

fn is_true(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_flags_env_or_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::from_parts(Args::default(), dir.path(), no_env).expect("config");

        assert_eq!(config.workdir, dir.path());
        assert_eq!(config.engine, PathBuf::from(DEFAULT_ENGINE));
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.skin, SkinKind::Fancy);
        assert_eq!(config.log_dir, None);
        assert!(!config.debug);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "engine = \"from-file\"\nlog_dir = \"file-logs\"\nlog_level = \"warn\"\npoll_ms = 40\n",
        )
        .expect("write");
        let env: HashMap<&str, &str> = [
            ("MAZE_RACE_ENGINE", "from-env"),
            ("MAZE_RACE_LOG_DIR", "env-logs"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let from_env = Config::from_parts(Args::default(), dir.path(), lookup).expect("config");
        assert_eq!(from_env.engine, PathBuf::from("from-env"));
        assert_eq!(from_env.log_dir, Some(PathBuf::from("env-logs")));
        assert_eq!(from_env.log_level, "warn");
        assert_eq!(from_env.poll_interval, Duration::from_millis(40));

        let args = Args {
            engine: Some(PathBuf::from("from-flag")),
            poll_ms: Some(250),
            ..Args::default()
        };
        let from_flag = Config::from_parts(args, dir.path(), lookup).expect("config");
        assert_eq!(from_flag.engine, PathBuf::from("from-flag"));
        assert_eq!(from_flag.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn engine_path_resolves_against_workdir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = Args {
            engine: Some(PathBuf::from("bin/maze")),
            ..Args::default()
        };
        let config = Config::from_parts(args, dir.path(), no_env).expect("config");
        assert_eq!(config.engine_path(), dir.path().join("bin/maze"));
    }

    #[test]
    fn plain_flag_and_debug_env() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = Args {
            plain: true,
            ..Args::default()
        };
        let config = Config::from_parts(args, dir.path(), |key| {
            (key == "MAZE_RACE_DEBUG").then(|| "yes".to_string())
        })
        .expect("config");
        assert_eq!(config.skin, SkinKind::Plain);
        assert!(config.debug);
    }

    #[test]
    fn explicit_config_must_exist_and_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = Args {
            config: Some(dir.path().join("nope.toml")),
            ..Args::default()
        };
        let err = Config::from_parts(missing, dir.path(), no_env).expect_err("missing file");
        assert!(matches!(err, RaceError::Config { .. }));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "skin = \"neon\"\n").expect("write");
        let args = Args {
            config: Some(bad),
            ..Args::default()
        };
        let err = Config::from_parts(args, dir.path(), no_env).expect_err("bad skin");
        assert!(err.to_string().contains("unknown skin 'neon'"));
    }
}
