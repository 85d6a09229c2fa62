use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Default name of the tunnels file inside the data directory.
pub const DEFAULT_TUNNELS_FILE: &str = "tunnels.toml";

/// Where the router writes its log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stdout,
    File,
    None,
}

impl FromStr for LogTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stdout" => Ok(LogTarget::Stdout),
            "file" => Ok(LogTarget::File),
            "none" => Ok(LogTarget::None),
            other => Err(ConfigError::InvalidValue {
                key: "log".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogTarget::Stdout => "stdout",
            LogTarget::File => "file",
            LogTarget::None => "none",
        };
        f.write_str(s)
    }
}

/// Router options assembled from the argument vector handed to `InitI2P`
/// and, when `--conf` names one, a TOML config file.
///
/// Command line values take precedence over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterOptions {
    /// First token of the argument vector, if any.
    pub program: Option<String>,
    /// Application name passed alongside the arguments.
    pub app_name: String,
    pub datadir: PathBuf,
    pub conf: Option<PathBuf>,
    pub tunconf: PathBuf,
    pub log: LogTarget,
    pub logfile: Option<PathBuf>,
    pub loglevel: String,
    pub floodfill: bool,
    pub notransit: bool,
    /// Options the bridge does not interpret, kept for the engine.
    pub extra: BTreeMap<String, String>,
}

impl RouterOptions {
    /// Parse options from an argument vector. The first element is the
    /// program name and is never treated as an option.
    pub fn from_args(args: &[String], app_name: &str) -> Result<Self> {
        let (program, cli) = parse_args(args)?;

        let mut merged = match cli.get("conf") {
            Some(path) => load_config_file(Path::new(path))?,
            None => BTreeMap::new(),
        };
        merged.extend(cli);

        let mut options = Self::from_map(merged, app_name)?;
        options.program = program;
        Ok(options)
    }

    fn from_map(mut map: BTreeMap<String, String>, app_name: &str) -> Result<Self> {
        let datadir = match map.remove("datadir") {
            Some(dir) => PathBuf::from(dir),
            None => default_datadir(app_name)?,
        };
        let conf = map.remove("conf").map(PathBuf::from);
        let tunconf = map
            .remove("tunconf")
            .map(PathBuf::from)
            .unwrap_or_else(|| datadir.join(DEFAULT_TUNNELS_FILE));
        let log = match map.remove("log") {
            Some(value) => value.parse()?,
            None => LogTarget::default(),
        };
        let logfile = map.remove("logfile").map(PathBuf::from);
        let loglevel = map.remove("loglevel").unwrap_or_else(|| "info".to_string());
        let floodfill = take_bool(&mut map, "floodfill")?;
        let notransit = take_bool(&mut map, "notransit")?;

        Ok(Self {
            program: None,
            app_name: app_name.to_string(),
            datadir,
            conf,
            tunconf,
            log,
            logfile,
            loglevel,
            floodfill,
            notransit,
            extra: map,
        })
    }

    /// Resolve a possibly relative path against the data directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.datadir.join(path)
        }
    }

    /// Log file location; defaults to `<datadir>/<app_name>.log`.
    pub fn logfile_path(&self) -> PathBuf {
        match &self.logfile {
            Some(path) => self.resolve(path),
            None => self.datadir.join(format!("{}.log", self.app_name)),
        }
    }
}

/// Split `--key=value`, `--key value` and bare `--flag` tokens.
fn parse_args(args: &[String]) -> Result<(Option<String>, BTreeMap<String, String>)> {
    let mut iter = args.iter().peekable();
    let program = iter.next().cloned();
    let mut map = BTreeMap::new();

    while let Some(arg) = iter.next() {
        let Some(option) = arg.strip_prefix("--") else {
            return Err(ConfigError::UnexpectedArgument(arg.clone()));
        };
        if option.is_empty() {
            return Err(ConfigError::UnexpectedArgument(arg.clone()));
        }

        let (key, value) = match option.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => match iter.peek() {
                Some(next) if !next.starts_with("--") => {
                    let value = (*next).clone();
                    iter.next();
                    (option.to_string(), value)
                }
                _ => (option.to_string(), "true".to_string()),
            },
        };
        debug!("option {} = {}", key, value);
        map.insert(key, value);
    }

    Ok((program, map))
}

/// Flatten a TOML config file into dotted keys; top-level keys stay bare.
fn load_config_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)?;

    let mut map = BTreeMap::new();
    flatten(&mut map, None, table);
    Ok(map)
}

fn flatten(map: &mut BTreeMap<String, String>, prefix: Option<&str>, table: toml::Table) {
    for (key, value) in table {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key,
        };
        match value {
            toml::Value::Table(inner) => flatten(map, Some(&key), inner),
            toml::Value::String(s) => {
                map.insert(key, s);
            }
            other => {
                map.insert(key, other.to_string());
            }
        }
    }
}

fn take_bool(map: &mut BTreeMap<String, String>, key: &str) -> Result<bool> {
    match map.remove(key) {
        None => Ok(false),
        Some(value) => match value.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
        },
    }
}

fn default_datadir(app_name: &str) -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(format!(".{}", app_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_equals_and_separate_values() {
        let options = RouterOptions::from_args(
            &args(&["router", "--log=none", "--datadir", "/tmp/i2pd", "--floodfill"]),
            "i2pd",
        )
        .unwrap();

        assert_eq!(options.program.as_deref(), Some("router"));
        assert_eq!(options.log, LogTarget::None);
        assert_eq!(options.datadir, PathBuf::from("/tmp/i2pd"));
        assert_eq!(options.tunconf, PathBuf::from("/tmp/i2pd/tunnels.toml"));
        assert!(options.floodfill);
        assert!(!options.notransit);
    }

    #[test]
    fn test_unknown_options_are_kept() {
        let options = RouterOptions::from_args(
            &args(&["router", "--datadir=/d", "--bandwidth=P"]),
            "i2pd",
        )
        .unwrap();
        assert_eq!(options.extra.get("bandwidth").map(String::as_str), Some("P"));
    }

    #[test]
    fn test_stray_argument_is_rejected() {
        let err = RouterOptions::from_args(&args(&["router", "stray"]), "i2pd").unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedArgument(a) if a == "stray"));
    }

    #[test]
    fn test_invalid_log_target() {
        let err = RouterOptions::from_args(&args(&["router", "--datadir=/d", "--log=syslog2"]), "i2pd")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "log"));
    }

    #[test]
    fn test_logfile_defaults_to_app_name() {
        let options =
            RouterOptions::from_args(&args(&["router", "--datadir=/var/lib/app"]), "myapp").unwrap();
        assert_eq!(options.logfile_path(), PathBuf::from("/var/lib/app/myapp.log"));
    }

    #[test]
    fn test_empty_args() {
        let (program, map) = parse_args(&[]).unwrap();
        assert!(program.is_none());
        assert!(map.is_empty());
    }
}
