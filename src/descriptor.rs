// src/descriptor.rs
//! 拡張モジュールのビルド記述子と実行時設定 (`atcoder.toml`)
//!
//! ```toml
//! [extension]
//! name = "atcoder"
//! version = "0.1"
//! sources = ["src/lib.rs"]
//! extra_compile_args = ["-Copt-level=2", "-Ctarget-cpu=native"]
//!
//! [runtime]
//! default_mod = 998244353
//! log_level = "info"
//! ```
//!
//! ファイルが無ければ既定値を使う。読み込み後は必ず `validate()` を通す。

use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::modint::{DEFAULT_MOD, MAX_MODULUS};

/// 既定の設定ファイル名
pub const DEFAULT_CONFIG_FILE: &str = "atcoder.toml";

/// `[lib] name` (cargo が出力する cdylib の元の名前)
const CDYLIB_NAME: &str = env!("CARGO_CRATE_NAME");

/// cargo が出力する cdylib のファイル名 (`libatcoder.so` など)
pub fn cdylib_file_name() -> String {
    if cfg!(windows) {
        format!("{CDYLIB_NAME}.dll")
    } else if cfg!(target_os = "macos") {
        format!("lib{CDYLIB_NAME}.dylib")
    } else {
        format!("lib{CDYLIB_NAME}.so")
    }
}

/// ビルドする拡張モジュールの記述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Python から import する名前
    #[serde(default = "ExtensionDescriptor::default_name")]
    pub name: String,
    #[serde(default = "ExtensionDescriptor::default_version")]
    pub version: String,
    /// ソース (ちょうど 1 つ)
    #[serde(default = "ExtensionDescriptor::default_sources")]
    pub sources: Vec<PathBuf>,
    /// rustc に渡す追加フラグ (順序を保つ)
    #[serde(default = "ExtensionDescriptor::default_extra_compile_args")]
    pub extra_compile_args: Vec<String>,
}

impl Default for ExtensionDescriptor {
    fn default() -> Self {
        ExtensionDescriptor {
            name: Self::default_name(),
            version: Self::default_version(),
            sources: Self::default_sources(),
            extra_compile_args: Self::default_extra_compile_args(),
        }
    }
}

impl ExtensionDescriptor {
    fn default_name() -> String { "atcoder".into() }
    fn default_version() -> String { "0.1".into() }
    fn default_sources() -> Vec<PathBuf> { vec![PathBuf::from("src/lib.rs")] }
    fn default_extra_compile_args() -> Vec<String> {
        ["-Copt-level=2", "-Ctarget-cpu=native", "-Ccodegen-units=1", "-Lnative=./src"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// 制約チェック。ソースの存在は `root` からの相対パスで確認する
    pub fn validate(&self, root: &Path) -> Result<(), DescriptorError> {
        if !is_python_identifier(&self.name) {
            return Err(DescriptorError::InvalidValue(format!(
                "extension name `{}` is not a valid Python identifier",
                self.name
            )));
        }
        if self.version.trim().is_empty() {
            return Err(DescriptorError::InvalidValue("version cannot be empty".into()));
        }
        match self.sources.as_slice() {
            [src] => {
                let path = root.join(src);
                if !path.is_file() {
                    return Err(DescriptorError::MissingSource(path.display().to_string()));
                }
            }
            other => {
                return Err(DescriptorError::InvalidValue(format!(
                    "exactly one source is required (got {})",
                    other.len()
                )));
            }
        }
        for (i, arg) in self.extra_compile_args.iter().enumerate() {
            if arg.trim().is_empty() {
                return Err(DescriptorError::InvalidValue(format!(
                    "extra_compile_args[{i}] is empty"
                )));
            }
            // RUSTFLAGS は空白で分割されるので、空白入りのフラグはそのまま渡せない
            if arg.chars().any(char::is_whitespace) {
                return Err(DescriptorError::InvalidValue(format!(
                    "extra_compile_args[{i}] `{arg}` contains whitespace"
                )));
            }
        }
        Ok(())
    }

    /// `RUSTFLAGS` 用に空白区切りで連結
    pub fn rustflags(&self) -> String {
        self.extra_compile_args.join(" ")
    }

    /// `cargo` に渡す引数列
    pub fn cargo_args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["rustc", "--release", "--lib", "--features", "python-ext", "--"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.extend(self.extra_compile_args.iter().cloned());
        args
    }

    /// 成果物のファイル名 (`atcoder.so` / `atcoder.pyd`)
    pub fn artifact_name(&self) -> String {
        let ext = if cfg!(windows) { "pyd" } else { "so" };
        format!("{}.{ext}", self.name)
    }

    /// `cargo_args()` で cargo を起動し、できた cdylib を `out_dir/artifact_name()` へ置く
    ///
    /// cargo は環境変数 `CARGO` (無ければ `cargo`)、出力先は `CARGO_TARGET_DIR`
    /// (無ければ `root/target`) に従う。
    pub fn build(&self, root: &Path, out_dir: &Path) -> Result<PathBuf, DescriptorError> {
        self.validate(root)?;

        let cargo = env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
        let args = self.cargo_args();
        debug!(cargo = ?cargo, args = ?args, "running cargo");
        let status = Command::new(&cargo)
            .args(&args)
            .current_dir(root)
            .status()
            .map_err(|e| DescriptorError::Io(cargo.to_string_lossy().into_owned(), e))?;
        if !status.success() {
            return Err(DescriptorError::Build(format!("cargo exited with {status}")));
        }

        let target_dir = env::var_os("CARGO_TARGET_DIR")
            .map(|d| root.join(d))
            .unwrap_or_else(|| root.join("target"));
        let built = target_dir.join("release").join(cdylib_file_name());
        if !built.is_file() {
            return Err(DescriptorError::Build(format!(
                "cargo succeeded but {} was not produced",
                built.display()
            )));
        }

        fs::create_dir_all(out_dir)
            .map_err(|e| DescriptorError::Io(out_dir.display().to_string(), e))?;
        let dest = out_dir.join(self.artifact_name());
        fs::copy(&built, &dest).map_err(|e| DescriptorError::Io(dest.display().to_string(), e))?;
        info!(artifact = %dest.display(), "extension module built");
        Ok(dest)
    }
}

/// 実行時設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// `ModInt` の初期法
    #[serde(default = "RuntimeConfig::default_mod")]
    pub default_mod: u32,
    /// `init_tracing` に渡すフィルタ
    #[serde(default = "RuntimeConfig::default_log_level")]
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            default_mod: Self::default_mod(),
            log_level: Self::default_log_level(),
        }
    }
}

impl RuntimeConfig {
    fn default_mod() -> u32 { DEFAULT_MOD }
    fn default_log_level() -> String { "info".into() }
}

/// `atcoder.toml` 全体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extension: ExtensionDescriptor,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// TOML からロード (ファイルが無ければ既定値)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, DescriptorError> {
        let p = path.as_ref();
        let cfg = if p.exists() {
            let s = fs::read_to_string(p)
                .map_err(|e| DescriptorError::Io(p.display().to_string(), e))?;
            toml::from_str(&s)
                .map_err(|e| DescriptorError::Parse(p.display().to_string(), e.to_string()))?
        } else {
            debug!(path = %p.display(), "config file not found, using defaults");
            Config::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// 実行時設定の制約チェック (ソースの存在確認は `ExtensionDescriptor::validate`)
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.runtime.default_mod == 0 || self.runtime.default_mod > MAX_MODULUS {
            return Err(DescriptorError::InvalidValue(format!(
                "default_mod must be in [1, {MAX_MODULUS}] (got {})",
                self.runtime.default_mod
            )));
        }
        if self.runtime.log_level.trim().is_empty() {
            return Err(DescriptorError::InvalidValue("log_level cannot be empty".into()));
        }
        Ok(())
    }
}

fn is_python_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("I/O error reading `{0}`: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("Parse error in `{0}`: {1}")]
    Parse(String, String),
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
    #[error("source file not found: {0}")]
    MissingSource(String),
    #[error("build failed: {0}")]
    Build(String),
}
