// src/main_atcoder.rs
// CLI ― ライブラリの各アルゴリズムをコマンドラインから試す小さなツール
//
// 例:
//   cargo run --bin main_atcoder -- dsu --n 5 --edges 0-1,1-2
//   cargo run --bin main_atcoder -- crt --r 3,4 --m 5,7
//   cargo run --bin main_atcoder -- descriptor --check
//   cargo run --bin main_atcoder -- build --out-dir dist
use std::path::{Path, PathBuf};

use atcoder::descriptor::{Config, DEFAULT_CONFIG_FILE};
use atcoder::{math, AclError, DescriptorError, Dsu, ModInt, SccGraph, TraceError};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

/// コマンドライン定義
#[derive(Parser)]
#[command(name = "main_atcoder", version, about = "AtCoder Library CLI")]
struct Cli {
    /// 設定ファイル (無ければ既定値)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// ログフィルタ (省略時は設定ファイルの runtime.log_level)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 辺を張って連結成分を JSON で出力
    Dsu {
        #[arg(long)]
        n: usize,
        /// `a-b,c-d` 形式
        #[arg(long, default_value = "")]
        edges: String,
    },
    /// 有向グラフの強連結成分をトポロジカル順に JSON で出力
    Scc {
        #[arg(long)]
        n: usize,
        /// `from-to,...` 形式
        #[arg(long, default_value = "")]
        edges: String,
    },
    /// 中国剰余定理 (`y z` を出力)
    Crt {
        /// `r0,r1,...`
        #[arg(long, allow_hyphen_values = true)]
        r: String,
        /// `m0,m1,...`
        #[arg(long)]
        m: String,
    },
    /// `x^{-1} mod m`
    InvMod {
        #[arg(long, allow_hyphen_values = true)]
        x: i64,
        #[arg(long)]
        m: i64,
    },
    /// `Σ floor((a*i + b) / m)`
    FloorSum {
        #[arg(long)]
        n: i64,
        #[arg(long)]
        m: i64,
        #[arg(long, allow_hyphen_values = true)]
        a: i64,
        #[arg(long, allow_hyphen_values = true)]
        b: i64,
    },
    /// 素数判定
    IsPrime {
        #[arg(long)]
        n: i64,
    },
    /// `x^n` を runtime.default_mod で計算 (n < 0 は逆元)
    ModPow {
        #[arg(long, allow_hyphen_values = true)]
        x: i64,
        #[arg(long, allow_hyphen_values = true)]
        n: i64,
    },
    /// 記述子どおりに cargo で拡張モジュールをビルドし、成果物を配置
    Build {
        /// 成果物 (`atcoder.so` / `atcoder.pyd`) の出力先
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// ビルド記述子と RUSTFLAGS を表示
    Descriptor {
        /// カレントディレクトリを基準に検証する
        #[arg(long)]
        check: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Acl(#[from] AclError),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("cannot parse `{0}`: {1}")]
    Parse(String, String),
}

/// `"0-1,1-2"` → `[(0, 1), (1, 2)]`
fn parse_edges(s: &str) -> Result<Vec<(usize, usize)>, CliError> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| -> Result<(usize, usize), CliError> {
            let (a, b) = t
                .split_once('-')
                .ok_or_else(|| CliError::Parse(t.to_string(), "expected `a-b`".into()))?;
            let a = a.trim().parse().map_err(|e| CliError::Parse(t.to_string(), format!("{e}")))?;
            let b = b.trim().parse().map_err(|e| CliError::Parse(t.to_string(), format!("{e}")))?;
            Ok((a, b))
        })
        .collect()
}

/// `"3,-4"` → `[3, -4]`
fn parse_list(s: &str) -> Result<Vec<i64>, CliError> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.parse().map_err(|e| CliError::Parse(t.to_string(), format!("{e}"))))
        .collect()
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = Config::load_from(&cli.config)?;
    let filter = cli.log_level.as_deref().unwrap_or(&cfg.runtime.log_level);
    atcoder::init_tracing(filter)?;
    ModInt::set_mod(cfg.runtime.default_mod)?;
    debug!(config = %cli.config.display(), modulus = cfg.runtime.default_mod, "configuration loaded");

    match cli.cmd {
        Commands::Dsu { n, edges } => {
            let mut d = Dsu::new(n);
            for (a, b) in parse_edges(&edges)? {
                d.merge(a, b)?;
            }
            println!("{}", serde_json::to_string(&d.groups())?);
        }
        Commands::Scc { n, edges } => {
            let mut g = SccGraph::new(n);
            for (a, b) in parse_edges(&edges)? {
                g.add_edge(a, b)?;
            }
            println!("{}", serde_json::to_string(&g.scc())?);
        }
        Commands::Crt { r, m } => {
            let (y, z) = math::crt(&parse_list(&r)?, &parse_list(&m)?)?;
            println!("{y} {z}");
        }
        Commands::InvMod { x, m } => {
            println!("{}", math::inv_mod(x, m)?);
        }
        Commands::FloorSum { n, m, a, b } => {
            println!("{}", math::floor_sum(n, m, a, b)?);
        }
        Commands::IsPrime { n } => {
            println!("{}", math::is_prime(n)?);
        }
        Commands::ModPow { x, n } => {
            println!("{}", ModInt::new(x).pow(n)?);
        }
        Commands::Build { out_dir } => {
            let artifact = cfg.extension.build(Path::new("."), &out_dir)?;
            println!("built {}", artifact.display());
        }
        Commands::Descriptor { check } => {
            let ext = &cfg.extension;
            if check {
                ext.validate(Path::new("."))?;
            }
            println!("name: {}", ext.name);
            println!("version: {}", ext.version);
            for src in &ext.sources {
                println!("source: {}", src.display());
            }
            println!("artifact: {}", ext.artifact_name());
            println!("RUSTFLAGS=\"{}\"", ext.rustflags());
            println!("cargo {}", ext.cargo_args().join(" "));
            if check {
                println!("descriptor OK");
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
