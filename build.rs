// build.rs (クレートのルートに置く)

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RUSTFLAGS");

    // wheel 用ビルド (--features python-ext) のときだけ拡張モジュール向けリンク引数を渡す
    if std::env::var("CARGO_FEATURE_PYTHON_EXT").is_ok() {
        pyo3_build_config::add_extension_module_link_args();
    }

    // ビルドプロファイルをバイナリへ埋め込む (Python 側の __build_profile__ 用)
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into());
    println!("cargo:rustc-env=ATCODER_BUILD_PROFILE={profile}");
}
