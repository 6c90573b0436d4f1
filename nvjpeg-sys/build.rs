use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if std::env::var("DOCS_RS").is_ok() {
        return;
    }

    link_nvjpeg();
}

// https://github.com/coreylowman/cudarc/blob/main/build.rs
fn link_nvjpeg() {
    println!("cargo:rerun-if-env-changed=CUDA_ROOT");
    println!("cargo:rerun-if-env-changed=CUDA_PATH");
    println!("cargo:rerun-if-env-changed=CUDA_TOOLKIT_ROOT_DIR");

    let candidates: Vec<PathBuf> = root_candidates().collect();

    // Without a toolkit the declarations still compile; only crates that call into
    // nvJPEG need the library at link time.
    let Some(toolkit_root) =
        root_candidates().find(|path| path.join("include").join("nvjpeg.h").is_file())
    else {
        println!(
            "cargo:warning=Unable to find `include/nvjpeg.h` under any of: {candidates:?}. Set the `CUDA_ROOT` environment variable to link against nvJPEG."
        );
        return;
    };

    for path in lib_candidates(&toolkit_root) {
        println!("cargo:rustc-link-search=native={}", path.display());
    }

    println!("cargo:rustc-link-lib=dylib=nvjpeg");
}

fn root_candidates() -> impl Iterator<Item = PathBuf> {
    let env_vars = ["CUDA_PATH", "CUDA_ROOT", "CUDA_TOOLKIT_ROOT_DIR"];
    let env_vars = env_vars
        .into_iter()
        .map(std::env::var)
        .filter_map(Result::ok);

    let roots = [
        "/usr",
        "/usr/local/cuda",
        "/opt/cuda",
        "/usr/lib/cuda",
        "C:/Program Files/NVIDIA GPU Computing Toolkit",
        "C:/CUDA",
    ];
    let roots = roots.into_iter().map(Into::into);
    env_vars.chain(roots).map(Into::<PathBuf>::into)
}

fn lib_candidates(root: &Path) -> Vec<PathBuf> {
    [
        "lib",
        "lib/x64",
        "lib/x86_64",
        "lib/x86_64-linux-gnu",
        "lib64",
        "targets/x86_64-linux",
        "targets/x86_64-linux/lib",
        "targets/aarch64-linux/lib",
        "targets/sbsa-linux/lib",
    ]
    .iter()
    .map(|&p| root.join(p))
    .filter(|p| p.is_dir())
    .collect()
}
