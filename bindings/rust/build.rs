use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Set when a generated parser has been compiled into this crate.
const PARSER_CFG: &str = "tree_sitter_pluto_parser";

fn main() {
    println!("cargo:rustc-check-cfg=cfg({PARSER_CFG})");
    println!("cargo:rerun-if-env-changed=TREE_SITTER_PLUTO_SRC");
    println!("cargo:rerun-if-env-changed=TREE_SITTER_CLI");

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let grammar_js = manifest_dir.join("grammar.js");
    println!("cargo:rerun-if-changed={}", grammar_js.display());
    let local_src = manifest_dir.join("src");
    if local_src.is_dir() {
        println!("cargo:rerun-if-changed={}", local_src.display());
    }

    let Some(src_dir) = locate_sources(&manifest_dir).or_else(|| generate_sources(&grammar_js))
    else {
        println!(
            "cargo:warning=no generated parser for the PLUTO grammar; \
             run `tree-sitter generate` or set TREE_SITTER_PLUTO_SRC"
        );
        return;
    };

    compile(&src_dir);
    println!("cargo:rustc-cfg={PARSER_CFG}");
}

/// Looks for an already generated `parser.c`, preferring `TREE_SITTER_PLUTO_SRC`
/// over the crate-local `src/` directory.
fn locate_sources(manifest_dir: &Path) -> Option<PathBuf> {
    let configured = env::var_os("TREE_SITTER_PLUTO_SRC").map(PathBuf::from);
    let local = manifest_dir.join("src");

    configured
        .into_iter()
        .chain(std::iter::once(local))
        .find(|dir| dir.join("parser.c").exists())
}

/// Runs the tree-sitter CLI to generate the parser into `OUT_DIR`.
fn generate_sources(grammar_js: &Path) -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR")?);
    let src_dir = out_dir.join("src");
    let cli = env::var_os("TREE_SITTER_CLI").unwrap_or_else(|| "tree-sitter".into());

    let status = Command::new(&cli)
        .arg("generate")
        .arg("--output")
        .arg(&src_dir)
        .arg(grammar_js)
        .current_dir(grammar_js.parent()?)
        .status();

    match status {
        Ok(status) if status.success() && src_dir.join("parser.c").exists() => Some(src_dir),
        Ok(status) => {
            println!("cargo:warning=`tree-sitter generate` exited with {status}");
            None
        }
        Err(err) => {
            println!("cargo:warning=failed to run {cli:?}: {err}");
            None
        }
    }
}

fn compile(src_dir: &Path) {
    let mut build = cc::Build::new();
    build
        .std("c11")
        .include(src_dir)
        .include(src_dir.join("tree_sitter"))
        .warnings(false)
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-unused-but-set-variable")
        .flag_if_supported("-Wno-unused-value")
        .flag_if_supported("-Wno-trigraphs");

    #[cfg(target_env = "msvc")]
    build.flag("-utf-8");

    let parser_path = src_dir.join("parser.c");
    println!("cargo:rerun-if-changed={}", parser_path.display());
    build.file(&parser_path);

    let scanner_path = src_dir.join("scanner.c");
    if scanner_path.exists() {
        println!("cargo:rerun-if-changed={}", scanner_path.display());
        build.file(&scanner_path);
    }

    build.compile("tree-sitter-pluto");
}
