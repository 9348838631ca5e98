//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use hxparse_syntax::{Diagnostic, Parse, ParseConfig, lexer, parse_bytes_with_config};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size accepted by the CLI (100 MB).
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Extension of Haxe source files.
const SOURCE_EXTENSION: &str = "hx";

// ============================================================================
// Source loading
// ============================================================================

/// Failure to load a source file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Cannot access file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Source file '{path}' is too large ({size} bytes, max {} bytes)", MAX_SOURCE_SIZE)]
    TooLarge { path: String, size: u64 },
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        CliError::failure(err.to_string())
    }
}

/// Read a source file as raw bytes.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> Result<Vec<u8>, SourceError> {
    let io = |source| SourceError::Io {
        path: path.display().to_string(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io)?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(SourceError::TooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
        });
    }
    fs::read(path).map_err(io)
}

/// Read and parse one file.
fn parse_file(path: &Path, config: &ParseConfig) -> CliResult<Parse> {
    let bytes = read_source(path)?;
    Ok(parse_bytes_with_config(&bytes, config.clone()))
}

/// Print diagnostics through miette's graphical handler.
fn report_diagnostics(path: &Path, source: &str, diagnostics: &[Diagnostic]) {
    let name = path.display().to_string();
    for diagnostic in diagnostics {
        let report = miette::Report::new(diagnostic.report(&name, source));
        eprintln!("{report:?}");
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Parse every file (directories are searched for `.hx` files) and report diagnostics.
///
/// Fails with exit code 1 when any file has a diagnostic or cannot be read.
pub fn check_paths(paths: &[PathBuf], config: &ParseConfig) -> CliResult<ExitCode> {
    let files: Vec<PathBuf> = paths.iter().flat_map(|p| collect_source_files(p)).collect();
    if files.is_empty() {
        return Err(CliError::failure("No .hx files found"));
    }

    let mut diagnostic_count = 0;
    let mut failed_files = 0;
    for file in &files {
        let parse = match parse_file(file, config) {
            Ok(parse) => parse,
            Err(e) => {
                eprintln!("{}", e.message);
                failed_files += 1;
                continue;
            }
        };
        tracing::debug!(file = %file.display(), diagnostics = parse.diagnostics.len(), "checked");
        if parse.has_diagnostics() {
            report_diagnostics(file, parse.tree.source(), &parse.diagnostics);
            diagnostic_count += parse.diagnostics.len();
            failed_files += 1;
        }
    }

    if failed_files > 0 {
        return Err(CliError::failure(format!(
            "\n{} diagnostic(s) in {} of {} file(s)",
            diagnostic_count,
            failed_files,
            files.len()
        )));
    }
    println!("✓ {} file(s) parsed cleanly", files.len());
    Ok(ExitCode::SUCCESS)
}

/// Print the syntax tree of one file; diagnostics go to stderr.
pub fn print_tree(path: &Path, json: bool, config: &ParseConfig) -> CliResult<ExitCode> {
    let parse = parse_file(path, config)?;
    if json {
        let rendered = serde_json::to_string_pretty(&parse.tree.to_json())
            .map_err(|e| CliError::failure(format!("Error serializing tree: {e}")))?;
        println!("{rendered}");
    } else {
        println!("{}", parse.tree.to_sexp());
    }
    report_diagnostics(path, parse.tree.source(), &parse.diagnostics);
    Ok(if parse.has_diagnostics() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Print one token per line: span, kind and text (trivia included).
pub fn print_tokens(path: &Path) -> CliResult<ExitCode> {
    let bytes = read_source(path)?;
    let source = String::from_utf8_lossy(&bytes);
    let output = lexer::lex(&source);
    for token in &output.tokens {
        println!(
            "{:<12} {:<28} {:?}",
            token.span.to_string(),
            format!("{:?}", token.kind),
            token.text(&source)
        );
    }
    report_diagnostics(path, &source, &output.diagnostics);
    Ok(if output.diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Collect `.hx` files: a file path is taken as is, a directory is searched recursively (hidden directories and
/// build output skipped). The result is sorted for stable output.
fn collect_source_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                    if !name.starts_with('.') && name != "target" && name != "bin" {
                        files.extend(collect_source_files(&entry_path));
                    }
                } else if entry_path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
                    files.push(entry_path);
                }
            }
        }
    } else {
        // Let the read report the missing path.
        files.push(path.to_path_buf());
    }

    files.sort();
    files
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hxparse_cli_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_collect_source_files_recurses_and_sorts() {
        let dir = temp_dir("collect");
        fs::create_dir_all(dir.join("pack")).unwrap();
        fs::create_dir_all(dir.join(".git")).unwrap();
        fs::write(dir.join("B.hx"), "class B {}").unwrap();
        fs::write(dir.join("pack/A.hx"), "class A {}").unwrap();
        fs::write(dir.join(".git/C.hx"), "class C {}").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let files = collect_source_files(&dir);
        assert_eq!(files, vec![dir.join("B.hx"), dir.join("pack/A.hx")]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_check_paths_reports_failure_on_diagnostics() {
        let dir = temp_dir("check");
        fs::write(dir.join("Good.hx"), "class Good { var x:Int = 5; }").unwrap();
        assert_eq!(check_paths(&[dir.join("Good.hx")], &ParseConfig::default()).unwrap(), ExitCode::SUCCESS);

        fs::write(dir.join("Bad.hx"), "class Bad { var x = ; }").unwrap();
        let err = check_paths(&[dir.clone()], &ParseConfig::default()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("1 diagnostic(s) in 1 of 2 file(s)"), "{}", err.message);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_a_cli_error() {
        let err = read_source(Path::new("/definitely/not/here.hx")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(CliError::from(err).message.contains("Cannot access file"));
    }
}
