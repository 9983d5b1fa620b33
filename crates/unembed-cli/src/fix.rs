use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::{Path, PathBuf};
use unembed_engine::{
    LineIndex, Resolver, Rewriter,
    editing::preview,
    io::{self, read_file, relative_to_vault, write_file},
};
use unembed_config::Settings;

/// Longest original text shown per change in a dry run.
const PREVIEW_LEN: usize = 80;

pub fn run(settings: &Settings, vault: &Path, files: &[PathBuf], dry_run: bool) -> Result<()> {
    let index = io::build_vault_index(vault)?;
    let rewriter = settings.rewriter();

    // Files named on the command line must all succeed; vault-wide scans skip
    // notes that can't be processed.
    let explicit = !files.is_empty();
    let files = if explicit {
        files
            .iter()
            .map(|file| {
                file.canonicalize()
                    .with_context(|| format!("Failed to open {}", file.display()))
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        io::scan_markdown_files(vault)?
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut total = 0;
    let mut failed = 0;
    for file in &files {
        match fix_file(&rewriter, &index, vault, file, dry_run, &mut out) {
            Ok(count) => total += count,
            Err(e) if explicit => {
                log::error!("{}: {e:#}", file.display());
                failed += 1;
            }
            Err(e) => log::warn!("Skipping {}: {e:#}", file.display()),
        }
    }
    log::info!("{total} link(s) across {} file(s)", files.len());
    if failed > 0 {
        bail!("{failed} of {} file(s) could not be fixed", files.len());
    }
    Ok(())
}

/// Rewrites one note in place, or reports the changes when `dry_run` is set.
///
/// Returns how many links changed. Nothing is printed when there are none.
pub fn fix_file<R, W>(
    rewriter: &Rewriter,
    resolver: &R,
    vault: &Path,
    file: &Path,
    dry_run: bool,
    out: &mut W,
) -> Result<usize>
where
    R: Resolver + ?Sized,
    W: Write,
{
    let relative = relative_to_vault(file, vault)?;
    let text = read_file(&relative, vault)?;

    if dry_run {
        let replacements = rewriter.plan(&text, relative.as_str(), resolver)?;
        let lines = LineIndex::new(&text);
        for r in &replacements {
            let pos = lines.position(r.span.start);
            writeln!(
                out,
                "{relative}:{}:{}: {} -> {}",
                pos.line + 1,
                pos.column + 1,
                preview(&text, r.span, PREVIEW_LEN),
                r.new_text
            )?;
        }
        return Ok(replacements.len());
    }

    let outcome = rewriter.rewrite(&text, relative.as_str(), resolver)?;
    if outcome.is_unchanged() {
        return Ok(0);
    }
    write_file(&relative, vault, &outcome.text)?;
    writeln!(
        out,
        "Updated {} non-image link(s) in {relative}",
        outcome.count()
    )?;
    Ok(outcome.count())
}
