use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};
use unembed_config::Settings;
use unembed_engine::{
    Debouncer, Rewriter, VaultIndex,
    io::{self, relative_to_vault},
};

use crate::fix::fix_file;

/// How long to block on the event channel when nothing is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

pub fn run(settings: &Settings, vault: &Path, config_path: &Path) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(vault, RecursiveMode::Recursive)?;

    let mut state = WatchState::new(settings, vault, config_path)?;
    if let Some(config_dir) = state.config_path.parent()
        && !config_dir.starts_with(vault)
        && let Err(e) = watcher.watch(config_dir, RecursiveMode::NonRecursive)
    {
        log::warn!("Not watching {} for settings changes: {e}", config_dir.display());
    }
    log::info!(
        "Watching {} ({} files, {} ms delay)",
        vault.display(),
        state.index.len(),
        settings.scan_delay_ms
    );

    let stdout = std::io::stdout();
    loop {
        let timeout = state.next_wait(Instant::now()).unwrap_or(IDLE_WAIT);
        match rx.recv_timeout(timeout) {
            Ok(Ok(event)) => state.handle_event(&event, Instant::now()),
            Ok(Err(e)) => log::warn!("Watch error: {e}"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        state.run_due(Instant::now(), &mut stdout.lock());
    }
    Ok(())
}

/// Per-note debouncers plus the link index they resolve against.
pub struct WatchState {
    vault: PathBuf,
    config_path: PathBuf,
    delay: Duration,
    rewriter: Rewriter,
    index: VaultIndex,
    pending: HashMap<PathBuf, Debouncer>,
}

impl WatchState {
    pub fn new(settings: &Settings, vault: &Path, config_path: &Path) -> Result<Self> {
        Ok(Self {
            vault: vault.to_path_buf(),
            config_path: canonical_config_path(config_path),
            delay: Duration::from_millis(settings.scan_delay_ms),
            rewriter: settings.rewriter(),
            index: io::build_vault_index(vault)?,
            pending: HashMap::new(),
        })
    }

    /// Keeps the index current and signals the debouncer of each touched note.
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if matches!(event.kind, EventKind::Access(_)) {
            return;
        }
        for path in &event.paths {
            if *path == self.config_path {
                self.reload_settings();
                continue;
            }
            let Ok(relative) = relative_to_vault(path, &self.vault) else {
                continue;
            };
            if relative.iter().any(|part| part.starts_with('.')) {
                continue;
            }

            if path.is_file() {
                self.index.add_file(&relative);
            } else {
                self.index.remove_file(&relative);
                self.pending.remove(path);
                continue;
            }

            if io::is_markdown(path) {
                self.pending
                    .entry(path.clone())
                    .or_insert_with(|| Debouncer::new(self.delay))
                    .signal(now);
            }
        }
    }

    /// Re-reads the config file so new extension and alt text settings apply
    /// to the next pass. A file that fails to parse keeps the current ones.
    fn reload_settings(&mut self) {
        let settings = match Settings::load_or_default(&self.config_path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Keeping current settings: {e}");
                return;
            }
        };
        self.rewriter.set_image_extensions(&settings.image_extensions);
        self.rewriter.set_auto_fill_alt_text(settings.auto_fill_alt_text);
        self.delay = Duration::from_millis(settings.scan_delay_ms);
        for debouncer in self.pending.values_mut() {
            debouncer.set_delay(self.delay);
        }
        log::info!(
            "Reloaded settings from {} (images: {})",
            self.config_path.display(),
            self.rewriter.image_extensions()
        );
    }

    /// Time until the earliest pending pass, if any.
    pub fn next_wait(&self, now: Instant) -> Option<Duration> {
        self.pending
            .values()
            .filter_map(|d| d.time_until_fire(now))
            .min()
    }

    /// Runs every pass whose quiet period has elapsed. Returns links changed.
    pub fn run_due<W: Write>(&mut self, now: Instant, out: &mut W) -> usize {
        let mut total = 0;
        for (path, debouncer) in self.pending.iter_mut() {
            let result = debouncer.run_if_due(now, || {
                fix_file(&self.rewriter, &self.index, &self.vault, path, false, out)
            });
            match result {
                Some(Ok(count)) => total += count,
                Some(Err(e)) => log::warn!("Skipping {}: {e:#}", path.display()),
                None => {}
            }
        }
        self.pending.retain(|_, d| d.is_pending());
        total
    }
}

/// Matches the form notify reports paths in, even when the file itself does
/// not exist yet.
fn canonical_config_path(config_path: &Path) -> PathBuf {
    match (config_path.parent(), config_path.file_name()) {
        (Some(dir), Some(name)) => dir
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| config_path.to_path_buf()),
        _ => config_path.to_path_buf(),
    }
}
