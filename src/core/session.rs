use crate::config::Settings;
use crate::core::destinations::DestinationSet;
use crate::core::path_filter::{FAVORITE_PATHS_FILE, IGNORED_PATHS_FILE, PathFilterStore};
use crate::core::queue::ImageQueue;
use crate::core::statistics::StatisticsRecorder;
use crate::error::{Result, SiftError};
use crate::models::ImageEntry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No source folder selected yet.
    NoImageFolder,
    /// The cursor sits on a displayable image.
    HasImages,
    /// The cursor ran past the last entry. Not terminal; loading a folder
    /// with images in it leaves this state again.
    Exhausted,
}

/// Change notifications for whoever renders the session. The core only
/// mutates state and emits these; it knows nothing about rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ImageChanged,
    QueueExhausted,
    EntryDropped { path: PathBuf, reason: String },
    CopyFailed { target: PathBuf, message: String },
    DeleteFailed { path: PathBuf, message: String },
    DestinationsChanged,
    StatisticsChanged,
}

/// The four logical actions a frontend can bind keys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Previous,
    Execute,
    Next,
    ClearChecked,
}

/// Decides whether an entry can be shown at all. The default probe only
/// checks that the file opens; a frontend with a real decoder can plug in
/// something stricter so corrupt images get dropped the same way.
pub trait EntryProbe {
    fn can_display(&self, entry: &ImageEntry) -> bool;
}

/// Readable-on-disk probe.
#[derive(Debug, Default)]
pub struct FileProbe;

impl EntryProbe for FileProbe {
    fn can_display(&self, entry: &ImageEntry) -> bool {
        fs::File::open(&entry.path).is_ok()
    }
}

/// What a single commit did. Failures here are per-target and non-fatal;
/// the commit itself only errors when there is no current image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub copied: usize,
    pub failed: usize,
    pub deleted: bool,
}

/// Orchestrates one triage session: owns the image queue, the destination
/// set, the statistics and the settings. Replacing the source folder or the
/// destination root fully replaces the owned collection, never merges.
pub struct Session {
    queue: ImageQueue,
    destinations: DestinationSet,
    statistics: StatisticsRecorder,
    settings: Settings,
    session_total: usize,
    state: SessionState,
    probe: Box<dyn EntryProbe>,
    observers: Vec<Box<dyn Fn(&SessionEvent)>>,
}

impl Session {
    /// Builds a session with its data files (ignore/favorite lists and
    /// statistics) rooted in `data_dir`. Counts the startup.
    pub fn new(settings: Settings, data_dir: &Path) -> Self {
        let ignored = PathFilterStore::load(data_dir.join(IGNORED_PATHS_FILE));
        let favorites = PathFilterStore::load(data_dir.join(FAVORITE_PATHS_FILE));
        let destinations = DestinationSet::new(ignored, favorites);

        let mut statistics = StatisticsRecorder::load(data_dir, settings.track_statistics);
        statistics.record_startup();
        if let Err(e) = statistics.save() {
            warn!("could not persist statistics: {e}");
        }

        Self {
            queue: ImageQueue::new(),
            destinations,
            statistics,
            settings,
            session_total: 0,
            state: SessionState::NoImageFolder,
            probe: Box::new(FileProbe),
            observers: Vec::new(),
        }
    }

    /// Swaps in a different display probe. Mostly for frontends and tests.
    #[must_use]
    pub fn with_probe(mut self, probe: impl EntryProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Registers a change listener. Every mutation that a view could care
    /// about emits at least one event.
    pub fn observe(&mut self, observer: impl Fn(&SessionEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&self, event: &SessionEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }

    /// Scans `root` for files with an enabled extension and makes them the
    /// new queue. The count of loaded entries becomes the session total used
    /// for progress reporting.
    pub fn select_image_folder(&mut self, root: &Path) -> Result<usize> {
        let files = list_files(root, self.settings.include_image_subdirectories)?;
        self.queue.load(files, &self.settings.enabled_extensions);
        self.session_total = self.queue.len();
        self.settings.image_folder = Some(root.to_path_buf());

        info!("loaded {} images from {}", self.queue.len(), root.display());
        self.update_current();
        Ok(self.queue.len())
    }

    /// Rescans the destination root, replacing the destination set.
    pub fn select_destination_root(&mut self, root: &Path) -> Result<usize> {
        let count = self
            .destinations
            .scan(root, self.settings.include_folder_subdirectories)?;
        self.settings.destination_root = Some(root.to_path_buf());
        self.emit(&SessionEvent::DestinationsChanged);
        Ok(count)
    }

    /// The central operation: copy the current image into every checked
    /// folder, then delete-and-remove or advance, per configuration.
    ///
    /// Copy and delete failures are reported per target and never abort the
    /// commit; the only hard error is committing with no current image.
    pub fn commit(&mut self) -> Result<CommitOutcome> {
        let Some(entry) = self.queue.current().cloned() else {
            return Err(SiftError::EmptyQueue);
        };

        let targets: Vec<PathBuf> = self.destinations.checked_folders().map(|f| f.path.clone()).collect();
        let mut outcome = CommitOutcome::default();

        if !targets.is_empty() {
            self.statistics.record_commit_with_targets();
        }

        for target in &targets {
            match copy_into(&entry, target, self.settings.overwrite_existing) {
                Ok(destination) => {
                    info!("copied {} to {}", entry.name, destination.display());
                    self.statistics.record_copy(entry.size);
                    outcome.copied += 1;
                }
                Err(e) => {
                    warn!("copy of {} to {} failed: {e}", entry.name, target.display());
                    outcome.failed += 1;
                    self.emit(&SessionEvent::CopyFailed {
                        target: target.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        if self.settings.delete_after_copy {
            match delete_file(&entry.path, self.settings.send_to_recycle_bin) {
                Ok(()) => {
                    self.statistics.record_delete(entry.size);
                    outcome.deleted = true;
                    let _ = self.queue.remove_current();
                }
                Err(e) => {
                    warn!("delete of {} failed: {e}", entry.path.display());
                    self.emit(&SessionEvent::DeleteFailed {
                        path: entry.path.clone(),
                        message: e.to_string(),
                    });
                    // The entry caused an error; drop it like any other
                    // broken entry instead of looping on it.
                    let _ = self.queue.remove_current();
                    self.emit(&SessionEvent::EntryDropped {
                        path: entry.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        } else {
            self.queue.advance();
        }

        if self.settings.reset_checked {
            self.destinations.clear_checked();
            self.emit(&SessionEvent::DestinationsChanged);
        }

        if let Err(e) = self.statistics.save() {
            warn!("could not persist statistics: {e}");
        }
        self.emit(&SessionEvent::StatisticsChanged);

        self.update_current();
        Ok(outcome)
    }

    /// Skips the current image, doing nothing with it.
    pub fn skip(&mut self) {
        self.queue.advance();
        self.update_current();
    }

    /// Goes back to the previous image. Errors at the first entry; the
    /// frontend surfaces that as a disabled action, not a failure.
    pub fn back(&mut self) -> Result<()> {
        self.queue.retreat()?;
        self.update_current();
        Ok(())
    }

    /// Jumps to a specific image, resolved against the unfiltered list.
    pub fn select_image(&mut self, path: &Path) -> Result<()> {
        self.queue.select(path)?;
        self.update_current();
        Ok(())
    }

    pub fn clear_checked(&mut self) {
        self.destinations.clear_checked();
        self.emit(&SessionEvent::DestinationsChanged);
    }

    /// Writes the current statistics to a user-chosen file.
    pub fn export_statistics(&self, path: &Path) -> Result<()> {
        self.statistics.export(path)
    }

    /// Replaces every counter from an exported file. Observers are notified,
    /// so a statistics view re-reads all of its fields.
    pub fn import_statistics(&mut self, path: &Path) -> Result<()> {
        self.statistics.import(path)?;
        self.emit(&SessionEvent::StatisticsChanged);
        Ok(())
    }

    /// Zeroes every counter and notifies observers.
    pub fn reset_statistics(&mut self) -> Result<()> {
        self.statistics.reset()?;
        self.emit(&SessionEvent::StatisticsChanged);
        Ok(())
    }

    /// Settles the cursor on the next displayable entry, dropping anything
    /// the probe rejects. A plain loop on purpose: a long run of unreadable
    /// files must not grow the stack.
    fn update_current(&mut self) {
        loop {
            match self.queue.current() {
                Some(entry) => {
                    if self.probe.can_display(entry) {
                        self.state = SessionState::HasImages;
                        self.emit(&SessionEvent::ImageChanged);
                        return;
                    }
                    let dropped = entry.path.clone();
                    warn!("cannot display {}, dropping it", dropped.display());
                    let _ = self.queue.remove_current();
                    self.emit(&SessionEvent::EntryDropped {
                        path: dropped,
                        reason: "unreadable".to_string(),
                    });
                }
                None => {
                    self.state = SessionState::Exhausted;
                    self.emit(&SessionEvent::QueueExhausted);
                    return;
                }
            }
        }
    }

    /// Runs the action bound to `key`, honoring the same gates the buttons
    /// have. Returns whether anything happened.
    pub fn handle_hotkey(&mut self, key: &str) -> Result<bool> {
        let Some(action) = self.action_for(key) else {
            return Ok(false);
        };

        match action {
            HotkeyAction::Previous if self.can_back() => self.back()?,
            HotkeyAction::Execute if self.can_commit() => {
                self.commit()?;
            }
            HotkeyAction::Next if self.can_skip() => self.skip(),
            HotkeyAction::ClearChecked => self.clear_checked(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn action_for(&self, key: &str) -> Option<HotkeyAction> {
        let hotkeys = &self.settings.hotkeys;
        if key.eq_ignore_ascii_case(&hotkeys.previous) {
            Some(HotkeyAction::Previous)
        } else if key.eq_ignore_ascii_case(&hotkeys.execute) {
            Some(HotkeyAction::Execute)
        } else if key.eq_ignore_ascii_case(&hotkeys.next) {
            Some(HotkeyAction::Next)
        } else if key.eq_ignore_ascii_case(&hotkeys.clear_checked) {
            Some(HotkeyAction::ClearChecked)
        } else {
            None
        }
    }

    #[must_use]
    pub fn can_back(&self) -> bool {
        self.queue.can_retreat()
    }

    #[must_use]
    pub fn can_skip(&self) -> bool {
        self.queue.can_advance()
    }

    /// A commit makes sense when an image is loaded and it would either be
    /// copied somewhere or deleted.
    #[must_use]
    pub fn can_commit(&self) -> bool {
        self.state == SessionState::HasImages
            && (self.settings.delete_after_copy || self.destinations.checked_count() > 0)
    }

    /// Fraction of the session already worked off, by remaining entries.
    /// Skipping does not move it; only commits that shrink the queue do.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        if self.session_total == 0 {
            return 0.0;
        }
        (self.session_total - self.queue.len().min(self.session_total)) as f64 / self.session_total as f64
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageEntry> {
        self.queue.current()
    }

    /// Whether the current entry belongs to the embedded player rather than
    /// the image view.
    #[must_use]
    pub fn current_is_video(&self) -> bool {
        self.queue
            .current()
            .is_some_and(|entry| self.settings.is_video_extension(&entry.extension))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn session_total(&self) -> usize {
        self.session_total
    }

    #[must_use]
    pub fn queue(&self) -> &ImageQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut ImageQueue {
        &mut self.queue
    }

    #[must_use]
    pub fn destinations(&self) -> &DestinationSet {
        &self.destinations
    }

    pub fn destinations_mut(&mut self) -> &mut DestinationSet {
        &mut self.destinations
    }

    #[must_use]
    pub fn statistics(&self) -> &StatisticsRecorder {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut StatisticsRecorder {
        &mut self.statistics
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

/// Files under `root`, one level or the full tree, name-sorted so the scan
/// order is stable for a given filesystem state.
fn list_files(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if recursive {
        Ok(WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .collect())
    } else {
        let mut files: Vec<PathBuf> = fs::read_dir(root)?
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().ok().is_some_and(|ft| ft.is_file()))
            .map(|e| e.path())
            .collect();
        files.sort();
        Ok(files)
    }
}

fn copy_into(entry: &ImageEntry, target_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let destination = target_dir.join(&entry.name);
    let destination = if destination.exists() && !overwrite {
        disambiguate(&destination)
    } else {
        destination
    };
    fs::copy(&entry.path, &destination)?;
    Ok(destination)
}

/// Smallest N that makes `name(N).ext` free in the destination folder.
fn disambiguate(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let extension = path.extension().and_then(|e| e.to_str());
    let parent = path.parent().unwrap_or(Path::new(""));

    let mut counter = 1;
    loop {
        let candidate = match extension {
            Some(ext) => parent.join(format!("{stem}({counter}).{ext}")),
            None => parent.join(format!("{stem}({counter})")),
        };
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn delete_file(path: &Path, recycle: bool) -> Result<()> {
    if recycle {
        trash::delete(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}
