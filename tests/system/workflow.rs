#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic_in_result_fn)]

//! End-to-end triage run: load a mixed source folder, sort a few images into
//! checked destinations, skip one, go back, exhaust the queue, and check
//! that files, counters and the persisted path lists all end up right.

use color_eyre::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use snapsift::config::Settings;
use snapsift::core::{PathFilterStore, Session, SessionState, IGNORED_PATHS_FILE};

fn create_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[test]
fn full_triage_workflow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir)?;

    let source = temp_dir.path().join("inbox");
    create_file(&source.join("cat1.png"), b"CAT1")?;
    create_file(&source.join("cat2.jpg"), b"CAT2")?;
    create_file(&source.join("dog1.gif"), b"DOG1")?;
    create_file(&source.join("notes.txt"), b"NOT AN IMAGE")?;

    let dest_root = temp_dir.path().join("sorted");
    fs::create_dir_all(dest_root.join("cats"))?;
    fs::create_dir_all(dest_root.join("dogs"))?;
    fs::create_dir_all(dest_root.join("misc"))?;

    let settings = Settings {
        delete_after_copy: true,
        send_to_recycle_bin: false,
        track_statistics: true,
        ..Default::default()
    };

    let mut session = Session::new(settings, &data_dir);
    assert_eq!(session.state(), SessionState::NoImageFolder);

    let loaded = session.select_image_folder(&source)?;
    assert_eq!(loaded, 3, "the text file is not an image");
    assert_eq!(session.session_total(), 3);

    let folders = session.select_destination_root(&dest_root)?;
    assert_eq!(folders, 3);

    // The misc pile is noise for this run; ignore it and check persistence.
    session.destinations_mut().toggle_ignored(&dest_root.join("misc"))?;
    assert_eq!(session.destinations().filtered(false).len(), 2);

    // cat1.png goes to cats and is deleted from the inbox.
    assert_eq!(session.current().unwrap().name, "cat1.png");
    session.destinations_mut().set_checked(&dest_root.join("cats"), true)?;
    let outcome = session.commit()?;
    assert_eq!(outcome.copied, 1);
    assert!(outcome.deleted);
    assert!(dest_root.join("cats").join("cat1.png").exists());
    assert!(!source.join("cat1.png").exists());

    // Not sure about cat2 yet: skip, sort the dog, then come back.
    assert_eq!(session.current().unwrap().name, "cat2.jpg");
    session.skip();
    assert_eq!(session.current().unwrap().name, "dog1.gif");
    session.destinations_mut().set_checked(&dest_root.join("dogs"), true)?;
    session.commit()?;
    assert!(dest_root.join("dogs").join("dog1.gif").exists());

    assert_eq!(session.state(), SessionState::Exhausted);
    session.back()?;
    assert_eq!(session.current().unwrap().name, "cat2.jpg");
    session.destinations_mut().set_checked(&dest_root.join("cats"), true)?;
    session.commit()?;

    assert_eq!(session.state(), SessionState::Exhausted);
    assert!((session.progress_fraction() - 1.0).abs() < f64::EPSILON);

    let totals = *session.statistics().totals();
    assert_eq!(totals.copied_count, 3);
    assert_eq!(totals.total_copy_operations, 3);
    assert_eq!(totals.deleted_count, 3);
    assert_eq!(totals.copied_bytes, 12, "three 4-byte payloads");
    assert_eq!(totals.deleted_bytes, 12);
    assert_eq!(totals.startup_count, 1);

    // Export, reset, import: the round trip restores every counter.
    let export_file = temp_dir.path().join("stats-export.json");
    session.export_statistics(&export_file)?;
    session.reset_statistics()?;
    assert_eq!(session.statistics().totals().copied_count, 0);
    session.import_statistics(&export_file)?;
    assert_eq!(*session.statistics().totals(), totals);

    drop(session);

    // A new session over the same data dir sees the ignore list and the
    // statistics, and counts its own startup.
    let mut session = Session::new(
        Settings {
            track_statistics: true,
            ..Default::default()
        },
        &data_dir,
    );
    session.select_destination_root(&dest_root)?;
    assert!(
        session.destinations().get(&dest_root.join("misc")).unwrap().ignored,
        "ignore flag must survive a restart"
    );
    assert_eq!(session.statistics().totals().startup_count, 2);

    let store = PathFilterStore::load(data_dir.join(IGNORED_PATHS_FILE));
    assert!(store.contains(&dest_root.join("misc")));
    Ok(())
}
