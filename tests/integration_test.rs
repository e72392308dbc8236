use std::fs;
use std::path::Path;

use parfind::{run_search, search, Entry, EntryKind, FinderError, Matcher, NameMatcher};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```
/// tmp/
///   notes.md
///   x.txt
///   a/
///     invoice.txt
///   b/
///     one/
///       two/
///         deep.log
///   c/
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("notes.md"), "some notes").unwrap();
    fs::write(root.join("x.txt"), "root file").unwrap();

    fs::create_dir(root.join("a")).unwrap();
    fs::write(root.join("a/invoice.txt"), "january invoice").unwrap();

    fs::create_dir_all(root.join("b/one/two")).unwrap();
    fs::write(root.join("b/one/two/deep.log"), "deep").unwrap();

    fs::create_dir(root.join("c")).unwrap();

    dir
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn finds_file_directly_in_root() {
    let dir = setup_test_dir();
    let outcome = run_search(dir.path(), "x.txt", 4).unwrap();

    assert!(outcome.found);
    assert_eq!(outcome.path(), Some(dir.path().join("x.txt").as_path()));
}

#[test]
fn finds_deeply_nested_file() {
    let dir = setup_test_dir();
    let outcome = run_search(dir.path(), "deep.log", 4).unwrap();

    assert!(outcome.found);
    assert!(outcome.path().unwrap().ends_with("b/one/two/deep.log"));
    assert!(outcome.finder().is_some());
    assert!(outcome.stats.workers >= 1 && outcome.stats.workers <= 4);
}

#[test]
fn missing_file_is_not_found_after_full_walk() {
    let dir = setup_test_dir();
    let outcome = run_search(dir.path(), "nope.txt", 2).unwrap();

    assert!(!outcome.found);
    assert!(outcome.matched.is_none());
    // [root, a, b, c] over 2 workers: both start.
    assert_eq!(outcome.stats.workers, 2);
    // Every file was compared at least once.
    assert!(outcome.stats.files >= 4);
}

#[test]
fn empty_root_starts_no_workers() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_search(dir.path(), "x.txt", 4).unwrap();

    assert!(!outcome.found);
    assert_eq!(outcome.stats.workers, 0);
}

#[test]
fn root_with_only_files_uses_one_worker() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    fs::write(dir.path().join("b.txt"), "").unwrap();

    let outcome = run_search(dir.path(), "b.txt", 4).unwrap();

    assert!(outcome.found);
    assert_eq!(outcome.finder(), Some(1));
    assert_eq!(outcome.stats.workers, 1);
}

#[test]
fn empty_target_is_rejected() {
    let dir = setup_test_dir();
    let err = run_search(dir.path(), "", 4).unwrap_err();
    assert!(matches!(err, FinderError::EmptyTarget));
    assert!(!err.is_recoverable());
}

#[test]
fn zero_workers_is_rejected() {
    let dir = setup_test_dir();
    let err = run_search(dir.path(), "x.txt", 0).unwrap_err();
    assert!(matches!(err, FinderError::InvalidWorkerCount(0)));
}

#[test]
fn missing_target_and_root_are_rejected() {
    let dir = setup_test_dir();

    let no_target = search().root(dir.path()).run();
    assert!(matches!(no_target, Err(FinderError::NoTarget)));

    let no_root = search().named("x.txt").run();
    assert!(matches!(no_root, Err(FinderError::NoRoot)));
}

#[test]
fn invalid_root_is_rejected() {
    let dir = setup_test_dir();

    let missing = run_search(dir.path().join("does-not-exist"), "x.txt", 4);
    assert!(matches!(missing, Err(FinderError::NotFound(_))));

    let file = run_search(dir.path().join("notes.md"), "x.txt", 4);
    match file {
        Err(FinderError::NotADirectory(p)) => assert!(p.ends_with("notes.md")),
        other => panic!("expected NotADirectory, got {other:?}"),
    }
}

#[test]
fn hidden_and_ignored_files_are_searched() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join(".gitignore"), "secret.txt\n.hidden/\n").unwrap();
    fs::create_dir(root.join(".hidden")).unwrap();
    fs::write(root.join(".hidden/secret.txt"), "").unwrap();

    let outcome = run_search(root, "secret.txt", 2).unwrap();

    assert!(outcome.found);
    assert!(outcome.path().unwrap().ends_with(".hidden/secret.txt"));
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_searched() {
    let outside = tempfile::tempdir().unwrap();
    fs::create_dir(outside.path().join("inner")).unwrap();
    fs::write(outside.path().join("inner/target.txt"), "").unwrap();

    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("real")).unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

    let outcome = run_search(dir.path(), "target.txt", 4).unwrap();
    assert!(outcome.found);
    assert_eq!(
        outcome.path(),
        Some(dir.path().join("link/inner/target.txt").as_path())
    );

    // A link to a directory is a directory, never a file match.
    let outcome = run_search(dir.path(), "link", 4).unwrap();
    assert!(!outcome.found);
}

#[cfg(unix)]
#[test]
fn symlinked_files_and_dangling_links_match_by_name() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/real.txt"), "").unwrap();
    std::os::unix::fs::symlink(dir.path().join("sub/real.txt"), dir.path().join("alias.txt")).unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

    let outcome = run_search(dir.path(), "alias.txt", 2).unwrap();
    assert_eq!(outcome.path(), Some(dir.path().join("alias.txt").as_path()));

    let outcome = run_search(dir.path(), "dangling", 2).unwrap();
    assert_eq!(outcome.path(), Some(dir.path().join("dangling").as_path()));
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_names_do_not_match_their_lossy_form() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join(OsStr::from_bytes(b"a\xff")), "").unwrap();

    let outcome = run_search(dir.path(), "a\u{FFFD}", 2).unwrap();
    assert!(!outcome.found);
}

#[cfg(unix)]
#[test]
fn name_matcher_compares_raw_file_names() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let raw = Path::new("/r").join(OsStr::from_bytes(b"a\xff"));
    let entry = Entry::new(raw, EntryKind::File);
    assert_eq!(entry.name, "a\u{FFFD}");

    assert!(!NameMatcher::new("a\u{FFFD}").is_match(&entry));
    assert!(NameMatcher::new("b.txt").is_match(&Entry::new("/r/b.txt", EntryKind::File)));
}

#[test]
fn one_of_several_matches_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for sub in ["p", "q", "r", "s", "t"] {
        fs::create_dir_all(root.join(sub).join("inner")).unwrap();
        fs::write(root.join(sub).join("inner/dup.txt"), sub).unwrap();
    }

    for _ in 0..20 {
        let outcome = run_search(root, "dup.txt", 4).unwrap();

        assert!(outcome.found);
        let path = outcome.path().unwrap();
        assert!(path.ends_with("inner/dup.txt"));
        assert!(path.exists());
        let worker = outcome.finder().unwrap();
        assert!((1..=4).contains(&worker));
    }
}

#[test]
fn every_file_in_a_generated_tree_is_found() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for i in 0..7 {
        let sub = root.join(format!("d{i}")).join(format!("level{}", i % 3));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("file_{i}.dat")), "").unwrap();
    }
    fs::write(root.join("top.dat"), "").unwrap();

    let files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files.len(), 8);

    for workers in 1..=5 {
        for name in &files {
            let outcome = run_search(root, name, workers).unwrap();
            assert!(outcome.found, "{name} with {workers} workers");
            assert_eq!(
                outcome.path().and_then(Path::file_name).map(|n| n.to_string_lossy().into_owned()),
                Some(name.clone())
            );
        }
    }
}

#[test]
fn custom_matcher_works() {
    struct Extension(&'static str);
    impl Matcher for Extension {
        fn is_match(&self, entry: &Entry) -> bool {
            entry.path.extension().map(|e| e == self.0).unwrap_or(false)
        }
    }

    let dir = setup_test_dir();
    let outcome = search()
        .root(dir.path())
        .with_matcher(Extension("log"))
        .run()
        .unwrap();

    assert!(outcome.found);
    assert!(outcome.path().unwrap().ends_with("deep.log"));
}

#[test]
fn named_replaces_matcher() {
    struct Never;
    impl Matcher for Never {
        fn is_match(&self, _entry: &Entry) -> bool {
            false
        }
    }

    let dir = setup_test_dir();
    let outcome = search()
        .root(dir.path())
        .with_matcher(Never)
        .named("invoice.txt")
        .run()
        .unwrap();

    assert!(outcome.found);
}

#[test]
fn stats_are_populated() {
    let dir = setup_test_dir();
    let outcome = run_search(dir.path(), "nope.txt", 4).unwrap();

    assert!(outcome.stats.duration.as_nanos() > 0);
    assert!(outcome.stats.dirs >= 6);
    assert!(outcome.stats.files >= 4);
}
