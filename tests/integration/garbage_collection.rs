use minivc::record::{JsonRecord, VersionRecord};
use minivc::FileId;

use crate::integration::support::{files, list_dir, write_file, Sandbox};

#[test]
fn save_prunes_release_reference_absent_from_dev_tier() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    let ws = sandbox.workspace("ws");
    repo.create("p").unwrap();
    write_file(&ws, "a", "alpha");
    repo.submit(&files(&["a"]), "d").unwrap();
    repo.save("s").unwrap();
    repo.release("r").unwrap();
    write_file(&ws, "b", "beta");
    repo.submit(&files(&["b"]), "d").unwrap();
    repo.save("s").unwrap();

    let stable_dir = sandbox.base().join("p/versions/latest");
    let stable = VersionRecord::load(&stable_dir).unwrap();
    assert_eq!(stable.include.get("a"), Some(&FileId::release_head(1)));
    assert_eq!(list_dir(&stable_dir), vec![".mvc", "b"]);

    repo.remove(&files(&["a"]), "drop a").unwrap();
    repo.save("s").unwrap();

    let stable = VersionRecord::load(&stable_dir).unwrap();
    assert!(!stable.include.contains_key("a"));
    assert_eq!(list_dir(&stable_dir), vec![".mvc", "b"]);
    assert_eq!(repo.contents().unwrap(), vec!["b"]);
}

#[test]
fn save_deletes_stable_resident_file_absent_from_dev_tier() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    let ws = sandbox.workspace("ws");
    repo.create("p").unwrap();
    write_file(&ws, "a", "alpha");
    write_file(&ws, "b", "beta");
    repo.submit(&files(&["a", "b"]), "d").unwrap();
    repo.save("s").unwrap();

    repo.remove(&files(&["a"]), "drop a").unwrap();
    repo.save("s").unwrap();

    let stable_dir = sandbox.base().join("p/versions/latest");
    assert_eq!(list_dir(&stable_dir), vec![".mvc", "b"]);
    assert!(VersionRecord::load(&stable_dir).unwrap().include.is_empty());
}

#[test]
fn save_copies_bytes_held_by_older_submits() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    let ws = sandbox.workspace("ws");
    repo.create("p").unwrap();
    write_file(&ws, "a", "alpha");
    write_file(&ws, "b", "beta");
    repo.submit(&files(&["a"]), "one").unwrap();
    repo.submit(&files(&["b"]), "two").unwrap();

    let dev = VersionRecord::load(&sandbox.base().join("p/temp/sub2")).unwrap();
    assert_eq!(dev.include.get("a"), Some(&FileId::new(0, 0, 1)));

    repo.save("s").unwrap();
    let stable_dir = sandbox.base().join("p/versions/latest");
    assert_eq!(list_dir(&stable_dir), vec![".mvc", "a", "b"]);
    assert_eq!(std::fs::read_to_string(stable_dir.join("a")).unwrap(), "alpha");
}

#[test]
fn resubmitted_file_replaces_release_reference() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    let ws = sandbox.workspace("ws");
    repo.create("p").unwrap();
    write_file(&ws, "a", "v1");
    repo.submit(&files(&["a"]), "d").unwrap();
    repo.save("s").unwrap();
    repo.release("r").unwrap();

    write_file(&ws, "a", "v2");
    repo.submit(&files(&["a"]), "d").unwrap();
    let dev = VersionRecord::load(&sandbox.base().join("p/temp/sub1")).unwrap();
    assert!(dev.include.is_empty());

    repo.save("s").unwrap();
    let stable_dir = sandbox.base().join("p/versions/latest");
    assert!(VersionRecord::load(&stable_dir).unwrap().include.is_empty());
    assert_eq!(std::fs::read_to_string(stable_dir.join("a")).unwrap(), "v2");
    assert_eq!(
        std::fs::read_to_string(sandbox.base().join("p/versions/ver1/a")).unwrap(),
        "v1"
    );
}
