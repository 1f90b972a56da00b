use minivc::record::{JsonRecord, WorkspaceRecord};
use minivc::MvcError;

use crate::integration::support::{files, list_dir, read_file, write_file, Sandbox};

#[test]
fn load_of_fresh_project_only_writes_metadata() {
    let sandbox = Sandbox::new();
    sandbox.repo("author").create("p").unwrap();

    let reader = sandbox.repo("reader");
    let recipe = reader.load("p", None).unwrap();
    assert!(recipe.is_empty());
    assert_eq!(recipe.project_name, "p");
    reader.load_finalize(&recipe).unwrap();

    let ws = sandbox.workspace("reader");
    assert_eq!(list_dir(&ws), vec![".mvc", "changelog.md"]);
    assert_eq!(WorkspaceRecord::load(&ws).unwrap().project, "p");
    assert!(read_file(&ws, "changelog.md").contains("p was created"));
}

#[test]
fn load_computes_plan_without_touching_workspace() {
    let sandbox = Sandbox::new();
    let author = sandbox.repo("author");
    let ws = sandbox.workspace("author");
    author.create("p").unwrap();
    write_file(&ws, "a.txt", "alpha");
    author.submit(&files(&["a.txt"]), "d").unwrap();
    author.save("s").unwrap();

    let reader = sandbox.repo("reader");
    let recipe = reader.load("p", None).unwrap();
    assert_eq!(
        recipe.files_to_add.get("a.txt"),
        Some(&sandbox.base().join("p/versions/latest"))
    );
    assert!(list_dir(&sandbox.workspace("reader")).is_empty());

    reader.load_finalize(&recipe).unwrap();
    let reader_ws = sandbox.workspace("reader");
    assert_eq!(read_file(&reader_ws, "a.txt"), "alpha");
    assert!(read_file(&reader_ws, "changelog.md").starts_with("# stable version\n## v0.1.0\n"));
}

#[test]
fn load_ignores_pending_submits() {
    let sandbox = Sandbox::new();
    let author = sandbox.repo("author");
    let ws = sandbox.workspace("author");
    author.create("p").unwrap();
    write_file(&ws, "a.txt", "saved");
    author.submit(&files(&["a.txt"]), "d").unwrap();
    author.save("s").unwrap();
    write_file(&ws, "a.txt", "pending");
    write_file(&ws, "b.txt", "pending");
    author.submit(&files(&["a.txt", "b.txt"]), "d").unwrap();

    let reader = sandbox.repo("reader");
    let recipe = reader.load("p", None).unwrap();
    assert_eq!(recipe.files_to_add.keys().collect::<Vec<_>>(), vec!["a.txt"]);
    reader.load_finalize(&recipe).unwrap();
    assert_eq!(read_file(&sandbox.workspace("reader"), "a.txt"), "saved");
}

#[test]
fn load_of_missing_release_is_invalid_version() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    repo.create("p").unwrap();
    assert!(matches!(repo.load("p", Some(5)), Err(MvcError::InvalidVersion(_))));
}

#[test]
fn load_resolves_release_references_across_releases() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    let ws = sandbox.workspace("ws");
    repo.create("p").unwrap();
    write_file(&ws, "f1", "one");
    repo.submit(&files(&["f1"]), "d1").unwrap();
    repo.save("s1").unwrap();
    repo.release("r1").unwrap();
    write_file(&ws, "f2", "two");
    repo.submit(&files(&["f2"]), "d2").unwrap();
    repo.save("s2").unwrap();
    repo.release("r2").unwrap();

    let recipe = repo.load("p", Some(2)).unwrap();
    assert_eq!(
        recipe.files_to_add.get("f1"),
        Some(&sandbox.base().join("p/versions/ver1"))
    );
    assert_eq!(
        recipe.files_to_add.get("f2"),
        Some(&sandbox.base().join("p/versions/ver2"))
    );

    let older = repo.load("p", Some(1)).unwrap();
    assert_eq!(older.files_to_add.keys().collect::<Vec<_>>(), vec!["f1"]);

    let fresh = sandbox.repo("fresh");
    let recipe = fresh.load("p", None).unwrap();
    fresh.load_finalize(&recipe).unwrap();
    let fresh_ws = sandbox.workspace("fresh");
    assert_eq!(read_file(&fresh_ws, "f1"), "one");
    assert_eq!(read_file(&fresh_ws, "f2"), "two");
    let changelog = read_file(&fresh_ws, "changelog.md");
    assert!(changelog.starts_with("# Release version\n## v2.0.0\nr2\n"));
    assert!(!changelog.contains("# stable version"));
}

#[test]
fn review_requires_pending_submits() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    repo.create("p").unwrap();
    assert!(matches!(repo.review(), Err(MvcError::NoSubmits)));
}

#[test]
fn review_round_trips_submitted_bytes_and_older_submits() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    let ws = sandbox.workspace("ws");
    repo.create("p").unwrap();
    write_file(&ws, "a.txt", "alpha");
    write_file(&ws, "b.txt", "beta\0bytes");
    repo.submit(&files(&["a.txt"]), "one").unwrap();
    repo.submit(&files(&["b.txt"]), "two").unwrap();

    write_file(&ws, "a.txt", "local edit");
    std::fs::remove_file(ws.join("b.txt")).unwrap();

    let recipe = repo.review().unwrap();
    assert_eq!(
        recipe.files_to_add.get("a.txt"),
        Some(&sandbox.base().join("p/temp/sub1"))
    );
    assert_eq!(
        recipe.files_to_add.get("b.txt"),
        Some(&sandbox.base().join("p/temp/sub2"))
    );
    repo.review_finalize(&recipe).unwrap();

    assert_eq!(read_file(&ws, "a.txt"), "alpha");
    assert_eq!(read_file(&ws, "b.txt"), "beta\0bytes");
    let changelog = read_file(&ws, "changelog.md");
    assert!(changelog.starts_with("# development version\n## v0.0.2\ntwo\n"));
    assert!(repo.changes().unwrap().is_empty());
}

#[test]
fn review_does_not_rebind_workspace() {
    let sandbox = Sandbox::new();
    let repo = sandbox.repo("ws");
    let ws = sandbox.workspace("ws");
    repo.create("first").unwrap();
    repo.create("second").unwrap();
    write_file(&ws, "a.txt", "alpha");
    repo.submit(&files(&["a.txt"]), "d").unwrap();

    let recipe = repo.review().unwrap();
    assert_eq!(recipe.project_name, "second");
    repo.review_finalize(&recipe).unwrap();
    assert_eq!(WorkspaceRecord::load(&ws).unwrap().project, "second");
}

#[test]
fn workspaces_share_a_project() {
    let sandbox = Sandbox::new();
    let alice = sandbox.repo("alice");
    let alice_ws = sandbox.workspace("alice");
    alice.create("shared").unwrap();
    write_file(&alice_ws, "readme.md", "v1");
    alice.submit(&files(&["readme.md"]), "draft").unwrap();
    alice.save("first cut").unwrap();

    let bob = sandbox.repo("bob");
    let bob_ws = sandbox.workspace("bob");
    let recipe = bob.load("shared", None).unwrap();
    bob.load_finalize(&recipe).unwrap();
    assert_eq!(read_file(&bob_ws, "readme.md"), "v1");

    write_file(&bob_ws, "readme.md", "v2");
    write_file(&bob_ws, "notes.md", "notes");
    bob.submit(&files(&["readme.md", "notes.md"]), "bob edits").unwrap();
    bob.save("second cut").unwrap();
    bob.release("1.0").unwrap();

    let recipe = alice.load("shared", Some(1)).unwrap();
    alice.load_finalize(&recipe).unwrap();
    assert_eq!(read_file(&alice_ws, "readme.md"), "v2");
    assert_eq!(read_file(&alice_ws, "notes.md"), "notes");
    assert_eq!(alice.status().unwrap(), Vec::<String>::new());
    assert_eq!(alice.contents().unwrap(), vec!["notes.md", "readme.md"]);
}
