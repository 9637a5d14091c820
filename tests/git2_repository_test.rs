// tests/git2_repository_test.rs
mod common;

use common::TestRepo;
use minver::diagnostics::Diagnostic;
use minver::domain::CommitId;
use minver::git::{CommitGraph, Git2Repository};
use minver::{Resolver, Settings};

fn open(test: &TestRepo) -> Git2Repository {
    Git2Repository::discover(test.path()).unwrap().unwrap()
}

fn resolve(test: &TestRepo, settings: Settings) -> String {
    Resolver::new(settings)
        .resolve(&open(test), &mut Vec::new())
        .unwrap()
        .to_string()
}

fn prefixed(prefix: &str) -> Settings {
    Settings {
        tag_prefix: prefix.to_string(),
        ..Settings::default()
    }
}

#[test]
fn test_empty_repository_resolves_to_default() {
    let test = TestRepo::new();

    let mut sink = Vec::new();
    let version = Resolver::new(Settings::default())
        .resolve(&open(&test), &mut sink)
        .unwrap();

    assert_eq!(version.to_string(), "0.0.0-alpha.0");
    assert_eq!(sink, vec![Diagnostic::NoCommits]);
}

#[test]
fn test_head_and_parents() {
    let test = TestRepo::new();
    let first = test.commit("first");
    let second = test.commit("second");
    let repo = open(&test);

    assert_eq!(repo.head().unwrap(), Some(CommitId::from(second)));
    assert_eq!(
        repo.parents_of(&CommitId::from(second)).unwrap(),
        vec![CommitId::from(first)]
    );
    assert!(repo.parents_of(&CommitId::from(first)).unwrap().is_empty());
}

#[test]
fn test_lightweight_and_annotated_tags_resolve_to_commits() {
    let test = TestRepo::new();
    let first = test.commit("first");
    let second = test.commit("second");
    test.tag("1.0.0", first);
    test.annotated_tag("2.0.0", second);

    let repo = open(&test);
    let mut tags = repo.tags().unwrap();
    tags.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].target, CommitId::from(first));
    assert_eq!(tags[1].target, CommitId::from(second));
    assert_eq!(
        repo.tags_pointing_at(&CommitId::from(second)).unwrap()[0].name,
        "2.0.0"
    );
}

#[test]
fn test_tag_on_tree_is_skipped() {
    let test = TestRepo::new();
    let commit = test.commit("first");
    let tree = test.repo.find_commit(commit).unwrap().tree_id();
    let tree_object = test.repo.find_object(tree, None).unwrap();
    test.repo.tag_lightweight("1.0.0", &tree_object, false).unwrap();

    assert!(open(&test).tags().unwrap().is_empty());
}

#[test]
fn test_untagged_history_height() {
    let test = TestRepo::new();
    test.commits(4);

    assert_eq!(resolve(&test, Settings::default()), "0.0.0-alpha.0.3");
}

#[test]
fn test_exact_tag() {
    let test = TestRepo::new();
    test.commit("first");
    let head = test.commit("second");
    test.tag("v2.3.4", head);

    assert_eq!(resolve(&test, prefixed("v")), "2.3.4");
}

#[test]
fn test_annotated_tag_two_commits_back() {
    let test = TestRepo::new();
    let tagged = test.commit("release");
    test.annotated_tag("v1.0.0", tagged);
    test.commits(2);

    assert_eq!(resolve(&test, prefixed("v")), "1.0.1-alpha.0.2");
}

#[test]
fn test_pre_release_tag_with_height_stays_below_release() {
    let test = TestRepo::new();
    let tagged = test.commit("beta");
    test.tag("v1.1.0-beta.1", tagged);
    test.commits(3);

    let version: minver::domain::Version = resolve(&test, prefixed("v")).parse().unwrap();
    assert_eq!(version.to_string(), "1.1.0-beta.1.3");
    assert!(version > "1.1.0-beta.1".parse().unwrap());
    assert!(version < "1.1.0".parse().unwrap());
}

#[test]
fn test_merge_with_untagged_sibling() {
    let test = TestRepo::new();
    let root = test.commit("root");
    let side = test.commit_with_parents(None, "side", &[root]);
    let tagged = test.commit("main");
    test.tag("1.0.0", tagged);
    let merge_parent = test.repo.head().unwrap().peel_to_commit().unwrap().id();
    test.commit_with_parents(Some("HEAD"), "merge", &[merge_parent, side]);

    assert_eq!(resolve(&test, Settings::default()), "1.0.1-alpha.0.1");
}

#[test]
fn test_merge_picks_highest_branch() {
    let test = TestRepo::new();
    let root = test.commit("root");
    test.tag("1.0.0", root);
    let side = test.commit_with_parents(None, "side", &[root]);
    test.tag("1.1.0-beta.1", side);
    let main = test.commit("main");
    test.commit_with_parents(Some("HEAD"), "merge", &[main, side]);

    assert_eq!(resolve(&test, Settings::default()), "1.1.0-beta.1.1");
}

#[test]
fn test_branch_name_included() {
    let test = TestRepo::new();
    let root = test.commit("root");
    test.tag("1.0.0", root);
    test.checkout_new_branch("feature/new_thing", root);
    test.commit("work");

    let repo = open(&test);
    assert_eq!(
        repo.current_branch_name().unwrap().as_deref(),
        Some("feature/new_thing")
    );

    let settings = Settings {
        include_branch_name: true,
        ..Settings::default()
    };
    assert_eq!(resolve(&test, settings), "1.0.1-alpha.0.1.feature-new-thing");
}

#[test]
fn test_detached_head_has_no_branch() {
    let test = TestRepo::new();
    let first = test.commit("first");
    test.commit("second");
    test.detach(first);

    let repo = open(&test);
    assert_eq!(repo.current_branch_name().unwrap(), None);
    assert_eq!(repo.head().unwrap(), Some(CommitId::from(first)));
}

#[test]
fn test_non_version_tags_are_ignored() {
    let test = TestRepo::new();
    let first = test.commit("first");
    test.tag("1.0.0", first);
    let second = test.commit("second");
    test.tag("latest", second);

    let mut sink = Vec::new();
    let version = Resolver::new(Settings::default())
        .resolve(&open(&test), &mut sink)
        .unwrap();

    assert_eq!(version.to_string(), "1.0.1-alpha.0.1");
    assert!(sink
        .iter()
        .any(|d| matches!(d, Diagnostic::NonVersionTag { tag, .. } if tag == "latest")));
}
