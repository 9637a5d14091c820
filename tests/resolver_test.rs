// tests/resolver_test.rs
use minver::diagnostics::Diagnostic;
use minver::domain::{MajorMinor, Version, VersionPart};
use minver::git::MockRepository;
use minver::{MinVerError, Resolver, Settings};

fn resolve(repo: &MockRepository, settings: &Settings) -> Version {
    Resolver::new(settings.clone())
        .resolve(repo, &mut Vec::new())
        .unwrap()
}

fn chain_past_tag(tag: &str, height: usize) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit("c0", &[]);
    repo.add_tag(tag, "c0");
    for i in 1..=height {
        let parent = format!("c{}", i - 1);
        repo.add_commit(&format!("c{}", i), &[parent.as_str()]);
    }
    repo
}

#[test]
fn test_height_strictly_increases_version() {
    let settings = Settings::default();
    let mut previous = resolve(&chain_past_tag("1.0.0", 0), &settings);

    for height in 1..12 {
        let current = resolve(&chain_past_tag("1.0.0", height), &settings);
        assert!(current > previous, "{} should exceed {}", current, previous);
        assert!(current < Version::new(1, 0, 2));
        previous = current;
    }
}

#[test]
fn test_pre_release_height_stays_below_release() {
    let settings = Settings::default();
    let tag: Version = "1.1.0-beta.1".parse().unwrap();

    for height in 1..12 {
        let version = resolve(&chain_past_tag("1.1.0-beta.1", height), &settings);
        assert!(version > tag);
        assert!(version < Version::new(1, 1, 0));
    }
}

#[test]
fn test_untagged_history_height_is_distance_to_root() {
    let mut repo = MockRepository::new();
    repo.add_chain(None, &["a", "b", "c", "d", "e", "f"]);

    let version = resolve(&repo, &Settings::default());
    assert_eq!(version.to_string(), "0.0.0-alpha.0.5");
}

#[test]
fn test_minimum_floor_preserves_height_order() {
    let settings = Settings {
        minimum_major_minor: Some(MajorMinor::new(4, 2)),
        ..Settings::default()
    };

    let low = resolve(&chain_past_tag("1.0.0", 1), &settings);
    let high = resolve(&chain_past_tag("1.0.0", 2), &settings);

    assert_eq!(low.major_minor(), MajorMinor::new(4, 2));
    assert_eq!(high.major_minor(), MajorMinor::new(4, 2));
    assert!(low < high);
}

#[test]
fn test_release_tag_outranks_sibling_pre_release_candidates() {
    // root(1.0.0-rc.1) <- rel(1.0.0) <- m
    //        \                         /
    //         <- x <- y <-------------
    let mut repo = MockRepository::new();
    repo.add_commit("root", &[]);
    repo.add_commit("rel", &["root"]);
    repo.add_chain(Some("root"), &["x", "y"]);
    repo.add_commit("m", &["y", "rel"]);
    repo.add_tag("1.0.0-rc.1", "root");
    repo.add_tag("1.0.0", "rel");

    let mut sink = Vec::new();
    let version = Resolver::new(Settings::default())
        .resolve(&repo, &mut sink)
        .unwrap();

    assert_eq!(version.to_string(), "1.0.1-alpha.0.1");
    assert!(sink.iter().any(|d| matches!(
        d,
        Diagnostic::Using(c) if c.tag.as_deref() == Some("1.0.0")
    )));
}

#[test]
fn test_multiple_tags_on_one_commit_use_highest() {
    let mut repo = MockRepository::new();
    repo.add_commit("a", &[]);
    repo.add_tag("1.0.0", "a");
    repo.add_tag("1.0.0-rc.2", "a");
    repo.add_tag("0.9.0", "a");

    assert_eq!(resolve(&repo, &Settings::default()), Version::new(1, 0, 0));
}

#[test]
fn test_deep_history_does_not_recurse() {
    let mut repo = MockRepository::new();
    let ids: Vec<String> = (0..50_000).map(|i| format!("c{}", i)).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    repo.add_chain(None, &refs);
    repo.add_tag("2.0.0", "c0");

    let version = resolve(&repo, &Settings::default());
    assert_eq!(version.to_string(), "2.0.1-alpha.0.49999");
}

#[test]
fn test_tag_at_maximum_patch_is_error_past_tag() {
    let mut repo = MockRepository::new();
    repo.add_chain(None, &["a", "b"]);
    repo.add_tag("1.0.18446744073709551615", "a");

    let err = Resolver::new(Settings::default())
        .resolve(&repo, &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err, MinVerError::VersionOverflow { .. }));
    assert!(!err.is_usage_error());

    // bumping another part still works, and stays above the tag
    let settings = Settings {
        auto_increment: VersionPart::Minor,
        ..Settings::default()
    };
    let version = resolve(&repo, &settings);
    assert_eq!(version.to_string(), "1.1.0-alpha.0.1");
    assert!(version > "1.0.18446744073709551615".parse().unwrap());
}

#[test]
fn test_tag_at_maximum_patch_on_head_is_used_as_is() {
    let repo = chain_past_tag("1.0.18446744073709551615", 0);
    assert_eq!(
        resolve(&repo, &Settings::default()).to_string(),
        "1.0.18446744073709551615"
    );
}
