//! Property tests for the diff engine over generated trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::TempDir;

use sitepush::domain::ports::Identity;
use sitepush::domain::value_objects::SkipPatterns;
use sitepush::{deploy_changes, CommandKind, DeployCommand, SyncSettings};

/// Relative file path -> contents. Directory names never contain a dot and
/// file names always do, so a generated tree cannot hold a file and a
/// directory at the same path.
type Tree = BTreeMap<String, String>;

fn tree() -> impl Strategy<Value = Tree> {
    let dir = prop::sample::select(vec!["a", "b", "c"]);
    let file = prop::sample::select(vec!["x.txt", "y.html", "z.css"]);
    let path = (prop::collection::vec(dir, 0..=2), file)
        .prop_map(|(dirs, file)| {
            let mut parts: Vec<&str> = dirs;
            parts.push(file);
            parts.join("/")
        });
    prop::collection::btree_map(path, "[a-z]{0,6}", 0..8)
}

fn write_tree(root: &Path, tree: &Tree) {
    fs::create_dir_all(root).unwrap();
    for (rel, contents) in tree {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

/// Every file under `root`, keyed by `/`-joined relative path
fn read_tree(root: &Path) -> Tree {
    let mut out = Tree::new();
    for entry in walkdir::WalkDir::new(root).min_depth(1) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap();
            let rel = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/");
            out.insert(rel, fs::read_to_string(entry.path()).unwrap());
        }
    }
    out
}

/// Every directory under `root`, `/`-joined
fn read_dirs(root: &Path) -> Vec<String> {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

/// Apply with operations that fail on anything out of order
fn apply_strict(root: &Path, cmd: &DeployCommand) {
    let path = cmd.rel_path().to_native(root);
    match cmd.kind() {
        CommandKind::DirAdd => fs::create_dir(&path).unwrap(),
        CommandKind::FileAdd => {
            assert!(!path.exists(), "{cmd} over an existing entry");
            fs::write(&path, cmd.contents()).unwrap();
        }
        CommandKind::FileUpdate => {
            assert!(path.is_file(), "{cmd} without a file to update");
            fs::write(&path, cmd.contents()).unwrap();
        }
        CommandKind::FileDelete => fs::remove_file(&path).unwrap(),
        CommandKind::DirDelete => fs::remove_dir(&path).unwrap(),
    }
}

struct Fixture {
    _tmp: TempDir,
    settings: SyncSettings,
}

fn fixture(src: &Tree, dest: &Tree, skip: &[&str]) -> Fixture {
    let tmp = TempDir::new().unwrap();
    let src_root = tmp.path().join("public");
    let dest_root = tmp.path().join("deployed");
    write_tree(&src_root, src);
    write_tree(&dest_root, dest);
    let settings = SyncSettings::new(src_root, dest_root)
        .with_minify(false)
        .with_skip(SkipPatterns::new(skip.iter().copied()));
    Fixture {
        _tmp: tmp,
        settings,
    }
}

fn run(settings: &SyncSettings, apply: bool) -> Vec<DeployCommand> {
    let mut seen = Vec::new();
    deploy_changes(settings, &Identity, |cmd| {
        if apply {
            apply_strict(settings.dest_dir(), &cmd);
        }
        seen.push(cmd);
        Ok(())
    })
    .unwrap();
    seen
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: applying the commands in order makes the destination hold
    /// exactly the source files, and nothing is left to do afterwards.
    #[test]
    fn property_apply_reproduces_source(src in tree(), dest in tree()) {
        let fx = fixture(&src, &dest, &[]);

        run(&fx.settings, true);

        prop_assert_eq!(read_tree(fx.settings.dest_dir()), src);
        let mut src_dirs = read_dirs(fx.settings.source_dir());
        let mut dest_dirs = read_dirs(fx.settings.dest_dir());
        src_dirs.sort();
        dest_dirs.sort();
        prop_assert_eq!(dest_dirs, src_dirs);
        prop_assert!(run(&fx.settings, false).is_empty());
    }

    /// PROPERTY: no command ever names a skipped path, on either side.
    #[test]
    fn property_skipped_paths_are_never_touched(src in tree(), dest in tree()) {
        let fx = fixture(&src, &dest, &["b"]);

        let commands = run(&fx.settings, true);

        for cmd in &commands {
            prop_assert!(!cmd.rel_path().as_str().contains('b'), "{} was not skipped", cmd);
        }
        let kept: Tree = dest.into_iter().filter(|(p, _)| p.contains('b')).collect();
        let after: Tree = read_tree(fx.settings.dest_dir())
            .into_iter()
            .filter(|(p, _)| p.contains('b'))
            .collect();
        prop_assert_eq!(after, kept);
    }

    /// PROPERTY: a directory is created before anything inside it and
    /// deleted after everything inside it.
    #[test]
    fn property_directories_bracket_their_contents(src in tree(), dest in tree()) {
        let fx = fixture(&src, &dest, &[]);

        let commands = run(&fx.settings, false);

        for (i, cmd) in commands.iter().enumerate() {
            let path = cmd.rel_path().as_str();
            for (j, other) in commands.iter().enumerate() {
                let inside = other.rel_path().as_str().starts_with(&format!("{path}/"));
                if !inside {
                    continue;
                }
                match cmd.kind() {
                    CommandKind::DirAdd => prop_assert!(i < j, "{} after {}", cmd, other),
                    CommandKind::DirDelete => prop_assert!(j < i, "{} before {}", cmd, other),
                    _ => {}
                }
            }
        }
    }
}
