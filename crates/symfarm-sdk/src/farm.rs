//! Farm creation: target checks, planning, and execution.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use symfarm_merge::{resolve, sequence, FarmPlan};
use symfarm_scan::scan_sources;
use symfarm_types::ActionKind;
use tracing::{debug, info};

use crate::config::FarmConfig;
use crate::error::{FarmError, FarmResult};
use crate::link::LinkHandler;

/// What a successful [`create`] or [`execute`] produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmReport {
    /// Directories created beneath the target (the target itself excluded).
    pub directories: usize,
    /// Links created.
    pub links: usize,
}

/// Whether a farm target can be used, as reported by [`check_target`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetState {
    /// Nothing exists at the target; [`create`] will make the directory.
    Missing,
    /// The target is an existing empty directory.
    Empty,
}

/// Create a farm at `target` from `sources`.
///
/// The target must be missing or an empty directory. When missing, it is
/// created (its parent must exist) only after the plan resolved cleanly, so
/// a conflict never touches the filesystem. Execution stops at the first
/// failing action; actions already performed are left in place.
pub fn create<T, I, P>(config: &FarmConfig, target: T, sources: I) -> FarmResult<FarmReport>
where
    T: AsRef<Path>,
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let target = target.as_ref();
    debug!(target = %target.display(), "creating farm");

    let state = check_target(target)?;
    let plan = plan(config, sources)?;

    if state == TargetState::Missing {
        fs::create_dir(target).map_err(|e| FarmError::io(target, e))?;
        debug!(target = %target.display(), "created target directory");
    } else {
        debug!(target = %target.display(), "target exists and is empty");
    }

    let report = execute(&plan, target, config.linker())?;
    info!(
        target = %target.display(),
        directories = report.directories,
        links = report.links,
        "farm created"
    );
    Ok(report)
}

/// Scan, resolve, and sequence without touching the filesystem.
pub fn plan<I, P>(config: &FarmConfig, sources: I) -> FarmResult<FarmPlan>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let inventory = scan_sources(sources)?;
    let actions = resolve(&inventory, config.conflict_handler())
        .inspect_err(|e| debug!(path = %e.path(), "merge failed"))?;
    let plan = sequence(actions);
    debug!(
        directories = plan.directory_count(),
        links = plan.link_count(),
        "farm planned"
    );
    Ok(plan)
}

/// Perform every action of `plan` beneath `target`, in order.
pub fn execute(plan: &FarmPlan, target: &Path, linker: &dyn LinkHandler) -> FarmResult<FarmReport> {
    let mut report = FarmReport::default();

    for (index, action) in plan.iter().enumerate() {
        let location = action.location_in(target);
        debug!(index, kind = %action.kind, path = %action.path, "executing action");

        match (action.kind, &action.link_target) {
            (ActionKind::MakeDirectory, _) => {
                fs::create_dir(&location).map_err(|e| FarmError::io(&location, e))?;
                report.directories += 1;
            }
            (ActionKind::MakeLink, Some(origin)) => {
                linker
                    .link(origin, &location)
                    .map_err(|e| FarmError::io(&location, e))?;
                report.links += 1;
            }
            (ActionKind::MakeLink, None) => {
                return Err(FarmError::InvalidAction(format!(
                    "link at {} has no target",
                    action.path
                )));
            }
        }
    }

    Ok(report)
}

/// Check that `target` is missing or an empty directory.
///
/// Fails with [`FarmError::TargetExists`] when it has entries, or with an
/// I/O error when it is not a readable directory.
pub fn check_target(target: &Path) -> FarmResult<TargetState> {
    match fs::symlink_metadata(target) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TargetState::Missing),
        Err(e) => return Err(FarmError::io(target, e)),
    }

    let mut entries = fs::read_dir(target).map_err(|e| FarmError::io(target, e))?;
    match entries.next() {
        None => Ok(TargetState::Empty),
        Some(Ok(_)) => {
            debug!(target = %target.display(), "target is not empty");
            Err(FarmError::TargetExists(target.to_path_buf()))
        }
        Some(Err(e)) => Err(FarmError::io(target, e)),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use symfarm_merge::{PreferFirst, SkipConflicts};

    use super::*;
    use crate::link::HardLinker;

    fn touch(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Source trees used across the tests:
    /// - `a` and `b` share a directory but no files,
    /// - `c` shares the file `a_file` with `a`,
    /// - `d` has a directory named `a_file`.
    struct Fixture {
        _dir: tempfile::TempDir,
        base: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let base = dir.path().to_path_buf();

            touch(&base.join("a/a_dir/a_dir_file"), "a");
            touch(&base.join("a/shared_dir/a_shared_file"), "a");
            touch(&base.join("a/a_file"), "a");
            touch(&base.join("a/c_file"), "a");

            touch(&base.join("b/shared_dir/b_shared_file"), "b");
            touch(&base.join("b/b_file"), "b");

            touch(&base.join("c/a_file"), "c");
            touch(&base.join("c/only_c"), "c");

            touch(&base.join("d/a_file/inside"), "d");

            Self { _dir: dir, base }
        }

        fn tree(&self, name: &str) -> PathBuf {
            self.base.join(name)
        }

        fn target(&self, name: &str) -> PathBuf {
            self.base.join(name)
        }
    }

    type Calls = Rc<RefCell<Vec<(PathBuf, PathBuf)>>>;

    /// Records every call and leaves an empty file at the link path.
    fn recording_linker(calls: Calls) -> impl Fn(&Path, &Path) -> io::Result<()> {
        move |origin: &Path, link: &Path| {
            calls.borrow_mut().push((origin.to_path_buf(), link.to_path_buf()));
            fs::write(link, b"")
        }
    }

    #[test]
    fn empty_existing_target_is_filled_in_place() {
        let fx = Fixture::new();
        touch(&fx.base.join("A/dir/f"), "A");
        let target = fx.target("empty");
        fs::create_dir(&target).unwrap();
        assert_eq!(check_target(&target).unwrap(), TargetState::Empty);

        let config = FarmConfig::default().with_linker(HardLinker);
        let report = create(&config, &target, [fx.tree("A")]).unwrap();
        assert_eq!(report, FarmReport { directories: 1, links: 1 });
        assert!(target.join("dir").is_dir());
        assert_eq!(fs::read_to_string(target.join("dir").join("f")).unwrap(), "A");
    }

    #[test]
    fn no_sources_leave_an_empty_target() {
        let fx = Fixture::new();
        let target = fx.target("fresh");
        assert_eq!(check_target(&target).unwrap(), TargetState::Missing);

        let report = create(&FarmConfig::default(), &target, Vec::<PathBuf>::new()).unwrap();
        assert_eq!(report, FarmReport::default());
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn non_empty_target_fails_before_scanning() {
        let fx = Fixture::new();
        let target = fx.target("busy");
        touch(&target.join("random-file"), "");
        assert!(check_target(&target).unwrap_err().is_target_exists());

        // A missing source would fail the scan if it ever ran.
        let err = create(&FarmConfig::default(), &target, [fx.tree("missing")]).unwrap_err();
        assert!(err.is_target_exists(), "got {err:?}");
        assert_eq!(fs::read_dir(&target).unwrap().count(), 1);
    }

    #[test]
    fn target_that_is_a_file_is_io_error() {
        let fx = Fixture::new();
        let target = fx.target("plain-file");
        touch(&target, "");

        let err = create(&FarmConfig::default(), &target, [fx.tree("a")]).unwrap_err();
        assert!(matches!(err, FarmError::Io { ref path, .. } if path == &target));
    }

    #[test]
    fn missing_target_parent_is_io_error() {
        let fx = Fixture::new();
        let target = fx.target("no/such/parent");

        let err = create(&FarmConfig::default(), &target, [fx.tree("a")]).unwrap_err();
        assert!(matches!(err, FarmError::Io { ref path, .. } if path == &target));
    }

    #[test]
    fn disjoint_trees_produce_their_union() {
        let fx = Fixture::new();
        let target = fx.target("farm");
        let calls: Calls = Rc::default();
        let config = FarmConfig::default().with_linker(recording_linker(Rc::clone(&calls)));

        let report = create(&config, &target, [fx.tree("a"), fx.tree("b")]).unwrap();

        assert_eq!(report, FarmReport { directories: 2, links: 6 });
        assert!(target.join("a_dir").is_dir());
        assert!(target.join("shared_dir").is_dir());

        let mut calls = calls.borrow().clone();
        calls.sort();
        let a = fx.tree("a");
        let b = fx.tree("b");
        let mut expected = vec![
            (a.join("a_dir").join("a_dir_file"), target.join("a_dir").join("a_dir_file")),
            (a.join("a_file"), target.join("a_file")),
            (a.join("c_file"), target.join("c_file")),
            (a.join("shared_dir").join("a_shared_file"), target.join("shared_dir").join("a_shared_file")),
            (b.join("b_file"), target.join("b_file")),
            (b.join("shared_dir").join("b_shared_file"), target.join("shared_dir").join("b_shared_file")),
        ];
        expected.sort();
        assert_eq!(calls, expected);
    }

    #[test]
    fn file_conflict_fails_with_default_policy() {
        let fx = Fixture::new();
        let target = fx.target("farm");

        let err = create(&FarmConfig::default(), &target, [fx.tree("a"), fx.tree("c")]).unwrap_err();
        assert!(err.is_unresolvable_conflict(), "got {err:?}");
        assert!(!target.exists());
    }

    #[test]
    fn file_conflict_is_skipped_with_skip_policy() {
        let fx = Fixture::new();
        let target = fx.target("farm");
        let config = FarmConfig::new(SkipConflicts, HardLinker);

        create(&config, &target, [fx.tree("a"), fx.tree("c")]).unwrap();

        assert!(!target.join("a_file").exists());
        assert_eq!(fs::read_to_string(target.join("only_c")).unwrap(), "c");
        assert_eq!(fs::read_to_string(target.join("c_file")).unwrap(), "a");
    }

    #[test]
    fn prefer_first_links_earliest_tree() {
        let fx = Fixture::new();
        let target = fx.target("farm");
        let config = FarmConfig::new(PreferFirst, HardLinker);

        create(&config, &target, [fx.tree("c"), fx.tree("a")]).unwrap();
        assert_eq!(fs::read_to_string(target.join("a_file")).unwrap(), "c");
    }

    #[test]
    fn file_directory_conflict_in_either_order_mutates_nothing() {
        let fx = Fixture::new();
        for (i, sources) in [["a", "d"], ["d", "a"]].into_iter().enumerate() {
            let target = fx.target(&format!("farm-{i}"));
            let config = FarmConfig::default().with_conflict_handler(SkipConflicts);

            let err = create(&config, &target, sources.map(|s| fx.tree(s))).unwrap_err();
            assert!(err.is_file_directory_conflict(), "got {err:?}");
            assert!(!target.exists());
        }
    }

    #[test]
    fn plan_orders_directory_before_contents() {
        let fx = Fixture::new();
        touch(&fx.base.join("A/dir/f"), "A");
        touch(&fx.base.join("B/dir/g"), "B");

        let plan = plan(&FarmConfig::default(), [fx.tree("A"), fx.tree("B")]).unwrap();

        let rendered: Vec<String> = plan.iter().map(|a| a.path.to_string()).collect();
        assert_eq!(rendered, vec!["/dir", "/dir/f", "/dir/g"]);
        assert_eq!(plan.actions()[0].kind, ActionKind::MakeDirectory);
        assert_eq!(plan.actions()[1].link_target, Some(fx.tree("A").join("dir").join("f")));
        assert_eq!(plan.actions()[2].link_target, Some(fx.tree("B").join("dir").join("g")));
    }

    #[cfg(unix)]
    #[test]
    fn end_to_end_with_symlinks() {
        let fx = Fixture::new();
        touch(&fx.base.join("A/dir/f"), "A");
        touch(&fx.base.join("B/dir/g"), "B");
        let target = fx.target("farm");

        let report = create(&FarmConfig::default(), &target, [fx.tree("A"), fx.tree("B")]).unwrap();

        assert_eq!(report, FarmReport { directories: 1, links: 2 });
        let dir = fs::symlink_metadata(target.join("dir")).unwrap();
        assert!(dir.is_dir() && !dir.file_type().is_symlink());
        assert_eq!(
            fs::read_link(target.join("dir").join("f")).unwrap(),
            fx.tree("A").join("dir").join("f")
        );
        assert_eq!(
            fs::read_link(target.join("dir").join("g")).unwrap(),
            fx.tree("B").join("dir").join("g")
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_becomes_a_link() {
        let fx = Fixture::new();
        let src = fx.tree("with-link");
        fs::create_dir(&src).unwrap();
        std::os::unix::fs::symlink(fx.tree("a"), src.join("a_tree")).unwrap();
        let target = fx.target("farm");

        let report = create(&FarmConfig::default(), &target, [&src]).unwrap();

        assert_eq!(report, FarmReport { directories: 0, links: 1 });
        // The link points at the source tree's own symlink.
        assert_eq!(fs::read_link(target.join("a_tree")).unwrap(), src.join("a_tree"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_names_are_farmed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let fx = Fixture::new();
        let src = fx.tree("latin1");
        let name = OsStr::from_bytes(b"caf\xe9.txt");
        touch(&src.join("dir").join(name), "bytes");
        let target = fx.target("farm");

        let report = create(&FarmConfig::default(), &target, [&src]).unwrap();

        assert_eq!(report, FarmReport { directories: 1, links: 1 });
        assert_eq!(
            fs::read_link(target.join("dir").join(name)).unwrap(),
            src.join("dir").join(name)
        );
    }

    #[test]
    fn execution_stops_at_first_failure_without_rollback() {
        let fx = Fixture::new();
        touch(&fx.base.join("A/dir/f"), "A");
        touch(&fx.base.join("A/dir/g"), "A");
        let target = fx.target("farm");

        let failing = |_: &Path, link: &Path| -> io::Result<()> {
            if link.ends_with("g") {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            } else {
                fs::write(link, b"")
            }
        };
        let config = FarmConfig::default().with_linker(failing);

        let err = create(&config, &target, [fx.tree("A")]).unwrap_err();
        match err {
            FarmError::Io { path, source } => {
                assert_eq!(path, target.join("dir").join("g"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected I/O error, got {other:?}"),
        }
        assert!(target.join("dir").is_dir());
        assert!(target.join("dir").join("f").exists());
    }

    #[test]
    fn execute_rejects_link_without_target() {
        let fx = Fixture::new();
        let target = fx.target("farm");
        fs::create_dir(&target).unwrap();

        let broken = symfarm_types::PendingAction {
            path: symfarm_types::FarmPath::parse("/x").unwrap(),
            kind: ActionKind::MakeLink,
            link_target: None,
        };
        let plan = sequence(vec![broken]);
        let err = execute(&plan, &target, &HardLinker).unwrap_err();
        assert!(matches!(err, FarmError::InvalidAction(_)));
    }
}
