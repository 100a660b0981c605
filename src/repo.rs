//! A repository that stores content on the local file system.
//!
//! A [`Repository`] is an opaque handle to a work tree and the `.git`
//! directory inside it. It is read-mostly configuration: the object store
//! (see `store`) receives the handle and derives object paths from it,
//! but never walks the file system looking for repositories itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A handle to a repository on the local file system.
#[derive(Clone, Debug)]
pub struct Repository {
    work_dir: PathBuf,
    git_dir: PathBuf,
}

impl Repository {
    /// Creates a new, empty repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    /// Fails with [`Error::RepositoryExists`] if `work_dir` already
    /// contains a `.git` directory.
    pub fn init(work_dir: &Path) -> Result<Repository> {
        let git_dir = work_dir.join(".git");
        if git_dir.exists() {
            return Err(Error::RepositoryExists(work_dir.to_path_buf()));
        }

        fs::create_dir_all(&git_dir)?;

        create_branches_dir(&git_dir)?;
        create_config(&git_dir)?;
        create_description(&git_dir)?;
        create_head(&git_dir)?;
        create_objects_dir(&git_dir)?;
        create_refs_dir(&git_dir)?;

        Ok(Repository { work_dir: work_dir.to_path_buf(), git_dir })
    }

    /// Opens an existing repository rooted at `work_dir`.
    ///
    /// Fails with [`Error::NotARepository`] if the `.git` marker is
    /// missing, [`Error::MissingConfig`] if the config file is absent,
    /// and [`Error::UnsupportedFormatVersion`] if the config declares a
    /// `repositoryformatversion` other than `0`.
    pub fn open(work_dir: &Path) -> Result<Repository> {
        let git_dir = work_dir.join(".git");
        if !git_dir.is_dir() {
            return Err(Error::NotARepository(work_dir.to_path_buf()));
        }

        let config_path = git_dir.join("config");
        if !config_path.is_file() {
            return Err(Error::MissingConfig(config_path));
        }

        let config = fs::read_to_string(&config_path)?;
        match format_version(&config) {
            Some(version) if version == "0" => (),
            Some(version) => return Err(Error::UnsupportedFormatVersion(version)),
            None => return Err(Error::UnsupportedFormatVersion("<unset>".to_string())),
        }

        Ok(Repository { work_dir: work_dir.to_path_buf(), git_dir })
    }

    /// Locates the repository containing `start`, ascending parent
    /// directories until a `.git` marker is found.
    ///
    /// Fails with [`Error::RepositoryNotFound`] if `start` does not exist
    /// or the walk reaches the file system root without finding one.
    pub fn locate(start: &Path) -> Result<Repository> {
        let start = match start.canonicalize() {
            Ok(path) => path,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::RepositoryNotFound(start.to_path_buf()))
            }
            Err(err) => return Err(err.into()),
        };

        for dir in start.ancestors() {
            if dir.join(".git").is_dir() {
                return Repository::open(dir);
            }
        }

        Err(Error::RepositoryNotFound(start))
    }

    /// The work tree this repository tracks.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The repository's `.git` directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// The root of the loose-object store.
    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }
}

fn create_branches_dir(git_dir: &Path) -> Result<()> {
    let branches_dir = git_dir.join("branches");
    Ok(fs::create_dir_all(branches_dir)?)
}

fn create_config(git_dir: &Path) -> Result<()> {
    let config_path = git_dir.join("config");
    let config_txt =
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n";

    Ok(fs::write(config_path, config_txt)?)
}

fn create_description(git_dir: &Path) -> Result<()> {
    let desc_path = git_dir.join("description");
    let desc_txt = "Unnamed repository; edit this file 'description' to name the repository.\n";

    Ok(fs::write(desc_path, desc_txt)?)
}

fn create_head(git_dir: &Path) -> Result<()> {
    let head_path = git_dir.join("HEAD");
    let head_txt = "ref: refs/heads/master\n";

    Ok(fs::write(head_path, head_txt)?)
}

fn create_objects_dir(git_dir: &Path) -> Result<()> {
    let objects_dir = git_dir.join("objects");
    Ok(fs::create_dir_all(objects_dir)?)
}

fn create_refs_dir(git_dir: &Path) -> Result<()> {
    let heads_dir = git_dir.join("refs/heads");
    fs::create_dir_all(heads_dir)?;

    let tags_dir = git_dir.join("refs/tags");
    Ok(fs::create_dir_all(tags_dir)?)
}

fn format_version(config: &str) -> Option<String> {
    for line in config.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("repositoryformatversion") {
            if let Some(value) = rest.trim_start().strip_prefix('=') {
                return Some(value.trim().to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        assert_eq!(repo.work_dir(), dir.path());
        assert_eq!(repo.git_dir(), dir.path().join(".git"));

        for sub in &["branches", "objects", "refs/heads", "refs/tags"] {
            assert!(repo.git_dir().join(sub).is_dir(), "missing {}", sub);
        }

        let head = fs::read_to_string(repo.git_dir().join("HEAD")).unwrap();
        assert_eq!(head, "ref: refs/heads/master\n");

        let config = fs::read_to_string(repo.git_dir().join("config")).unwrap();
        assert!(config.contains("repositoryformatversion = 0"));
        assert!(config.contains("bare = false"));

        let desc = fs::read_to_string(repo.git_dir().join("description")).unwrap();
        assert!(desc.starts_with("Unnamed repository"));
    }

    #[test]
    fn init_err_if_git_dir_exists() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();

        match Repository::init(dir.path()).unwrap_err() {
            Error::RepositoryExists(path) => assert_eq!(path, dir.path()),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn open_after_init() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(repo.objects_dir(), dir.path().join(".git/objects"));
    }

    #[test]
    fn open_err_without_marker() {
        let dir = tempfile::tempdir().unwrap();

        match Repository::open(dir.path()).unwrap_err() {
            Error::NotARepository(path) => assert_eq!(path, dir.path()),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn open_err_without_config() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        fs::remove_file(dir.path().join(".git/config")).unwrap();

        match Repository::open(dir.path()).unwrap_err() {
            Error::MissingConfig(_) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn open_err_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        fs::write(
            dir.path().join(".git/config"),
            "[core]\n\trepositoryformatversion = 1\n",
        )
        .unwrap();

        match Repository::open(dir.path()).unwrap_err() {
            Error::UnsupportedFormatVersion(version) => assert_eq!(version, "1"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn locate_from_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let repo = Repository::locate(&nested).unwrap();
        assert_eq!(
            repo.work_dir().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn locate_err_when_no_repository() {
        let dir = tempfile::tempdir().unwrap();

        match Repository::locate(dir.path()).unwrap_err() {
            Error::RepositoryNotFound(_) => (),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn locate_err_when_start_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no/such/dir");

        match Repository::locate(&missing).unwrap_err() {
            Error::RepositoryNotFound(path) => assert_eq!(path, missing),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
