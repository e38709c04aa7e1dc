//! Shared helpers: build small git histories with libgit2.

#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::path::Path;
use tempfile::TempDir;

/// A file operation applied before committing
pub enum Op<'a> {
    Write(&'a str, &'a str),
    Remove(&'a str),
}

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repo = Repository::init(dir.path()).expect("init repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Apply `ops` to the working tree and index, then commit on HEAD.
    pub fn commit(&self, message: &str, ops: &[Op]) -> Oid {
        let mut index = self.repo.index().expect("index");
        for op in ops {
            match op {
                Op::Write(name, body) => {
                    let path = self.path().join(name);
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent).expect("create parent");
                    }
                    std::fs::write(&path, body).expect("write file");
                    index.add_path(Path::new(name)).expect("add path");
                }
                Op::Remove(name) => {
                    std::fs::remove_file(self.path().join(name)).expect("remove file");
                    index.remove_path(Path::new(name)).expect("remove path");
                }
            }
        }
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");
        let sig = Signature::now("Test User", "test@example.com").expect("signature");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("commit")
    }
}

/// Root adds a.cpp, second modifies it, third deletes it and adds b.cpp.
pub fn three_commit_repo() -> (TestRepo, Vec<Oid>) {
    let repo = TestRepo::new();
    let first = repo.commit("add a", &[Op::Write("a.cpp", "int main() { return 0; }\n")]);
    let second = repo.commit("edit a", &[Op::Write("a.cpp", "int main() { return 1; }\n")]);
    let third = repo.commit(
        "replace a with b",
        &[Op::Remove("a.cpp"), Op::Write("b.cpp", "void b() {}\n")],
    );
    (repo, vec![first, second, third])
}
