use std::path::{Path, PathBuf};

/// The on-disk texture tree of a game directory. Only existence is queried.
pub struct WalStore {
    game_dir: PathBuf,
}

impl WalStore {
    pub fn new<P: AsRef<Path>>(game_dir: P) -> Self {
        Self {
            game_dir: game_dir.as_ref().to_owned(),
        }
    }

    /// `textures/<name>.wal`, relative to the game directory.
    pub fn wal_path(name: &str) -> String {
        format!("textures/{}.wal", name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.game_dir.join(Self::wal_path(name)).is_file()
    }
}
