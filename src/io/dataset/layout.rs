use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::error::Error;

/// Flat RGB-D dataset layout: a color folder, under one of several
/// accepted names, next to a depth folder.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FolderLayout {
    /// Accepted color folder names, in order of preference.
    pub color_candidates: Vec<String>,
    pub depth_folder: String,
}

impl Default for FolderLayout {
    fn default() -> Self {
        Self {
            color_candidates: vec!["image".into(), "rgb".into(), "color".into()],
            depth_folder: "depth".into(),
        }
    }
}

impl FolderLayout {
    /// Resolves the color folder, `None` if no candidate exists.
    pub fn color_folder<P: AsRef<Path>>(&self, dataset_dir: P) -> Option<PathBuf> {
        add_if_exists(dataset_dir, self.color_candidates.as_slice())
    }

    /// The depth folder. Its existence is not checked.
    pub fn depth_folder<P: AsRef<Path>>(&self, dataset_dir: P) -> PathBuf {
        dataset_dir.as_ref().join(&self.depth_folder)
    }

    /// Returns the resolved color folder and the depth folder.
    pub fn rgbd_folders<P: AsRef<Path>>(&self, dataset_dir: P) -> (Option<PathBuf>, PathBuf) {
        (
            self.color_folder(dataset_dir.as_ref()),
            self.depth_folder(dataset_dir.as_ref()),
        )
    }

    /// Checks that both the depth and the color folders exist.
    ///
    /// # Returns
    ///
    /// * The color and depth folders, or an [`Error::Assertion`] naming the
    ///   first missing folder.
    pub fn check_folder_structure<P: AsRef<Path>>(
        &self,
        dataset_dir: P,
    ) -> Result<(PathBuf, PathBuf), Error> {
        let (color, depth) = self.rgbd_folders(dataset_dir.as_ref());
        if !depth.exists() {
            return Err(Error::Assertion(format!(
                "Path {} does not exist!",
                depth.display()
            )));
        }

        match color {
            Some(color) => Ok((color, depth)),
            None => {
                let tried = self
                    .color_candidates
                    .iter()
                    .map(|name| dataset_dir.as_ref().join(name).display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::Assertion(format!("Path {tried} does not exist!")))
            }
        }
    }
}

/// Returns the first of `folder_names` that exists under `dataset_dir`.
pub fn add_if_exists<P, S>(dataset_dir: P, folder_names: &[S]) -> Option<PathBuf>
where
    P: AsRef<Path>,
    S: AsRef<Path>,
{
    folder_names
        .iter()
        .map(|name| dataset_dir.as_ref().join(name))
        .find(|path| path.exists())
}

/// [`FolderLayout::rgbd_folders`] with the default layout.
pub fn get_rgbd_folders<P: AsRef<Path>>(dataset_dir: P) -> (Option<PathBuf>, PathBuf) {
    FolderLayout::default().rgbd_folders(dataset_dir)
}

/// [`FolderLayout::check_folder_structure`] with the default layout.
pub fn check_folder_structure<P: AsRef<Path>>(dataset_dir: P) -> Result<(PathBuf, PathBuf), Error> {
    FolderLayout::default().check_folder_structure(dataset_dir)
}

/// Makes `path` an existing, empty folder. Any previous content is deleted.
pub fn make_clean_folder<P: AsRef<Path>>(path: P) -> Result<(), Error> {
    let path = path.as_ref();
    if path.exists() {
        log::debug!("Removing the contents of {}", path.display());
        std::fs::remove_dir_all(path)?;
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_test::{flat_dataset, scratch_dir, touch};

    #[test]
    fn test_add_if_exists() {
        let dir = scratch_dir();
        std::fs::create_dir(dir.path().join("rgb")).unwrap();
        std::fs::create_dir(dir.path().join("color")).unwrap();

        assert_eq!(
            add_if_exists(dir.path(), &["image", "rgb", "color"]),
            Some(dir.path().join("rgb"))
        );
        assert_eq!(add_if_exists(dir.path(), &["image"]), None);
    }

    #[test]
    fn test_get_rgbd_folders() {
        let dir = scratch_dir();
        let (color, depth) = get_rgbd_folders(dir.path());
        assert_eq!(color, None);
        assert_eq!(depth, dir.path().join("depth"));
    }

    #[test]
    fn test_check_folder_structure() {
        let dataset = flat_dataset("color");
        let (color, depth) = check_folder_structure(dataset.path()).unwrap();
        assert_eq!(color, dataset.path().join("color"));
        assert_eq!(depth, dataset.path().join("depth"));
    }

    #[test]
    fn test_check_folder_structure_missing_depth() {
        let dir = scratch_dir();
        std::fs::create_dir(dir.path().join("image")).unwrap();

        match check_folder_structure(dir.path()) {
            Err(Error::Assertion(msg)) => assert!(msg.contains("depth"), "{msg}"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_check_folder_structure_missing_color() {
        let dir = scratch_dir();
        std::fs::create_dir(dir.path().join("depth")).unwrap();

        assert!(matches!(
            check_folder_structure(dir.path()),
            Err(Error::Assertion(_))
        ));
    }

    #[test]
    fn test_custom_layout() {
        let dir = scratch_dir();
        std::fs::create_dir(dir.path().join("left")).unwrap();
        std::fs::create_dir(dir.path().join("disparity")).unwrap();
        let layout = FolderLayout {
            color_candidates: vec!["left".into()],
            depth_folder: "disparity".into(),
        };

        assert!(layout.check_folder_structure(dir.path()).is_ok());
        assert!(check_folder_structure(dir.path()).is_err());
    }

    #[test]
    fn test_layout_from_json() {
        let layout: FolderLayout = serde_json::from_str(r#"{"depth_folder": "d"}"#).unwrap();
        assert_eq!(layout.depth_folder, "d");
        assert_eq!(layout.color_candidates, FolderLayout::default().color_candidates);
    }

    #[test]
    fn test_make_clean_folder_idempotent() {
        let dir = scratch_dir();
        let output = dir.path().join("out/fragments");

        make_clean_folder(&output).unwrap();
        assert!(output.is_dir());
        touch(&output.join("nested/file.ply"));

        make_clean_folder(&output).unwrap();
        assert!(output.is_dir());
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);

        make_clean_folder(&output).unwrap();
        assert!(output.is_dir());
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);
    }
}
