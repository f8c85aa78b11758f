use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use super::layout::FolderLayout;
use crate::{
    error::Error,
    io::{
        file_list::{get_file_list, read_file_list, search_for_files},
        pose_log::read_poses,
    },
    trajectory::Trajectory,
};

/// Sub-paths of a recorded drive, relative to the dataset root.
///
/// The name list holds one image name per line. Each name is looked up in
/// both `rgb_dir` and `depth_dir`, and the vehicle pose file has one pose per
/// name.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriveLayout {
    /// Folder searched for `name_list`.
    pub raw_dir: PathBuf,
    pub name_list: String,
    /// Folder searched for `vehicle_poses`.
    pub vehicle_dir: PathBuf,
    pub vehicle_poses: String,
    pub rgb_dir: PathBuf,
    pub depth_dir: PathBuf,
}

impl Default for DriveLayout {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("raw_full"),
            name_list: "rgb_drive.txt".into(),
            vehicle_dir: PathBuf::from("raw_full/vehicle"),
            vehicle_poses: "rgb_drive_vehicle_0.0800.txt".into(),
            rgb_dir: PathBuf::from("raw_full/rgb"),
            depth_dir: PathBuf::from("raw_full/depth"),
        }
    }
}

/// Color and depth files of a dataset, in matching order.
#[derive(Clone, Debug, Default)]
pub struct RgbdFileLists {
    pub rgb: Vec<PathBuf>,
    pub depth: Vec<PathBuf>,
    /// Calibrated poses, when the dataset provides them.
    pub poses: Option<Trajectory>,
}

impl RgbdFileLists {
    /// Lists a flat dataset: the `.jpg` then the `.png` files of the color
    /// folder and the `.png` files of the depth folder, each in natural
    /// order. Flat datasets carry no poses.
    pub fn from_folders<P: AsRef<Path>>(
        dataset_dir: P,
        layout: &FolderLayout,
    ) -> Result<Self, Error> {
        let (color_dir, depth_dir) = layout.check_folder_structure(dataset_dir)?;

        let mut rgb = get_file_list(&color_dir, Some(".jpg"))?;
        rgb.extend(get_file_list(&color_dir, Some(".png"))?);
        let depth = get_file_list(&depth_dir, Some(".png"))?;
        if rgb.len() != depth.len() {
            log::warn!(
                "{} color files but {} depth files in {}",
                rgb.len(),
                depth.len(),
                color_dir.display()
            );
        }

        Ok(Self {
            rgb,
            depth,
            poses: None,
        })
    }

    pub fn len(&self) -> usize {
        self.rgb.len().min(self.depth.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn find_first(name: &str, root: &Path) -> Result<PathBuf, Error> {
    search_for_files(name, root)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(format!("{name} under {}", root.display())))
}

/// Assembles the file lists and calibrated poses of a recorded drive.
///
/// # Arguments
///
/// * `dataset_dir` - Dataset root.
/// * `layout` - Where the name list, poses and images live under the root.
/// * `calibration` - Optional extrinsic calibration applied to the vehicle
///   poses, see [`read_poses`].
pub fn get_rgbd_file_lists<P: AsRef<Path>>(
    dataset_dir: P,
    layout: &DriveLayout,
    calibration: Option<&Path>,
) -> Result<RgbdFileLists, Error> {
    let dataset_dir = dataset_dir.as_ref();
    let name_list = find_first(&layout.name_list, &dataset_dir.join(&layout.raw_dir))?;
    let vehicle_file = find_first(&layout.vehicle_poses, &dataset_dir.join(&layout.vehicle_dir))?;
    log::info!(
        "Reading drive {} with poses {}",
        name_list.display(),
        vehicle_file.display()
    );

    let names = read_file_list(&name_list)?;
    let poses = read_poses(&vehicle_file, calibration)?;
    if names.len() != poses.len() {
        log::warn!(
            "{} image names but {} poses in {}",
            names.len(),
            poses.len(),
            vehicle_file.display()
        );
    }

    let rgb_dir = dataset_dir.join(&layout.rgb_dir);
    let depth_dir = dataset_dir.join(&layout.depth_dir);
    let (rgb, depth): (Vec<_>, Vec<_>) = names
        .iter()
        .map(|name| (rgb_dir.join(name), depth_dir.join(name)))
        .unzip();

    Ok(RgbdFileLists {
        rgb,
        depth,
        poses: Some(poses),
    })
}
