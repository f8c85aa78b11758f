mod layout;
pub use layout::{
    add_if_exists, check_folder_structure, get_rgbd_folders, make_clean_folder, FolderLayout,
};

mod drive;
pub use drive::{get_rgbd_file_lists, DriveLayout, RgbdFileLists};
