pub mod dataset;
pub mod file_list;
pub use file_list::{
    alphanum_key, get_file_list, read_file_list, search_for_files, sorted_alphanum, FileSearch,
};
pub mod pose_log;
pub use pose_log::{
    parse_pose_line, read_calibration, read_log_trajectory, read_pose_log, read_poses,
    write_poses_to_log, LogEntry,
};
