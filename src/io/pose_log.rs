use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use itertools::Itertools;
use nalgebra::{Matrix4, Quaternion, Vector3};
use serde_derive::Deserialize;

use crate::{error::Error, trajectory::Trajectory, transform::Transform};

#[derive(Deserialize, Debug)]
struct CalibrationDocument {
    transformation: [[f64; 4]; 4],
}

/// Reads an extrinsic calibration. The file is a JSON object whose
/// `transformation` key holds a row-major 4x4 matrix.
pub fn read_calibration<P: AsRef<Path>>(path: P) -> Result<Transform, Error> {
    log::info!(
        "Loading extrinsic calibration from: {}",
        path.as_ref().display()
    );
    let reader = BufReader::new(File::open(path.as_ref())?);
    let document: CalibrationDocument = serde_json::from_reader(reader).map_err(|err| {
        Error::Parser(format!("{}: {err}", path.as_ref().display()))
    })?;

    Ok(Transform::from_matrix4(&Matrix4::from_fn(|r, c| {
        document.transformation[r][c]
    })))
}

/// Parses a `tx ty tz qx qy qz qw` line. Fields after the seventh are ignored.
pub fn parse_pose_line(line: &str) -> Result<Transform, Error> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.len() < 7 {
        return Err(Error::Parser(format!(
            "expected 7 fields `tx ty tz qx qy qz qw`, got {}",
            tokens.len()
        )));
    }

    let mut values = [0.0f64; 7];
    for (value, token) in values.iter_mut().zip(tokens.iter()) {
        *value = token
            .parse::<f64>()
            .map_err(|_| Error::Parser(format!("invalid number `{token}`")))?;
    }

    Ok(Transform::new(
        &Vector3::new(values[0], values[1], values[2]),
        &Quaternion::new(values[6], values[3], values[4], values[5]),
    ))
}

/// Reads a pose file and applies the extrinsic calibration.
///
/// Each pose is `pose_from_line * calibration`. Without a calibration file
/// the poses are returned as parsed.
///
/// # Arguments
///
/// * `path` - Pose file with one `tx ty tz qx qy qz qw` line per pose.
/// * `calibration` - Optional JSON calibration, see [`read_calibration`].
pub fn read_poses<P: AsRef<Path>>(
    path: P,
    calibration: Option<&Path>,
) -> Result<Trajectory, Error> {
    let calibration = match calibration {
        Some(calibration_path) => read_calibration(calibration_path)?,
        None => Transform::eye(),
    };

    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut trajectory = Trajectory::default();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let pose = parse_pose_line(&line).map_err(|err| match err {
            Error::Parser(msg) => {
                Error::Parser(format!("{}:{}: {msg}", path.as_ref().display(), n + 1))
            }
            err => err,
        })?;
        trajectory.push(pose);
    }

    log::debug!(
        "Read {} poses from {}",
        trajectory.len(),
        path.as_ref().display()
    );
    Ok(trajectory.right_multiply(&calibration))
}

/// Writes poses as blocks of 5 lines: the `i i i+1` header followed by the
/// 4 matrix rows with 8 decimals.
pub fn write_poses_to_log<'a, P, I>(path: P, poses: I) -> Result<(), Error>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Transform>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    for (i, pose) in poses.into_iter().enumerate() {
        writeln!(writer, "{} {} {}", i, i, i + 1)?;
        let matrix = pose.matrix();
        for r in 0..4 {
            writeln!(
                writer,
                "{:.8} {:.8} {:.8} {:.8}",
                matrix[(r, 0)],
                matrix[(r, 1)],
                matrix[(r, 2)],
                matrix[(r, 3)]
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// One block of the pose log format.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// The three integers of the block header, `i i i+1` when written by
    /// [`write_poses_to_log`].
    pub metadata: [usize; 3],
    pub pose: Transform,
}

struct TextParserContext<'a> {
    filepath: &'a Path,
}

impl TextParserContext<'_> {
    /// Formats an error message by putting the file name, the line and the supplied message.
    fn gen_error(&self, line_number: usize, message: String) -> Error {
        Error::Parser(format!(
            "{}:{}: {}",
            self.filepath.display(),
            line_number,
            message
        ))
    }
}

/// Reads the blocks written by [`write_poses_to_log`]. Blank lines are ignored.
pub fn read_pose_log<P: AsRef<Path>>(path: P) -> Result<Vec<LogEntry>, Error> {
    let context = TextParserContext {
        filepath: path.as_ref(),
    };
    let reader = BufReader::new(File::open(path.as_ref())?);

    let mut lines = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push((n + 1, line));
        }
    }

    let mut entries = Vec::new();
    for block in &lines.into_iter().chunks(5) {
        let block = block.collect::<Vec<_>>();
        if block.len() != 5 {
            return Err(context.gen_error(
                block[0].0,
                format!("incomplete pose block, got {} of 5 lines", block.len()),
            ));
        }

        let (header_number, header) = &block[0];
        let metadata = match header
            .split_whitespace()
            .map(|token| token.parse::<usize>())
            .collect::<Vec<_>>()[..]
        {
            [Ok(m0), Ok(m1), Ok(m2)] => [m0, m1, m2],
            _ => {
                return Err(
                    context.gen_error(*header_number, format!("Invalid header. Got `{header}`"))
                )
            }
        };

        let mut matrix = Matrix4::zeros();
        for (r, (line_number, line)) in block[1..].iter().enumerate() {
            match line
                .split_whitespace()
                .map(|token| token.parse::<f64>())
                .collect::<Vec<_>>()[..]
            {
                [Ok(v0), Ok(v1), Ok(v2), Ok(v3)] => {
                    matrix[(r, 0)] = v0;
                    matrix[(r, 1)] = v1;
                    matrix[(r, 2)] = v2;
                    matrix[(r, 3)] = v3;
                }
                _ => {
                    return Err(context
                        .gen_error(*line_number, format!("Invalid matrix row. Got `{line}`")))
                }
            }
        }

        entries.push(LogEntry {
            metadata,
            pose: Transform::from_matrix4(&matrix),
        });
    }

    Ok(entries)
}

/// Same as [`read_pose_log`], keeping only the poses.
pub fn read_log_trajectory<P: AsRef<Path>>(path: P) -> Result<Trajectory, Error> {
    Ok(read_pose_log(path)?
        .into_iter()
        .map(|entry| entry.pose)
        .collect())
}
