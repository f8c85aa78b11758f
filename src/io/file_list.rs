use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::Error;

/// One run of a natural sort key.
///
/// Keys always alternate text and number runs starting with a (maybe empty)
/// text run, so runs at the same position have the same variant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlphanumChunk {
    Text(String),
    /// Digit run without leading zeros. Ordering by length first and then by
    /// digits is the numeric ordering, whatever the number of digits.
    Number { len: usize, digits: String },
}

impl AlphanumChunk {
    fn number(run: &str) -> Self {
        let digits = run.trim_start_matches('0');
        AlphanumChunk::Number {
            len: digits.len(),
            digits: digits.to_string(),
        }
    }
}

/// Splits `text` into its natural sort key: `[text, number, text, ...]`.
pub fn alphanum_key(text: &str) -> Vec<AlphanumChunk> {
    let mut key = Vec::new();
    let mut run_start = 0;
    let mut in_digits = false;

    for (i, c) in text.char_indices() {
        let is_digit = c.is_ascii_digit();
        if is_digit != in_digits {
            let run = &text[run_start..i];
            key.push(if in_digits {
                AlphanumChunk::number(run)
            } else {
                AlphanumChunk::Text(run.to_string())
            });
            run_start = i;
            in_digits = is_digit;
        }
    }

    let run = &text[run_start..];
    key.push(if in_digits {
        AlphanumChunk::number(run)
    } else {
        AlphanumChunk::Text(run.to_string())
    });
    if in_digits {
        key.push(AlphanumChunk::Text(String::new()));
    }

    key
}

/// Sorts paths so embedded numbers compare by value (`f2` before `f10`).
/// The sort is stable.
pub fn sorted_alphanum<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Vec<PathBuf> {
    let mut paths = paths
        .into_iter()
        .map(|path| path.as_ref().to_path_buf())
        .collect::<Vec<_>>();
    paths.sort_by_cached_key(|path| alphanum_key(&path.to_string_lossy()));
    paths
}

/// Lists the regular files directly inside `dir`.
///
/// # Arguments
///
/// * `dir` - Directory to list. It must exist.
/// * `extension` - Keeps only files with this last extension, e.g. `".png"` or `"png"`.
///
/// # Returns
///
/// * The file paths in natural order.
pub fn get_file_list<P: AsRef<Path>>(
    dir: P,
    extension: Option<&str>,
) -> Result<Vec<PathBuf>, Error> {
    let extension = extension.map(|ext| ext.trim_start_matches('.'));

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        let keep = match extension {
            None => true,
            Some(ext) => path.extension().map_or(false, |e| e == ext),
        };
        if keep {
            files.push(path);
        }
    }

    Ok(sorted_alphanum(files))
}

/// Recursive search for file names matching a glob pattern under a root
/// directory.
///
/// The search is lazy and can be restarted: every call to
/// [`FileSearch::paths`] traverses the file system again.
#[derive(Clone, Debug)]
pub struct FileSearch {
    pattern: String,
}

impl FileSearch {
    /// # Arguments
    ///
    /// * `name` - File name or glob pattern, e.g. `"rgb_drive.txt"` or `"*.png"`.
    /// * `root` - Directory to search. Matches in the root itself are included.
    pub fn new<P: AsRef<Path>>(name: &str, root: P) -> Result<Self, Error> {
        let root = root.as_ref().to_str().ok_or_else(|| {
            Error::invalid_parameter(format!(
                "Search root is not valid UTF-8: {}",
                root.as_ref().display()
            ))
        })?;
        let pattern = format!(
            "{}/**/{}",
            glob::Pattern::escape(root).trim_end_matches('/'),
            name
        );
        glob::Pattern::new(&pattern)?;

        Ok(Self { pattern })
    }

    /// Starts a new traversal.
    pub fn paths(&self) -> Result<impl Iterator<Item = Result<PathBuf, Error>>, Error> {
        Ok(glob::glob(&self.pattern)?.map(|entry| entry.map_err(Error::from)))
    }

    /// Runs the traversal to completion.
    pub fn collect_paths(&self) -> Result<Vec<PathBuf>, Error> {
        self.paths()?.collect()
    }
}

/// Collects every file named `name` (a glob pattern) found under `root`.
pub fn search_for_files<P: AsRef<Path>>(name: &str, root: P) -> Result<Vec<PathBuf>, Error> {
    FileSearch::new(name, root)?.collect_paths()
}

/// Reads a list of names, one per line. Lines are trimmed and blank lines skipped.
pub fn read_file_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Error> {
    let reader = BufReader::new(File::open(path)?);
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::unit_test::{touch, scratch_dir};

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_alphanum_key() {
        assert_eq!(
            alphanum_key("frame007_a"),
            vec![
                AlphanumChunk::Text("frame".to_string()),
                AlphanumChunk::Number {
                    len: 1,
                    digits: "7".to_string()
                },
                AlphanumChunk::Text("_a".to_string()),
            ]
        );
        assert_eq!(alphanum_key("12")[0], AlphanumChunk::Text(String::new()));
        assert_eq!(alphanum_key(""), vec![AlphanumChunk::Text(String::new())]);
    }

    #[rstest]
    #[case(&["f2", "f10", "f1"], &["f1", "f2", "f10"])]
    #[case(&["img_100.png", "img_20.png", "img_3.png"], &["img_3.png", "img_20.png", "img_100.png"])]
    #[case(&["b", "a10", "a9"], &["a9", "a10", "b"])]
    #[case(
        &["x99999999999999999999999", "x100000000000000000000000"],
        &["x99999999999999999999999", "x100000000000000000000000"]
    )]
    fn test_sorted_alphanum(#[case] input: &[&str], #[case] expected: &[&str]) {
        let sorted = sorted_alphanum(input.iter());
        assert_eq!(
            sorted,
            expected.iter().map(PathBuf::from).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_get_file_list_extension() {
        let dir = scratch_dir();
        for name in ["c.png", "a.png", "b.jpg"] {
            touch(&dir.path().join(name));
        }
        std::fs::create_dir(dir.path().join("d.png")).unwrap();

        let png = get_file_list(dir.path(), Some(".png")).unwrap();
        assert_eq!(names(&png), ["a.png", "c.png"]);

        let png = get_file_list(dir.path(), Some("png")).unwrap();
        assert_eq!(names(&png), ["a.png", "c.png"]);

        let all = get_file_list(dir.path(), None).unwrap();
        assert_eq!(names(&all), ["a.png", "b.jpg", "c.png"]);
    }

    #[test]
    fn test_get_file_list_natural_order() {
        let dir = scratch_dir();
        for name in ["10.png", "2.png", "1.png"] {
            touch(&dir.path().join(name));
        }
        let files = get_file_list(dir.path(), None).unwrap();
        assert_eq!(names(&files), ["1.png", "2.png", "10.png"]);
    }

    #[test]
    fn test_get_file_list_missing_dir() {
        let dir = scratch_dir();
        let result = get_file_list(dir.path().join("missing"), None);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_search_restartable() {
        let dir = scratch_dir();
        touch(&dir.path().join("rgb_drive.txt"));
        touch(&dir.path().join("a/b/rgb_drive.txt"));
        touch(&dir.path().join("a/other.txt"));

        let search = FileSearch::new("rgb_drive.txt", dir.path()).unwrap();
        let mut first = search.collect_paths().unwrap();
        let mut second = search.collect_paths().unwrap();
        first.sort();
        second.sort();

        assert_eq!(
            first,
            vec![
                dir.path().join("a/b/rgb_drive.txt"),
                dir.path().join("rgb_drive.txt")
            ]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_no_match() {
        let dir = scratch_dir();
        assert!(search_for_files("nothing.txt", dir.path())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_read_file_list() {
        let dir = scratch_dir();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "0001.png\n  0002.png \n\n0003.png\n").unwrap();
        assert_eq!(
            read_file_list(&path).unwrap(),
            ["0001.png", "0002.png", "0003.png"]
        );
    }
}
