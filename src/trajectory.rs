use std::ops::Index;

use crate::transform::Transform;

/// Ordered sequence of poses. The index of a pose is its position in the
/// source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub poses: Vec<Transform>,
}

impl Trajectory {
    /// Adds a new pose to the end of the trajectory.
    pub fn push(&mut self, pose: Transform) {
        self.poses.push(pose);
    }

    /// Returns the number of poses in the trajectory.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns true if the trajectory is empty.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Returns the iterator over poses.
    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.poses.iter()
    }

    /// Creates a new trajectory with every pose right-multiplied by `rhs`,
    /// i.e. `pose * rhs`.
    pub fn right_multiply(&self, rhs: &Transform) -> Self {
        self.iter().map(|pose| pose * rhs).collect()
    }
}

impl FromIterator<Transform> for Trajectory {
    /// Use with the `collect::<Trajectory>` method.
    fn from_iter<T: IntoIterator<Item = Transform>>(iter: T) -> Self {
        Self {
            poses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}

impl Index<usize> for Trajectory {
    type Output = Transform;
    /// Returns the pose at the given index.
    fn index(&self, index: usize) -> &Self::Output {
        &self.poses[index]
    }
}
