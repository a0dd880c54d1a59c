use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProjectId(i64);

impl ProjectId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl AsRef<i64> for ProjectId {
    fn as_ref(&self) -> &i64 {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
