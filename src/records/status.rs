use derive_more::Display;

use super::RecordError;

/// Change kind reported by `git diff-tree --name-status` for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Status {
    #[display("A")]
    Added,
    #[display("M")]
    Modified,
    #[display("D")]
    Deleted,
    #[display("T")]
    TypeChanged,
}

impl TryFrom<&str> for Status {
    type Error = RecordError;

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        match code {
            "A" => Ok(Status::Added),
            "M" => Ok(Status::Modified),
            "D" => Ok(Status::Deleted),
            "T" => Ok(Status::TypeChanged),
            _ => Err(RecordError::UnknownStatus {
                code: code.to_string(),
            }),
        }
    }
}
