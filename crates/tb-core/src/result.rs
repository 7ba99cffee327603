//! Result type aliases

use crate::error::TbError;
use crate::traits::{Entity, Id};

/// Standard Result type for Taskboard operations
pub type TbResult<T> = Result<T, TbError>;

/// Turns a missing lookup into a `TbError::NotFound` for entity `E`
pub trait OrNotFound<T> {
    fn or_not_found<E: Entity>(self, id: Id) -> TbResult<T>;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found<E: Entity>(self, id: Id) -> TbResult<T> {
        self.ok_or_else(|| TbError::not_found(E::TYPE_NAME, id))
    }
}
