//! Behaviour shared by editable content documents.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{error::MergeError, types::DocumentKind};

/// A stored document that accepts presence-tracked patches.
///
/// Merging works on the stored record: present patch fields replace, absent
/// fields keep the stored value byte for byte. `merge(record, empty patch)`
/// returns the record unchanged.
pub trait ContentDocument: Clone + Send + Sync + 'static {
    type Patch: Send + 'static;
    type View: Serialize + Send + 'static;

    const KIND: DocumentKind;

    fn id(&self) -> Uuid;

    /// Row created on first read of a singleton kind. `None` for kinds that
    /// have no default row.
    fn initial(id: Uuid, now: OffsetDateTime) -> Option<Self>;

    fn merge(self, patch: Self::Patch) -> Result<Self, MergeError>;

    fn touch(&mut self, now: OffsetDateTime);

    /// Decoded, reconciled representation served to clients.
    fn view(&self) -> Self::View;
}
