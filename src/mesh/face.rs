use super::ElementId;

/// Address of one face of one Element: the Element's id and the local face index from its type's catalog entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceRef {
    pub element: ElementId,
    pub face: usize,
}

impl FaceRef {
    pub const fn new(element: ElementId, face: usize) -> Self {
        Self { element, face }
    }
}
