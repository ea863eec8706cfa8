use super::geometry::Size;

/// Decorative props shown next to the pet during activities
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneId {
    Bathtub,
    Toaster,
    Bush,
}

impl SceneId {
    pub const ALL: [SceneId; 3] = [SceneId::Bathtub, SceneId::Toaster, SceneId::Bush];

    pub fn index(self) -> usize {
        match self {
            SceneId::Bathtub => 0,
            SceneId::Toaster => 1,
            SceneId::Bush => 2,
        }
    }

    pub fn size(self) -> Size {
        match self {
            SceneId::Bathtub => Size::new(160.0, 90.0),
            SceneId::Toaster => Size::new(110.0, 90.0),
            SceneId::Bush => Size::new(130.0, 110.0),
        }
    }

    /// Whether the pet steps inside the prop rather than standing beside it
    pub fn is_enterable(self) -> bool {
        matches!(self, SceneId::Bathtub)
    }

    pub fn key(self) -> &'static str {
        match self {
            SceneId::Bathtub => "bathtub",
            SceneId::Toaster => "toaster",
            SceneId::Bush => "bush",
        }
    }
}
