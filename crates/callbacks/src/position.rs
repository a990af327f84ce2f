//! Where registered packs end up in the host's pack list.

/// Insertion point of registered packs, from lowest to highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackPosition {
    /// Before every other pack; even built-in content overrides these packs.
    BeforeAll,
    /// After every other pack; these packs override everything.
    AfterAll,
    /// Right after the built-in pack; user packs still override these.
    AfterVanilla,
    /// Listed with user packs at the bottom. Users can see and disable them.
    BeforeUser,
    /// Listed with user packs at the top. Users can see and disable them.
    AfterUser,
}

/// End of the user pack list a pack is placed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertionPosition {
    /// Lowest priority end.
    Bottom,
    /// Highest priority end.
    Top,
}

impl PackPosition {
    /// Every position.
    pub const ALL: [PackPosition; 5] = [
        PackPosition::BeforeAll,
        PackPosition::AfterAll,
        PackPosition::AfterVanilla,
        PackPosition::BeforeUser,
        PackPosition::AfterUser,
    ];

    /// Placement within the user pack list, for the user-visible positions.
    pub fn user_insertion(self) -> Option<InsertionPosition> {
        match self {
            PackPosition::BeforeUser => Some(InsertionPosition::Bottom),
            PackPosition::AfterUser => Some(InsertionPosition::Top),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_user_positions_have_an_insertion_end() {
        let user: Vec<_> = PackPosition::ALL
            .into_iter()
            .filter_map(|pos| pos.user_insertion().map(|end| (pos, end)))
            .collect();
        assert_eq!(
            user,
            vec![
                (PackPosition::BeforeUser, InsertionPosition::Bottom),
                (PackPosition::AfterUser, InsertionPosition::Top),
            ]
        );
    }
}
