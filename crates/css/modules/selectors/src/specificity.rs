use crate::{CompoundSelector, SimpleSelector};

/// `(ids, classes and attributes, types)`, compared lexicographically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u16, pub u16, pub u16);

impl Specificity {
    #[must_use]
    pub const fn add(self, other: Self) -> Self {
        Self(
            self.0.saturating_add(other.0),
            self.1.saturating_add(other.1),
            self.2.saturating_add(other.2),
        )
    }

    pub fn of_compound(compound: &CompoundSelector) -> Self {
        compound
            .simples
            .iter()
            .fold(Self::default(), |total, simple| {
                let single = match simple {
                    SimpleSelector::Id(_) => Self(1, 0, 0),
                    SimpleSelector::Class(_)
                    | SimpleSelector::AttrExists(_)
                    | SimpleSelector::AttrEquals { .. } => Self(0, 1, 0),
                    SimpleSelector::Type(_) => Self(0, 0, 1),
                    SimpleSelector::Universal => Self(0, 0, 0),
                };
                total.add(single)
            })
    }
}
