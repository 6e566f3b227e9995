//! List-valued fields that distinguish "declared empty" from "undeclared".

/// A list field as declared at one node.
///
/// A declared but empty list is `Replace(vec![])` and suppresses inherited
/// entries; an undeclared list is `Unset` and inherits.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ListSetting<T> {
    /// Not declared; the parent's entries pass through.
    #[default]
    Unset,
    /// Declared; discards the parent's entries.
    Replace(Vec<T>),
    /// Declared; appends to the parent's entries, skipping ones already present.
    Extend(Vec<T>),
}

/// How a non-empty declaration combines with inherited entries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListMode {
    /// Child entries replace the parent's.
    Replace,
    /// Child entries follow the parent's.
    Accumulate,
}

impl<T: Clone + PartialEq> ListSetting<T> {
    /// Interpret an optional declaration under `mode`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::declared::{ListMode, ListSetting};
    ///
    /// assert_eq!(ListSetting::<u8>::declared(None, ListMode::Accumulate), ListSetting::Unset);
    /// assert_eq!(
    ///     ListSetting::<u8>::declared(Some(Vec::new()), ListMode::Accumulate),
    ///     ListSetting::Replace(Vec::new())
    /// );
    /// assert_eq!(
    ///     ListSetting::declared(Some(vec![1]), ListMode::Accumulate),
    ///     ListSetting::Extend(vec![1])
    /// );
    /// ```
    #[must_use]
    pub fn declared(items: Option<Vec<T>>, mode: ListMode) -> Self {
        match items {
            None => Self::Unset,
            Some(items) if items.is_empty() => Self::Replace(items),
            Some(items) => match mode {
                ListMode::Replace => Self::Replace(items),
                ListMode::Accumulate => Self::Extend(items),
            },
        }
    }

    /// Overlay `child` on `self`.
    #[must_use]
    pub fn overlay(&self, child: &Self) -> Self {
        match (self, child) {
            (parent, Self::Unset) => parent.clone(),
            (_, Self::Replace(items)) => Self::Replace(items.clone()),
            (Self::Unset, Self::Extend(items)) => Self::Extend(concat(&[], items)),
            (Self::Replace(parent), Self::Extend(items)) => Self::Replace(concat(parent, items)),
            (Self::Extend(parent), Self::Extend(items)) => Self::Extend(concat(parent, items)),
        }
    }

    /// The resolved entries; empty when unset.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Unset => &[],
            Self::Replace(items) | Self::Extend(items) => items,
        }
    }

    /// Returns `true` when no node declared the list.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Append `child` to `parent`, keeping only the first occurrence of each entry.
fn concat<T: Clone + PartialEq>(parent: &[T], child: &[T]) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(parent.len() + child.len());
    for item in parent.iter().chain(child) {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ListSetting::{Extend, Replace, Unset};
    use super::ListSetting;

    #[rstest]
    #[case(Extend(vec![1]), Unset, Extend(vec![1]))]
    #[case(Extend(vec![1]), Extend(vec![2]), Extend(vec![1, 2]))]
    #[case(Replace(vec![1]), Extend(vec![2]), Replace(vec![1, 2]))]
    #[case(Extend(vec![1]), Replace(vec![]), Replace(vec![]))]
    #[case(Unset, Extend(vec![2]), Extend(vec![2]))]
    #[case(Extend(vec![1, 2]), Extend(vec![2, 3]), Extend(vec![1, 2, 3]))]
    #[case(Replace(vec![1]), Extend(vec![1, 1]), Replace(vec![1]))]
    #[case(Unset, Extend(vec![5, 5]), Extend(vec![5]))]
    fn overlay_applies_child_declaration(
        #[case] parent: ListSetting<u8>,
        #[case] child: ListSetting<u8>,
        #[case] expected: ListSetting<u8>,
    ) {
        assert_eq!(parent.overlay(&child), expected);
    }

    #[rstest]
    fn left_fold_is_associative() {
        let a = Extend(vec![1]);
        let b = Replace(vec![2]);
        let c = Extend(vec![3]);
        assert_eq!(a.overlay(&b).overlay(&c), a.overlay(&b.overlay(&c)));
    }

    #[rstest]
    fn unset_reads_as_empty() {
        assert!(ListSetting::<u8>::Unset.items().is_empty());
        assert!(ListSetting::<u8>::Unset.is_unset());
        assert_eq!(Extend(vec![4_u8]).items(), &[4]);
    }
}
