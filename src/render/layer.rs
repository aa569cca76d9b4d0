use serde::{Deserialize, Serialize};

/// Paint order of one render pass; commands of a later layer never precede
/// commands of an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DrawLayer {
    Background,
    Grid,
    Series,
    Labels,
    Debug,
}

impl DrawLayer {
    #[must_use]
    pub const fn canonical_order() -> [Self; 5] {
        [
            Self::Background,
            Self::Grid,
            Self::Series,
            Self::Labels,
            Self::Debug,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::DrawLayer;

    #[test]
    fn canonical_order_is_sorted() {
        let order = DrawLayer::canonical_order();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(order[0], DrawLayer::Background);
        assert_eq!(order[4], DrawLayer::Debug);
    }
}
