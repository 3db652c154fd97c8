use crate::model::IngredientId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ingredient quantities needed by an order, ordered by id.
///
/// The ascending key order is also the lock order used by the
/// [`IngredientStore`](crate::inventory::IngredientStore). Zero entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements(BTreeMap<IngredientId, u32>);

impl Requirements {
    /// recipe + additions - subtractions, floored at zero per ingredient.
    pub fn effective(
        recipe: &BTreeMap<IngredientId, u32>,
        additions: &BTreeMap<IngredientId, u32>,
        subtractions: &BTreeMap<IngredientId, u32>,
    ) -> Self {
        let mut totals = recipe.clone();
        for (id, qty) in additions {
            let entry = totals.entry(*id).or_insert(0);
            *entry = entry.saturating_add(*qty);
        }
        for (id, qty) in subtractions {
            if let Some(entry) = totals.get_mut(id) {
                *entry = entry.saturating_sub(*qty);
            }
        }
        totals.into_iter().collect()
    }

    pub fn get(&self, id: IngredientId) -> u32 {
        self.0.get(&id).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IngredientId, u32)> + '_ {
        self.0.iter().map(|(id, qty)| (*id, *qty))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(IngredientId, u32)> for Requirements {
    fn from_iter<I: IntoIterator<Item = (IngredientId, u32)>>(iter: I) -> Self {
        let mut map = BTreeMap::new();
        for (id, qty) in iter {
            let entry: &mut u32 = map.entry(id).or_insert(0);
            *entry = entry.saturating_add(qty);
        }
        map.retain(|_, qty| *qty > 0);
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(u32, u32)]) -> BTreeMap<IngredientId, u32> {
        entries.iter().map(|(id, q)| (IngredientId(*id), *q)).collect()
    }

    #[test]
    fn test_effective_floors_and_drops_zeros() {
        let recipe = map(&[(1, 1), (2, 2), (3, 1)]);
        let additions = map(&[(2, 1), (4, 3)]);
        let subtractions = map(&[(1, 5), (3, 1), (9, 2)]);

        let req = Requirements::effective(&recipe, &additions, &subtractions);

        assert_eq!(req.get(IngredientId(1)), 0);
        assert_eq!(req.get(IngredientId(2)), 3);
        assert_eq!(req.get(IngredientId(4)), 3);
        assert_eq!(req.get(IngredientId(9)), 0);
        // Only the non-zero entries survive, in ascending id order.
        let ids: Vec<u32> = req.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_collect_merges_duplicates() {
        let req: Requirements = vec![
            (IngredientId(3), 1),
            (IngredientId(1), 2),
            (IngredientId(3), 4),
            (IngredientId(2), 0),
        ]
        .into_iter()
        .collect();
        assert_eq!(req.len(), 2);
        assert_eq!(req.get(IngredientId(3)), 5);
    }
}
