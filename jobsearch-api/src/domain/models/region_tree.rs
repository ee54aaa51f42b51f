use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::RegionName;

/// City → district → towns, the shape consumed by cascading region pickers.
///
/// Ordered maps and sorted, de-duplicated town lists keep the serialized form
/// stable for identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionTree(BTreeMap<String, BTreeMap<String, Vec<String>>>);

impl RegionTree {
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = RegionName>,
    {
        let mut grouped: BTreeMap<String, BTreeMap<String, BTreeSet<String>>> = BTreeMap::new();
        for name in names {
            grouped
                .entry(name.city)
                .or_default()
                .entry(name.district)
                .or_default()
                .insert(name.town);
        }

        let tree = grouped
            .into_iter()
            .map(|(city, districts)| {
                let districts = districts
                    .into_iter()
                    .map(|(district, towns)| (district, towns.into_iter().collect()))
                    .collect();
                (city, districts)
            })
            .collect();

        Self(tree)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn stats(&self) -> RegionTreeStats {
        let districts = self.0.values().map(BTreeMap::len).sum();
        let towns = self
            .0
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum();

        RegionTreeStats {
            cities: self.0.len(),
            districts,
            towns,
        }
    }
}

/// Node counts of a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegionTreeStats {
    pub cities: usize,
    pub districts: usize,
    pub towns: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_sorts_towns() {
        let tree = RegionTree::from_names(vec![
            RegionName::new("서울특별시", "강남구", "역삼동"),
            RegionName::new("서울특별시", "강남구", "도곡동"),
            RegionName::new("인천광역시", "부평구", "부평동"),
            RegionName::new("인천광역시", "부평구", "부개동"),
            RegionName::new("서울특별시", "강남구", "역삼동"),
        ]);

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "서울특별시": {"강남구": ["도곡동", "역삼동"]},
                "인천광역시": {"부평구": ["부개동", "부평동"]},
            })
        );
        assert_eq!(
            tree.stats(),
            RegionTreeStats {
                cities: 2,
                districts: 2,
                towns: 4
            }
        );
    }

    #[test]
    fn serialization_is_independent_of_input_order() {
        let names = vec![
            RegionName::new("b", "y", "2"),
            RegionName::new("a", "x", "1"),
            RegionName::new("b", "y", "1"),
        ];
        let reversed = names.iter().rev().cloned().collect::<Vec<_>>();

        let first = serde_json::to_string(&RegionTree::from_names(names)).unwrap();
        let second = serde_json::to_string(&RegionTree::from_names(reversed)).unwrap();
        assert_eq!(first, second);
    }
}
