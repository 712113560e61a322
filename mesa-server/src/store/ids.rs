//! Identity & Ordering Assigner
//!
//! Pure functions over existing collections. Ids and orders are
//! `max + 1` with an empty collection treated as max 0, so the first
//! value is always 1. Numeric-text ids are compared numerically, never
//! lexicographically ("9" < "10").
//!
//! Not safe under concurrent writers; the stores assume a single admin
//! writing at a time.

/// Next integer id for a numeric-id collection.
pub fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0).max(0) + 1
}

/// Next id for a string-id collection holding numeric text. Ids that do
/// not parse as integers are ignored.
pub fn next_string_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<i64>().ok()).max().unwrap_or(0);
    (max.max(0) + 1).to_string()
}

/// Next order position; members without an order count as 0.
pub fn next_order(orders: impl Iterator<Item = Option<i64>>) -> i64 {
    orders.map(|o| o.unwrap_or(0)).max().unwrap_or(0).max(0) + 1
}

/// Assign `order = index + 1` in the submitted display sequence.
pub fn renumber<T>(items: &mut [T], mut set_order: impl FnMut(&mut T, i64)) {
    for (index, item) in items.iter_mut().enumerate() {
        set_order(item, index as i64 + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_on_empty_collection_is_one() {
        assert_eq!(next_id(std::iter::empty()), 1);
    }

    #[test]
    fn next_id_is_strictly_greater_than_every_member() {
        let ids = [3i64, 7, 5];
        let next = next_id(ids.iter().copied());
        assert_eq!(next, 8);
        assert!(ids.iter().all(|&id| next > id));
    }

    #[test]
    fn string_ids_compare_numerically() {
        let ids = ["9", "10", "2"];
        assert_eq!(next_string_id(ids.iter().copied()), "11");
    }

    #[test]
    fn non_numeric_string_ids_are_ignored() {
        let ids = ["draft", "4"];
        assert_eq!(next_string_id(ids.iter().copied()), "5");
        assert_eq!(next_string_id(std::iter::empty()), "1");
    }

    #[test]
    fn next_order_treats_missing_as_zero() {
        assert_eq!(next_order([None, Some(2), None].into_iter()), 3);
        assert_eq!(next_order(std::iter::empty()), 1);
    }

    #[test]
    fn renumber_assigns_positions_in_sequence() {
        let mut orders = [(1i64, 5i64), (2, 1), (3, 9)];
        renumber(&mut orders, |item, order| item.1 = order);
        assert_eq!(orders.map(|o| o.1), [1, 2, 3]);
    }
}
